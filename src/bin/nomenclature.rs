//! nomenclature CLI - inspect surface nomenclature catalogs
//!
//! Loads the catalog the same way the planetarium host does (bodies,
//! data roots, settings, locale) and runs a single query against it.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use glam::DVec3;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use surface_nomenclature::core::body::surface_unit;
use surface_nomenclature::core::{
    BodyRegistry, CatalogTranslator, DataDirResolver, FeatureRecord, IdentityTranslator, Settings,
    Translator,
};
use surface_nomenclature::host::{HostContext, HostModule, NomenclatureModule};

/// Inspect named surface features of solar-system bodies
#[derive(Parser, Debug)]
#[command(name = "nomenclature")]
#[command(version = surface_nomenclature::VERSION)]
#[command(about = "Inspect named surface features of solar-system bodies")]
#[command(after_help = "EXAMPLES:
  # How many features does each body carry?
  nomenclature -b bodies.json -d /usr/share/planetarium load

  # Features within half a degree of a direction
  nomenclature -b bodies.json -d data --labels around --lon 12.5 --lat -3 --fov 0.5

  # Localized lookup
  nomenclature -b bodies.json -d data --labels --locale de.json find Kopernikus --localized
")]
struct Cli {
    /// Body registry (JSON array of bodies)
    #[arg(short = 'b', long = "bodies", value_name = "FILE")]
    bodies: PathBuf,

    /// Data root holding data/nomenclature/*.fab (repeatable)
    #[arg(short = 'd', long = "data-dir", value_name = "DIR")]
    data_dirs: Vec<PathBuf>,

    /// Settings file (default: platform config dir)
    #[arg(short = 's', long = "settings", value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Locale table (JSON)
    #[arg(short = 'l', long = "locale", value_name = "FILE")]
    locale: Option<PathBuf>,

    /// Enable labels regardless of settings (queries need them)
    #[arg(long = "labels")]
    labels: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load every body and print per-body counts and parse failures
    Load,

    /// Features within a radius of a direction
    Around {
        /// Longitude of the direction, degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Latitude of the direction, degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Search radius, degrees
        #[arg(long, default_value_t = 1.0)]
        fov: f64,
    },

    /// Look a feature up by name (case-insensitive)
    Find {
        name: String,
        /// Match the localized name instead of the English one
        #[arg(long)]
        localized: bool,
    },

    /// List every feature name
    List {
        #[arg(long)]
        localized: bool,
    },

    /// Names starting with a prefix
    Complete {
        prefix: String,
        #[arg(long, default_value_t = 10)]
        max: usize,
        /// Match the start of any word
        #[arg(long)]
        words: bool,
        #[arg(long)]
        localized: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_record(record: &FeatureRecord) {
    println!(
        "{}\t{}\t{}\t{:.2}\t{:.2}\t{:.1}",
        record.id,
        record.localized_name,
        record.feature_type,
        record.latitude,
        record.longitude,
        record.size
    );
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let registry = BodyRegistry::load_from_file(&cli.bodies)
        .with_context(|| format!("cannot load bodies from {}", cli.bodies.display()))?;

    let settings = cli
        .settings
        .clone()
        .or_else(Settings::default_path)
        .map(|path| Settings::load_from_file(&path))
        .unwrap_or_default();

    let mut roots = cli.data_dirs.clone();
    roots.extend(settings.data_dirs.iter().cloned());
    let files = DataDirResolver::with_default_roots(&roots);

    let translator: Box<dyn Translator> = match &cli.locale {
        Some(path) => Box::new(CatalogTranslator::load_from_file(path)?),
        None => Box::new(IdentityTranslator),
    };

    let body_names = registry.english_names();
    let ctx = HostContext {
        settings: &settings,
        files: &files,
        bodies: &registry,
        body_names: &body_names,
        translator: translator.as_ref(),
    };

    let mut module = NomenclatureModule::new();
    module.on_load(&ctx)?;
    if cli.labels {
        module.catalog_mut().set_labels_enabled(true);
    }
    let catalog = module.catalog();

    match cli.command {
        Command::Load => {
            let report = module.last_report();
            for stats in &report.bodies {
                println!(
                    "{}: {} / {} items ({})",
                    stats.body,
                    stats.succeeded,
                    stats.attempted,
                    stats.file.display()
                );
            }
            for diagnostic in &report.diagnostics {
                println!("{}", diagnostic);
            }
            println!(
                "total: {} / {} items, {} parse failures",
                report.total_succeeded(),
                report.total_attempted(),
                report.failure_count()
            );
        }
        Command::Around { lon, lat, fov } => {
            let direction: DVec3 = surface_unit(lat, lon);
            for record in catalog.search_around(direction, fov) {
                print_record(record);
            }
        }
        Command::Find { name, localized } => {
            let found = if localized {
                catalog.search_by_localized_name(&name)
            } else {
                catalog.search_by_english_name(&name)
            };
            match found {
                Some(record) => print_record(record),
                None => bail!("no feature named {}", name),
            }
        }
        Command::List { localized } => {
            for name in catalog.list_all_names(!localized) {
                println!("{}", name);
            }
        }
        Command::Complete {
            prefix,
            max,
            words,
            localized,
        } => {
            for name in catalog.list_matching_names(&prefix, max, words, !localized) {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
