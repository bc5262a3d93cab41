//! surface_nomenclature - Named surface features of solar-system bodies
//!
//! This library loads the per-body nomenclature files of a planetarium,
//! keeps the features in an in-memory catalog and answers the queries the
//! host needs: what is near this sky direction, what is called this name,
//! which names start with this prefix.
//!
//! # Architecture
//!
//! - **core**: catalog, loader, parser, bodies, settings, translation
//! - **host**: the module lifecycle the planetarium host drives, and the
//!   nomenclature manager module built on the catalog
//! - **plugins**: optional plugins (Observing Lists)
//! - **bin/nomenclature.rs**: thin CLI over the library
//!
//! # Example
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use glam::DVec3;
//! use surface_nomenclature::core::{BodyRegistry, Catalog, CatalogConfig, DataDirResolver};
//!
//! let bodies = BodyRegistry::load_from_file(Path::new("bodies.json")).unwrap();
//! let files = DataDirResolver::with_roots(vec![PathBuf::from("/usr/share/planetarium")]);
//!
//! let mut catalog = Catalog::new(CatalogConfig::default());
//! let report = catalog.load(bodies.english_names(), &files, &bodies);
//! println!("{} features loaded", report.total_succeeded());
//!
//! catalog.set_labels_enabled(true);
//! for feature in catalog.search_around(DVec3::X, 0.5) {
//!     println!("{} ({})", feature.english_name, feature.feature_type);
//! }
//! ```

pub mod core;
pub mod host;
pub mod plugins;

pub use crate::core::{
    Catalog, CatalogConfig, CatalogEvent, Color, FeatureRecord, LoadReport, NomenclatureError,
    Result,
};
pub use crate::host::{HostModule, ModuleManager, NomenclatureModule};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
