//! Feature catalog loader
//!
//! Reads one nomenclature file per body and turns every matching line into a
//! [`FeatureRecord`]. Nothing here fails towards the caller: missing files
//! and unknown bodies are skipped, malformed lines are reported and skipped,
//! and a partially broken file still contributes the lines that parsed.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::body::{BodyHandle, BodyResolver};
use crate::core::models::FeatureRecord;
use crate::core::parser::{parse_line, LineKind};
use crate::core::resolver::FileResolver;

/// Directory holding nomenclature files, relative to a data root
pub const NOMENCLATURE_DIR: &str = "data/nomenclature";

/// Extension of nomenclature files
pub const NOMENCLATURE_EXTENSION: &str = "fab";

/// Relative path of the nomenclature file for a body
pub fn nomenclature_file(body_name: &str) -> String {
    format!(
        "{}/{}.{}",
        NOMENCLATURE_DIR,
        body_name.to_lowercase(),
        NOMENCLATURE_EXTENSION
    )
}

/// A record attempt that did not match the line schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub file: PathBuf,
    /// 1-based line number
    pub line: usize,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot parse record at line {} in surface nomenclature file {}",
            self.line,
            self.file.display()
        )
    }
}

/// Per-body outcome of a load pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyLoadStats {
    pub body: String,
    pub file: PathBuf,
    pub succeeded: usize,
    pub attempted: usize,
}

/// Outcome of a whole load pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// One entry per body that had a nomenclature file
    pub bodies: Vec<BodyLoadStats>,
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl LoadReport {
    pub fn total_succeeded(&self) -> usize {
        self.bodies.iter().map(|b| b.succeeded).sum()
    }

    pub fn total_attempted(&self) -> usize {
        self.bodies.iter().map(|b| b.attempted).sum()
    }

    pub fn failure_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn stats_for(&self, body: &str) -> Option<&BodyLoadStats> {
        self.bodies.iter().find(|b| b.body == body)
    }
}

/// Builds catalog records from nomenclature files
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load the nomenclature of every listed body, in list order
    pub fn load<I, S>(
        &self,
        body_names: I,
        files: &dyn FileResolver,
        bodies: &dyn BodyResolver,
    ) -> (Vec<FeatureRecord>, LoadReport)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        let mut report = LoadReport::default();

        for name in body_names {
            let name = name.as_ref();

            // Most bodies have no nomenclature at all
            let Some(path) = files.find_file(&nomenclature_file(name)) else {
                debug!(body = name, "no surface nomenclature file");
                continue;
            };

            let Some(handle) = bodies.resolve(name) else {
                info!(body = name, "Loaded 0 / 0 items of surface nomenclature");
                report.bodies.push(BodyLoadStats {
                    body: name.to_string(),
                    file: path,
                    succeeded: 0,
                    attempted: 0,
                });
                continue;
            };

            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "cannot open surface nomenclature file");
                    continue;
                }
            };
            let source = String::from_utf8_lossy(&bytes);

            let stats = self.read_records(
                name,
                &path,
                &source,
                handle,
                bodies,
                &mut records,
                &mut report.diagnostics,
            );
            info!(
                body = name,
                "Loaded {} / {} items of surface nomenclature", stats.succeeded, stats.attempted
            );
            report.bodies.push(stats);
        }

        (records, report)
    }

    #[allow(clippy::too_many_arguments)]
    fn read_records(
        &self,
        body_name: &str,
        file: &Path,
        source: &str,
        handle: BodyHandle,
        bodies: &dyn BodyResolver,
        records: &mut Vec<FeatureRecord>,
        diagnostics: &mut Vec<ParseDiagnostic>,
    ) -> BodyLoadStats {
        let mut attempted = 0;
        let mut succeeded = 0;

        for (index, line) in source.lines().enumerate() {
            match parse_line(line) {
                LineKind::Comment => {}
                LineKind::Malformed => {
                    attempted += 1;
                    let diagnostic = ParseDiagnostic {
                        file: file.to_path_buf(),
                        line: index + 1,
                    };
                    warn!("{}", diagnostic);
                    diagnostics.push(diagnostic);
                }
                LineKind::Record(parsed) => {
                    attempted += 1;
                    let mut record = FeatureRecord::new(parsed, handle);
                    if !record.initialize(bodies) {
                        debug!(id = %record.id, body = body_name, "parent body has no pose");
                    }
                    records.push(record);
                    succeeded += 1;
                }
            }
        }

        BodyLoadStats {
            body: body_name.to_string(),
            file: file.to_path_buf(),
            succeeded,
            attempted,
        }
    }
}
