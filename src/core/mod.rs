//! Core module: the surface nomenclature catalog
//!
//! # Architecture
//!
//! - `parser`: line schema and comment detection for nomenclature files
//! - `models`: FeatureRecord and the shared label Color
//! - `body`: body registry, generational handles, BodyResolver trait
//! - `resolver`: FileResolver trait + data directory search
//! - `loader`: CatalogLoader and its LoadReport
//! - `catalog`: queries, visibility and localization state
//! - `i18n`: Translator trait and locale tables
//! - `settings`: persisted defaults
//! - `error`: error types using thiserror

pub mod body;
pub mod catalog;
pub mod error;
pub mod i18n;
pub mod loader;
pub mod models;
pub mod parser;
pub mod resolver;
pub mod settings;

// Re-export commonly used types
pub use body::{BodyHandle, BodyPose, BodyRegistry, BodyResolver, BodySpec, CelestialBody, AU_KM};
pub use catalog::{Catalog, CatalogConfig, CatalogEvent};
pub use error::{NomenclatureError, Result, ResultExt};
pub use i18n::{CatalogTranslator, IdentityTranslator, Translator};
pub use loader::{nomenclature_file, BodyLoadStats, CatalogLoader, LoadReport, ParseDiagnostic};
pub use models::{Color, FeatureRecord, DEFAULT_NOMENCLATURE_COLOR};
pub use parser::{parse_line, LineKind, ParsedRecord};
pub use resolver::{DataDirResolver, FileResolver};
pub use settings::Settings;
