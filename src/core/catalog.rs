//! The nomenclature catalog
//!
//! An ordered, load-once collection of [`FeatureRecord`]s with:
//!
//! - angular proximity search over cached positions (linear scan),
//! - case-insensitive name lookup, English or localized, first match wins,
//! - catalog-wide label visibility and color, announced through
//!   [`CatalogEvent`] listeners.
//!
//! Every query surface is gated by [`Catalog::labels_enabled`] and skips
//! records that were never initialized against their parent body.

use std::fmt;

use glam::DVec3;
use tracing::debug;

use crate::core::body::BodyResolver;
use crate::core::i18n::Translator;
use crate::core::loader::{CatalogLoader, LoadReport};
use crate::core::models::{Color, FeatureRecord};
use crate::core::resolver::FileResolver;

/// Slack on the cosine comparison so a record sitting exactly on the
/// search radius is not lost to rounding
pub const COS_EPSILON: f64 = 1e-12;

/// Configuration shared by every record of one catalog
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CatalogConfig {
    pub color: Color,
}

/// Change notifications emitted by a catalog
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogEvent {
    /// The aggregate label flag flipped
    LabelsToggled(bool),
    /// The shared color was set (emitted even if unchanged)
    ColorChanged(Color),
}

type Listener = Box<dyn FnMut(&CatalogEvent)>;

/// In-memory database of surface features
#[derive(Default)]
pub struct Catalog {
    records: Vec<FeatureRecord>,
    config: CatalogConfig,
    listeners: Vec<Listener>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("records", &self.records.len())
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Catalog {
    /// Empty catalog
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            records: Vec::new(),
            config,
            listeners: Vec::new(),
        }
    }

    /// Catalog over already built records, kept in the given order
    pub fn from_records(config: CatalogConfig, records: Vec<FeatureRecord>) -> Self {
        Self {
            records,
            config,
            listeners: Vec::new(),
        }
    }

    /// Register a change listener
    pub fn subscribe(&mut self, listener: impl FnMut(&CatalogEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: CatalogEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Replace the whole content with a fresh load pass
    ///
    /// The previous records are dropped first. The current aggregate label
    /// state carries over to the new records without a notification.
    pub fn load<I, S>(
        &mut self,
        body_names: I,
        files: &dyn FileResolver,
        bodies: &dyn BodyResolver,
    ) -> LoadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels = self.labels_enabled();
        self.records.clear();

        let (records, report) = CatalogLoader::new().load(body_names, files, bodies);
        self.records = records;
        for record in &mut self.records {
            record.label_visible = labels;
        }

        debug!(
            records = self.records.len(),
            failures = report.failure_count(),
            "catalog loaded"
        );
        report
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Recompute cached positions from the current body poses
    pub fn refresh_positions(&mut self, bodies: &dyn BodyResolver) {
        for record in &mut self.records {
            record.refresh_position(bodies);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record, in load order
    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Records to draw: initialized with their own label flag set
    pub fn visible_records(&self) -> impl Iterator<Item = &FeatureRecord> + '_ {
        self.records
            .iter()
            .filter(|r| r.is_initialized() && r.label_visible)
    }

    /// Records reachable through the query surfaces
    fn eligible(&self) -> impl Iterator<Item = &FeatureRecord> + '_ {
        let gate = self.labels_enabled();
        self.records
            .iter()
            .filter(move |r| gate && r.is_initialized())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Records within `limit_fov_deg` of `direction`, in catalog order
    ///
    /// The boundary is inclusive.
    pub fn search_around(&self, direction: DVec3, limit_fov_deg: f64) -> Vec<&FeatureRecord> {
        let v = direction.normalize_or_zero();
        let cos_limit = limit_fov_deg.to_radians().cos();

        self.eligible()
            .filter(|r| r.position.normalize_or_zero().dot(v) >= cos_limit - COS_EPSILON)
            .collect()
    }

    /// Case-insensitive lookup on the English name
    pub fn search_by_english_name(&self, name: &str) -> Option<&FeatureRecord> {
        let wanted = name.to_uppercase();
        self.eligible()
            .find(|r| r.english_name.to_uppercase() == wanted)
    }

    /// Case-insensitive lookup on the localized name
    pub fn search_by_localized_name(&self, name: &str) -> Option<&FeatureRecord> {
        let wanted = name.to_uppercase();
        self.eligible()
            .find(|r| r.localized_name.to_uppercase() == wanted)
    }

    /// Exact lookup on the record id
    pub fn search_by_id(&self, id: &str) -> Option<&FeatureRecord> {
        self.eligible().find(|r| r.id == id)
    }

    /// All eligible names in catalog order
    pub fn list_all_names(&self, use_english: bool) -> Vec<String> {
        self.eligible()
            .map(|r| r.name(use_english).to_string())
            .collect()
    }

    /// Names starting with `prefix` (case-insensitive), sorted, at most
    /// `max_items` of them
    ///
    /// With `use_start_of_words` any word of the name may match, so `"imb"`
    /// finds "Mare Imbrium".
    pub fn list_matching_names(
        &self,
        prefix: &str,
        max_items: usize,
        use_start_of_words: bool,
        use_english: bool,
    ) -> Vec<String> {
        let wanted = prefix.to_uppercase();

        let mut result: Vec<String> = self
            .list_all_names(use_english)
            .into_iter()
            .filter(|name| {
                let upper = name.to_uppercase();
                if use_start_of_words {
                    upper
                        .split(|c: char| c.is_whitespace() || c == '-')
                        .any(|word| word.starts_with(&wanted))
                } else {
                    upper.starts_with(&wanted)
                }
            })
            .collect();

        // Exact spelling breaks ties so identical names end up adjacent
        result.sort_by(|a, b| {
            a.to_uppercase()
                .cmp(&b.to_uppercase())
                .then_with(|| a.cmp(b))
        });
        result.dedup();
        result.truncate(max_items);
        result
    }

    // -------------------------------------------------------------------------
    // Visibility & localization
    // -------------------------------------------------------------------------

    /// True iff any record has its label flag set
    pub fn labels_enabled(&self) -> bool {
        self.records.iter().any(|r| r.label_visible)
    }

    /// Force every record's label flag to `enabled`
    ///
    /// No-op, and no notification, when the aggregate already equals
    /// `enabled`. An empty catalog always reads as disabled, so enabling it
    /// notifies on every call.
    pub fn set_labels_enabled(&mut self, enabled: bool) {
        if self.labels_enabled() == enabled {
            return;
        }
        for record in &mut self.records {
            record.label_visible = enabled;
        }
        self.emit(CatalogEvent::LabelsToggled(enabled));
    }

    /// Recompute every localized name; English names and ids are untouched
    pub fn update_localization(&mut self, translator: &dyn Translator) {
        for record in &mut self.records {
            record.translate_name(translator);
        }
    }

    pub fn color(&self) -> Color {
        self.config.color
    }

    /// Set the shared color; always notifies
    pub fn set_color(&mut self, color: Color) {
        self.config.color = color;
        self.emit(CatalogEvent::ColorChanged(color));
    }
}
