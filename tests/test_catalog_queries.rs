//! Integration tests for catalog queries and state
//!
//! Covers the observable behavior of a loaded catalog:
//! - label toggling and its notifications
//! - proximity search boundaries
//! - exclusion of records whose body never resolved
//! - localization independence of English lookups
//! - color notifications

use std::cell::RefCell;
use std::rc::Rc;

use glam::{DQuat, DVec3};
use surface_nomenclature::core::body::surface_unit;
use surface_nomenclature::core::{
    BodyHandle, BodyPose, BodyRegistry, BodyResolver, Catalog, CatalogConfig, CatalogEvent,
    CatalogTranslator, CelestialBody, Color, FeatureRecord, ParsedRecord,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn parsed(id: &str, name: &str, latitude: f64, longitude: f64) -> ParsedRecord {
    ParsedRecord {
        id: id.to_string(),
        name: name.to_string(),
        feature_type: "crater".to_string(),
        latitude,
        longitude,
        size: 25.0,
    }
}

/// Moon at the origin so a record's direction is its planetographic unit vector
fn moon_registry() -> (BodyRegistry, BodyHandle) {
    let mut registry = BodyRegistry::new();
    let moon = registry.insert(CelestialBody::new(
        "Moon",
        BodyPose::new(DVec3::ZERO, 1737.4, DQuat::IDENTITY),
    ));
    (registry, moon)
}

fn catalog_of(registry: &BodyRegistry, handle: BodyHandle, entries: &[(&str, &str, f64, f64)]) -> Catalog {
    let records = entries
        .iter()
        .map(|(id, name, lat, lon)| {
            let mut record = FeatureRecord::new(parsed(id, name, *lat, *lon), handle);
            record.initialize(registry);
            record
        })
        .collect();
    Catalog::from_records(CatalogConfig::default(), records)
}

fn record_events(catalog: &mut Catalog) -> Rc<RefCell<Vec<CatalogEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    catalog.subscribe(move |event| sink.borrow_mut().push(*event));
    events
}

/// Resolves every name but never has a pose
struct PartialResolver;

impl BodyResolver for PartialResolver {
    fn resolve(&self, _english_name: &str) -> Option<BodyHandle> {
        Some(BodyHandle::from_raw(0, 0))
    }

    fn pose(&self, _handle: BodyHandle) -> Option<BodyPose> {
        None
    }
}

// =============================================================================
// Label Toggling
// =============================================================================

#[test]
fn test_repeated_enable_notifies_once() {
    let (registry, moon) = moon_registry();
    let mut catalog = catalog_of(&registry, moon, &[("1", "Tycho", 0.0, 0.0), ("2", "Clavius", 5.0, 5.0)]);
    let events = record_events(&mut catalog);

    catalog.set_labels_enabled(true);
    catalog.set_labels_enabled(true);
    catalog.set_labels_enabled(true);

    assert_eq!(*events.borrow(), vec![CatalogEvent::LabelsToggled(true)]);
    assert!(catalog.records().iter().all(|r| r.label_visible));
}

#[test]
fn test_toggle_round_trip_notifies_each_change() {
    let (registry, moon) = moon_registry();
    let mut catalog = catalog_of(&registry, moon, &[("1", "Tycho", 0.0, 0.0)]);
    let events = record_events(&mut catalog);

    catalog.set_labels_enabled(false);
    catalog.set_labels_enabled(true);
    catalog.set_labels_enabled(false);

    assert_eq!(
        *events.borrow(),
        vec![
            CatalogEvent::LabelsToggled(true),
            CatalogEvent::LabelsToggled(false)
        ]
    );
}

#[test]
fn test_queries_disabled_with_labels_off() {
    let (registry, moon) = moon_registry();
    let mut catalog = catalog_of(&registry, moon, &[("1", "Tycho", 0.0, 0.0)]);

    assert!(catalog.search_around(DVec3::X, 180.0).is_empty());
    assert!(catalog.search_by_english_name("Tycho").is_none());
    assert!(catalog.search_by_localized_name("Tycho").is_none());
    assert!(catalog.list_all_names(true).is_empty());
    assert!(catalog.list_matching_names("T", 5, false, true).is_empty());

    catalog.set_labels_enabled(true);
    assert_eq!(catalog.list_all_names(true), vec!["Tycho"]);
}

// =============================================================================
// Proximity Search
// =============================================================================

#[test]
fn test_search_boundary_is_inclusive() {
    let (registry, moon) = moon_registry();
    let mut catalog = catalog_of(&registry, moon, &[("edge", "Edge", 0.0, 10.0)]);
    catalog.set_labels_enabled(true);

    let hits = catalog.search_around(DVec3::X, 10.0);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "edge");

    assert!(catalog.search_around(DVec3::X, 9.9).is_empty());
}

#[test]
fn test_search_direction_need_not_be_normalized() {
    let (registry, moon) = moon_registry();
    let mut catalog = catalog_of(&registry, moon, &[("1", "A", 20.0, 30.0)]);
    catalog.set_labels_enabled(true);

    let direction = surface_unit(20.0, 30.0) * 1000.0;
    assert_eq!(catalog.search_around(direction, 0.1).len(), 1);
}

#[test]
fn test_search_around_zero_radius() {
    let (registry, moon) = moon_registry();
    let mut catalog = catalog_of(&registry, moon, &[("1", "A", 0.0, 0.0), ("2", "B", 0.0, 1.0)]);
    catalog.set_labels_enabled(true);

    let hits = catalog.search_around(DVec3::X, 0.0);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "1");
}

#[test]
fn test_search_around_whole_sky() {
    let (registry, moon) = moon_registry();
    let mut catalog = catalog_of(
        &registry,
        moon,
        &[("1", "A", 0.0, 0.0), ("2", "B", 0.0, 180.0), ("3", "C", -90.0, 0.0)],
    );
    catalog.set_labels_enabled(true);
    assert_eq!(catalog.search_around(DVec3::X, 180.0).len(), 3);
}

// =============================================================================
// Uninitialized Records
// =============================================================================

#[test]
fn test_body_without_pose_is_excluded() {
    let (registry, moon) = moon_registry();
    let mut good = FeatureRecord::new(parsed("1", "Tycho", 0.0, 0.0), moon);
    assert!(good.initialize(&registry));

    let mut orphan = FeatureRecord::new(parsed("2", "Orphan", 0.0, 0.0), BodyHandle::from_raw(0, 0));
    assert!(!orphan.initialize(&PartialResolver));

    let mut catalog = Catalog::from_records(CatalogConfig::default(), vec![good, orphan]);
    catalog.set_labels_enabled(true);

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.search_around(DVec3::X, 1.0).len(), 1);
    assert!(catalog.search_by_english_name("Orphan").is_none());
    assert!(catalog.search_by_id("2").is_none());
    assert_eq!(catalog.list_all_names(true), vec!["Tycho"]);
}

#[test]
fn test_removed_body_demotes_records() {
    let (mut registry, moon) = moon_registry();
    let mut catalog = catalog_of(&registry, moon, &[("1", "Tycho", 0.0, 0.0)]);
    catalog.set_labels_enabled(true);
    assert!(catalog.search_by_english_name("Tycho").is_some());

    registry.remove(moon);
    catalog.refresh_positions(&registry);

    assert!(catalog.search_by_english_name("Tycho").is_none());
    assert!(catalog.search_around(DVec3::X, 5.0).is_empty());

    // A new body in the same slot is not the old parent
    registry.insert(CelestialBody::new(
        "Moon",
        BodyPose::new(DVec3::ZERO, 1737.4, DQuat::IDENTITY),
    ));
    catalog.refresh_positions(&registry);
    assert!(catalog.search_by_english_name("Tycho").is_none());
}

// =============================================================================
// Localization
// =============================================================================

#[test]
fn test_english_lookup_ignores_localization() {
    let (registry, moon) = moon_registry();
    let mut catalog = catalog_of(&registry, moon, &[("IDX", "Copernicus", 9.62, 339.92)]);
    catalog.set_labels_enabled(true);

    let mut german = CatalogTranslator::new("de");
    german.insert("Copernicus", "Kopernikus");
    catalog.update_localization(&german);

    assert_eq!(catalog.search_by_english_name("copernicus").unwrap().id, "IDX");
    assert!(catalog.search_by_english_name("Kopernikus").is_none());
    assert_eq!(catalog.search_by_localized_name("KOPERNIKUS").unwrap().id, "IDX");

    let mut french = CatalogTranslator::new("fr");
    french.insert("Copernicus", "Copernic");
    catalog.update_localization(&french);

    assert_eq!(catalog.search_by_english_name("Copernicus").unwrap().id, "IDX");
    assert!(catalog.search_by_localized_name("Kopernikus").is_none());
    assert_eq!(catalog.list_all_names(false), vec!["Copernic"]);
}

#[test]
fn test_untranslated_names_fall_back_to_english() {
    let (registry, moon) = moon_registry();
    let mut catalog = catalog_of(&registry, moon, &[("1", "Tycho", 0.0, 0.0), ("2", "Copernicus", 1.0, 1.0)]);
    catalog.set_labels_enabled(true);

    let mut german = CatalogTranslator::new("de");
    german.insert("Copernicus", "Kopernikus");
    catalog.update_localization(&german);

    assert_eq!(catalog.list_all_names(false), vec!["Tycho", "Kopernikus"]);
}

#[test]
fn test_word_completion_on_localized_names() {
    let (registry, moon) = moon_registry();
    let mut catalog = catalog_of(&registry, moon, &[("1", "Sea of Rains", 0.0, 0.0)]);
    catalog.set_labels_enabled(true);

    let mut latin = CatalogTranslator::new("la");
    latin.insert("Sea of Rains", "Mare Imbrium");
    catalog.update_localization(&latin);

    assert_eq!(catalog.list_matching_names("imb", 5, true, false), vec!["Mare Imbrium"]);
    assert!(catalog.list_matching_names("imb", 5, true, true).is_empty());
}

// =============================================================================
// Color
// =============================================================================

#[test]
fn test_set_color_notifies_every_time() {
    let mut catalog = Catalog::new(CatalogConfig::default());
    let events = record_events(&mut catalog);
    let red = Color::new(1.0, 0.0, 0.0);

    catalog.set_color(red);
    catalog.set_color(red);

    assert_eq!(catalog.color(), red);
    assert_eq!(
        *events.borrow(),
        vec![CatalogEvent::ColorChanged(red), CatalogEvent::ColorChanged(red)]
    );
}

#[test]
fn test_default_color() {
    let catalog = Catalog::new(CatalogConfig::default());
    assert_eq!(catalog.color(), Color::new(0.1, 1.0, 0.1));
}
