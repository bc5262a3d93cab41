//! Nomenclature manager as a host module
//!
//! Owns the catalog for the lifetime of the host: loads it on startup,
//! applies the persisted color and label flag, refreshes positions every
//! update and draws labels plus the selection pointer after the solar
//! system has been drawn.

use tracing::info;

use crate::core::body::BodyResolver;
use crate::core::catalog::{Catalog, CatalogConfig};
use crate::core::error::Result;
use crate::core::i18n::Translator;
use crate::core::loader::LoadReport;

use super::{CallOrders, HostContext, HostModule, ModuleAction, RenderFrame};

pub const NOMENCLATURE_MODULE: &str = "NomenclatureMgr";

/// Module whose draw pass nomenclature labels follow
pub const SOLAR_SYSTEM_MODULE: &str = "SolarSystem";

/// Selection kind used for feature records
pub const SELECTION_KIND: &str = "NomenclatureItem";

/// Draw order offset after the solar system
const DRAW_ORDER_OFFSET: f64 = 10.0;

/// Selection pointer size in pixels
const POINTER_SIZE: f64 = 13.0;

/// Selection pointer spin, degrees per second
const POINTER_SPIN: f64 = 40.0;

#[derive(Debug, Default)]
pub struct NomenclatureModule {
    catalog: Catalog,
    last_report: LoadReport,
}

impl NomenclatureModule {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(CatalogConfig::default()),
            last_report: LoadReport::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Report of the most recent load pass
    pub fn last_report(&self) -> &LoadReport {
        &self.last_report
    }

    /// Clear and repopulate the catalog from the host's bodies
    pub fn reload(&mut self, ctx: &HostContext<'_>) -> &LoadReport {
        info!("Loading nomenclature for Solar system bodies ...");
        self.last_report = self.catalog.load(ctx.body_names, ctx.files, ctx.bodies);
        self.catalog.update_localization(ctx.translator);
        &self.last_report
    }

    /// Host locale changed
    pub fn language_changed(&mut self, translator: &dyn Translator) {
        self.catalog.update_localization(translator);
    }
}

impl HostModule for NomenclatureModule {
    fn name(&self) -> &str {
        NOMENCLATURE_MODULE
    }

    fn on_load(&mut self, ctx: &HostContext<'_>) -> Result<()> {
        self.reload(ctx);
        self.catalog.set_color(ctx.settings.color());
        self.catalog
            .set_labels_enabled(ctx.settings.flag_nomenclature_labels);
        Ok(())
    }

    fn on_unload(&mut self) {
        self.catalog.clear();
        self.last_report = LoadReport::default();
    }

    fn call_order(&self, action: ModuleAction, orders: &CallOrders) -> Result<f64> {
        match action {
            ModuleAction::Draw => Ok(orders.require(SOLAR_SYSTEM_MODULE, action)? + DRAW_ORDER_OFFSET),
            ModuleAction::Update => Ok(0.0),
        }
    }

    fn update(&mut self, bodies: &dyn BodyResolver, _delta_time: f64) {
        self.catalog.refresh_positions(bodies);
    }

    fn render(&mut self, frame: &mut RenderFrame<'_>) {
        let color = self.catalog.color();

        for record in self.catalog.visible_records() {
            if let Some(screen) = frame.painter.project(record.position) {
                frame.painter.draw_label(screen, &record.localized_name, color);
            }
        }

        // Pointer follows the selection whatever the label state
        if !frame.show_pointer {
            return;
        }
        let Some(selection) = frame.selection else {
            return;
        };
        let selected = self
            .catalog
            .records()
            .iter()
            .find(|r| r.is_initialized() && selection.is_feature(r));
        if let Some(record) = selected {
            if let Some(screen) = frame.painter.project(record.position) {
                frame
                    .painter
                    .draw_pointer(screen, color, POINTER_SIZE, frame.run_time * POINTER_SPIN);
            }
        }
    }
}
