//! Host module layer
//!
//! The planetarium host drives its modules through [`HostModule`]: load,
//! per-frame update and render, unload. Draw order is negotiated by name:
//! a module states its order relative to other modules (for instance
//! "after SolarSystem"), and [`ModuleManager`] resolves those orders once
//! every module is loaded.
//!
//! Projection and painting stay on the host side behind [`Painter`].

pub mod nomenclature;

use std::collections::HashMap;

use glam::{DVec2, DVec3};
use tracing::debug;

use crate::core::body::{BodyHandle, BodyResolver};
use crate::core::error::{NomenclatureError, Result, ResultExt};
use crate::core::i18n::Translator;
use crate::core::models::{Color, FeatureRecord};
use crate::core::resolver::FileResolver;
use crate::core::settings::Settings;

pub use nomenclature::{NomenclatureModule, NOMENCLATURE_MODULE, SELECTION_KIND, SOLAR_SYSTEM_MODULE};

/// Host loop phases that are ordered between modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleAction {
    Draw,
    Update,
}

impl ModuleAction {
    pub const ALL: [ModuleAction; 2] = [ModuleAction::Draw, ModuleAction::Update];
}

/// Known call orders, by module name and action
#[derive(Debug, Clone, Default)]
pub struct CallOrders {
    orders: HashMap<(String, ModuleAction), f64>,
}

impl CallOrders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, module: impl Into<String>, action: ModuleAction, order: f64) {
        self.orders.insert((module.into(), action), order);
    }

    pub fn get(&self, module: &str, action: ModuleAction) -> Option<f64> {
        self.orders.get(&(module.to_string(), action)).copied()
    }

    /// Order of a module another module depends on
    pub fn require(&self, module: &str, action: ModuleAction) -> Result<f64> {
        self.get(module, action)
            .ok_or_else(|| NomenclatureError::unknown_module(module))
    }
}

/// Everything a module may read while loading
pub struct HostContext<'a> {
    pub settings: &'a Settings,
    pub files: &'a dyn FileResolver,
    pub bodies: &'a dyn BodyResolver,
    /// English names of every body the host knows
    pub body_names: &'a [String],
    pub translator: &'a dyn Translator,
}

/// Host-side projection and drawing primitives
pub trait Painter {
    /// Screen position of a reference-frame point, `None` when off screen
    fn project(&self, position: DVec3) -> Option<DVec2>;

    fn draw_label(&mut self, screen: DVec2, text: &str, color: Color);

    /// Animated selection marker
    fn draw_pointer(&mut self, screen: DVec2, color: Color, size: f64, angle_deg: f64);
}

/// The object currently selected in the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Kind of object, e.g. [`SELECTION_KIND`]
    pub kind: String,
    pub id: String,
    /// Owning body; feature ids are only unique per body
    pub body: Option<BodyHandle>,
}

impl Selection {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            body: None,
        }
    }

    /// Selection of exactly this feature record
    pub fn feature(record: &FeatureRecord) -> Self {
        Self {
            kind: SELECTION_KIND.to_string(),
            id: record.id.clone(),
            body: Some(record.parent_body),
        }
    }

    /// Whether this selection designates `record`
    pub fn is_feature(&self, record: &FeatureRecord) -> bool {
        self.kind == SELECTION_KIND
            && self.body == Some(record.parent_body)
            && self.id == record.id
    }
}

/// Per-frame drawing context
pub struct RenderFrame<'a> {
    pub painter: &'a mut dyn Painter,
    pub selection: Option<&'a Selection>,
    /// Host flag for the selected object pointer
    pub show_pointer: bool,
    /// Seconds since the host started
    pub run_time: f64,
}

/// Lifecycle implemented by every core module and plugin module
pub trait HostModule {
    fn name(&self) -> &str;

    fn on_load(&mut self, ctx: &HostContext<'_>) -> Result<()>;

    fn on_unload(&mut self);

    /// Position of this module in the host loop for `action`
    fn call_order(&self, action: ModuleAction, orders: &CallOrders) -> Result<f64>;

    fn update(&mut self, _bodies: &dyn BodyResolver, _delta_time: f64) {}

    fn render(&mut self, _frame: &mut RenderFrame<'_>) {}
}

/// Composition root holding the registered modules
#[derive(Default)]
pub struct ModuleManager {
    modules: Vec<Box<dyn HostModule>>,
    orders: CallOrders,
}

impl ModuleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the order of a module that lives outside this manager
    pub fn set_external_order(&mut self, module: impl Into<String>, action: ModuleAction, order: f64) {
        self.orders.set(module, action, order);
    }

    pub fn register(&mut self, module: Box<dyn HostModule>) {
        debug!(module = module.name(), "registering module");
        self.modules.push(module);
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Load every module in registration order, then resolve call orders
    pub fn load_all(&mut self, ctx: &HostContext<'_>) -> Result<()> {
        for module in &mut self.modules {
            let name = module.name().to_string();
            module
                .on_load(ctx)
                .context(format!("loading module {}", name))?;
        }
        self.resolve_orders()
    }

    /// Ask every module for its orders; a module may only depend on
    /// external modules or modules registered before it
    pub fn resolve_orders(&mut self) -> Result<()> {
        for action in ModuleAction::ALL {
            for module in &self.modules {
                let order = module.call_order(action, &self.orders)?;
                self.orders.set(module.name(), action, order);
            }
        }
        Ok(())
    }

    pub fn call_order(&self, module: &str, action: ModuleAction) -> Option<f64> {
        self.orders.get(module, action)
    }

    /// Module indices sorted by resolved order (stable on ties)
    fn sequence(&self, action: ModuleAction) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.modules.len()).collect();
        indices.sort_by(|&a, &b| {
            let order_a = self.orders.get(self.modules[a].name(), action).unwrap_or(0.0);
            let order_b = self.orders.get(self.modules[b].name(), action).unwrap_or(0.0);
            order_a.total_cmp(&order_b)
        });
        indices
    }

    /// Module names in draw order
    pub fn draw_order(&self) -> Vec<&str> {
        self.sequence(ModuleAction::Draw)
            .into_iter()
            .map(|i| self.modules[i].name())
            .collect()
    }

    pub fn update_all(&mut self, bodies: &dyn BodyResolver, delta_time: f64) {
        for index in self.sequence(ModuleAction::Update) {
            self.modules[index].update(bodies, delta_time);
        }
    }

    pub fn render_all(&mut self, frame: &mut RenderFrame<'_>) {
        for index in self.sequence(ModuleAction::Draw) {
            self.modules[index].render(frame);
        }
    }

    /// Unload in reverse registration order
    pub fn unload_all(&mut self) {
        for module in self.modules.iter_mut().rev() {
            module.on_unload();
        }
    }
}
