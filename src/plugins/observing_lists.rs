//! Observing Lists plugin
//!
//! The management dialog lives in the host UI; this module only takes part
//! in the lifecycle and remembers whether the dialog was requested.

use tracing::debug;

use crate::core::error::Result;
use crate::host::{CallOrders, HostContext, HostModule, ModuleAction};

use super::{PluginInfo, PluginInterface};

pub const OBSERVING_LISTS_ID: &str = "ObservingLists";

/// Module drawn after the landscape
pub const LANDSCAPE_MODULE: &str = "LandscapeMgr";

pub const OBSERVING_LISTS_LICENSE: &str = "GNU GPLv2 or later";

/// Plugin factory
#[derive(Debug, Clone, Copy, Default)]
pub struct ObservingListsPlugin;

impl PluginInterface for ObservingListsPlugin {
    fn plugin_info(&self) -> PluginInfo {
        PluginInfo {
            id: OBSERVING_LISTS_ID.to_string(),
            displayed_name: "Observing Lists".to_string(),
            authors: "Alexander Wolf".to_string(),
            contact: "https://github.com/Stellarium/stellarium".to_string(),
            description: "The tool for management of observing lists".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            license: OBSERVING_LISTS_LICENSE.to_string(),
        }
    }

    fn create_module(&self) -> Box<dyn HostModule> {
        Box::new(ObservingLists::new())
    }
}

#[derive(Debug, Default)]
pub struct ObservingLists {
    dialog_visible: bool,
}

impl ObservingLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the configuration dialog; always handled
    pub fn configure_gui(&mut self, show: bool) -> bool {
        if show {
            self.dialog_visible = true;
        }
        true
    }

    pub fn is_dialog_visible(&self) -> bool {
        self.dialog_visible
    }
}

impl HostModule for ObservingLists {
    fn name(&self) -> &str {
        OBSERVING_LISTS_ID
    }

    fn on_load(&mut self, _ctx: &HostContext<'_>) -> Result<()> {
        debug!("observing lists ready");
        Ok(())
    }

    fn on_unload(&mut self) {
        self.dialog_visible = false;
    }

    fn call_order(&self, action: ModuleAction, orders: &CallOrders) -> Result<f64> {
        match action {
            ModuleAction::Draw => Ok(orders.require(LANDSCAPE_MODULE, action)? + 10.0),
            ModuleAction::Update => Ok(0.0),
        }
    }
}
