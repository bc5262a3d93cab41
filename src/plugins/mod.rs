//! Plugins for the planetarium host
//!
//! A plugin is a factory: it describes itself through [`PluginInfo`] and
//! hands the host a fresh [`HostModule`] when asked.
//!
//! # Available Plugins
//!
//! - **Observing Lists** - management of observing lists (UI only)

pub mod observing_lists;

use serde::{Deserialize, Serialize};

use crate::host::HostModule;

pub use observing_lists::{ObservingLists, ObservingListsPlugin};

/// Descriptive metadata shown in the host's plugin list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub id: String,
    pub displayed_name: String,
    pub authors: String,
    pub contact: String,
    pub description: String,
    pub version: String,
    pub license: String,
}

/// Entry point the host calls after discovering a plugin
pub trait PluginInterface {
    fn plugin_info(&self) -> PluginInfo;

    fn create_module(&self) -> Box<dyn HostModule>;
}

/// Plugins compiled into this crate
pub fn builtin_plugins() -> Vec<Box<dyn PluginInterface>> {
    vec![Box::new(ObservingListsPlugin)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_plugins_have_unique_ids() {
        let plugins = builtin_plugins();
        let mut ids: Vec<String> = plugins.iter().map(|p| p.plugin_info().id).collect();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_module_name_matches_plugin_id() {
        for plugin in builtin_plugins() {
            let module = plugin.create_module();
            assert_eq!(module.name(), plugin.plugin_info().id);
        }
    }
}
