//! Translation of feature names
//!
//! The catalog only needs a pure `english -> localized` function. Locale
//! tables are JSON documents:
//!
//! ```json
//! { "locale": "de", "messages": { "Copernicus": "Kopernikus" } }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{NomenclatureError, Result, ResultExt};

/// Locale-dependent name translation
pub trait Translator {
    fn translate(&self, text: &str) -> String;
}

/// Returns names unchanged (the English locale)
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Table-driven translator loaded from a locale file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogTranslator {
    pub locale: String,
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: HashMap::new(),
        }
    }

    /// Add or replace one message
    pub fn insert(&mut self, english: impl Into<String>, localized: impl Into<String>) {
        self.messages.insert(english.into(), localized.into());
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NomenclatureError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).context(format!("loading locale {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for CatalogTranslator {
    /// Untranslated names fall back to English
    fn translate(&self, text: &str) -> String {
        self.messages
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}
