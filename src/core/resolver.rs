//! Data file discovery
//!
//! Nomenclature files are looked up by relative path under an ordered list
//! of data roots. The first root holding the file wins, so user data shadows
//! the installation data.

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

/// Directory name used under the platform data directory
pub const APP_DIR_NAME: &str = "surface-nomenclature";

/// Locates data files; absence is a normal outcome
#[cfg_attr(test, automock)]
pub trait FileResolver {
    fn find_file(&self, relative: &str) -> Option<PathBuf>;
}

/// Resolver over an ordered list of data roots
#[derive(Debug, Clone, Default)]
pub struct DataDirResolver {
    roots: Vec<PathBuf>,
}

impl DataDirResolver {
    /// Resolver over exactly these roots
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        let mut resolver = Self::default();
        for root in roots {
            resolver.add_root(root);
        }
        resolver
    }

    /// Explicit roots first, then the user data directory, then the
    /// directory holding the executable
    pub fn with_default_roots(explicit: &[PathBuf]) -> Self {
        let mut resolver = Self::with_roots(explicit.to_vec());

        if let Some(data_dir) = dirs::data_dir() {
            resolver.add_root(data_dir.join(APP_DIR_NAME));
        }

        if let Some(install_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            resolver.add_root(install_dir);
        }

        resolver
    }

    /// Append a root unless it is already searched
    pub fn add_root(&mut self, root: PathBuf) {
        if !self.roots.contains(&root) {
            self.roots.push(root);
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl FileResolver for DataDirResolver {
    fn find_file(&self, relative: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(relative))
            .find(|candidate| candidate.is_file())
    }
}
