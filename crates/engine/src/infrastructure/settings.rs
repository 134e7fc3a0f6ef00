//! Runner settings, read from the environment.
//!
//! | Variable | Default | |
//! |---|---|---|
//! | `GBSPROJ_CATALOG_PATH` | unset | JSON command catalog replacing the built-in one |
//! | `GBSPROJ_ENSURE_UNIQUE_SYMBOLS` | `true` | Run the symbol uniqueness pass after migrating |

use std::path::PathBuf;

use crate::infrastructure::catalog::{CatalogError, CommandCatalog};

pub const CATALOG_PATH_VAR: &str = "GBSPROJ_CATALOG_PATH";
pub const ENSURE_UNIQUE_SYMBOLS_VAR: &str = "GBSPROJ_ENSURE_UNIQUE_SYMBOLS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerSettings {
    pub catalog_path: Option<PathBuf>,
    pub ensure_unique_symbols: bool,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            ensure_unique_symbols: true,
        }
    }
}

impl RunnerSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let catalog_path = lookup(CATALOG_PATH_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let ensure_unique_symbols = match lookup(ENSURE_UNIQUE_SYMBOLS_VAR) {
            None => defaults.ensure_unique_symbols,
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    var = ENSURE_UNIQUE_SYMBOLS_VAR,
                    value = %raw,
                    "Unrecognized boolean, using default"
                );
                defaults.ensure_unique_symbols
            }),
        };

        Self {
            catalog_path,
            ensure_unique_symbols,
        }
    }

    /// The configured catalog file, or the built-in table
    pub fn load_catalog(&self) -> Result<CommandCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => CommandCatalog::load(path),
            None => Ok(CommandCatalog::builtin()),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
