//! Project schema migration.
//!
//! A project saved by any supported editor release is upgraded, on load, to
//! the schema this engine reads and writes. Each release transition is one
//! pure stage function over the typed document; the [`Migrator`] picks the
//! stages a document still needs from its `_version` / `_release` markers.
//!
//! - `symbols` - C-safe symbol generation with per-namespace collision handling
//! - `walker` - generic traversal of every event list in a project
//! - `rules` - command id to argument rewrite table, built from the command catalog
//! - `stages` - the release transitions
//! - `pipeline` - stage selection and version stamping

pub mod pipeline;
pub mod rules;
pub mod stages;
pub mod symbols;
pub mod unique_symbols;
pub mod walker;


pub use pipeline::{MigrationError, MigrationReport, Migrator};
pub use rules::{RewriteContext, RewriteRules, ScriptScope};
pub use stages::{MigrationStage, CURRENT_VERSION, OLDEST_SUPPORTED_VERSION};
pub use symbols::{gen_symbol, to_valid_symbol, SymbolKind, SymbolNamespace};
pub use unique_symbols::ensure_symbols_unique;
