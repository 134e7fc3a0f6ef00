//! gbsproj Engine library.
//!
//! Upgrades persisted game projects to the schema the current editor expects.
//!
//! ## Structure
//!
//! - `use_cases/` - schema migration and the project-load flow built on it
//! - `infrastructure/` - command catalog, project files, runner settings

pub mod infrastructure;
pub mod use_cases;

pub use use_cases::migration::{MigrationError, MigrationReport, Migrator};
pub use use_cases::project_load::{LoadError, ProjectLoader};
