//! Use cases - User story orchestration.
//!
//! - `migration` - upgrading a project document between schema releases
//! - `project_load` - reading a project file and migrating it on open

pub mod migration;
pub mod project_load;

pub use migration::Migrator;
pub use project_load::ProjectLoader;
