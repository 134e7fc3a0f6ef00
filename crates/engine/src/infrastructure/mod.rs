//! Infrastructure implementations.
//!
//! Everything that touches the outside world: the command catalog file,
//! project files on disk and environment settings.

pub mod catalog;
pub mod project_file;
pub mod settings;
