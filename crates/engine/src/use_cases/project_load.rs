//! Project load - read a project file and bring it up to the current schema.
//!
//! This is what the editor does once on opening a project, before anything
//! else touches the document.

use std::path::Path;

use gbsproj_domain::Project;

use crate::infrastructure::project_file::{read_project_json, write_project, ProjectFileError};
use crate::use_cases::migration::{ensure_symbols_unique, MigrationError, MigrationReport, Migrator};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    File(#[from] ProjectFileError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

/// Loads and migrates project files
#[derive(Debug, Clone)]
pub struct ProjectLoader {
    migrator: Migrator,
    ensure_unique_symbols: bool,
}

impl Default for ProjectLoader {
    fn default() -> Self {
        Self::new(Migrator::default())
    }
}

impl ProjectLoader {
    pub fn new(migrator: Migrator) -> Self {
        Self {
            migrator,
            ensure_unique_symbols: true,
        }
    }

    pub fn with_unique_symbols(mut self, enabled: bool) -> Self {
        self.ensure_unique_symbols = enabled;
        self
    }

    /// Migrates an already parsed project.
    ///
    /// Documents from a newer editor are returned untouched, symbols included.
    pub fn migrate(&self, project: Project) -> Result<(Project, MigrationReport), MigrationError> {
        let (project, report) = self.migrator.migrate_with_report(project)?;
        let project = if self.ensure_unique_symbols && report.to == self.migrator.current_version() {
            ensure_symbols_unique(project)
        } else {
            project
        };
        Ok((project, report))
    }

    /// Reads `path` and migrates it
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Project, MigrationReport), LoadError> {
        let value = read_project_json(path)?;
        let project = Project::from_value(value).map_err(MigrationError::from)?;
        Ok(self.migrate(project)?)
    }

    /// Reads `input`, migrates it and writes the result to `output`
    pub fn upgrade_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<MigrationReport, LoadError> {
        let (project, report) = self.load(input)?;
        write_project(output, &project)?;
        Ok(report)
    }
}
