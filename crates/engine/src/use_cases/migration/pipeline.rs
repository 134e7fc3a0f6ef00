//! Migration pipeline - picks the stages a document needs and folds it through them.

use serde_json::Value;

use gbsproj_domain::{DomainError, Project, SchemaVersion};

use crate::infrastructure::catalog::CommandCatalog;
use crate::use_cases::migration::rules::RewriteRules;
use crate::use_cases::migration::stages::{
    all_stages, MigrationStage, CURRENT_VERSION, OLDEST_SUPPORTED_VERSION,
};
use crate::use_cases::migration::walker::count_events;

/// Errors that abort a migration. Nothing is partially applied.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Malformed project document: {0}")]
    MalformedDocument(String),
    #[error("Invalid schema version: {0}")]
    InvalidVersion(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<DomainError> for MigrationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Parse(msg) => Self::InvalidVersion(msg),
            DomainError::MalformedDocument(msg) => Self::MalformedDocument(msg),
        }
    }
}

/// What a migration run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Version marker found in the document, `None` when absent
    pub declared: Option<SchemaVersion>,
    /// Version migration started from
    pub from: SchemaVersion,
    /// Version the returned document carries
    pub to: SchemaVersion,
    /// Ids of the applied stages, in order
    pub applied: Vec<&'static str>,
    /// Event nodes in the returned document
    pub events: usize,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Upgrades project documents to the current schema.
///
/// Holds the stage table and the resolved rewrite rules; reusable across documents.
#[derive(Debug, Clone)]
pub struct Migrator {
    stages: Vec<MigrationStage>,
    rules: RewriteRules,
    current: SchemaVersion,
}

impl Default for Migrator {
    fn default() -> Self {
        Self::new(&CommandCatalog::builtin())
    }
}

impl Migrator {
    pub fn new(catalog: &CommandCatalog) -> Self {
        Self {
            stages: all_stages(),
            rules: RewriteRules::from_catalog(catalog),
            current: CURRENT_VERSION,
        }
    }

    pub fn current_version(&self) -> SchemaVersion {
        self.current
    }

    pub fn rules(&self) -> &RewriteRules {
        &self.rules
    }

    /// Stages a document declaring `declared` still has to go through.
    ///
    /// A stage is pending while its target is newer than the declared version,
    /// so a version that falls between two release tags still gets the later stage.
    pub fn pending_stages(&self, declared: SchemaVersion) -> impl Iterator<Item = &MigrationStage> {
        self.stages.iter().filter(move |stage| stage.to > declared)
    }

    /// Migrates a project to the current schema
    pub fn migrate(&self, project: Project) -> Result<Project, MigrationError> {
        self.migrate_with_report(project).map(|(project, _)| project)
    }

    /// Migrates a project and reports which stages ran
    pub fn migrate_with_report(
        &self,
        mut project: Project,
    ) -> Result<(Project, MigrationReport), MigrationError> {
        let declared = project.schema_version()?;
        let from = declared.unwrap_or(OLDEST_SUPPORTED_VERSION);

        if from > self.current {
            tracing::warn!(
                declared = %from,
                current = %self.current,
                "Project was saved by a newer version, leaving it unchanged"
            );
            let report = MigrationReport {
                declared,
                from,
                to: from,
                applied: Vec::new(),
                events: count_events(&project),
            };
            return Ok((project, report));
        }

        let mut applied = Vec::new();
        for stage in self.pending_stages(from) {
            tracing::info!(
                stage = stage.id,
                from = %stage.from,
                to = %stage.to,
                "Applying migration stage"
            );
            project = (stage.apply)(project, &self.rules);
            applied.push(stage.id);
        }

        project.set_schema_version(self.current);

        let report = MigrationReport {
            declared,
            from,
            to: self.current,
            applied,
            events: count_events(&project),
        };
        tracing::debug!(
            from = %report.from,
            to = %report.to,
            stages = report.applied.len(),
            events = report.events,
            "Migration finished"
        );
        Ok((project, report))
    }

    /// Migrates an untyped JSON document.
    ///
    /// # Errors
    ///
    /// Fails when the value is not a project object or its version marker is unreadable.
    pub fn migrate_value(&self, value: Value) -> Result<Value, MigrationError> {
        let project = Project::from_value(value)?;
        let project = self.migrate(project)?;
        Ok(serde_json::to_value(project)?)
    }
}
