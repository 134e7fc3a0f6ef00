//! Schema migration stages, one per version transition

mod v300r3;
mod v310r1;

pub use v300r3::migrate_300r2_to_300r3;
pub use v310r1::{
    migrate_300r3_to_310r1, migrate_custom_event, migrate_event, migrate_event_list,
    migrate_script_event,
};

use gbsproj_domain::{Project, SchemaVersion};

use crate::use_cases::migration::rules::RewriteRules;

/// Oldest schema the engine can upgrade; assumed for documents without a marker
pub const OLDEST_SUPPORTED_VERSION: SchemaVersion = SchemaVersion::new(3, 0, 0, 2);

/// Schema the engine reads and writes
pub const CURRENT_VERSION: SchemaVersion = SchemaVersion::new(3, 1, 0, 1);

/// A single version-to-version transformation
#[derive(Clone, Copy)]
pub struct MigrationStage {
    /// Stable identifier, e.g. `"300r2-300r3"`
    pub id: &'static str,
    pub from: SchemaVersion,
    pub to: SchemaVersion,
    pub description: &'static str,
    pub apply: fn(Project, &RewriteRules) -> Project,
}

impl std::fmt::Debug for MigrationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationStage")
            .field("id", &self.id)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// All stages, oldest first
pub fn all_stages() -> Vec<MigrationStage> {
    vec![
        MigrationStage {
            id: "300r2-300r3",
            from: SchemaVersion::new(3, 0, 0, 2),
            to: SchemaVersion::new(3, 0, 0, 3),
            description: "Generate symbols for scenes, actors, triggers and custom events",
            apply: |project, _| migrate_300r2_to_300r3(project),
        },
        MigrationStage {
            id: "300r3-310r1",
            from: SchemaVersion::new(3, 0, 0, 3),
            to: SchemaVersion::new(3, 1, 0, 1),
            description: "Make custom event variables local and expand custom event calls",
            apply: migrate_300r3_to_310r1,
        },
    ]
}
