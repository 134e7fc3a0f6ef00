//! Project file persistence (`.gbsproj` JSON documents)

use std::path::{Path, PathBuf};

use serde_json::Value;

use gbsproj_domain::Project;

#[derive(Debug, thiserror::Error)]
pub enum ProjectFileError {
    #[error("Failed to read project {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Project {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize project: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write project {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads a project file as untyped JSON.
///
/// The document is not checked against the project shape here; that is the
/// migrator's job, since older files legitimately differ from it.
pub fn read_project_json(path: impl AsRef<Path>) -> Result<Value, ProjectFileError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ProjectFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ProjectFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a project as pretty-printed JSON with a trailing newline
pub fn write_project(path: impl AsRef<Path>, project: &Project) -> Result<(), ProjectFileError> {
    let path = path.as_ref();
    let mut text = serde_json::to_string_pretty(project)?;
    text.push('\n');
    std::fs::write(path, text).map_err(|source| ProjectFileError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Wrote project file");
    Ok(())
}
