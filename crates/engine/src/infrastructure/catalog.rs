//! Command catalog - the per-command field descriptors migrations consult.
//!
//! The editor's full event definitions carry compiler stubs and UI metadata;
//! the migration engine only needs to know, per command id, which argument
//! fields hold variable references and which fields get a default when absent.
//!
//! A built-in table covers the stock commands. A JSON file with the same shape
//! can replace it at startup:
//!
//! ```json
//! {
//!   "EVENT_INC_VALUE": { "fields": [{ "key": "variable", "type": "variable" }] },
//!   "EVENT_ENGINE_FIELD_STORE": {
//!     "fields": [{ "key": "value", "type": "variable", "migrationDefault": "0" }]
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use gbsproj_domain::commands::*;

/// How a command argument field stores its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Holds a variable id as a bare scalar
    Variable,
    /// Holds a `{type, value}` union, where `type` may be `variable`
    Union,
    /// Anything migrations do not rewrite (text, numbers, actor ids...)
    #[serde(other)]
    Other,
}

/// One argument field of a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Value written by migrations when the field is absent
    #[serde(
        rename = "migrationDefault",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub migration_default: Option<Value>,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            kind,
            migration_default: None,
        }
    }

    pub fn variable(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Variable)
    }

    pub fn union(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Union)
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.migration_default = Some(value);
        self
    }
}

/// The fields of one command
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommandDescriptor {
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

/// Command id to descriptor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandCatalog {
    commands: BTreeMap<String, CommandDescriptor>,
}

/// Errors loading a catalog file
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read command catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid command catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CommandCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock command table
    pub fn builtin() -> Self {
        let variable_commands = [
            EVENT_INC_VALUE,
            EVENT_DEC_VALUE,
            EVENT_SET_VALUE,
            EVENT_SET_TRUE,
            EVENT_SET_FALSE,
            EVENT_IF_TRUE,
            EVENT_IF_FALSE,
            EVENT_IF_VALUE,
            EVENT_SWITCH,
            EVENT_CHOICE,
            EVENT_MENU,
        ];

        let mut catalog = variable_commands
            .into_iter()
            .fold(Self::new(), |catalog, command| {
                catalog.with_command(command, vec![FieldDescriptor::variable("variable")])
            });

        for command in [
            EVENT_VARIABLE_MATH,
            EVENT_IF_VALUE_COMPARE,
            EVENT_ACTOR_GET_POSITION,
        ] {
            catalog = catalog.with_command(
                command,
                vec![
                    FieldDescriptor::variable("vectorX"),
                    FieldDescriptor::variable("vectorY"),
                ],
            );
        }

        for command in [
            EVENT_ACTOR_MOVE_TO,
            EVENT_ACTOR_SET_POSITION,
            EVENT_CAMERA_MOVE_TO,
        ] {
            catalog = catalog.with_command(
                command,
                vec![FieldDescriptor::union("x"), FieldDescriptor::union("y")],
            );
        }

        catalog
            .with_command(
                EVENT_ACTOR_GET_DIRECTION,
                vec![FieldDescriptor::variable("direction")],
            )
            .with_command(
                EVENT_ACTOR_SET_DIRECTION,
                vec![FieldDescriptor::union("direction")],
            )
            .with_command(EVENT_ENGINE_FIELD_SET, vec![FieldDescriptor::union("value")])
            .with_command(
                EVENT_ENGINE_FIELD_STORE,
                vec![FieldDescriptor::variable("value").with_default(Value::String("0".into()))],
            )
    }

    pub fn with_command(mut self, command: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        self.commands
            .insert(command.into(), CommandDescriptor { fields });
        self
    }

    pub fn get(&self, command: &str) -> Option<&CommandDescriptor> {
        self.commands.get(command)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandDescriptor)> {
        self.commands.iter().map(|(id, desc)| (id.as_str(), desc))
    }

    /// Parses a catalog from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a catalog file, replacing the built-in table entirely
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            commands = catalog.len(),
            "Loaded command catalog"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_builtin_covers_engine_field_store_default() {
        let catalog = CommandCatalog::builtin();
        let store = catalog.get(EVENT_ENGINE_FIELD_STORE).unwrap();
        assert_eq!(store.fields.len(), 1);
        assert_eq!(store.fields[0].key, "value");
        assert_eq!(store.fields[0].migration_default, Some(json!("0")));
    }

    #[test]
    fn test_builtin_field_kinds() {
        let catalog = CommandCatalog::builtin();
        assert_eq!(
            catalog.get(EVENT_INC_VALUE).unwrap().fields,
            vec![FieldDescriptor::variable("variable")]
        );
        assert_eq!(
            catalog.get(EVENT_ACTOR_SET_DIRECTION).unwrap().fields,
            vec![FieldDescriptor::union("direction")]
        );
        assert!(catalog.get(EVENT_CALL_CUSTOM_EVENT).is_none());
    }

    #[test]
    fn test_parse_catalog_json() {
        let catalog = CommandCatalog::from_json(
            r#"{
                "EVENT_ADD_ONE": {"fields": [{"key": "target", "type": "variable"}]},
                "EVENT_TEXT": {"fields": [{"key": "text", "type": "textarea"}]},
                "EVENT_END": {}
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.get("EVENT_TEXT").unwrap().fields[0].kind,
            FieldKind::Other
        );
        assert!(catalog.get("EVENT_END").unwrap().fields.is_empty());
    }

    #[test]
    fn test_catalog_serializes_as_plain_map() {
        let catalog = CommandCatalog::new()
            .with_command("EVENT_X", vec![FieldDescriptor::union("x").with_default(json!(0))]);
        assert_eq!(
            serde_json::to_value(&catalog).unwrap(),
            json!({"EVENT_X": {"fields": [{"key": "x", "type": "union", "migrationDefault": 0}]}})
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"EVENT_INC_VALUE": {{"fields": [{{"key": "variable", "type": "variable"}}]}}}}"#
        )
        .unwrap();
        let catalog = CommandCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CommandCatalog::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2").unwrap();
        let err = CommandCatalog::load(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
