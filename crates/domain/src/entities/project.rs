//! Project entity - the root of a persisted project document

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use gbsproj_domain::{CustomEvent, DomainError, Scene, SchemaVersion};

/// A complete project document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Declared schema version, e.g. `"3.0.0"`
    #[serde(
        rename = "_version",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
    /// Declared schema release, e.g. `"2"` (older files store a number)
    #[serde(
        rename = "_release",
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub release: Option<String>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub custom_events: Vec<CustomEvent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }

    pub fn with_custom_event(mut self, custom_event: CustomEvent) -> Self {
        self.custom_events.push(custom_event);
        self
    }

    /// Parse a project from an untyped JSON value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedDocument` if the value is not an object
    /// or its contents do not fit the project shape.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        if !value.is_object() {
            return Err(DomainError::malformed(format!(
                "expected a JSON object at the document root, found {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| DomainError::malformed(e.to_string()))
    }

    /// Declared schema version, `None` when the document carries no marker.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Parse` when a marker is present but unreadable.
    pub fn schema_version(&self) -> Result<Option<SchemaVersion>, DomainError> {
        match self.version.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(version) => SchemaVersion::parse(version, self.release.as_deref()).map(Some),
        }
    }

    pub fn set_schema_version(&mut self, version: SchemaVersion) {
        self.version = Some(version.version_string());
        self.release = Some(version.release_string());
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected _release to be a string or number, found {}",
            json_kind(&other)
        ))),
    }
}
