//! Custom event definition - a reusable, user-authored script
//!
//! Custom events declare parameter slots: variables (passed by reference once
//! the project is on the `V`-prefixed schema) and actors. Calls made with
//! `EVENT_CALL_CUSTOM_EVENT` bind caller values to these slots through
//! `$variable[<slot>]$` / `$actor[<slot>]$` arguments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gbsproj_domain::EventNode;

/// A declared variable parameter slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEventVariable {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_by_reference: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomEventVariable {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            pass_by_reference: None,
            extra: Map::new(),
        }
    }
}

/// A declared actor parameter slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomEventActor {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Slot key to variable parameter
pub type VariableTable = BTreeMap<String, CustomEventVariable>;

/// Slot key to actor parameter
pub type ActorTable = BTreeMap<String, CustomEventActor>;

/// A custom event definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<VariableTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<ActorTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Vec<EventNode>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomEvent {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
            symbol: None,
            variables: None,
            actors: None,
            script: None,
            extra: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_variable(mut self, slot: impl Into<String>, variable: CustomEventVariable) -> Self {
        self.variables
            .get_or_insert_with(VariableTable::new)
            .insert(slot.into(), variable);
        self
    }

    pub fn with_script(mut self, script: Vec<EventNode>) -> Self {
        self.script = Some(script);
        self
    }

    /// Display name, empty when unset
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Declared variable slot keys, in table order
    pub fn variable_slots(&self) -> impl Iterator<Item = &str> {
        self.variables
            .iter()
            .flat_map(|variables| variables.keys().map(String::as_str))
    }
}
