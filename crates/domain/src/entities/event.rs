//! Event node - one command invocation inside a script
//!
//! Commands that branch (`EVENT_IF_TRUE`, `EVENT_LOOP`, ...) own nested event
//! lists under `children`, keyed by branch name (`"true"`, `"false"`,
//! `"script"`). Traversal never needs to know which commands branch: any node
//! with a `children` map exposes its lists through [`EventNode::branches`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gbsproj_domain::ArgValue;

/// Argument mapping of an event node (field name to value)
pub type EventArgs = BTreeMap<String, ArgValue>;

/// Branch name to nested event list. A branch may be explicitly `null`.
pub type EventChildren = BTreeMap<String, Option<Vec<EventNode>>>;

/// A single command invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventNode {
    /// Command identifier, e.g. `EVENT_INC_VALUE`
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<EventArgs>,
    /// Stable node id, preserved by every migration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<EventChildren>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventNode {
    pub fn new(command: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: None,
            id: Some(id.into()),
            children: None,
            extra: Map::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: ArgValue) -> Self {
        self.args
            .get_or_insert_with(EventArgs::new)
            .insert(key.into(), value);
        self
    }

    pub fn with_branch(mut self, name: impl Into<String>, events: Vec<EventNode>) -> Self {
        self.children
            .get_or_insert_with(EventChildren::new)
            .insert(name.into(), Some(events));
        self
    }

    pub fn arg(&self, key: &str) -> Option<&ArgValue> {
        self.args.as_ref().and_then(|args| args.get(key))
    }

    /// True when this node owns at least one nested event list
    pub fn has_children(&self) -> bool {
        self.children
            .as_ref()
            .is_some_and(|children| children.values().any(Option::is_some))
    }

    /// Nested event lists in branch-name order
    pub fn branches(&self) -> impl Iterator<Item = (&str, &[EventNode])> {
        self.children.iter().flat_map(|children| {
            children
                .iter()
                .filter_map(|(name, events)| events.as_deref().map(|e| (name.as_str(), e)))
        })
    }

    /// Rebuilds every nested event list with `f`, leaving `null` branches as they are
    pub fn map_branches<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(Vec<EventNode>) -> Vec<EventNode>,
    {
        self.children = self.children.map(|children| {
            children
                .into_iter()
                .map(|(name, events)| (name, events.map(&mut f)))
                .collect()
        });
        self
    }
}
