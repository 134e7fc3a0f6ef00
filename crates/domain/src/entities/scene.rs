//! Scene entity and the actors/triggers placed in it
//!
//! Each entity carries a display name, an optional generated `symbol` and a
//! fixed set of script slots. Fields the engine does not interpret (positions,
//! sprites, collision data...) round-trip through `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gbsproj_domain::EventNode;

/// An ordered event list attached to an entity
pub type Script = Vec<EventNode>;

/// Entities that own one or more script slots.
///
/// Implementors hand every populated slot to `f` and store what it returns,
/// which lets traversal code treat scenes, actors and triggers uniformly.
pub trait ScriptOwner: Sized {
    fn map_scripts<F>(self, f: F) -> Self
    where
        F: FnMut(Script) -> Script;

    /// Populated script slots, in slot declaration order
    fn scripts(&self) -> Vec<&Script>;
}

/// A scene (one screen/map of the game)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_hit1_script: Option<Script>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_hit2_script: Option<Script>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_hit3_script: Option<Script>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: None,
            actors: Vec::new(),
            triggers: Vec::new(),
            script: None,
            player_hit1_script: None,
            player_hit2_script: None,
            player_hit3_script: None,
            extra: Map::new(),
        }
    }

    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actors.push(actor);
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.script = Some(script);
        self
    }
}

impl ScriptOwner for Scene {
    fn map_scripts<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(Script) -> Script,
    {
        self.script = self.script.map(&mut f);
        self.player_hit1_script = self.player_hit1_script.map(&mut f);
        self.player_hit2_script = self.player_hit2_script.map(&mut f);
        self.player_hit3_script = self.player_hit3_script.map(&mut f);
        self
    }

    fn scripts(&self) -> Vec<&Script> {
        [
            &self.script,
            &self.player_hit1_script,
            &self.player_hit2_script,
            &self.player_hit3_script,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// An actor placed in a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_script: Option<Script>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_script: Option<Script>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit1_script: Option<Script>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit2_script: Option<Script>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit3_script: Option<Script>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: None,
            script: None,
            start_script: None,
            update_script: None,
            hit1_script: None,
            hit2_script: None,
            hit3_script: None,
            extra: Map::new(),
        }
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.script = Some(script);
        self
    }
}

impl ScriptOwner for Actor {
    fn map_scripts<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(Script) -> Script,
    {
        self.script = self.script.map(&mut f);
        self.start_script = self.start_script.map(&mut f);
        self.update_script = self.update_script.map(&mut f);
        self.hit1_script = self.hit1_script.map(&mut f);
        self.hit2_script = self.hit2_script.map(&mut f);
        self.hit3_script = self.hit3_script.map(&mut f);
        self
    }

    fn scripts(&self) -> Vec<&Script> {
        [
            &self.script,
            &self.start_script,
            &self.update_script,
            &self.hit1_script,
            &self.hit2_script,
            &self.hit3_script,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// A trigger region placed in a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_script: Option<Script>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Trigger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: None,
            script: None,
            leave_script: None,
            extra: Map::new(),
        }
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.script = Some(script);
        self
    }
}

impl ScriptOwner for Trigger {
    fn map_scripts<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(Script) -> Script,
    {
        self.script = self.script.map(&mut f);
        self.leave_script = self.leave_script.map(&mut f);
        self
    }

    fn scripts(&self) -> Vec<&Script> {
        [&self.script, &self.leave_script]
            .into_iter()
            .flatten()
            .collect()
    }
}
