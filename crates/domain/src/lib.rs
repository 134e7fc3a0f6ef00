//! gbsproj Domain - the persisted project document.
//!
//! Scenes, actors, triggers, custom event definitions and the event scripts
//! embedded in them, plus the value objects the schema migration engine
//! reasons about (argument encodings, schema versions).
//!
//! Every record keeps the fields it does not model in a flattened `extra`
//! map, so reading and re-writing a project never drops data.

extern crate self as gbsproj_domain;

pub mod commands;
pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{
    Actor, ActorTable, CustomEvent, CustomEventActor, CustomEventVariable, EventArgs,
    EventChildren, EventNode, Project, Scene, Script, ScriptOwner, Trigger, VariableTable,
};

pub use error::DomainError;

pub use value_objects::{
    is_local_variable_id, to_local_variable_id, ArgValue, SchemaVersion, UnionKind, UnionValue,
    LOCAL_VARIABLE_PREFIX,
};
