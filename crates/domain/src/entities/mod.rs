//! Domain entities - The records that make up a project document

mod custom_event;
mod event;
mod project;
mod scene;

pub use custom_event::{
    ActorTable, CustomEvent, CustomEventActor, CustomEventVariable, VariableTable,
};
pub use event::{EventArgs, EventChildren, EventNode};
pub use project::Project;
pub use scene::{Actor, Scene, Script, ScriptOwner, Trigger};
