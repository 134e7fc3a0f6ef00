//! Command identifiers the migration engine refers to by name
//!
//! The full command catalog (field descriptors, compiler stubs, editor
//! metadata) lives with the editor; only the ids a rewrite rule keys off are
//! listed here.

pub const EVENT_CALL_CUSTOM_EVENT: &str = "EVENT_CALL_CUSTOM_EVENT";
pub const EVENT_ENGINE_FIELD_STORE: &str = "EVENT_ENGINE_FIELD_STORE";
pub const EVENT_ENGINE_FIELD_SET: &str = "EVENT_ENGINE_FIELD_SET";

pub const EVENT_INC_VALUE: &str = "EVENT_INC_VALUE";
pub const EVENT_DEC_VALUE: &str = "EVENT_DEC_VALUE";
pub const EVENT_SET_VALUE: &str = "EVENT_SET_VALUE";
pub const EVENT_SET_TRUE: &str = "EVENT_SET_TRUE";
pub const EVENT_SET_FALSE: &str = "EVENT_SET_FALSE";
pub const EVENT_VARIABLE_MATH: &str = "EVENT_VARIABLE_MATH";
pub const EVENT_IF_TRUE: &str = "EVENT_IF_TRUE";
pub const EVENT_IF_FALSE: &str = "EVENT_IF_FALSE";
pub const EVENT_IF_VALUE: &str = "EVENT_IF_VALUE";
pub const EVENT_IF_VALUE_COMPARE: &str = "EVENT_IF_VALUE_COMPARE";
pub const EVENT_SWITCH: &str = "EVENT_SWITCH";
pub const EVENT_CHOICE: &str = "EVENT_CHOICE";
pub const EVENT_MENU: &str = "EVENT_MENU";
pub const EVENT_ACTOR_GET_POSITION: &str = "EVENT_ACTOR_GET_POSITION";
pub const EVENT_ACTOR_GET_DIRECTION: &str = "EVENT_ACTOR_GET_DIRECTION";
pub const EVENT_ACTOR_SET_DIRECTION: &str = "EVENT_ACTOR_SET_DIRECTION";
pub const EVENT_ACTOR_MOVE_TO: &str = "EVENT_ACTOR_MOVE_TO";
pub const EVENT_ACTOR_SET_POSITION: &str = "EVENT_ACTOR_SET_POSITION";
pub const EVENT_CAMERA_MOVE_TO: &str = "EVENT_CAMERA_MOVE_TO";
