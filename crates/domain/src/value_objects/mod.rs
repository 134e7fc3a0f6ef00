//! Value objects - Immutable objects defined by their attributes

mod arg_value;
mod schema_version;

pub use arg_value::{
    is_local_variable_id, to_local_variable_id, ArgValue, UnionKind, UnionValue,
    LOCAL_VARIABLE_PREFIX,
};
pub use schema_version::SchemaVersion;
