//! Backing mod is the storage of implementation objects behind handles, and the debug-only tracking of live handles.

pub mod arena;
pub mod id;
#[cfg(feature = "resource-tracking")]
pub mod resource_table;
pub mod slot_array;
