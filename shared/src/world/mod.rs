pub mod change_flags;
pub mod error;
pub mod global_properties;
pub mod mirror;
pub mod object_table;
