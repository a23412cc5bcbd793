pub mod broadcaster;
pub mod delta_broadcaster;
pub mod global_property_broadcaster;
