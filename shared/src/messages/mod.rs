pub mod constants;
pub mod header;
