pub mod connection_delta;
pub mod connection_log;
pub mod connection_set;
