mod connection;
mod error;

pub use connection::Connection;
pub use error::TransportError;
