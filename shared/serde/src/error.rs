use thiserror::Error;

/// The error returned when a value could not be decoded from a byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Failed to deserialize from byte stream")]
pub struct SerdeErr;
