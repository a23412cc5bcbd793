use thiserror::Error;

/// Errors a transport may report when a payload cannot be enqueued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The underlying channel has been closed
    #[error("Connection is closed. The payload was dropped")]
    Closed,

    /// The transport refused the payload
    #[error("Transport rejected a {bytes} byte payload: {reason}")]
    Rejected { bytes: usize, reason: String },
}
