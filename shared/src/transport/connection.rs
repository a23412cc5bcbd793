use crate::transport::error::TransportError;

/// One endpoint of a bidirectional byte channel, owned by the transport.
///
/// Sends are fire-and-forget: an implementation enqueues `payload` on its
/// outbound buffer and returns without waiting for delivery. The sync core
/// never closes a connection; disconnects are reported back through the
/// host's connection log.
pub trait Connection: Send + Sync {
    fn send(&self, payload: &[u8]) -> Result<(), TransportError>;

    /// Bytes accepted by `send` but not yet flushed to the wire
    fn queued_bytes(&self) -> usize;
}
