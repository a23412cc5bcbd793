use scenesync_shared::ConnectionKey;

/// Partition of observer connections for one synchronization cycle.
///
/// Every connection touched since the last cycle lands in exactly one list,
/// and `added` never overlaps `continued`. Lists are sorted by key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionDelta {
    pub added: Vec<ConnectionKey>,
    pub removed: Vec<ConnectionKey>,
    pub continued: Vec<ConnectionKey>,
}

impl ConnectionDelta {
    /// Whether any connection receives data this cycle
    pub fn has_observers(&self) -> bool {
        !self.added.is_empty() || !self.continued.is_empty()
    }
}
