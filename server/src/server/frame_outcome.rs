/// Result of one call to `Server::sync_frame`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Backpressure skipped this frame; nothing was sent
    Skipped,
    Synchronized(FrameStats),
}

impl FrameOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn stats(&self) -> Option<&FrameStats> {
        match self {
            Self::Skipped => None,
            Self::Synchronized(stats) => Some(stats),
        }
    }
}

/// Per-connection message counts for one synchronization cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub added: usize,
    pub removed: usize,
    pub continued: usize,
    pub created_sent: usize,
    pub updated_sent: usize,
    pub destroyed_sent: usize,
    pub global_sent: usize,
    pub culled: usize,
}
