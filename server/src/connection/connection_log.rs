use std::{
    collections::VecDeque,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use scenesync_shared::{Connection, ConnectionKey};

/// A join or leave reported by the transport
#[derive(Clone)]
pub enum ConnectionEvent {
    Connected(ConnectionKey, Arc<dyn Connection>),
    Disconnected(ConnectionKey),
}

impl ConnectionEvent {
    pub fn key(&self) -> ConnectionKey {
        match self {
            Self::Connected(key, _) | Self::Disconnected(key) => *key,
        }
    }
}

impl fmt::Debug for ConnectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected(key, _) => write!(f, "Connected({})", key),
            Self::Disconnected(key) => write!(f, "Disconnected({})", key),
        }
    }
}

/// Staging area for join/leave events. Clones share one log, so a handle can
/// be moved to a transport-owned thread while the authority drains it once
/// per cycle.
#[derive(Clone, Default)]
pub struct ConnectionLog {
    events: Arc<Mutex<VecDeque<ConnectionEvent>>>,
}

impl ConnectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connected(&self, key: ConnectionKey, connection: Arc<dyn Connection>) {
        self.lock().push_back(ConnectionEvent::Connected(key, connection));
    }

    pub fn disconnected(&self, key: ConnectionKey) {
        self.lock().push_back(ConnectionEvent::Disconnected(key));
    }

    /// Takes every staged event, oldest first
    pub fn drain(&self) -> Vec<ConnectionEvent> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // a panicking producer cannot leave the queue half-written, so the
    // queue is still usable after poisoning
    fn lock(&self) -> MutexGuard<'_, VecDeque<ConnectionEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
