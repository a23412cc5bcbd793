use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use log::{info, warn};

use scenesync_shared::{Connection, ConnectionKey};

use super::{
    connection_delta::ConnectionDelta,
    connection_log::{ConnectionEvent, ConnectionLog},
};

#[derive(Default)]
struct Touched {
    interrupted: bool,
}

/// Currently attached observer connections, plus the bookkeeping needed to
/// split them into added / removed / continued once per cycle
pub struct ConnectionSet {
    log: ConnectionLog,
    attached: HashMap<ConnectionKey, Arc<dyn Connection>>,
    continued: HashSet<ConnectionKey>,
    added: HashSet<ConnectionKey>,
}

impl ConnectionSet {
    pub fn new(log: ConnectionLog) -> Self {
        Self {
            log,
            attached: HashMap::new(),
            continued: HashSet::new(),
            added: HashSet::new(),
        }
    }

    pub fn log(&self) -> &ConnectionLog {
        &self.log
    }

    /// Drains the join/leave log and partitions the touched connections.
    ///
    /// A continued connection that left and re-joined within one cycle is
    /// reported as added only, so it receives a full resync.
    pub fn compute_delta(&mut self) -> ConnectionDelta {
        // an unfinished previous cycle still counts its additions as seen
        let unfinished: Vec<ConnectionKey> = self.added.drain().collect();
        self.continued.extend(unfinished);

        let mut touched: HashMap<ConnectionKey, Touched> = HashMap::new();
        for event in self.log.drain() {
            match event {
                ConnectionEvent::Connected(key, connection) => {
                    if self.attached.insert(key, connection).is_some() {
                        warn!("Connection {} reported connected twice, replacing handle", key);
                    }
                    touched.entry(key).or_default();
                }
                ConnectionEvent::Disconnected(key) => {
                    if self.attached.remove(&key).is_none() {
                        warn!("Connection {} reported disconnected while not attached", key);
                    }
                    touched.entry(key).or_default().interrupted = true;
                }
            }
        }

        let mut delta = ConnectionDelta::default();
        for (key, state) in touched {
            let was_continued = self.continued.contains(&key);
            let is_attached = self.attached.contains_key(&key);

            match (was_continued, is_attached) {
                (true, true) if state.interrupted => {
                    self.continued.remove(&key);
                    self.added.insert(key);
                    delta.added.push(key);
                    info!("Connection {} re-joined", key);
                }
                (true, true) => {}
                (true, false) => {
                    self.continued.remove(&key);
                    delta.removed.push(key);
                    info!("Connection {} left", key);
                }
                (false, true) => {
                    self.added.insert(key);
                    delta.added.push(key);
                    info!("Connection {} joined", key);
                }
                (false, false) => {}
            }
        }

        delta.continued = self.continued.iter().copied().collect();
        delta.added.sort();
        delta.removed.sort();
        delta.continued.sort();
        delta
    }

    /// Folds this cycle's additions into the continued set
    pub fn finish_cycle(&mut self) {
        let added: Vec<ConnectionKey> = self.added.drain().collect();
        self.continued.extend(added);
    }

    /// Best-effort multicast. Returns how many connections accepted the
    /// payload; failures are logged and skipped.
    pub fn send(&self, targets: &[ConnectionKey], payload: &[u8]) -> usize {
        let mut delivered = 0;
        for key in targets {
            let Some(connection) = self.attached.get(key) else {
                continue;
            };
            match connection.send(payload) {
                Ok(()) => delivered += 1,
                Err(err) => warn!("Send to connection {} failed: {}", key, err),
            }
        }
        delivered
    }

    pub fn get(&self, key: &ConnectionKey) -> Option<&Arc<dyn Connection>> {
        self.attached.get(key)
    }

    pub fn is_attached(&self, key: &ConnectionKey) -> bool {
        self.attached.contains_key(key)
    }

    /// Connections that were observing at the end of the last cycle
    pub fn continued(&self) -> Vec<ConnectionKey> {
        let mut continued: Vec<ConnectionKey> = self.continued.iter().copied().collect();
        continued.sort();
        continued
    }

    pub fn has_continued(&self) -> bool {
        !self.continued.is_empty()
    }

    /// Total outbound backlog across every attached connection
    pub fn queued_bytes(&self) -> usize {
        self.attached
            .values()
            .map(|connection| connection.queued_bytes())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}
