use std::default::Default;

use crate::backpressure::BackpressureConfig;

/// What the authority does with live broadcasters once no observer remains
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReleasePolicy {
    /// Keep broadcasters alive; the next observer receives a complete snapshot
    #[default]
    Retain,
    /// Destroy every broadcaster and release its identity at the end of a
    /// cycle with no continued observers, the teardown heuristic of the
    /// frame cycle's final step
    ReleaseWhenUnobserved,
}

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Used to configure frame skipping under outbound congestion
    pub backpressure: BackpressureConfig,
    /// Determines whether broadcasters survive a cycle that ends without
    /// observers
    pub release_policy: ReleasePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            backpressure: BackpressureConfig::default(),
            release_policy: ReleasePolicy::default(),
        }
    }
}
