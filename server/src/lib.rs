//! # Scenesync Server
//! The authority side of scene synchronization: tracks observer
//! connections, and once per frame sends complete snapshots to new
//! observers and minimal deltas to existing ones, skipping frames while the
//! outbound backlog is congested.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use scenesync_shared::{
        BroadcasterService, ByteReader, ByteWrite, ChangeFlags, Connection, ConnectionKey,
        ObjectId, ObjectIdLookup, ObjectKey, ObjectMessage, PropertyValue, Protocol,
        ProtocolPlugin, Serde, SerdeErr, ServiceDefinition, SyncClock, TransportError, TypeTag,
    };
}

mod backpressure;
mod broadcaster;
mod connection;
mod error;
mod server;

pub use backpressure::{BackpressureConfig, BackpressureController};
pub use broadcaster::{
    broadcaster::Broadcaster, delta_broadcaster::DeltaBroadcaster,
    global_property_broadcaster::GlobalPropertyBroadcaster,
};
pub use connection::{
    connection_delta::ConnectionDelta,
    connection_log::{ConnectionEvent, ConnectionLog},
    connection_set::ConnectionSet,
};
pub use error::ServerError;
pub use server::{FrameOutcome, FrameStats, ReleasePolicy, Server, ServerConfig};
