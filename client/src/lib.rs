//! # Scenesync Client
//! The observer side of scene synchronization: mirrors the authority's
//! objects by identity and applies their component updates through the
//! registered observer-services.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use scenesync_shared::{
        ByteReader, ChangeFlags, ChangeType, MirrorNode, MirrorTable, ObjectId, ObjectMessage,
        ObserverService, PropertyValue, Protocol, ProtocolPlugin, Serde, SerdeErr,
        ServiceDefinition, TypeTag,
    };
}

mod client;
mod client_config;
mod error;
mod events;

pub use client::Client;
pub use client_config::ClientConfig;
pub use error::ClientError;
pub use events::ObserverEvents;
