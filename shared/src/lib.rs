//! # Scenesync Shared
//! Common functionality shared between scenesync-server & scenesync-client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use scenesync_serde::{
    ByteCounter, ByteReader, ByteWrite, ByteWriter, ConstByteLength, OwnedByteReader, Serde,
    SerdeErr,
};

mod clock;
mod messages;
mod protocol;
mod transport;
mod types;
mod world;

pub use clock::SyncClock;
pub use messages::{
    constants::{COMMAND_TAG, MESSAGE_HEADER_BYTES, OBJECT_HEADER_BYTES},
    header::{MessageHeader, ObjectHeader, GLOBAL_PROPERTY_TAG},
};
pub use protocol::{
    BroadcasterService, NoopBroadcasterService, NoopObserverService, ObjectMessage,
    ObserverService, Protocol, ProtocolError, ProtocolPlugin, RegistryError, ServiceDefinition,
    TypeRegistry,
};
pub use transport::{Connection, TransportError};
pub use types::{ChangeType, ConnectionKey, ObjectId, ObjectKey, TypeTag};
pub use world::{
    change_flags::ChangeFlags,
    error::ObjectIdError,
    global_properties::{
        read_global_properties, write_global_properties, GlobalPropertySet, PropertyValue,
    },
    mirror::{MirrorNode, MirrorTable},
    object_table::{ObjectIdAllocator, ObjectIdLookup, ObjectTable},
};
