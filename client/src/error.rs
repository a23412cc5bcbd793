use thiserror::Error;

use scenesync_shared::{ObjectId, TypeTag};

/// Reasons an inbound message was dropped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The message did not start with a valid command tag, timestamp and type tag
    #[error("Malformed message header. The message was dropped")]
    MalformedHeader,

    /// The change-type byte is not Created, Updated or Destroyed
    #[error("Unknown change type {byte} in '{type_tag}' message")]
    UnknownChangeType { type_tag: TypeTag, byte: u8 },

    /// The message names the reserved "no object" identity
    #[error("'{type_tag}' message refers to the sentinel identity")]
    InvalidIdentity { type_tag: TypeTag },

    /// The observer-service could not decode the type-specific fields
    #[error("Malformed '{type_tag}' fields for {identity}")]
    MalformedFields { type_tag: TypeTag, identity: ObjectId },

    #[error("Malformed global property message")]
    MalformedGlobalProperties,
}
