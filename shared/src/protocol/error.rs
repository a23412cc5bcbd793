use thiserror::Error;

use crate::TypeTag;

/// Errors that can occur while registering or resolving component services
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A service pair is already registered under this tag
    #[error("Type tag '{type_tag}' is already registered to service '{existing}'. The original registration stands")]
    DuplicateTypeTag {
        type_tag: TypeTag,
        existing: &'static str,
    },

    /// The tag is reserved for the global property channel
    #[error("Type tag '{type_tag}' is reserved for global properties and cannot name a component service")]
    ReservedTypeTag { type_tag: TypeTag },

    /// No service pair is registered under this tag
    #[error("No service is registered for type tag '{type_tag}'")]
    UnknownTypeTag { type_tag: TypeTag },
}

/// Errors that can occur while building a protocol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Protocol is locked and cannot be modified
    #[error("Protocol is already locked and cannot be modified. Protocol.lock() has been called and no further changes are allowed")]
    AlreadyLocked,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
