use thiserror::Error;

use crate::{ObjectId, ObjectKey};

/// Errors that can occur while mapping objects to identities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectIdError {
    /// Every non-sentinel identity is held by a live object. This is fatal
    /// for the authority: continuing would silently alias two objects.
    #[error("Object identity space exhausted: all {live} identities are in use")]
    Exhausted { live: usize },

    /// Attempted to map an identity that already belongs to another object
    #[error("Object identity {identity} is already assigned to object {existing:?}")]
    AlreadyAssigned {
        identity: ObjectId,
        existing: ObjectKey,
    },

    /// Attempted to give a second identity to an object that already has one
    #[error("Object {object:?} is already mapped to identity {identity}")]
    ObjectAlreadyMapped {
        object: ObjectKey,
        identity: ObjectId,
    },

    /// Attempted to map the reserved "no object" identity
    #[error("The sentinel identity cannot be assigned to an object")]
    SentinelIdentity,
}
