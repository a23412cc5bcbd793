use thiserror::Error;

use scenesync_shared::{ObjectIdError, ObjectKey, RegistryError, TypeTag};

/// Errors returned by the authority's registration API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Identity allocation or assignment failed. `Exhausted` is fatal.
    #[error(transparent)]
    ObjectId(#[from] ObjectIdError),

    /// A broadcaster was added for an object with no identity
    #[error("Object {object:?} has no identity. Register the object before adding broadcasters")]
    ObjectNotRegistered { object: ObjectKey },

    /// The object already carries a broadcaster of this kind
    #[error("Object {object:?} already has a '{type_tag}' broadcaster")]
    DuplicateBroadcaster { object: ObjectKey, type_tag: TypeTag },
}
