use std::collections::HashMap;

use log::error;

use crate::{world::error::ObjectIdError, ObjectId, ObjectKey};

/// Number of identities available once the sentinel is excluded
const IDENTITY_SPACE: usize = u16::MAX as usize;

/// Resolves authority-side object handles to their wire identity
pub trait ObjectIdLookup {
    fn object_id(&self, object: &ObjectKey) -> Option<ObjectId>;
}

/// Hands out identities by linear probing from a rolling counter
pub struct ObjectIdAllocator {
    next: i16,
}

impl ObjectIdAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Returns the first identity at or after the counter that is neither the
    /// sentinel nor reported in use
    pub fn allocate(&mut self, in_use: impl Fn(&ObjectId) -> bool) -> Result<ObjectId, ObjectIdError> {
        // every i16 value, sentinel included, is probed exactly once
        for _ in 0..=u16::MAX {
            let candidate = ObjectId::new(self.next);
            self.next = self.next.wrapping_add(1);

            if !candidate.is_valid() || in_use(&candidate) {
                continue;
            }
            return Ok(candidate);
        }

        Err(ObjectIdError::Exhausted {
            live: IDENTITY_SPACE,
        })
    }
}

impl Default for ObjectIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Authority-side bidirectional map between domain objects and identities
pub struct ObjectTable {
    object_to_id: HashMap<ObjectKey, ObjectId>,
    id_to_object: HashMap<ObjectId, ObjectKey>,
    allocator: ObjectIdAllocator,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self {
            object_to_id: HashMap::new(),
            id_to_object: HashMap::new(),
            allocator: ObjectIdAllocator::new(),
        }
    }

    /// Returns the object's identity, allocating one if it has none yet
    pub fn allocate(&mut self, object: ObjectKey) -> Result<ObjectId, ObjectIdError> {
        if let Some(identity) = self.object_to_id.get(&object) {
            return Ok(*identity);
        }

        let id_to_object = &self.id_to_object;
        let identity = self
            .allocator
            .allocate(|candidate| id_to_object.contains_key(candidate))?;

        self.object_to_id.insert(object, identity);
        self.id_to_object.insert(identity, object);
        Ok(identity)
    }

    /// Maps an object to a caller-chosen identity. On conflict the existing
    /// mapping is preserved and the assignment skipped.
    pub fn assign(&mut self, object: ObjectKey, identity: ObjectId) -> Result<(), ObjectIdError> {
        if !identity.is_valid() {
            error!("ObjectTable: refusing to assign the sentinel identity to {:?}", object);
            return Err(ObjectIdError::SentinelIdentity);
        }
        if let Some(existing) = self.id_to_object.get(&identity) {
            if *existing == object {
                return Ok(());
            }
            error!(
                "ObjectTable: identity {} already assigned to {:?}, skipping assignment to {:?}",
                identity, existing, object
            );
            return Err(ObjectIdError::AlreadyAssigned {
                identity,
                existing: *existing,
            });
        }
        if let Some(current) = self.object_to_id.get(&object) {
            error!(
                "ObjectTable: {:?} already has identity {}, skipping assignment of {}",
                object, current, identity
            );
            return Err(ObjectIdError::ObjectAlreadyMapped {
                object,
                identity: *current,
            });
        }

        self.object_to_id.insert(object, identity);
        self.id_to_object.insert(identity, object);
        Ok(())
    }

    pub fn release(&mut self, identity: &ObjectId) -> Option<ObjectKey> {
        let object = self.id_to_object.remove(identity)?;
        self.object_to_id.remove(&object);
        Some(object)
    }

    pub fn object(&self, identity: &ObjectId) -> Option<ObjectKey> {
        self.id_to_object.get(identity).copied()
    }

    pub fn contains_identity(&self, identity: &ObjectId) -> bool {
        self.id_to_object.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.id_to_object.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_object.is_empty()
    }

    pub fn clear(&mut self) {
        self.object_to_id.clear();
        self.id_to_object.clear();
    }
}

impl Default for ObjectTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectIdLookup for ObjectTable {
    fn object_id(&self, object: &ObjectKey) -> Option<ObjectId> {
        self.object_to_id.get(object).copied()
    }
}
