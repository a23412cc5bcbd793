use std::collections::HashMap;

use log::{error, info};

use crate::{
    messages::header::GLOBAL_PROPERTY_TAG,
    protocol::{
        error::RegistryError,
        service::{BroadcasterService, ObserverService},
    },
    TypeTag,
};

/// Static description of one synchronized component kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServiceDefinition {
    pub type_tag: TypeTag,
    pub name: &'static str,
    /// Width of the kind's change flags on the wire
    pub flag_bytes: u8,
}

impl ServiceDefinition {
    pub const fn new(type_tag: TypeTag, name: &'static str, flag_bytes: u8) -> Self {
        Self {
            type_tag,
            name,
            flag_bytes,
        }
    }
}

struct ServiceEntry {
    definition: ServiceDefinition,
    broadcaster: Box<dyn BroadcasterService>,
    observer: Box<dyn ObserverService>,
}

/// Type Tag -> (broadcaster-service, observer-service)
#[derive(Default)]
pub struct TypeRegistry {
    entries: HashMap<TypeTag, ServiceEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_service<B: BroadcasterService + 'static, O: ObserverService + 'static>(
        &mut self,
        definition: ServiceDefinition,
        broadcaster: B,
        observer: O,
    ) -> Result<(), RegistryError> {
        let type_tag = definition.type_tag;

        if type_tag == GLOBAL_PROPERTY_TAG {
            error!(
                "Service '{}' cannot use reserved type tag '{}'",
                definition.name, type_tag
            );
            return Err(RegistryError::ReservedTypeTag { type_tag });
        }

        if let Some(existing) = self.entries.get(&type_tag) {
            error!(
                "Service '{}' rejected: type tag '{}' already registered to '{}'",
                definition.name, type_tag, existing.definition.name
            );
            return Err(RegistryError::DuplicateTypeTag {
                type_tag,
                existing: existing.definition.name,
            });
        }

        info!("Registered service '{}' as '{}'", definition.name, type_tag);
        self.entries.insert(
            type_tag,
            ServiceEntry {
                definition,
                broadcaster: Box::new(broadcaster),
                observer: Box::new(observer),
            },
        );
        Ok(())
    }

    pub fn definition(&self, type_tag: &TypeTag) -> Option<&ServiceDefinition> {
        self.entries.get(type_tag).map(|entry| &entry.definition)
    }

    pub fn broadcaster_service(&self, type_tag: &TypeTag) -> Option<&dyn BroadcasterService> {
        self.entries
            .get(type_tag)
            .map(|entry| entry.broadcaster.as_ref())
    }

    pub fn broadcaster_service_mut(
        &mut self,
        type_tag: &TypeTag,
    ) -> Option<&mut (dyn BroadcasterService + 'static)> {
        self.entries
            .get_mut(type_tag)
            .map(|entry| entry.broadcaster.as_mut())
    }

    pub fn observer_service(&self, type_tag: &TypeTag) -> Option<&dyn ObserverService> {
        self.entries
            .get(type_tag)
            .map(|entry| entry.observer.as_ref())
    }

    pub fn observer_service_mut(
        &mut self,
        type_tag: &TypeTag,
    ) -> Option<&mut (dyn ObserverService + 'static)> {
        self.entries
            .get_mut(type_tag)
            .map(|entry| entry.observer.as_mut())
    }

    pub fn contains(&self, type_tag: &TypeTag) -> bool {
        self.entries.contains_key(type_tag)
    }

    /// Registered tags in ascending order
    pub fn type_tags(&self) -> Vec<TypeTag> {
        let mut tags: Vec<TypeTag> = self.entries.keys().copied().collect();
        tags.sort();
        tags
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
