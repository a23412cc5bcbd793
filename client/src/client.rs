use std::collections::VecDeque;

use log::{info, warn};

use scenesync_shared::{
    read_global_properties, ByteReader, ChangeFlags, ChangeType, GlobalPropertySet,
    MessageHeader, MirrorNode, MirrorTable, ObjectId, ObjectMessage, OwnedByteReader,
    PropertyValue, Protocol, Serde, TypeRegistry, GLOBAL_PROPERTY_TAG,
};

use crate::{ClientConfig, ClientError, ObserverEvents};

/// An observer. Mirrors the authority's scene from the messages handed to
/// `receive`, applied in arrival order by `process_incoming`.
pub struct Client {
    config: ClientConfig,
    registry: TypeRegistry,
    mirrors: MirrorTable,
    global_properties: GlobalPropertySet,
    incoming: VecDeque<OwnedByteReader>,
    scene_dirty: bool,
    last_timestamp: f32,
}

impl Client {
    /// Create a new Client
    pub fn new<P: Into<Protocol>>(client_config: ClientConfig, protocol: P) -> Self {
        let protocol: Protocol = protocol.into();

        Self {
            config: client_config,
            registry: protocol.registry,
            mirrors: MirrorTable::new(),
            global_properties: GlobalPropertySet::new(),
            incoming: VecDeque::new(),
            scene_dirty: false,
            last_timestamp: 0.0,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Stages one message from the authority
    pub fn receive(&mut self, payload: &[u8]) {
        self.incoming.push_back(OwnedByteReader::new(payload));
    }

    pub fn pending_messages(&self) -> usize {
        self.incoming.len()
    }

    /// Tears down every mirror before the next non-empty batch is applied
    pub fn mark_scene_dirty(&mut self) {
        self.scene_dirty = true;
    }

    pub fn is_scene_dirty(&self) -> bool {
        self.scene_dirty
    }

    /// Applies every staged message. Malformed messages are dropped and
    /// reported in the returned events; the rest of the batch still applies.
    pub fn process_incoming(&mut self) -> ObserverEvents {
        let mut events = ObserverEvents::new();
        if self.incoming.is_empty() {
            return events;
        }

        if self.scene_dirty {
            self.scene_dirty = false;
            self.clear_scene();
            events.push_scene_reset();
        }

        while let Some(owned_reader) = self.incoming.pop_front() {
            let mut reader = owned_reader.borrow();
            if let Err(error) = self.dispatch(&mut reader, &mut events) {
                warn!("Dropping message: {}", error);
                events.push_error(error);
            }
        }
        events
    }

    /// Advances every interpolating component towards its latest value
    pub fn interpolate(&mut self, now: f32) {
        if !self.config.interpolation {
            return;
        }

        for type_tag in self.registry.type_tags() {
            let Some(service) = self.registry.observer_service_mut(&type_tag) else {
                continue;
            };
            if !service.supports_interpolation() {
                continue;
            }
            for mirror in self.mirrors.iter_mut() {
                if mirror.has_component(&type_tag) {
                    service.interpolate(mirror, now);
                }
            }
        }
    }

    // Mirrors

    pub fn mirrors(&self) -> &MirrorTable {
        &self.mirrors
    }

    pub fn mirror(&self, identity: &ObjectId) -> Option<&MirrorNode> {
        self.mirrors.get(identity)
    }

    pub fn mirror_mut(&mut self, identity: &ObjectId) -> Option<&mut MirrorNode> {
        self.mirrors.get_mut(identity)
    }

    pub fn global_properties(&self) -> &GlobalPropertySet {
        &self.global_properties
    }

    pub fn global_property(&self, name: &str) -> Option<&PropertyValue> {
        self.global_properties.get(name)
    }

    /// Authority timestamp of the last applied message
    pub fn last_timestamp(&self) -> f32 {
        self.last_timestamp
    }

    // Private

    fn clear_scene(&mut self) {
        info!("Scene reset: tearing down {} mirror(s)", self.mirrors.len());
        for mut mirror in self.mirrors.drain() {
            for type_tag in mirror.component_tags() {
                if let Some(service) = self.registry.observer_service_mut(&type_tag) {
                    service.destroy(&mut mirror);
                }
            }
        }
    }

    fn dispatch(
        &mut self,
        reader: &mut ByteReader,
        events: &mut ObserverEvents,
    ) -> Result<(), ClientError> {
        let header = MessageHeader::de(reader).map_err(|_| ClientError::MalformedHeader)?;
        let type_tag = header.type_tag;

        if type_tag == GLOBAL_PROPERTY_TAG {
            let properties =
                read_global_properties(reader).map_err(|_| ClientError::MalformedGlobalProperties)?;
            self.last_timestamp = header.timestamp;
            for (name, value) in properties {
                if self.global_properties.set(&name, value) {
                    events.push_property_change(name);
                }
            }
            return Ok(());
        }

        let Some(definition) = self.registry.definition(&type_tag).copied() else {
            warn!("Dropping message with unknown type tag '{}'", type_tag);
            return Ok(());
        };

        let identity = ObjectId::de(reader).map_err(|_| ClientError::MalformedHeader)?;
        let change_byte = u8::de(reader).map_err(|_| ClientError::MalformedHeader)?;
        let Some(change_type) = ChangeType::from_byte(change_byte) else {
            return Err(ClientError::UnknownChangeType {
                type_tag,
                byte: change_byte,
            });
        };
        if !identity.is_valid() {
            return Err(ClientError::InvalidIdentity { type_tag });
        }

        let malformed = ClientError::MalformedFields { type_tag, identity };
        let flags = match change_type {
            ChangeType::Destroyed => ChangeFlags::new(definition.flag_bytes),
            ChangeType::Created | ChangeType::Updated => {
                ChangeFlags::read(reader, definition.flag_bytes).map_err(|_| malformed.clone())?
            }
        };
        let message = ObjectMessage {
            timestamp: header.timestamp,
            identity,
            change_type,
            flags,
        };
        self.last_timestamp = header.timestamp;

        let Some(service) = self.registry.observer_service_mut(&type_tag) else {
            return Ok(());
        };

        match change_type {
            ChangeType::Created | ChangeType::Updated => {
                let existed = self.mirrors.contains(&identity);
                let mirror = self.mirrors.get_or_create(identity);
                let applied = match change_type {
                    ChangeType::Created => service.create(mirror, &message, reader),
                    _ => service.read(mirror, &message, reader),
                };
                if applied.is_err() {
                    // a first reference that failed to decode leaves no mirror
                    if !existed && self.mirrors.get(&identity).is_some_and(MirrorNode::is_empty) {
                        self.mirrors.remove(&identity);
                    }
                    return Err(malformed);
                }
                self.mirrors.link_parent(&identity);
                match change_type {
                    ChangeType::Created => events.push_created(identity, type_tag),
                    _ => events.push_updated(identity, type_tag),
                }
            }
            ChangeType::Destroyed => {
                let Some(mirror) = self.mirrors.get_mut(&identity) else {
                    return Ok(());
                };
                service.destroy(mirror);
                mirror.remove_component(&type_tag);
                if mirror.is_empty() {
                    self.mirrors.remove(&identity);
                }
                events.push_destroyed(identity, type_tag);
            }
        }
        Ok(())
    }
}
