use std::mem;

use log::warn;
use scenesync_serde::{ByteReader, SerdeErr};

use crate::world::mirror::MirrorNode;

pub mod error;
pub mod registry;
pub mod service;

pub use error::{ProtocolError, RegistryError};
pub use registry::{ServiceDefinition, TypeRegistry};
pub use service::{BroadcasterService, ObjectMessage, ObserverService};

// Protocol Plugin
pub trait ProtocolPlugin {
    fn build(&self, protocol: &mut Protocol);
}

// Protocol
/// The set of synchronized component kinds. The authority and every
/// observer build one from the same plugins.
#[derive(Default)]
pub struct Protocol {
    pub registry: TypeRegistry,
    locked: bool,
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn add_plugin<P: ProtocolPlugin>(&mut self, plugin: P) -> &mut Self {
        if self.locked {
            warn!("Protocol is locked, plugin ignored");
            return self;
        }
        plugin.build(self);
        self
    }

    /// Registers a service pair. Duplicate tags are logged by the registry and
    /// the original registration stands.
    pub fn add_service<B: BroadcasterService + 'static, O: ObserverService + 'static>(
        &mut self,
        definition: ServiceDefinition,
        broadcaster: B,
        observer: O,
    ) -> &mut Self {
        if let Err(err) = self.try_add_service(definition, broadcaster, observer) {
            warn!("Protocol: ignoring service: {}", err);
        }
        self
    }

    pub fn try_add_service<B: BroadcasterService + 'static, O: ObserverService + 'static>(
        &mut self,
        definition: ServiceDefinition,
        broadcaster: B,
        observer: O,
    ) -> Result<&mut Self, ProtocolError> {
        if self.locked {
            warn!(
                "Protocol is locked, service '{}' ignored",
                definition.type_tag
            );
            return Err(ProtocolError::AlreadyLocked);
        }
        self.registry
            .register_service(definition, broadcaster, observer)?;
        Ok(self)
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn build(&mut self) -> Self {
        mem::take(self)
    }
}

/// Broadcaster half for kinds the authority never accepts updates for
pub struct NoopBroadcasterService;

impl BroadcasterService for NoopBroadcasterService {}

/// Observer half that ignores every message of its kind
pub struct NoopObserverService;

impl ObserverService for NoopObserverService {
    fn create(
        &mut self,
        _mirror: &mut MirrorNode,
        _message: &ObjectMessage,
        _reader: &mut ByteReader,
    ) -> Result<(), SerdeErr> {
        Ok(())
    }

    fn read(
        &mut self,
        _mirror: &mut MirrorNode,
        _message: &ObjectMessage,
        _reader: &mut ByteReader,
    ) -> Result<(), SerdeErr> {
        Ok(())
    }

    fn destroy(&mut self, _mirror: &mut MirrorNode) {}
}
