use std::{mem, sync::Arc};

use log::{info, warn};

use scenesync_shared::{
    BroadcasterService, ByteReader, ChangeFlags, ChangeType, Connection, ConnectionKey,
    MessageHeader, NoopBroadcasterService, ObjectHeader, ObjectId, ObjectIdLookup, ObjectKey,
    ObjectMessage, ObjectTable, ObserverService, PropertyValue, Protocol, RegistryError, Serde,
    SerdeErr, ServiceDefinition, SyncClock, TypeRegistry, TypeTag, GLOBAL_PROPERTY_TAG,
};

use crate::{
    backpressure::BackpressureController,
    broadcaster::{
        broadcaster::Broadcaster, delta_broadcaster::DeltaBroadcaster,
        global_property_broadcaster::GlobalPropertyBroadcaster,
    },
    connection::{connection_log::ConnectionLog, connection_set::ConnectionSet},
    FrameOutcome, FrameStats, ReleasePolicy, ServerConfig, ServerError,
};

/// The authority. Owns every live broadcaster and drives one
/// synchronization cycle each time the host calls `sync_frame`, typically
/// once per rendered frame.
pub struct Server {
    config: ServerConfig,
    registry: TypeRegistry,
    connections: ConnectionSet,
    backpressure: BackpressureController,
    objects: ObjectTable,
    broadcasters: Vec<DeltaBroadcaster>,
    globals: GlobalPropertyBroadcaster,
    clock: SyncClock,
    skip_counter: u32,
    scene_dirty: bool,
}

impl Server {
    /// Create a new Server
    pub fn new<P: Into<Protocol>>(server_config: ServerConfig, protocol: P) -> Self {
        let protocol: Protocol = protocol.into();
        let backpressure = BackpressureController::new(server_config.backpressure.clone());

        Self {
            config: server_config,
            registry: protocol.registry,
            connections: ConnectionSet::new(ConnectionLog::new()),
            backpressure,
            objects: ObjectTable::new(),
            broadcasters: Vec::new(),
            globals: GlobalPropertyBroadcaster::new(),
            clock: SyncClock::realtime(),
            skip_counter: 0,
            scene_dirty: false,
        }
    }

    // Services

    /// Registers a service pair after construction. A duplicate tag is
    /// logged and rejected; the original registration stands.
    pub fn register_service<B: BroadcasterService + 'static, O: ObserverService + 'static>(
        &mut self,
        definition: ServiceDefinition,
        broadcaster: B,
        observer: O,
    ) -> Result<(), RegistryError> {
        self.registry
            .register_service(definition, broadcaster, observer)
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    // Connections

    /// Handle for transport threads to report joins and leaves. Events are
    /// applied at the start of the next cycle.
    pub fn connection_log(&self) -> ConnectionLog {
        self.connections.log().clone()
    }

    pub fn on_connected(&mut self, key: ConnectionKey, connection: Arc<dyn Connection>) {
        self.connections.log().connected(key, connection);
    }

    pub fn on_disconnected(&mut self, key: ConnectionKey) {
        self.connections.log().disconnected(key);
    }

    /// Connections that took part in the last completed cycle
    pub fn observers(&self) -> Vec<ConnectionKey> {
        self.connections.continued()
    }

    pub fn queued_bytes(&self) -> usize {
        self.connections.queued_bytes()
    }

    // Objects

    /// Returns the object's identity, allocating one on first registration.
    /// `ObjectIdError::Exhausted` is fatal for the authority.
    pub fn register_object(&mut self, object: ObjectKey) -> Result<ObjectId, ServerError> {
        let identity = self.objects.allocate(object)?;
        Ok(identity)
    }

    /// Registers an object under a caller-chosen identity. On conflict the
    /// existing mapping is kept.
    pub fn register_object_with_identity(
        &mut self,
        object: ObjectKey,
        identity: ObjectId,
    ) -> Result<ObjectId, ServerError> {
        self.objects.assign(object, identity)?;
        Ok(identity)
    }

    pub fn object_id(&self, object: &ObjectKey) -> Option<ObjectId> {
        self.objects.object_id(object)
    }

    pub fn objects(&self) -> &ObjectTable {
        &self.objects
    }

    /// Admits a broadcaster for a registered object. It is announced to
    /// every observer with a `Created` message on the next cycle.
    pub fn add_broadcaster(
        &mut self,
        object: ObjectKey,
        broadcaster: Box<dyn Broadcaster>,
    ) -> Result<ObjectId, ServerError> {
        let type_tag = broadcaster.type_tag();

        let Some(definition) = self.registry.definition(&type_tag).copied() else {
            return Err(RegistryError::UnknownTypeTag { type_tag }.into());
        };
        let Some(identity) = self.objects.object_id(&object) else {
            return Err(ServerError::ObjectNotRegistered { object });
        };
        if self.has_broadcaster(&object, &type_tag) {
            return Err(ServerError::DuplicateBroadcaster { object, type_tag });
        }

        if let Some(service) = self.registry.broadcaster_service_mut(&type_tag) {
            service.create(identity);
        }
        info!(
            "Admitted '{}' broadcaster for {} as {}",
            definition.name, object.value(), identity
        );
        self.broadcasters.push(DeltaBroadcaster::new(
            object,
            identity,
            definition.flag_bytes,
            broadcaster,
        ));
        Ok(identity)
    }

    pub fn has_broadcaster(&self, object: &ObjectKey, type_tag: &TypeTag) -> bool {
        self.broadcasters
            .iter()
            .any(|record| record.object() == *object && record.type_tag() == *type_tag)
    }

    pub fn broadcaster_count(&self) -> usize {
        self.broadcasters.len()
    }

    // Global properties

    /// Returns whether the value changed
    pub fn set_global_property(&mut self, name: &str, value: PropertyValue) -> bool {
        self.globals.set(name, value)
    }

    pub fn global_property(&self, name: &str) -> Option<&PropertyValue> {
        self.globals.get(name)
    }

    /// Destroys every broadcaster at the start of the next cycle, notifying
    /// observers and releasing identities
    pub fn mark_scene_dirty(&mut self) {
        self.scene_dirty = true;
    }

    pub fn is_scene_dirty(&self) -> bool {
        self.scene_dirty
    }

    // Time

    pub fn clock(&self) -> &SyncClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SyncClock {
        &mut self.clock
    }

    pub fn set_clock(&mut self, clock: SyncClock) {
        self.clock = clock;
    }

    // Backpressure

    pub fn stride(&self) -> u32 {
        self.backpressure.stride()
    }

    pub fn skip_counter(&self) -> u32 {
        self.skip_counter
    }

    pub fn backpressure(&self) -> &BackpressureController {
        &self.backpressure
    }

    // Inbound

    /// Applies an object-channel message sent by an observer through the
    /// registered broadcaster-service. Unknown tags are dropped.
    pub fn receive(&mut self, connection: &ConnectionKey, payload: &[u8]) -> Result<(), SerdeErr> {
        let mut reader = ByteReader::new(payload);
        let header = MessageHeader::de(&mut reader)?;

        if header.type_tag == GLOBAL_PROPERTY_TAG {
            warn!("Dropping global properties sent by observer {}", connection);
            return Ok(());
        }
        let Some(definition) = self.registry.definition(&header.type_tag).copied() else {
            warn!(
                "Dropping message with unknown type tag '{}' from {}",
                header.type_tag, connection
            );
            return Ok(());
        };

        let object = ObjectHeader::de(&mut reader)?;
        if !object.identity.is_valid() {
            return Err(SerdeErr);
        }
        let flags = match object.change_type {
            ChangeType::Destroyed => ChangeFlags::new(definition.flag_bytes),
            ChangeType::Created | ChangeType::Updated => {
                ChangeFlags::read(&mut reader, definition.flag_bytes)?
            }
        };
        let message = ObjectMessage {
            timestamp: header.timestamp,
            identity: object.identity,
            change_type: object.change_type,
            flags,
        };

        match self.registry.broadcaster_service_mut(&header.type_tag) {
            Some(service) => service.read(connection, &message, &mut reader),
            None => Ok(()),
        }
    }

    // Synchronization

    /// Runs one synchronization cycle, or skips it while backpressure asks
    /// for it. Never blocks on the transport.
    pub fn sync_frame(&mut self) -> FrameOutcome {
        if self.skip_counter > 0 {
            self.skip_counter -= 1;
            let queued = self.connections.queued_bytes();
            self.backpressure.evaluate(queued);
            return FrameOutcome::Skipped;
        }

        let queued = self.connections.queued_bytes();
        let stride = self.backpressure.stride();
        if self.backpressure.evaluate(queued) {
            self.skip_counter = stride;
            info!(
                "Outbound backlog at {} bytes, skipping next {} frame(s)",
                queued, stride
            );
        }

        let timestamp = self.clock.now();
        let delta = self.connections.compute_delta();
        let has_observers = delta.has_observers();
        let mut stats = FrameStats {
            added: delta.added.len(),
            removed: delta.removed.len(),
            continued: delta.continued.len(),
            ..Default::default()
        };

        // shuffle send order so no observer is systematically served first
        let mut added = delta.added;
        let mut continued = delta.continued;
        fastrand::shuffle(&mut added);
        fastrand::shuffle(&mut continued);

        if self.scene_dirty {
            self.scene_dirty = false;
            info!("Scene reset: destroying {} broadcaster(s)", self.broadcasters.len());
            self.destroy_all(&continued, timestamp, &mut stats);
        }

        self.cull(&continued, timestamp, &mut stats);

        for broadcaster in self.broadcasters.iter_mut() {
            broadcaster.reset_frame();
        }

        let mut observers = added.clone();
        observers.extend_from_slice(&continued);

        if has_observers {
            self.broadcast_globals(&added, &continued, timestamp, &mut stats);
            self.broadcast_objects(&added, &continued, &observers, timestamp, &mut stats);
        }

        self.cull(&observers, timestamp, &mut stats);

        self.connections.finish_cycle();

        if self.config.release_policy == ReleasePolicy::ReleaseWhenUnobserved
            && !self.connections.has_continued()
            && !self.broadcasters.is_empty()
        {
            info!(
                "No observers remain, releasing {} broadcaster(s)",
                self.broadcasters.len()
            );
            self.destroy_all(&[], timestamp, &mut stats);
        }

        FrameOutcome::Synchronized(stats)
    }

    fn broadcast_globals(
        &mut self,
        added: &[ConnectionKey],
        continued: &[ConnectionKey],
        timestamp: f32,
        stats: &mut FrameStats,
    ) {
        if !added.is_empty() && !self.globals.properties().is_empty() {
            let message = self.globals.complete_message(timestamp);
            stats.global_sent += self.connections.send(added, &message);
        }

        // always refresh the observed cache, added connections just saw
        // every current value
        if let Some(message) = self.globals.delta_message(timestamp) {
            stats.global_sent += self.connections.send(continued, &message);
        }
    }

    fn broadcast_objects(
        &mut self,
        added: &[ConnectionKey],
        continued: &[ConnectionKey],
        observers: &[ConnectionKey],
        timestamp: f32,
        stats: &mut FrameStats,
    ) {
        let Self {
            registry,
            connections,
            objects,
            broadcasters,
            ..
        } = self;
        let registry: &TypeRegistry = registry;
        let objects: &ObjectTable = objects;

        for broadcaster in broadcasters.iter_mut() {
            // refreshes the snapshot even when only complete messages go out
            let changes = broadcaster.calculate_delta_changes();
            let service = broadcaster_service(registry, &broadcaster.type_tag());

            if !broadcaster.is_announced() {
                let message =
                    broadcaster.complete_message(service, ChangeType::Created, timestamp, objects);
                stats.created_sent += connections.send(observers, &message);
                broadcaster.mark_announced();
                continue;
            }

            if !added.is_empty() {
                let message =
                    broadcaster.complete_message(service, ChangeType::Created, timestamp, objects);
                stats.created_sent += connections.send(added, &message);
            }

            if !continued.is_empty() && broadcaster.has_changes(&changes) {
                let message = broadcaster.delta_message(service, &changes, timestamp, objects);
                stats.updated_sent += connections.send(continued, &message);
            }
        }
    }

    /// Removes broadcasters whose backing instance is gone
    fn cull(&mut self, targets: &[ConnectionKey], timestamp: f32, stats: &mut FrameStats) {
        if self.broadcasters.iter().all(|broadcaster| broadcaster.is_alive()) {
            return;
        }

        let (alive, dead): (Vec<DeltaBroadcaster>, Vec<DeltaBroadcaster>) =
            mem::take(&mut self.broadcasters)
                .into_iter()
                .partition(|broadcaster| broadcaster.is_alive());
        self.broadcasters = alive;

        for broadcaster in dead {
            info!(
                "Culling '{}' broadcaster for {}",
                broadcaster.type_tag(),
                broadcaster.identity()
            );
            self.retire(broadcaster, targets, timestamp, stats);
            stats.culled += 1;
        }
    }

    fn destroy_all(&mut self, targets: &[ConnectionKey], timestamp: f32, stats: &mut FrameStats) {
        for broadcaster in mem::take(&mut self.broadcasters) {
            self.retire(broadcaster, targets, timestamp, stats);
        }
    }

    /// Tells observers and the service that a broadcaster is gone, and
    /// releases the identity once no other broadcaster uses it
    fn retire(
        &mut self,
        broadcaster: DeltaBroadcaster,
        targets: &[ConnectionKey],
        timestamp: f32,
        stats: &mut FrameStats,
    ) {
        let type_tag = broadcaster.type_tag();
        let identity = broadcaster.identity();

        if broadcaster.is_announced() && !targets.is_empty() {
            let service = broadcaster_service(&self.registry, &type_tag);
            let message = broadcaster.destroyed_message(service, timestamp);
            stats.destroyed_sent += self.connections.send(targets, &message);
        }

        if let Some(service) = self.registry.broadcaster_service_mut(&type_tag) {
            service.destroy(identity);
        }

        let shared = self
            .broadcasters
            .iter()
            .any(|other| other.identity() == identity);
        if !shared && self.objects.release(&identity).is_some() {
            info!("Released identity {}", identity);
        }
    }
}

fn broadcaster_service<'r>(
    registry: &'r TypeRegistry,
    type_tag: &TypeTag,
) -> &'r dyn BroadcasterService {
    match registry.broadcaster_service(type_tag) {
        Some(service) => service,
        None => &NoopBroadcasterService,
    }
}
