use log::warn;

use scenesync_shared::{
    BroadcasterService, ByteWriter, ChangeFlags, ChangeType, MessageHeader, ObjectHeader,
    ObjectId, ObjectIdLookup, ObjectKey, TypeTag,
};

use super::broadcaster::Broadcaster;

/// Live broadcaster record: the host's `Broadcaster` plus the identity it
/// is mirrored under and the per-frame change memo
pub struct DeltaBroadcaster {
    object: ObjectKey,
    identity: ObjectId,
    type_tag: TypeTag,
    flag_bytes: u8,
    inner: Box<dyn Broadcaster>,
    memo: Option<ChangeFlags>,
    announced: bool,
}

impl DeltaBroadcaster {
    pub fn new(
        object: ObjectKey,
        identity: ObjectId,
        flag_bytes: u8,
        inner: Box<dyn Broadcaster>,
    ) -> Self {
        Self {
            object,
            identity,
            type_tag: inner.type_tag(),
            flag_bytes,
            inner,
            memo: None,
            announced: false,
        }
    }

    pub fn object(&self) -> ObjectKey {
        self.object
    }

    pub fn identity(&self) -> ObjectId {
        self.identity
    }

    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    pub fn is_alive(&self) -> bool {
        self.inner.is_alive()
    }

    /// Whether a `Created` message has gone out for this broadcaster
    pub fn is_announced(&self) -> bool {
        self.announced
    }

    pub fn mark_announced(&mut self) {
        self.announced = true;
    }

    pub fn reset_frame(&mut self) {
        self.memo = None;
    }

    /// Changes since the last frame. Repeated calls before `reset_frame`
    /// return the memoized result without diffing again.
    pub fn calculate_delta_changes(&mut self) -> ChangeFlags {
        if let Some(memo) = &self.memo {
            return memo.clone();
        }

        let changes = self.inner.diff();
        let changes = if changes.byte_count() == self.flag_bytes {
            changes
        } else {
            warn!(
                "Broadcaster '{}' for {} returned {} flag bytes, expected {}",
                self.type_tag,
                self.identity,
                changes.byte_count(),
                self.flag_bytes
            );
            let mut normalized = ChangeFlags::new(self.flag_bytes);
            normalized.or(&changes);
            normalized
        };

        self.memo = Some(changes.clone());
        changes
    }

    pub fn has_changes(&self, flags: &ChangeFlags) -> bool {
        !flags.is_clear()
    }

    /// Full snapshot, every flag set
    pub fn complete_message(
        &self,
        service: &dyn BroadcasterService,
        change_type: ChangeType,
        timestamp: f32,
        objects: &dyn ObjectIdLookup,
    ) -> Vec<u8> {
        let flags = ChangeFlags::all(self.flag_bytes);
        self.write_message(service, change_type, &flags, timestamp, objects)
    }

    /// Only the changed fields
    pub fn delta_message(
        &self,
        service: &dyn BroadcasterService,
        flags: &ChangeFlags,
        timestamp: f32,
        objects: &dyn ObjectIdLookup,
    ) -> Vec<u8> {
        self.write_message(service, ChangeType::Updated, flags, timestamp, objects)
    }

    pub fn destroyed_message(&self, service: &dyn BroadcasterService, timestamp: f32) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        service.write_header(
            &mut writer,
            &MessageHeader::new(timestamp, self.type_tag),
            &ObjectHeader::new(self.identity, ChangeType::Destroyed),
        );
        writer.to_bytes()
    }

    fn write_message(
        &self,
        service: &dyn BroadcasterService,
        change_type: ChangeType,
        flags: &ChangeFlags,
        timestamp: f32,
        objects: &dyn ObjectIdLookup,
    ) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        service.write_header(
            &mut writer,
            &MessageHeader::new(timestamp, self.type_tag),
            &ObjectHeader::new(self.identity, change_type),
        );
        flags.write(&mut writer);
        self.inner.write_fields(flags, objects, &mut writer);
        writer.to_bytes()
    }
}
