use scenesync_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

use crate::{
    messages::header::{MessageHeader, ObjectHeader},
    world::mirror::MirrorNode,
    ChangeFlags, ChangeType, ConnectionKey, ObjectId,
};

/// Decoded envelope of one object-channel message, handed to services ahead
/// of the type-specific fields
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectMessage {
    pub timestamp: f32,
    pub identity: ObjectId,
    pub change_type: ChangeType,
    pub flags: ChangeFlags,
}

/// Authority-side half of a component protocol
pub trait BroadcasterService {
    /// Called when a broadcaster of this kind is admitted for `identity`
    fn create(&mut self, _identity: ObjectId) {}

    /// Applies an update sent back by an observer. Fields follow `message`
    /// in `reader`.
    fn read(
        &mut self,
        _connection: &ConnectionKey,
        _message: &ObjectMessage,
        _reader: &mut ByteReader,
    ) -> Result<(), SerdeErr> {
        Ok(())
    }

    /// Called once the broadcaster for `identity` has been culled
    fn destroy(&mut self, _identity: ObjectId) {}

    fn write_header(
        &self,
        writer: &mut dyn ByteWrite,
        message: &MessageHeader,
        object: &ObjectHeader,
    ) {
        message.ser(writer);
        object.ser(writer);
    }
}

/// Observer-side half of a component protocol
pub trait ObserverService {
    /// Applies a complete snapshot to a newly announced mirror
    fn create(
        &mut self,
        mirror: &mut MirrorNode,
        message: &ObjectMessage,
        reader: &mut ByteReader,
    ) -> Result<(), SerdeErr>;

    /// Applies the fields named by `message.flags`, leaving the rest untouched
    fn read(
        &mut self,
        mirror: &mut MirrorNode,
        message: &ObjectMessage,
        reader: &mut ByteReader,
    ) -> Result<(), SerdeErr>;

    /// Removes this kind's component from the mirror
    fn destroy(&mut self, mirror: &mut MirrorNode);

    fn supports_interpolation(&self) -> bool {
        false
    }

    /// Advances smoothed state towards the last received values
    fn interpolate(&mut self, _mirror: &mut MirrorNode, _now: f32) {}
}
