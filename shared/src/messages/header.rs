use scenesync_serde::{ByteReader, ByteWrite, ConstByteLength, Serde, SerdeErr};

use crate::{
    messages::constants::{COMMAND_TAG, MESSAGE_HEADER_BYTES, OBJECT_HEADER_BYTES},
    ChangeType, ObjectId, TypeTag,
};

/// Reserved type tag of the Global-Property channel
pub const GLOBAL_PROPERTY_TAG: TypeTag = TypeTag::new(b"GPR");

/// Prefix shared by every message: command tag, timestamp, type tag
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MessageHeader {
    pub timestamp: f32,
    pub type_tag: TypeTag,
}

impl MessageHeader {
    pub fn new(timestamp: f32, type_tag: TypeTag) -> Self {
        Self {
            timestamp,
            type_tag,
        }
    }
}

impl Serde for MessageHeader {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        COMMAND_TAG.ser(writer);
        self.timestamp.ser(writer);
        self.type_tag.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        if u8::de(reader)? != COMMAND_TAG {
            return Err(SerdeErr);
        }
        let timestamp = f32::de(reader)?;
        let type_tag = TypeTag::de(reader)?;
        Ok(Self {
            timestamp,
            type_tag,
        })
    }

    fn byte_length(&self) -> usize {
        MESSAGE_HEADER_BYTES
    }
}

impl ConstByteLength for MessageHeader {
    fn const_byte_length() -> usize {
        MESSAGE_HEADER_BYTES
    }
}

/// Object-channel header: which object, and which lifecycle stage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectHeader {
    pub identity: ObjectId,
    pub change_type: ChangeType,
}

impl ObjectHeader {
    pub fn new(identity: ObjectId, change_type: ChangeType) -> Self {
        Self {
            identity,
            change_type,
        }
    }
}

impl Serde for ObjectHeader {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.identity.ser(writer);
        self.change_type.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let identity = ObjectId::de(reader)?;
        let change_type = ChangeType::de(reader)?;
        Ok(Self {
            identity,
            change_type,
        })
    }

    fn byte_length(&self) -> usize {
        OBJECT_HEADER_BYTES
    }
}

impl ConstByteLength for ObjectHeader {
    fn const_byte_length() -> usize {
        OBJECT_HEADER_BYTES
    }
}
