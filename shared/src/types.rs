use std::fmt;

use scenesync_serde::{ByteReader, ByteWrite, ConstByteLength, Serde, SerdeErr};

/// Identity of a synchronized object, unique among the live objects on one
/// side of the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(i16);

impl ObjectId {
    /// Reserved value meaning "no object"
    pub const INVALID: ObjectId = ObjectId(-1);

    pub const fn new(value: i16) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i16 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Serde for ObjectId {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self(i16::de(reader)?))
    }

    fn byte_length(&self) -> usize {
        <Self as ConstByteLength>::const_byte_length()
    }
}

impl ConstByteLength for ObjectId {
    fn const_byte_length() -> usize {
        2
    }
}

/// 3-byte identifier naming a synchronized component kind
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag([u8; 3]);

impl TypeTag {
    pub const fn new(bytes: &[u8; 3]) -> Self {
        Self(*bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl Serde for TypeTag {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(&self.0);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self(reader.read_array::<3>()?))
    }

    fn byte_length(&self) -> usize {
        3
    }
}

impl ConstByteLength for TypeTag {
    fn const_byte_length() -> usize {
        3
    }
}

/// Lifecycle stage an object-channel message describes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeType {
    Created,
    Updated,
    Destroyed,
}

impl ChangeType {
    pub fn to_byte(self) -> u8 {
        match self {
            ChangeType::Created => 0,
            ChangeType::Updated => 1,
            ChangeType::Destroyed => 2,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(ChangeType::Created),
            1 => Some(ChangeType::Updated),
            2 => Some(ChangeType::Destroyed),
            _ => None,
        }
    }
}

impl Serde for ChangeType {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(self.to_byte());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Self::from_byte(reader.read_byte()?).ok_or(SerdeErr)
    }

    fn byte_length(&self) -> usize {
        1
    }
}

/// Key the transport assigns to an attached endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionKey(u64);

impl ConnectionKey {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Connection({})", self.0)
    }
}

/// The authority's own handle for a domain object in its scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(u64);

impl ObjectKey {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}
