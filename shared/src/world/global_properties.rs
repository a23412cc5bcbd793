use scenesync_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

use crate::messages::header::{MessageHeader, GLOBAL_PROPERTY_TAG};

/// A typed value broadcast outside the per-object protocol
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vector3([f32; 3]),
    Color([f32; 4]),
    Text(String),
}

impl PropertyValue {
    fn kind_byte(&self) -> u8 {
        match self {
            PropertyValue::Bool(_) => 0,
            PropertyValue::Int(_) => 1,
            PropertyValue::Float(_) => 2,
            PropertyValue::Vector3(_) => 3,
            PropertyValue::Color(_) => 4,
            PropertyValue::Text(_) => 5,
        }
    }
}

impl Serde for PropertyValue {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(self.kind_byte());
        match self {
            PropertyValue::Bool(value) => value.ser(writer),
            PropertyValue::Int(value) => value.ser(writer),
            PropertyValue::Float(value) => value.ser(writer),
            PropertyValue::Vector3(value) => value.ser(writer),
            PropertyValue::Color(value) => value.ser(writer),
            PropertyValue::Text(value) => value.ser(writer),
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        match reader.read_byte()? {
            0 => Ok(PropertyValue::Bool(bool::de(reader)?)),
            1 => Ok(PropertyValue::Int(i32::de(reader)?)),
            2 => Ok(PropertyValue::Float(f32::de(reader)?)),
            3 => Ok(PropertyValue::Vector3(<[f32; 3]>::de(reader)?)),
            4 => Ok(PropertyValue::Color(<[f32; 4]>::de(reader)?)),
            5 => Ok(PropertyValue::Text(String::de(reader)?)),
            _ => Err(SerdeErr),
        }
    }

    fn byte_length(&self) -> usize {
        1 + match self {
            PropertyValue::Bool(value) => value.byte_length(),
            PropertyValue::Int(value) => value.byte_length(),
            PropertyValue::Float(value) => value.byte_length(),
            PropertyValue::Vector3(value) => value.byte_length(),
            PropertyValue::Color(value) => value.byte_length(),
            PropertyValue::Text(value) => value.byte_length(),
        }
    }
}

/// Ordered collection of named global values. Insertion order is kept and
/// is the order properties are written in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlobalPropertySet {
    entries: Vec<(String, PropertyValue)>,
}

impl GlobalPropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value, returning whether it differed from the previous one
    pub fn set(&mut self, name: &str, value: PropertyValue) -> bool {
        if let Some((_, current)) = self.entries.iter_mut().find(|(key, _)| key == name) {
            if *current == value {
                return false;
            }
            *current = value;
            return true;
        }
        self.entries.push((name.to_string(), value));
        true
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Writes a complete Global-Property message
pub fn write_global_properties<'a>(
    writer: &mut dyn ByteWrite,
    timestamp: f32,
    properties: &[(&'a str, &'a PropertyValue)],
) {
    MessageHeader::new(timestamp, GLOBAL_PROPERTY_TAG).ser(writer);
    (properties.len() as i32).ser(writer);
    for (name, value) in properties {
        name.to_string().ser(writer);
        value.ser(writer);
    }
}

/// Reads the body of a Global-Property message, after its header
pub fn read_global_properties(
    reader: &mut ByteReader,
) -> Result<Vec<(String, PropertyValue)>, SerdeErr> {
    let count = i32::de(reader)?;
    if count < 0 {
        return Err(SerdeErr);
    }
    // each entry needs at least a name length and a kind byte
    if count as usize > reader.bytes_remaining() / 5 {
        return Err(SerdeErr);
    }

    let mut output = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let name = String::de(reader)?;
        let value = PropertyValue::de(reader)?;
        output.push((name, value));
    }
    Ok(output)
}
