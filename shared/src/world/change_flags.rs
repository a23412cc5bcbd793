use scenesync_serde::{ByteReader, ByteWrite, SerdeErr};

/// Bitset naming which logical sub-fields of a component changed. The
/// meaning of each bit, and the order fields are written in, belong to the
/// component type.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ChangeFlags {
    mask: Vec<u8>,
}

impl ChangeFlags {
    /// Creates a new, clear set of flags `byte_count` bytes wide
    pub fn new(byte_count: u8) -> Self {
        Self {
            mask: vec![0; byte_count as usize],
        }
    }

    /// Creates flags with every bit set; used for complete snapshots
    pub fn all(byte_count: u8) -> Self {
        Self {
            mask: vec![u8::MAX; byte_count as usize],
        }
    }

    pub fn byte_count(&self) -> u8 {
        self.mask.len() as u8
    }

    pub fn bit(&self, index: u8) -> bool {
        let byte_index = (index / 8) as usize;
        let Some(byte) = self.mask.get(byte_index) else {
            return false;
        };
        let adjusted_index = index % 8;
        byte & (1 << adjusted_index) != 0
    }

    /// Sets a bit. Indices beyond the flags' width are ignored.
    pub fn set_bit(&mut self, index: u8, value: bool) {
        let byte_index = (index / 8) as usize;
        let Some(byte) = self.mask.get_mut(byte_index) else {
            return;
        };
        let adjusted_index = index % 8;
        let bit_mask = 1 << adjusted_index;
        if value {
            *byte |= bit_mask;
        } else {
            *byte &= !bit_mask;
        }
    }

    pub fn byte(&self, index: usize) -> u8 {
        self.mask.get(index).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        for byte in self.mask.iter_mut() {
            *byte = 0;
        }
    }

    pub fn is_clear(&self) -> bool {
        self.mask.iter().all(|byte| *byte == 0)
    }

    pub fn or(&mut self, other: &ChangeFlags) {
        for (byte, other_byte) in self.mask.iter_mut().zip(other.mask.iter()) {
            *byte |= other_byte;
        }
    }

    pub fn write(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(&self.mask);
    }

    pub fn read(reader: &mut ByteReader, byte_count: u8) -> Result<Self, SerdeErr> {
        let bytes = reader.read_bytes(byte_count as usize)?;
        Ok(Self {
            mask: bytes.to_vec(),
        })
    }
}
