use crate::error::SerdeErr;

pub struct ByteReader<'b> {
    buffer: &'b [u8],
    cursor: usize,
}

impl<'b> ByteReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let Some(byte) = self.buffer.get(self.cursor) else {
            return Err(SerdeErr);
        };
        self.cursor += 1;
        Ok(*byte)
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&'b [u8], SerdeErr> {
        let end = self.cursor.checked_add(length).ok_or(SerdeErr)?;
        if end > self.buffer.len() {
            return Err(SerdeErr);
        }
        let buffer: &'b [u8] = self.buffer;
        let bytes = &buffer[self.cursor..end];
        self.cursor = end;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], SerdeErr> {
        let mut output = [0u8; N];
        output.copy_from_slice(self.read_bytes(N)?);
        Ok(output)
    }

    pub fn bytes_read(&self) -> usize {
        self.cursor
    }

    pub fn bytes_remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.bytes_remaining() == 0
    }
}

/// An incoming payload that outlives the transport callback which produced it
pub struct OwnedByteReader {
    buffer: Box<[u8]>,
}

impl OwnedByteReader {
    pub fn new(buffer: &[u8]) -> Self {
        Self {
            buffer: buffer.into(),
        }
    }

    pub fn borrow(&self) -> ByteReader<'_> {
        ByteReader::new(&self.buffer)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl From<Vec<u8>> for OwnedByteReader {
    fn from(value: Vec<u8>) -> Self {
        Self {
            buffer: value.into_boxed_slice(),
        }
    }
}
