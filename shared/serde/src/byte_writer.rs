pub trait ByteWrite {
    fn write_byte(&mut self, byte: u8);

    fn write_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.write_byte(*byte);
        }
    }

    fn is_counter(&self) -> bool;
}

/// A growable outgoing byte buffer. A single synchronization message is
/// written into one of these and handed to the transport as-is.
pub struct ByteWriter {
    buffer: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(64),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Returns a counter that measures how many bytes a value would need,
    /// without writing anything
    pub fn counter() -> ByteCounter {
        ByteCounter::new()
    }

    pub fn bytes_written(&self) -> usize {
        self.buffer.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn to_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWrite for ByteWriter {
    fn write_byte(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    fn is_counter(&self) -> bool {
        false
    }
}

pub struct ByteCounter {
    bytes_needed: usize,
}

impl ByteCounter {
    pub fn new() -> Self {
        Self { bytes_needed: 0 }
    }

    pub fn bytes_needed(&self) -> usize {
        self.bytes_needed
    }
}

impl Default for ByteCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWrite for ByteCounter {
    fn write_byte(&mut self, _byte: u8) {
        self.bytes_needed += 1;
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes_needed += bytes.len();
    }

    fn is_counter(&self) -> bool {
        true
    }
}
