use crate::{byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr, serde::Serde};

// Strings are a u32 byte count followed by UTF-8 data.
impl Serde for String {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        (self.len() as u32).ser(writer);
        writer.write_bytes(self.as_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let length = u32::de(reader)? as usize;
        let bytes = reader.read_bytes(length)?;
        let text = std::str::from_utf8(bytes).map_err(|_| SerdeErr)?;
        Ok(text.to_string())
    }

    fn byte_length(&self) -> usize {
        4 + self.len()
    }
}
