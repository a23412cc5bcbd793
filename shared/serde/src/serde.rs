use crate::{byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr};

/// A type that can be written to and read from the wire
pub trait Serde: Sized + Clone + PartialEq {
    /// Writes the value into the outgoing byte stream
    fn ser(&self, writer: &mut dyn ByteWrite);

    /// Reads a value from the incoming byte stream
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;

    /// Number of bytes `ser` will write
    fn byte_length(&self) -> usize;
}

/// Implemented by types whose encoded size never depends on their value
pub trait ConstByteLength {
    fn const_byte_length() -> usize;
}
