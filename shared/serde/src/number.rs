use crate::{
    byte_reader::ByteReader,
    byte_writer::ByteWrite,
    error::SerdeErr,
    serde::{ConstByteLength, Serde},
};

// All multi-byte numbers are little-endian on the wire.
macro_rules! impl_serde_for_number {
    ($($kind:ty),*) => {
        $(
            impl Serde for $kind {
                fn ser(&self, writer: &mut dyn ByteWrite) {
                    writer.write_bytes(&self.to_le_bytes());
                }

                fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
                    let bytes = reader.read_array::<{ std::mem::size_of::<$kind>() }>()?;
                    Ok(<$kind>::from_le_bytes(bytes))
                }

                fn byte_length(&self) -> usize {
                    std::mem::size_of::<$kind>()
                }
            }

            impl ConstByteLength for $kind {
                fn const_byte_length() -> usize {
                    std::mem::size_of::<$kind>()
                }
            }
        )*
    };
}

impl_serde_for_number!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl Serde for bool {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(if *self { 1 } else { 0 });
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        match reader.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(SerdeErr),
        }
    }

    fn byte_length(&self) -> usize {
        1
    }
}

impl ConstByteLength for bool {
    fn const_byte_length() -> usize {
        1
    }
}

impl<T: Serde> Serde for Option<T> {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        match self {
            Some(value) => {
                true.ser(writer);
                value.ser(writer);
            }
            None => false.ser(writer),
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        if bool::de(reader)? {
            Ok(Some(T::de(reader)?))
        } else {
            Ok(None)
        }
    }

    fn byte_length(&self) -> usize {
        1 + self.as_ref().map_or(0, |value| value.byte_length())
    }
}

impl<T: Serde + Copy + Default, const N: usize> Serde for [T; N] {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        for value in self {
            value.ser(writer);
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let mut output = [T::default(); N];
        for slot in output.iter_mut() {
            *slot = T::de(reader)?;
        }
        Ok(output)
    }

    fn byte_length(&self) -> usize {
        self.iter().map(Serde::byte_length).sum()
    }
}
