//! # Scenesync Serde
//! Byte-aligned, little-endian serialization shared by the authority and
//! observer sides of the scene synchronization protocol.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod byte_reader;
mod byte_writer;
mod error;
mod number;
mod serde;
mod string;

pub use byte_reader::{ByteReader, OwnedByteReader};
pub use byte_writer::{ByteCounter, ByteWrite, ByteWriter};
pub use error::SerdeErr;
pub use serde::{ConstByteLength, Serde};
