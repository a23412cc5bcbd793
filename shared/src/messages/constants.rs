// Wire constants

/// Marker byte that opens every synchronization message. Messages that do
/// not start with it are dropped by the receiving side.
pub const COMMAND_TAG: u8 = 0xC5;

/// Size of the fixed message prefix: command tag, timestamp and type tag
pub const MESSAGE_HEADER_BYTES: usize = 1 + 4 + 3;

/// Size of the object-channel header that follows the message prefix:
/// identity and change-type byte
pub const OBJECT_HEADER_BYTES: usize = 2 + 1;
