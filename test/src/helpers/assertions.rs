use scenesync_shared::{
    ByteReader, ChangeType, MessageHeader, ObjectHeader, Serde, TypeTag, GLOBAL_PROPERTY_TAG,
};

/// Message kinds found in a batch of payloads
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MessageCounts {
    pub created: usize,
    pub updated: usize,
    pub destroyed: usize,
    pub global: usize,
}

/// Counts messages by change type, optionally only those of one type tag
pub fn count_messages(payloads: &[Vec<u8>], only: Option<TypeTag>) -> MessageCounts {
    let mut counts = MessageCounts::default();
    for payload in payloads {
        let mut reader = ByteReader::new(payload);
        let header = MessageHeader::de(&mut reader).expect("valid header");
        if only.is_some_and(|type_tag| type_tag != header.type_tag) {
            continue;
        }
        if header.type_tag == GLOBAL_PROPERTY_TAG {
            counts.global += 1;
            continue;
        }
        let object = ObjectHeader::de(&mut reader).expect("valid object header");
        match object.change_type {
            ChangeType::Created => counts.created += 1,
            ChangeType::Updated => counts.updated += 1,
            ChangeType::Destroyed => counts.destroyed += 1,
        }
    }
    counts
}

/// Assert that two positions match within float tolerance
#[macro_export]
macro_rules! assert_position_eq {
    ($actual:expr, $expected:expr) => {
        let actual: [f32; 3] = $actual;
        let expected: [f32; 3] = $expected;
        for axis in 0..3 {
            assert!(
                (actual[axis] - expected[axis]).abs() < 1e-5,
                "position mismatch on axis {}: {:?} != {:?}",
                axis,
                actual,
                expected
            );
        }
    };
}
