use codec::{Codec, DecodeError};

#[derive(Debug, PartialEq, Codec)]
struct Header {
    version: u16,
    seq: u64,
    label: String,
}

#[derive(Debug, PartialEq, Codec)]
struct Sample(u32, f32);

#[derive(Debug, PartialEq, Codec)]
struct Marker;

#[derive(Debug, PartialEq, Codec)]
struct Batch {
    header: Header,
    samples: Vec<Sample>,
    payload: Vec<u8>,
}

#[test]
fn test_named_struct_round_trip() {
    let value = Header {
        version: 1,
        seq: 42,
        label: "front-door".to_string(),
    };
    let bytes = value.to_bytes();
    assert_eq!(Header::from_bytes(&bytes).unwrap(), value);
}

#[test]
fn test_named_struct_field_order() {
    let value = Header {
        version: 0x0102,
        seq: 0,
        label: String::new(),
    };
    let bytes = value.to_bytes();
    // version first, little-endian
    assert_eq!(&bytes[..2], &[0x02, 0x01]);
    // then 8 bytes of seq, then the 4-byte string length
    assert_eq!(bytes.len(), 2 + 8 + 4);
}

#[test]
fn test_tuple_struct_round_trip() {
    let value = Sample(7, -0.5);
    let bytes = value.to_bytes();
    assert_eq!(Sample::from_bytes(&bytes).unwrap(), value);
}

#[test]
fn test_unit_struct_is_zero_bytes() {
    assert!(Marker.to_bytes().is_empty());
    assert_eq!(Marker::from_bytes(&[]).unwrap(), Marker);
}

#[test]
fn test_nested_round_trip() {
    let value = Batch {
        header: Header {
            version: 1,
            seq: 9,
            label: "lab".to_string(),
        },
        samples: vec![Sample(1, 1.0), Sample(2, 2.0)],
        payload: vec![0xAA, 0xBB],
    };
    let bytes = value.to_bytes();
    assert_eq!(Batch::from_bytes(&bytes).unwrap(), value);
}

#[test]
fn test_truncated_nested_decode_fails() {
    let value = Batch {
        header: Header {
            version: 1,
            seq: 9,
            label: "lab".to_string(),
        },
        samples: vec![Sample(1, 1.0)],
        payload: vec![1, 2, 3],
    };
    let bytes = value.to_bytes();
    let result = Batch::from_bytes(&bytes[..bytes.len() - 1]);
    assert_eq!(result, Err(DecodeError::UnexpectedEof));
}
