use codec::{Codec, DecodeError};

fn round_trip<T: Codec + PartialEq + std::fmt::Debug>(value: &T) {
    let mut buf = Vec::new();
    value.encode(&mut buf);
    let mut pos = 0;
    let decoded = T::decode(&buf, &mut pos).unwrap();
    assert_eq!(&decoded, value);
    assert_eq!(pos, buf.len(), "all bytes should be consumed");
}

#[test]
fn test_integer_extremes() {
    round_trip(&0u8);
    round_trip(&u8::MAX);
    round_trip(&u16::MAX);
    round_trip(&u32::MAX);
    round_trip(&u64::MAX);
    round_trip(&i8::MIN);
    round_trip(&i16::MIN);
    round_trip(&i32::MIN);
    round_trip(&(-1i64));
}

#[test]
fn test_little_endian_layout() {
    let mut buf = Vec::new();
    0x0102u16.encode(&mut buf);
    assert_eq!(buf, vec![0x02, 0x01]);

    buf.clear();
    0x01020304u32.encode(&mut buf);
    assert_eq!(buf, vec![0x04, 0x03, 0x02, 0x01]);
}

#[test]
fn test_floats() {
    round_trip(&1.5f32);
    round_trip(&f32::NEG_INFINITY);
    round_trip(&-3.25f64);

    let mut buf = Vec::new();
    f64::NAN.encode(&mut buf);
    let mut pos = 0;
    assert!(f64::decode(&buf, &mut pos).unwrap().is_nan());
}

#[test]
fn test_bool() {
    assert_eq!(true.to_bytes(), vec![1]);
    assert_eq!(false.to_bytes(), vec![0]);
    assert_eq!(bool::from_bytes(&[2]), Err(DecodeError::InvalidBool(2)));
}

#[test]
fn test_string_layout_and_unicode() {
    // 4-byte LE length, then UTF-8 bytes
    assert_eq!(
        "hi".to_string().to_bytes(),
        vec![2, 0, 0, 0, b'h', b'i']
    );
    round_trip(&String::new());
    round_trip(&"建物の中".to_string());
}

#[test]
fn test_string_errors() {
    // claims 10 bytes, provides 2
    let buf = vec![10, 0, 0, 0, b'h', b'i'];
    assert_eq!(String::from_bytes(&buf), Err(DecodeError::UnexpectedEof));

    let mut buf = Vec::new();
    3u32.encode(&mut buf);
    buf.extend_from_slice(&[0xFF, 0xFE, 0xFD]);
    assert_eq!(String::from_bytes(&buf), Err(DecodeError::InvalidUtf8));
}

#[test]
fn test_vec_layout() {
    assert_eq!(vec![10u8, 20, 30].to_bytes(), vec![3, 0, 0, 0, 10, 20, 30]);
    round_trip(&Vec::<u8>::new());
    round_trip(&vec![100u32, 200, 300]);
}

#[test]
fn test_vec_errors() {
    // claims 5 elements, provides 2
    let buf = vec![5, 0, 0, 0, 1, 2];
    assert_eq!(Vec::<u8>::from_bytes(&buf), Err(DecodeError::UnexpectedEof));

    // a huge claimed length must fail, not allocate
    let buf = u32::MAX.to_bytes();
    assert_eq!(Vec::<u8>::from_bytes(&buf), Err(DecodeError::UnexpectedEof));
}

#[test]
fn test_sequential_decode() {
    let mut buf = Vec::new();
    42u32.encode(&mut buf);
    "frame".to_string().encode(&mut buf);
    3.5f64.encode(&mut buf);

    let mut pos = 0;
    assert_eq!(u32::decode(&buf, &mut pos).unwrap(), 42);
    assert_eq!(String::decode(&buf, &mut pos).unwrap(), "frame");
    assert_eq!(f64::decode(&buf, &mut pos).unwrap(), 3.5);
    assert_eq!(pos, buf.len());
}

#[test]
fn test_decode_empty_buffer() {
    let mut pos = 0;
    assert_eq!(u32::decode(&[], &mut pos), Err(DecodeError::UnexpectedEof));
}
