use link::{LinkError, framing};
use tokio::io::AsyncWriteExt;

#[tokio::test]
async fn test_round_trip() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    framing::write_message(&mut writer, &42u32)
        .await
        .expect("write failed");
    let decoded: Option<u32> = framing::read_message(&mut reader)
        .await
        .expect("read failed");

    assert_eq!(decoded, Some(42));
}

#[tokio::test]
async fn test_multiple_messages_in_sequence() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    framing::write_message(&mut writer, &"one".to_string())
        .await
        .unwrap();
    framing::write_message(&mut writer, &"two".to_string())
        .await
        .unwrap();

    let first: Option<String> = framing::read_message(&mut reader).await.unwrap();
    let second: Option<String> = framing::read_message(&mut reader).await.unwrap();
    assert_eq!(first.as_deref(), Some("one"));
    assert_eq!(second.as_deref(), Some("two"));
}

#[tokio::test]
async fn test_clean_close_is_end_of_stream() {
    let (writer, mut reader) = tokio::io::duplex(1024);

    // Close without writing anything: a clean end at a message boundary.
    drop(writer);

    let result: Option<u32> = framing::read_message(&mut reader)
        .await
        .expect("clean close should not be an error");
    assert_eq!(result, None);
}

#[tokio::test]
async fn test_close_after_full_message_then_eof() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    framing::write_message(&mut writer, &7u32).await.unwrap();
    drop(writer);

    let first: Option<u32> = framing::read_message(&mut reader).await.unwrap();
    assert_eq!(first, Some(7));
    let second: Option<u32> = framing::read_message(&mut reader).await.unwrap();
    assert_eq!(second, None);
}

#[tokio::test]
async fn test_partial_prefix_is_connection_lost() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    // Two of the four length-prefix bytes, then close.
    writer.write_all(&[0x01, 0x02]).await.unwrap();
    drop(writer);

    let result: Result<Option<u32>, LinkError> = framing::read_message(&mut reader).await;
    match result {
        Err(LinkError::ConnectionLost) => {}
        other => panic!("expected ConnectionLost, got {:?}", other),
    }
}

#[tokio::test]
async fn test_partial_payload_is_connection_lost() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    // Prefix claims 100 bytes, only 3 arrive.
    writer.write_all(&100u32.to_le_bytes()).await.unwrap();
    writer.write_all(&[1, 2, 3]).await.unwrap();
    drop(writer);

    let result: Result<Option<u32>, LinkError> = framing::read_message(&mut reader).await;
    match result {
        Err(LinkError::ConnectionLost) => {}
        other => panic!("expected ConnectionLost, got {:?}", other),
    }
}

#[tokio::test]
async fn test_oversized_length_rejected_on_read() {
    let (mut writer, mut reader) = tokio::io::duplex(16);

    let huge = framing::MAX_MESSAGE_SIZE + 1;
    writer.write_all(&huge.to_le_bytes()).await.unwrap();

    let result: Result<Option<u32>, LinkError> = framing::read_message(&mut reader).await;
    match result {
        Err(LinkError::MessageTooLarge(len)) => assert_eq!(len, huge),
        other => panic!("expected MessageTooLarge, got {:?}", other),
    }
}

#[tokio::test]
async fn test_oversized_payload_rejected_on_write() {
    let (mut writer, _reader) = tokio::io::duplex(64);

    let payload = vec![0u8; framing::MAX_MESSAGE_SIZE as usize + 1];
    let result = framing::write_frame(&mut writer, &payload).await;
    match result {
        Err(LinkError::MessageTooLarge(len)) => {
            assert_eq!(len, framing::MAX_MESSAGE_SIZE + 1);
        }
        other => panic!("expected MessageTooLarge, got {:?}", other),
    }
}

#[tokio::test]
async fn test_garbage_payload_is_decode_error() {
    let (mut writer, mut reader) = tokio::io::duplex(64);

    // A framed payload that is not a valid bool.
    writer.write_all(&1u32.to_le_bytes()).await.unwrap();
    writer.write_all(&[7]).await.unwrap();

    let result: Result<Option<bool>, LinkError> = framing::read_message(&mut reader).await;
    match result {
        Err(LinkError::Decode(codec::DecodeError::InvalidBool(7))) => {}
        other => panic!("expected Decode, got {:?}", other),
    }
}
