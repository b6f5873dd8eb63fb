use {
    crate::LinkError,
    codec::Codec,
    tokio::io::{AsyncReadExt, AsyncWriteExt},
};

pub const MAX_MESSAGE_SIZE: u32 = 64 * 1024 * 1024; // 64 MiB

/// Write one already-encoded payload: 4-byte little-endian length, then the
/// payload bytes.
pub async fn write_frame<W: AsyncWriteExt + Unpin>(
    writer: &mut W,
    payload: &[u8],
) -> Result<(), LinkError> {
    let len = u32::try_from(payload.len()).map_err(|_| LinkError::MessageTooLarge(u32::MAX))?;
    if len > MAX_MESSAGE_SIZE {
        return Err(LinkError::MessageTooLarge(len));
    }

    writer.write_all(&len.to_le_bytes()).await?;
    writer.write_all(payload).await?;

    Ok(())
}

/// Encode `value` with `Codec::to_bytes()` and write it as one frame.
pub async fn write_message<T: Codec, W: AsyncWriteExt + Unpin>(
    writer: &mut W,
    value: &T,
) -> Result<(), LinkError> {
    write_frame(writer, &value.to_bytes()).await
}

/// Read one length-prefixed message.
///
/// Returns `Ok(None)` if the peer closed the connection cleanly at a message
/// boundary. EOF inside the length prefix or the payload means the message
/// was cut off and is reported as `LinkError::ConnectionLost`.
/// Lengths above `MAX_MESSAGE_SIZE` are rejected before any allocation.
pub async fn read_message<T: Codec, R: AsyncReadExt + Unpin>(
    reader: &mut R,
) -> Result<Option<T>, LinkError> {
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < len_buf.len() {
        let n = reader.read(&mut len_buf[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None); // clean close between messages
            }
            return Err(LinkError::ConnectionLost);
        }
        filled += n;
    }

    let len = u32::from_le_bytes(len_buf);
    if len > MAX_MESSAGE_SIZE {
        return Err(LinkError::MessageTooLarge(len));
    }

    let mut payload = vec![0u8; len as usize];
    match reader.read_exact(&mut payload).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(LinkError::ConnectionLost);
        }
        Err(e) => return Err(e.into()),
    }

    T::from_bytes(&payload).map(Some).map_err(LinkError::from)
}
