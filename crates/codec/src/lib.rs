//! Byte-level serialization for endpoint messages.
//!
//! The layout is deliberately boring: integers and floats are little-endian,
//! `String` and `Vec<T>` carry a 4-byte length prefix, enum variants carry a
//! u32 discriminant in declaration order. `#[derive(Codec)]` covers structs
//! and enums built from these pieces.

// Lets derive-generated `codec::` paths resolve inside this crate too.
extern crate self as codec;

pub use codec_derive::Codec;

use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum DecodeError {
    UnexpectedEof,
    InvalidUtf8,
    InvalidBool(u8),
    InvalidVariant(u32),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnexpectedEof => write!(f, "unexpected end of input"),
            DecodeError::InvalidUtf8 => write!(f, "string is not valid UTF-8"),
            DecodeError::InvalidBool(b) => write!(f, "invalid bool byte: {b}"),
            DecodeError::InvalidVariant(v) => write!(f, "invalid enum variant: {v}"),
        }
    }
}

impl std::error::Error for DecodeError {}

pub trait Codec: Sized {
    fn encode(&self, buf: &mut Vec<u8>);
    fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError>;

    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }

    fn from_bytes(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut pos = 0;
        Self::decode(buf, &mut pos)
    }
}

fn take<'a>(buf: &'a [u8], pos: &mut usize, len: usize) -> Result<&'a [u8], DecodeError> {
    let end = pos.checked_add(len).ok_or(DecodeError::UnexpectedEof)?;
    if end > buf.len() {
        return Err(DecodeError::UnexpectedEof);
    }
    let bytes = &buf[*pos..end];
    *pos = end;
    Ok(bytes)
}

macro_rules! le_codec {
    ($($ty:ty),*) => {$(
        impl Codec for $ty {
            fn encode(&self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&self.to_le_bytes());
            }

            fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError> {
                let bytes = take(buf, pos, size_of::<$ty>())?;
                Ok(<$ty>::from_le_bytes(bytes.try_into().unwrap()))
            }
        }
    )*};
}

le_codec!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl Codec for bool {
    fn encode(&self, buf: &mut Vec<u8>) {
        buf.push(*self as u8);
    }

    fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError> {
        match take(buf, pos, 1)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            b => Err(DecodeError::InvalidBool(b)),
        }
    }
}

impl Codec for String {
    fn encode(&self, buf: &mut Vec<u8>) {
        (self.len() as u32).encode(buf);
        buf.extend_from_slice(self.as_bytes());
    }

    fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError> {
        let len = u32::decode(buf, pos)? as usize;
        let bytes = take(buf, pos, len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
    }
}

impl<T: Codec> Codec for Vec<T> {
    fn encode(&self, buf: &mut Vec<u8>) {
        (self.len() as u32).encode(buf);
        for item in self {
            item.encode(buf);
        }
    }

    fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError> {
        let len = u32::decode(buf, pos)? as usize;
        // Cap the reservation at what the buffer could possibly hold; the
        // length word is attacker-controlled.
        let mut items = Vec::with_capacity(len.min(buf.len().saturating_sub(*pos)));
        for _ in 0..len {
            items.push(T::decode(buf, pos)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests;
