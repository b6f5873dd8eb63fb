use std::fmt;

#[derive(Debug)]
pub enum LinkError {
    Io(std::io::Error),
    Decode(codec::DecodeError),
    ConnectionLost,
    MessageTooLarge(u32),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Io(err) => write!(f, "io error: {err}"),
            LinkError::Decode(err) => write!(f, "decode error: {err}"),
            LinkError::ConnectionLost => write!(f, "connection lost mid-message"),
            LinkError::MessageTooLarge(len) => write!(f, "message too large: {len} bytes"),
        }
    }
}

impl std::error::Error for LinkError {}

impl From<std::io::Error> for LinkError {
    fn from(err: std::io::Error) -> Self {
        LinkError::Io(err)
    }
}

impl From<codec::DecodeError> for LinkError {
    fn from(err: codec::DecodeError) -> Self {
        LinkError::Decode(err)
    }
}
