use {link::LinkError, std::fmt};

#[derive(Debug)]
pub enum CaptureError {
    /// Endpoint unreachable, or the connection died mid-stream.
    Connection(LinkError),
    /// The payload could not be turned into a (metadata, image) pair.
    Decode(String),
    /// No frame arrived within the configured read timeout.
    Timeout,
    /// The blocking facade could not build its runtime.
    Runtime(std::io::Error),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Connection(err) => write!(f, "connection error: {err}"),
            CaptureError::Decode(msg) => write!(f, "decode error: {msg}"),
            CaptureError::Timeout => write!(f, "timed out waiting for a frame"),
            CaptureError::Runtime(err) => write!(f, "runtime error: {err}"),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<LinkError> for CaptureError {
    fn from(err: LinkError) -> Self {
        match err {
            LinkError::Decode(e) => CaptureError::Decode(e.to_string()),
            LinkError::MessageTooLarge(len) => {
                CaptureError::Decode(format!("message too large: {len} bytes"))
            }
            other => CaptureError::Connection(other),
        }
    }
}
