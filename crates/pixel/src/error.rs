use {crate::format::fourcc_to_string, std::fmt};

#[derive(Debug)]
pub enum PixelError {
    UnknownFourcc(u32),
    BadDimensions { width: u32, height: u32 },
    LengthMismatch { expected: usize, actual: usize },
    Decode(String),
}

impl fmt::Display for PixelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelError::UnknownFourcc(fourcc) => {
                write!(f, "unknown pixel format: {:?}", fourcc_to_string(*fourcc))
            }
            PixelError::BadDimensions { width, height } => {
                write!(f, "bad image dimensions: {width}x{height}")
            }
            PixelError::LengthMismatch { expected, actual } => {
                write!(f, "payload length mismatch: expected {expected}, got {actual}")
            }
            PixelError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for PixelError {}
