use crate::PixelError;

// fourcc codes
pub(crate) const FOURCC_I420: u32 = u32::from_le_bytes(*b"I420");
pub(crate) const FOURCC_BGR8: u32 = u32::from_le_bytes(*b"BGR8");
pub(crate) const FOURCC_RGB8: u32 = u32::from_le_bytes(*b"RGB8");
pub(crate) const FOURCC_RGBA: u32 = u32::from_le_bytes(*b"RGBA");
pub(crate) const FOURCC_GREY: u32 = u32::from_le_bytes(*b"GREY");
pub(crate) const FOURCC_MJPG: u32 = u32::from_le_bytes(*b"MJPG");

/// Convert a fourcc code to a readable 4-character string.
pub fn fourcc_to_string(fourcc: u32) -> String {
    String::from_utf8_lossy(&fourcc.to_le_bytes()).into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    I420,
    Bgr8,
    Rgb8,
    Rgba8,
    Gray8,
    Jpeg,
}

impl PixelFormat {
    /// Decode a wire fourcc. The code comes from the peer, so an unknown
    /// value is a decode failure rather than a panic.
    pub fn from_fourcc(fourcc: u32) -> Result<Self, PixelError> {
        match fourcc {
            FOURCC_I420 => Ok(PixelFormat::I420),
            FOURCC_BGR8 => Ok(PixelFormat::Bgr8),
            FOURCC_RGB8 => Ok(PixelFormat::Rgb8),
            FOURCC_RGBA => Ok(PixelFormat::Rgba8),
            FOURCC_GREY => Ok(PixelFormat::Gray8),
            FOURCC_MJPG => Ok(PixelFormat::Jpeg),
            _ => Err(PixelError::UnknownFourcc(fourcc)),
        }
    }

    pub fn as_fourcc(&self) -> u32 {
        match self {
            PixelFormat::I420 => FOURCC_I420,
            PixelFormat::Bgr8 => FOURCC_BGR8,
            PixelFormat::Rgb8 => FOURCC_RGB8,
            PixelFormat::Rgba8 => FOURCC_RGBA,
            PixelFormat::Gray8 => FOURCC_GREY,
            PixelFormat::Jpeg => FOURCC_MJPG,
        }
    }

    /// Payload length the dimensions imply, or `None` for JPEG, whose
    /// payload is only validated when it is decompressed.
    ///
    /// I420 subsamples chroma 2x2, so it requires even dimensions.
    pub fn expected_len(&self, width: u32, height: u32) -> Result<Option<usize>, PixelError> {
        let bad = PixelError::BadDimensions { width, height };
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .ok_or(PixelError::BadDimensions { width, height })?;

        let len = match self {
            PixelFormat::I420 => {
                if width % 2 != 0 || height % 2 != 0 {
                    return Err(bad);
                }
                pixels.checked_mul(3).map(|n| n / 2)
            }
            PixelFormat::Bgr8 | PixelFormat::Rgb8 => pixels.checked_mul(3),
            PixelFormat::Rgba8 => pixels.checked_mul(4),
            PixelFormat::Gray8 => Some(pixels),
            PixelFormat::Jpeg => return Ok(None),
        };

        len.map(Some).ok_or(bad)
    }
}
