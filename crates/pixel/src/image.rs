use crate::{PixelError, PixelFormat, convert};

/// An owned image buffer tagged with its pixel format.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl Image {
    /// Build an image, validating the payload length against the format.
    ///
    /// JPEG payloads have no length formula; they are fully validated when
    /// decompressed, so here they only need to be non-empty.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, PixelError> {
        match format.expected_len(width, height)? {
            Some(expected) => {
                if data.len() != expected {
                    return Err(PixelError::LengthMismatch {
                        expected,
                        actual: data.len(),
                    });
                }
            }
            None => {
                if data.is_empty() {
                    return Err(PixelError::Decode("empty JPEG payload".to_string()));
                }
            }
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Repack as BGR8.
    ///
    /// JPEG images must be decompressed with
    /// [`decode_jpeg`](crate::decode_jpeg) first.
    pub fn to_bgr(&self) -> Result<Image, PixelError> {
        let mismatch = || PixelError::LengthMismatch {
            expected: 0,
            actual: self.data.len(),
        };
        let data = match self.format {
            PixelFormat::I420 => {
                convert::i420_to_bgr(&self.data, self.width, self.height).ok_or_else(mismatch)?
            }
            PixelFormat::Bgr8 => self.data.clone(),
            PixelFormat::Rgb8 => convert::rgb_to_bgr(&self.data).ok_or_else(mismatch)?,
            PixelFormat::Rgba8 => convert::rgba_to_bgr(&self.data).ok_or_else(mismatch)?,
            PixelFormat::Gray8 => convert::gray_to_bgr(&self.data),
            PixelFormat::Jpeg => {
                return Err(PixelError::Decode(
                    "JPEG image: decompress with decode_jpeg first".to_string(),
                ));
            }
        };
        Image::new(self.width, self.height, PixelFormat::Bgr8, data)
    }

    /// Repack as single-channel grayscale (BT.601 luma).
    pub fn to_gray(&self) -> Result<Image, PixelError> {
        let mismatch = || PixelError::LengthMismatch {
            expected: 0,
            actual: self.data.len(),
        };
        let data = match self.format {
            PixelFormat::I420 => {
                convert::i420_to_gray(&self.data, self.width, self.height).ok_or_else(mismatch)?
            }
            PixelFormat::Bgr8 => convert::bgr_to_gray(&self.data).ok_or_else(mismatch)?,
            PixelFormat::Rgb8 => convert::rgb_to_gray(&self.data).ok_or_else(mismatch)?,
            PixelFormat::Rgba8 => convert::rgba_to_gray(&self.data).ok_or_else(mismatch)?,
            PixelFormat::Gray8 => self.data.clone(),
            PixelFormat::Jpeg => {
                return Err(PixelError::Decode(
                    "JPEG image: decompress with decode_jpeg first".to_string(),
                ));
            }
        };
        Image::new(self.width, self.height, PixelFormat::Gray8, data)
    }
}
