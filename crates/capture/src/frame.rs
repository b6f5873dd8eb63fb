use {base::Timestamp, codec::Codec, pixel::Image};

/// Axis-aligned box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Codec)]
pub struct BBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One object the tracker reported for a frame.
#[derive(Debug, Clone, PartialEq, Codec)]
pub struct Detection {
    pub label: String,
    pub confidence: f32,
    pub bbox: BBox,
}

/// Per-frame descriptive data.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMeta {
    /// Protocol version the producer spoke.
    pub version: u16,
    /// Writer-assigned, strictly increasing within a stream.
    pub seq: u64,
    /// Capture time.
    pub timestamp: Timestamp,
    pub detections: Vec<Detection>,
}

/// One delivered frame: metadata paired with its image.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    pub meta: FrameMeta,
    pub image: Image,
}

impl VideoFrame {
    /// The frame as packed BGR8, decompressing JPEG payloads if needed.
    pub async fn to_bgr(&self) -> Result<Image, pixel::PixelError> {
        match self.image.format() {
            pixel::PixelFormat::Jpeg => pixel::decode_jpeg(self.image.data()).await,
            _ => self.image.to_bgr(),
        }
    }

    /// The frame as single-channel grayscale.
    pub async fn to_gray(&self) -> Result<Image, pixel::PixelError> {
        match self.image.format() {
            pixel::PixelFormat::Jpeg => pixel::decode_jpeg(self.image.data()).await?.to_gray(),
            _ => self.image.to_gray(),
        }
    }
}
