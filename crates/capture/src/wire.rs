//! Wire schema: one `StreamMessage` per transport frame.
//!
//! `WireFrame` is the protocol; field order and types must not change
//! without bumping [`PROTOCOL_VERSION`](crate::PROTOCOL_VERSION).

use {
    crate::{CaptureError, Detection, FrameMeta, PROTOCOL_VERSION, VideoFrame},
    base::Timestamp,
    codec::Codec,
    pixel::{Image, PixelFormat},
};

#[derive(Debug, PartialEq, Codec)]
pub(crate) enum StreamMessage {
    Frame(WireFrame),
    End,
}

#[derive(Debug, PartialEq, Codec)]
pub(crate) struct WireFrame {
    pub version: u16,
    pub seq: u64,
    pub timestamp_us: i64,
    pub fourcc: u32,
    pub rows: u32,
    pub cols: u32,
    pub detections: Vec<Detection>,
    pub data: Vec<u8>,
}

impl WireFrame {
    pub(crate) fn from_frame(meta: FrameMeta, image: Image) -> Self {
        WireFrame {
            version: meta.version,
            seq: meta.seq,
            timestamp_us: meta.timestamp.as_micros(),
            fourcc: image.format().as_fourcc(),
            rows: image.height(),
            cols: image.width(),
            detections: meta.detections,
            data: image.into_data(),
        }
    }

    /// Validate a decoded wire frame and lift it into the public pair.
    ///
    /// Everything here came from the peer: version, fourcc, dimensions and
    /// payload length all have to be checked before an `Image` exists.
    pub(crate) fn into_frame(self) -> Result<VideoFrame, CaptureError> {
        if self.version != PROTOCOL_VERSION {
            return Err(CaptureError::Decode(format!(
                "unsupported protocol version {}",
                self.version
            )));
        }
        if self.data.is_empty() {
            return Err(CaptureError::Decode(format!(
                "frame {} has an empty payload",
                self.seq
            )));
        }

        let format = PixelFormat::from_fourcc(self.fourcc)
            .map_err(|e| CaptureError::Decode(e.to_string()))?;
        let image = Image::new(self.cols, self.rows, format, self.data)
            .map_err(|e| CaptureError::Decode(e.to_string()))?;

        Ok(VideoFrame {
            meta: FrameMeta {
                version: self.version,
                seq: self.seq,
                timestamp: Timestamp::from_micros(self.timestamp_us),
                detections: self.detections,
            },
            image,
        })
    }
}
