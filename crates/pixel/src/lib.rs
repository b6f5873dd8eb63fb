//! Raw image buffers and pixel format conversion.
//!
//! Frames cross the wire as raw I420/BGR/RGB/RGBA/GREY planes or as JPEG
//! payloads; consumers usually want packed BGR or grayscale. Conversions
//! allocate a fresh buffer and never mutate the source.

pub mod convert;
mod error;
mod format;
mod image;

pub use error::PixelError;
pub use format::{PixelFormat, fourcc_to_string};
pub use image::Image;

/// Decompress a JPEG payload into a BGR8 [`Image`].
///
/// The CPU-bound decode runs on tokio's blocking thread pool.
///
/// # Errors
///
/// Returns `PixelError::Decode` if the payload is not a valid JPEG.
pub async fn decode_jpeg(data: &[u8]) -> Result<Image, PixelError> {
    let owned = data.to_vec();
    tokio::task::spawn_blocking(move || decode_jpeg_inner(&owned))
        .await
        .map_err(|e| PixelError::Decode(e.to_string()))?
}

fn decode_jpeg_inner(data: &[u8]) -> Result<Image, PixelError> {
    let decoded =
        crates_image::load_from_memory_with_format(data, crates_image::ImageFormat::Jpeg)
            .map_err(|e| PixelError::Decode(e.to_string()))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    let bgr = convert::rgb_to_bgr(&rgb.into_raw())
        .ok_or_else(|| PixelError::Decode("decoded JPEG has a torn buffer".to_string()))?;
    Image::new(width, height, PixelFormat::Bgr8, bgr)
}
