//! Client SDK for streaming (metadata, image) pairs from a tracker process.
//!
//! A [`VideoWriter`] binds an endpoint and pushes frames; any number of
//! [`VideoCapture`] clients connect and consume them with a pull-based read
//! loop:
//!
//! ```no_run
//! # async fn demo() -> Result<(), capture::CaptureError> {
//! let mut cap =
//!     capture::VideoCapture::connect("127.0.0.1:5556", Default::default()).await?;
//! while let Some(frame) = cap.read().await? {
//!     log::info!("frame {} at {}", frame.meta.seq, frame.meta.timestamp);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! End of stream is `Ok(None)`: the writer either sent an explicit end
//! marker or closed its connection at a frame boundary. Everything else
//! (lost connections, undecodable payloads) is an error, never a silent
//! stream end. Callers without an async runtime use [`blocking`].

pub mod blocking;
mod client;
mod config;
mod error;
mod frame;
mod wire;
mod writer;

pub use client::VideoCapture;
pub use config::CaptureConfig;
pub use error::CaptureError;
pub use frame::{BBox, Detection, FrameMeta, VideoFrame};
pub use writer::VideoWriter;

/// Wire protocol version spoken by both ends.
pub const PROTOCOL_VERSION: u16 = 1;
