//! The canonical read loop: connect to an endpoint, read until end of
//! stream, log every frame's metadata.
//!
//! Usage: watch [endpoint]

use capture::{CaptureConfig, blocking::BlockingCapture};

/// Log to `$OPTIC_LOG_DIR` when set, else to stdout.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    match std::env::var("OPTIC_LOG_DIR") {
        Ok(dir) => base::init_file_logger(dir)?,
        Err(_) => base::init_stdout_logger(),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:5556".to_string());

    let mut cap = BlockingCapture::connect(endpoint.as_str(), CaptureConfig::default())?;
    log::info!("connected to {endpoint}");

    let mut frames = 0u64;
    while let Some(frame) = cap.read()? {
        frames += 1;
        log::info!(
            "frame {} at {} ({}x{} {:?}, {} detections)",
            frame.meta.seq,
            frame.meta.timestamp,
            frame.image.width(),
            frame.image.height(),
            frame.image.format(),
            frame.meta.detections.len()
        );
    }
    log::info!("end of stream after {frames} frames");

    Ok(())
}
