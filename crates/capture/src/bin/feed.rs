//! Bind an endpoint and push synthetic frames: a moving gradient, one frame
//! every 33 ms, then an end-of-stream marker.
//!
//! Usage: feed [bind-addr] [frame-count]

use {
    capture::blocking::BlockingWriter,
    pixel::{Image, PixelFormat},
};

/// Log to `$OPTIC_LOG_DIR` when set, else to stdout.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    match std::env::var("OPTIC_LOG_DIR") {
        Ok(dir) => base::init_file_logger(dir)?,
        Err(_) => base::init_stdout_logger(),
    }
    Ok(())
}

fn synthetic_bgr(width: u32, height: u32, index: u32) -> Image {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for row in 0..height {
        for col in 0..width {
            data.push(((col + index) % 256) as u8);
            data.push(((row + index) % 256) as u8);
            data.push((index % 256) as u8);
        }
    }
    Image::new(width, height, PixelFormat::Bgr8, data).expect("synthetic frame is well-formed")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let mut args = std::env::args().skip(1);
    let endpoint = args.next().unwrap_or_else(|| "127.0.0.1:5556".to_string());
    let count: u32 = args.next().as_deref().unwrap_or("100").parse()?;

    let mut writer = BlockingWriter::bind(endpoint.as_str())?;
    log::info!("feeding {count} frames on {}", writer.local_addr());

    for index in 0..count {
        writer.write(synthetic_bgr(640, 480, index))?;
        std::thread::sleep(std::time::Duration::from_millis(33));
    }
    writer.finish()?;
    log::info!("stream finished");

    Ok(())
}
