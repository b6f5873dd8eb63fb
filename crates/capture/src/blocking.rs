//! Synchronous facade over the async SDK.
//!
//! The async core needs a tokio runtime; callers that just want the
//! canonical read loop should not have to carry one. All blocking handles
//! in a process share a single runtime: the first handle builds it, later
//! handles reuse it, and dropping the last handle tears it down: the same
//! init-on-first-use, release-on-last-drop discipline ZeroMQ-style bindings
//! apply to their process-wide context. Async callers use [`VideoCapture`]
//! and [`VideoWriter`] directly and never touch this runtime.
//!
//! The facade must be used from synchronous code; calling into it from
//! inside an async runtime panics on `block_on`.

use {
    crate::{CaptureConfig, CaptureError, FrameMeta, VideoCapture, VideoFrame, VideoWriter},
    pixel::Image,
    std::{
        net::SocketAddr,
        sync::{Arc, Mutex, Weak},
        time::Duration,
    },
    tokio::{net::ToSocketAddrs, runtime::Runtime},
};

static RUNTIME: Mutex<Weak<Runtime>> = Mutex::new(Weak::new());

fn shared_runtime() -> Result<Arc<Runtime>, CaptureError> {
    let mut slot = RUNTIME.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(runtime) = slot.upgrade() {
        return Ok(runtime);
    }
    let runtime = Arc::new(Runtime::new().map_err(CaptureError::Runtime)?);
    *slot = Arc::downgrade(&runtime);
    Ok(runtime)
}

/// Blocking counterpart of [`VideoCapture`].
pub struct BlockingCapture {
    inner: VideoCapture,
    runtime: Arc<Runtime>,
}

impl BlockingCapture {
    pub fn connect(
        endpoint: impl ToSocketAddrs,
        config: CaptureConfig,
    ) -> Result<Self, CaptureError> {
        let runtime = shared_runtime()?;
        let inner = runtime.block_on(VideoCapture::connect(endpoint, config))?;
        Ok(Self { inner, runtime })
    }

    /// Blocking read; `Ok(None)` is end of stream, exactly as
    /// [`VideoCapture::read`].
    pub fn read(&mut self) -> Result<Option<VideoFrame>, CaptureError> {
        self.runtime.block_on(self.inner.read())
    }

    pub fn is_ended(&self) -> bool {
        self.inner.is_ended()
    }

    pub fn read_latencies(&self) -> &[Duration] {
        self.inner.read_latencies()
    }
}

/// Blocking counterpart of [`VideoWriter`].
pub struct BlockingWriter {
    inner: VideoWriter,
    runtime: Arc<Runtime>,
}

impl BlockingWriter {
    pub fn bind(endpoint: impl ToSocketAddrs) -> Result<Self, CaptureError> {
        let runtime = shared_runtime()?;
        let inner = runtime.block_on(VideoWriter::bind(endpoint))?;
        Ok(Self { inner, runtime })
    }

    pub fn write(&mut self, image: Image) -> Result<(), CaptureError> {
        self.runtime.block_on(self.inner.write(image))
    }

    pub fn write_frame(&mut self, meta: FrameMeta, image: Image) -> Result<(), CaptureError> {
        self.runtime.block_on(self.inner.write_frame(meta, image))
    }

    pub fn finish(&mut self) -> Result<(), CaptureError> {
        self.runtime.block_on(self.inner.finish())
    }

    pub fn client_count(&self) -> usize {
        self.runtime.block_on(self.inner.client_count())
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.inner.local_addr()
    }
}
