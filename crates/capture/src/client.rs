use {
    crate::{CaptureConfig, CaptureError, VideoFrame, wire::StreamMessage},
    link::Pull,
    std::time::{Duration, Instant},
    tokio::net::ToSocketAddrs,
};

/// Pull-based consumer of a tracker frame stream.
///
/// `read` blocks until the next frame, the end of the stream, or a
/// transport fault. One client owns one connection; reads take `&mut self`,
/// so a client cannot be shared between tasks without external
/// synchronization.
pub struct VideoCapture {
    pull: Pull<StreamMessage>,
    config: CaptureConfig,
    ended: bool,
    latencies: Vec<Duration>,
}

impl VideoCapture {
    /// Connect to a bound writer endpoint.
    ///
    /// An unreachable endpoint fails here with `CaptureError::Connection`.
    pub async fn connect(
        endpoint: impl ToSocketAddrs,
        config: CaptureConfig,
    ) -> Result<Self, CaptureError> {
        let pull = Pull::connect(endpoint).await?;
        Ok(Self {
            pull,
            config,
            ended: false,
            latencies: Vec::new(),
        })
    }

    /// Read the next frame.
    ///
    /// `Ok(Some(frame))` while the stream is live; `Ok(None)` exactly at end
    /// of stream, which is either an explicit end marker from the writer or
    /// a clean close at a frame boundary. Once ended, every further call
    /// returns `Ok(None)`; a frame can never follow the end of the stream.
    ///
    /// A timed-out read (see [`CaptureConfig::with_read_timeout`]) leaves
    /// the stream intact: no bytes are lost and the next read resumes
    /// waiting for the same frame.
    pub async fn read(&mut self) -> Result<Option<VideoFrame>, CaptureError> {
        if self.ended {
            return Ok(None);
        }

        let started = self.config.record_latency().then(Instant::now);
        let message = match self.config.read_timeout() {
            Some(limit) => match tokio::time::timeout(limit, self.pull.recv()).await {
                Ok(result) => result?,
                Err(_) => {
                    log::warn!("no frame within {limit:?}");
                    return Err(CaptureError::Timeout);
                }
            },
            None => self.pull.recv().await?,
        };
        if let Some(started) = started {
            self.latencies.push(started.elapsed());
        }

        match message {
            Some(StreamMessage::Frame(wire_frame)) => Ok(Some(wire_frame.into_frame()?)),
            Some(StreamMessage::End) | None => {
                self.ended = true;
                Ok(None)
            }
        }
    }

    /// True once end of stream has been observed.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Wait durations of completed reads, when latency recording is on.
    pub fn read_latencies(&self) -> &[Duration] {
        &self.latencies
    }
}
