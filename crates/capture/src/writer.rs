use {
    crate::{
        CaptureError, FrameMeta, PROTOCOL_VERSION,
        wire::{StreamMessage, WireFrame},
    },
    base::Timestamp,
    link::Push,
    pixel::Image,
    std::net::SocketAddr,
    tokio::net::ToSocketAddrs,
};

/// Producer end of a frame stream.
///
/// Binds an endpoint, accepts any number of capture clients, and fans every
/// frame out to all of them. Frames sent before a client connects are not
/// replayed.
pub struct VideoWriter {
    push: Push<StreamMessage>,
    next_seq: u64,
}

impl VideoWriter {
    /// Bind the endpoint and start accepting capture clients.
    pub async fn bind(endpoint: impl ToSocketAddrs) -> Result<Self, CaptureError> {
        let push = Push::bind(endpoint).await?;
        Ok(Self { push, next_seq: 0 })
    }

    /// Send one image with writer-stamped metadata: the next sequence
    /// number, the current time, no detections.
    pub async fn write(&mut self, image: Image) -> Result<(), CaptureError> {
        let meta = FrameMeta {
            version: PROTOCOL_VERSION,
            seq: 0,
            timestamp: Timestamp::now(),
            detections: Vec::new(),
        };
        self.write_frame(meta, image).await
    }

    /// Send one image with caller-supplied metadata.
    ///
    /// The writer owns sequencing: `meta.seq` is overwritten with the next
    /// sequence number so the stream stays strictly increasing no matter
    /// what the caller passes in.
    pub async fn write_frame(&mut self, mut meta: FrameMeta, image: Image) -> Result<(), CaptureError> {
        if image.data().is_empty() {
            return Err(CaptureError::Decode(
                "refusing to send a frame with an empty payload".to_string(),
            ));
        }

        meta.seq = self.next_seq;
        self.next_seq += 1;

        let message = StreamMessage::Frame(WireFrame::from_frame(meta, image));
        self.push.send(&message).await?;
        Ok(())
    }

    /// Signal end of stream to every connected client.
    ///
    /// The writer may stay alive afterwards; clients treat the marker as
    /// terminal regardless.
    pub async fn finish(&mut self) -> Result<(), CaptureError> {
        self.push.send(&StreamMessage::End).await?;
        Ok(())
    }

    /// Number of currently connected capture clients.
    pub async fn client_count(&self) -> usize {
        self.push.peer_count().await
    }

    /// The bound address; useful when binding to port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.push.local_addr()
    }
}
