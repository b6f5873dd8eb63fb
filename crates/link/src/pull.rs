use {
    crate::{LinkError, framing},
    codec::Codec,
    futures_core::Stream,
    std::{
        future::Future,
        pin::Pin,
        task::{Context, Poll},
    },
    tokio::net::{TcpStream, ToSocketAddrs},
};

type ReadFut<T> = Pin<Box<dyn Future<Output = (TcpStream, Result<Option<T>, LinkError>)> + Send>>;

/// Connecting end of a frame stream.
///
/// Receives messages in the order the bound [`Push`](crate::Push) sent them.
/// Also implements `Stream<Item = Result<T, LinkError>>`; the stream ends
/// when the peer closes the connection at a message boundary.
///
/// The in-flight read is kept inside the socket owner, so cancelling a
/// `recv` (e.g. with `tokio::time::timeout`) never loses partially-read
/// bytes; the next call resumes where the last one stopped.
pub struct Pull<T> {
    stream: Option<TcpStream>,
    read_fut: Option<ReadFut<T>>,
}

impl<T: Codec> Pull<T> {
    /// Connect to a bound `Push` endpoint.
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, LinkError> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self {
            stream: Some(stream),
            read_fut: None,
        })
    }
}

impl<T: Codec + Unpin + Send + 'static> Pull<T> {
    /// Receive the next message.
    ///
    /// `Ok(None)` means the peer closed the stream cleanly; every further
    /// call keeps returning `Ok(None)`.
    pub async fn recv(&mut self) -> Result<Option<T>, LinkError> {
        match std::future::poll_fn(|cx| Pin::new(&mut *self).poll_next(cx)).await {
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }
}

impl<T: Codec + Unpin + Send + 'static> Stream for Pull<T> {
    type Item = Result<T, LinkError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.read_fut.is_none() {
            let Some(mut stream) = this.stream.take() else {
                return Poll::Ready(None);
            };
            this.read_fut = Some(Box::pin(async move {
                let result = framing::read_message(&mut stream).await;
                (stream, result)
            }));
        }

        let fut = this.read_fut.as_mut().unwrap();
        match fut.as_mut().poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready((stream, result)) => {
                this.read_fut = None;
                match result {
                    Ok(Some(value)) => {
                        this.stream = Some(stream);
                        Poll::Ready(Some(Ok(value)))
                    }
                    // Clean close: drop the socket so the stream stays ended.
                    Ok(None) => Poll::Ready(None),
                    Err(e) => {
                        this.stream = Some(stream);
                        Poll::Ready(Some(Err(e)))
                    }
                }
            }
        }
    }
}
