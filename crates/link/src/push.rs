use {
    crate::{LinkError, framing},
    codec::Codec,
    std::{
        collections::HashMap,
        marker::PhantomData,
        net::SocketAddr,
        sync::{Arc, Weak},
    },
    tokio::{
        io::AsyncReadExt,
        net::{
            TcpListener, ToSocketAddrs,
            tcp::{OwnedReadHalf, OwnedWriteHalf},
        },
        sync::RwLock,
        task::JoinHandle,
    },
};

type PeerMap = Arc<RwLock<HashMap<SocketAddr, OwnedWriteHalf>>>;

/// Binding end of a frame stream.
///
/// Accepts any number of pull peers and fans every message out to all of
/// them. Peers that disconnect or fail a write are dropped from the peer
/// map; there is no retry and no replay for late joiners.
pub struct Push<T> {
    peers: PeerMap,
    local_addr: SocketAddr,
    accept_task: JoinHandle<()>,
    _marker: PhantomData<T>,
}

impl<T: Codec> Push<T> {
    /// Bind a listener and start accepting pull peers.
    pub async fn bind(addr: impl ToSocketAddrs) -> Result<Self, LinkError> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        let peers: PeerMap = Arc::new(RwLock::new(HashMap::new()));
        let peers_for_accept = peers.clone();

        let accept_task = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, addr)) => {
                        let (read_half, write_half) = stream.into_split();
                        peers_for_accept.write().await.insert(addr, write_half);
                        log::debug!("peer {addr} connected");

                        // The watch task holds only a weak handle so that
                        // dropping the Push closes every peer socket.
                        let peers_for_cleanup = Arc::downgrade(&peers_for_accept);
                        tokio::spawn(watch_peer(read_half, addr, peers_for_cleanup));
                    }
                    Err(e) => {
                        log::warn!("accept error: {e}");
                        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                    }
                }
            }
        });

        Ok(Self {
            peers,
            local_addr,
            accept_task,
            _marker: PhantomData,
        })
    }

    /// Send a message to every connected peer.
    ///
    /// Peers whose socket write fails are logged and removed; the call
    /// succeeds regardless of individual peer failures. Only an oversized
    /// message fails the call itself.
    pub async fn send(&self, value: &T) -> Result<(), LinkError> {
        let payload = value.to_bytes();
        let len = u32::try_from(payload.len()).map_err(|_| LinkError::MessageTooLarge(u32::MAX))?;
        if len > framing::MAX_MESSAGE_SIZE {
            return Err(LinkError::MessageTooLarge(len));
        }

        let mut peers = self.peers.write().await;
        let mut failed = Vec::new();
        for (addr, writer) in peers.iter_mut() {
            if let Err(e) = framing::write_frame(writer, &payload).await {
                log::warn!("dropping peer {addr}: {e}");
                failed.push(*addr);
            }
        }
        for addr in failed {
            peers.remove(&addr);
        }

        Ok(())
    }

    /// Number of currently connected peers.
    pub async fn peer_count(&self) -> usize {
        self.peers.read().await.len()
    }

    /// The bound address; useful when binding to port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

type WeakPeerMap = Weak<RwLock<HashMap<SocketAddr, OwnedWriteHalf>>>;

/// Pull peers never send, so the read completing means the peer hung up
/// (or broke protocol); either way it is removed from the map.
async fn watch_peer(mut read_half: OwnedReadHalf, addr: SocketAddr, peers: WeakPeerMap) {
    let mut scratch = [0u8; 64];
    loop {
        match read_half.read(&mut scratch).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {} // this protocol has no upstream traffic; ignore it
        }
    }
    if let Some(peers) = peers.upgrade() {
        if peers.write().await.remove(&addr).is_some() {
            log::debug!("peer {addr} disconnected");
        }
    }
}

impl<T> Drop for Push<T> {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}
