//! Endpoint transport for frame streams.
//!
//! One length-prefixed `codec` message per transport frame. The socket roles
//! are ZeroMQ-style push/pull: the producer binds a [`Push`] endpoint and
//! fans every message out to all connected peers; each consumer connects a
//! [`Pull`] and receives messages in the order they were sent.
//!
//! A peer that closes its connection between messages ends the stream
//! (`recv` returns `Ok(None)`); a close in the middle of a message is
//! reported as [`LinkError::ConnectionLost`].

pub mod error;
pub mod framing;
pub mod pull;
pub mod push;

pub use error::LinkError;
pub use pull::Pull;
pub use push::Push;
