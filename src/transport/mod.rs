//! The `transport` module is the seam between the CCS protocol layer and the
//! XMPP streaming client underneath it.
//!
//! Connection establishment, TLS, SASL authentication and stanza parsing all
//! live behind [`Connector`] and [`Transport`]. The protocol layer only sees
//! already parsed [`Event`]s and writes fully framed stanzas.
//!
//! [`memory`] provides an in-process loopback implementation.

pub mod memory;

use async_trait::async_trait;

use crate::utils::error::TransportError;

/// `type` attribute XMPP servers put on a `<message>` they bounce.
pub const ERROR_STANZA_TYPE: &str = "error";

/// One unit coming off the stream, as parsed by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A `<message>` stanza. `stanza_type` is its `type` attribute (empty
    /// when absent). `payload` holds the text of its
    /// `<gcm xmlns="google:mobile:data">` child, when it has one.
    Message {
        id: String,
        stanza_type: String,
        payload: Option<String>,
    },
    /// A `<presence>` stanza.
    Presence { from: String },
    /// Anything else (iq, stream features, ...).
    Other(String),
}

impl Event {
    /// Shorthand for a CCS message stanza carrying `payload`.
    pub fn gcm(payload: impl Into<String>) -> Self {
        Event::Message {
            id: String::new(),
            stanza_type: String::new(),
            payload: Some(payload.into()),
        }
    }
}

/// An established stream session.
///
/// Implementations take `&self` everywhere; [`Connection`](crate::connection::Connection)
/// serialises reads and writes on its own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Waits for the next event. Blocks until one arrives.
    async fn recv(&self) -> Result<Event, TransportError>;

    /// Writes one raw stanza, returning the number of bytes written.
    async fn send_raw(&self, stanza: &str) -> Result<usize, TransportError>;

    async fn close(&self) -> Result<(), TransportError>;
}

/// Establishes stream sessions.
#[async_trait]
pub trait Connector: Send + Sync {
    type Transport: Transport;

    /// Opens and authenticates a session. `debug` asks the transport to dump
    /// the traffic it sees.
    async fn connect(
        &self,
        host: &str,
        identity: &str,
        credential: &str,
        debug: bool,
    ) -> Result<Self::Transport, TransportError>;
}

#[cfg(test)]
mod tests;
