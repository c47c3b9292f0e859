//! In-memory transport
//!
//! A loopback pair standing in for a real XMPP stream. The [`MemoryTransport`]
//! end is handed to a connection; the [`BrokerSide`] end plays CCS: it
//! injects events and reads back every stanza the client writes. Both
//! directions are unbounded `tokio::sync::mpsc` channels.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify, mpsc};
use tracing::debug;

use super::{Connector, Event, Transport};
use crate::utils::error::TransportError;

/// Creates a connected transport/broker pair.
pub fn pair() -> (MemoryTransport, BrokerSide) {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
    let (stanza_tx, stanza_rx) = mpsc::unbounded_channel::<String>();

    let transport = MemoryTransport {
        events: Mutex::new(event_rx),
        stanzas: stanza_tx,
        closed: AtomicBool::new(false),
        shutdown: Notify::new(),
    };
    let broker = BrokerSide {
        events: event_tx,
        stanzas: stanza_rx,
    };
    (transport, broker)
}

#[derive(Debug)]
pub struct MemoryTransport {
    events: Mutex<mpsc::UnboundedReceiver<Event>>,
    stanzas: mpsc::UnboundedSender<String>,
    closed: AtomicBool,
    shutdown: Notify,
}

impl MemoryTransport {
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn recv(&self) -> Result<Event, TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }
        let mut events = self.events.lock().await;
        tokio::select! {
            event = events.recv() => event.ok_or(TransportError::Closed),
            _ = self.shutdown.notified() => Err(TransportError::Closed),
        }
    }

    async fn send_raw(&self, stanza: &str) -> Result<usize, TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }
        self.stanzas
            .send(stanza.to_string())
            .map_err(|_| TransportError::Closed)?;
        Ok(stanza.len())
    }

    /// Idempotent. Wakes a pending `recv`.
    async fn close(&self) -> Result<(), TransportError> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.shutdown.notify_one();
        }
        Ok(())
    }
}

/// The CCS end of a [`pair`].
#[derive(Debug)]
pub struct BrokerSide {
    events: mpsc::UnboundedSender<Event>,
    stanzas: mpsc::UnboundedReceiver<String>,
}

impl BrokerSide {
    pub fn deliver(&self, event: Event) -> Result<(), TransportError> {
        self.events.send(event).map_err(|_| TransportError::Closed)
    }

    /// Delivers a `<message>` whose `google:mobile:data` body is `payload`.
    pub fn deliver_payload(&self, payload: impl Into<String>) -> Result<(), TransportError> {
        self.deliver(Event::gcm(payload))
    }

    /// Waits for the next stanza written by the client.
    pub async fn next_stanza(&mut self) -> Option<String> {
        self.stanzas.recv().await
    }

    /// Returns a written stanza if one is already queued.
    pub fn try_next_stanza(&mut self) -> Option<String> {
        self.stanzas.try_recv().ok()
    }
}

/// Hands out pre-built transports, or fails when none are left.
///
/// Each `connect` call consumes one transport queued with [`push`](Self::push).
/// The credential is checked against `expected_credential` when one is set.
#[derive(Debug, Default)]
pub struct MemoryConnector {
    transports: std::sync::Mutex<Vec<MemoryTransport>>,
    expected_credential: Option<String>,
    identities: std::sync::Mutex<Vec<String>>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A connector that only accepts `credential`.
    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self {
            expected_credential: Some(credential.into()),
            ..Self::default()
        }
    }

    pub fn push(&self, transport: MemoryTransport) {
        if let Ok(mut transports) = self.transports.lock() {
            transports.push(transport);
        }
    }

    /// Identities seen by `connect`, in call order.
    pub fn identities(&self) -> Vec<String> {
        self.identities
            .lock()
            .map(|ids| ids.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    type Transport = MemoryTransport;

    async fn connect(
        &self,
        host: &str,
        identity: &str,
        credential: &str,
        debug: bool,
    ) -> Result<MemoryTransport, TransportError> {
        if let Ok(mut ids) = self.identities.lock() {
            ids.push(identity.to_string());
        }
        if debug {
            debug!(host, identity, "memory transport connect");
        }

        if let Some(expected) = &self.expected_credential {
            if expected != credential {
                return Err(TransportError::Auth(format!(
                    "credential rejected for {identity}"
                )));
            }
        }

        self.transports
            .lock()
            .map_err(|_| TransportError::Other("connector poisoned".to_string()))?
            .pop()
            .ok_or_else(|| TransportError::Other(format!("no route to {host}")))
    }
}
