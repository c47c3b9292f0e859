use rand::TryRngCore;
use rand::rngs::OsRng;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::config::CcsSettings;
use crate::id::IdGenerator;
use crate::message::{self, InboundMessage, OutboundMessage};
use crate::transport::{Connector, ERROR_STANZA_TYPE, Event, Transport};
use crate::utils::error::{CloseError, ConnectError, ReceiveError, SendError};

/// Domain every CCS sender identity lives under.
pub const GCM_DOMAIN: &str = "gcm.googleapis.com";

/// Appends `@gcm.googleapis.com` unless `sender_id` already names the domain.
pub fn qualify_sender_id(sender_id: &str) -> String {
    if sender_id.contains(GCM_DOMAIN) {
        sender_id.to_string()
    } else {
        format!("{sender_id}@{GCM_DOMAIN}")
    }
}

/// A live CCS session bound to one transport.
#[derive(Debug)]
pub struct Connection<T, R = OsRng> {
    host: String,
    sender_id: String,
    transport: T,
    reader: Mutex<()>,
    writer: Mutex<IdGenerator<R>>,
}

impl<T: Transport> Connection<T, OsRng> {
    /// Connects to the CCS endpoint `host` (production or staging URI).
    ///
    /// `debug` is handed to the transport, which then dumps all traffic.
    /// Transport failures are returned as-is; nothing is retried.
    pub async fn connect<C>(
        connector: &C,
        host: &str,
        sender_id: &str,
        api_key: &str,
        debug: bool,
    ) -> Result<Self, ConnectError>
    where
        C: Connector<Transport = T>,
    {
        let sender_id = qualify_sender_id(sender_id);

        match connector.connect(host, &sender_id, api_key, debug).await {
            Ok(transport) => {
                debug!(host, sender_id = %sender_id, "CCS connection established");
                Ok(Self::new(transport, host, sender_id))
            }
            Err(source) => {
                debug!(host, sender_id = %sender_id, "CCS connection failed: {source}");
                Err(ConnectError {
                    host: host.to_string(),
                    source,
                })
            }
        }
    }

    pub async fn connect_with_settings<C>(
        connector: &C,
        settings: &CcsSettings,
    ) -> Result<Self, ConnectError>
    where
        C: Connector<Transport = T>,
    {
        Self::connect(
            connector,
            &settings.host,
            &settings.sender_id,
            &settings.api_key,
            settings.debug,
        )
        .await
    }

    /// Wraps an already established transport. `sender_id` is taken as given.
    pub fn new(transport: T, host: impl Into<String>, sender_id: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            sender_id: sender_id.into(),
            transport,
            reader: Mutex::new(()),
            writer: Mutex::new(IdGenerator::os()),
        }
    }
}

impl<T, R> Connection<T, R>
where
    T: Transport,
    R: TryRngCore,
{
    /// Replaces the message ID source.
    pub fn with_id_generator<R2>(self, ids: IdGenerator<R2>) -> Connection<T, R2> {
        Connection {
            host: self.host,
            sender_id: self.sender_id,
            transport: self.transport,
            reader: self.reader,
            writer: Mutex::new(ids),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// The domain-qualified sender identity used to authenticate.
    pub fn sender_id(&self) -> &str {
        &self.sender_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Retrieves the next message from CCS.
    ///
    /// Returns `Ok(None)` for stanzas of no interest to the caller: non-CCS
    /// events and acks. An XMPP error stanza yields
    /// [`ReceiveError::StanzaError`]. Upstream data messages are acknowledged
    /// before they are returned. A nack is returned as
    /// [`ReceiveError::NegativeAck`], which carries the decoded message.
    pub async fn receive(&self) -> Result<Option<InboundMessage>, ReceiveError> {
        let _reader = self.reader.lock().await;

        let payload = match self.transport.recv().await? {
            Event::Message {
                id,
                stanza_type,
                payload,
            } if stanza_type == ERROR_STANZA_TYPE => {
                debug!(%id, ?payload, "CCS returned an XMPP error stanza");
                return Err(ReceiveError::StanzaError { id, payload });
            }
            Event::Message {
                payload: Some(payload),
                ..
            } => payload,
            event => {
                trace!(?event, "ignoring non-CCS event");
                return Ok(None);
            }
        };
        debug!(%payload, "incoming raw CCS message");

        let message = message::decode(&payload)?;
        match &message {
            InboundMessage::Ack(ack) => {
                debug!(message_id = %ack.message_id, "CCS acknowledged message");
                return Ok(None);
            }
            InboundMessage::Nack(nack) => {
                debug!(message_id = %nack.message_id, error = %nack.error, "CCS rejected message");
                return Err(ReceiveError::NegativeAck(nack.clone()));
            }
            InboundMessage::Data(data) => {
                let mut ack = OutboundMessage::ack(&data.from, &data.message_id);
                self.send(&mut ack)
                    .await
                    .map_err(|source| ReceiveError::AckFailed {
                        message_id: data.message_id.clone(),
                        source,
                    })?;
            }
            InboundMessage::Control(control) if control.is_connection_draining() => {
                debug!(host = %self.host, "CCS is draining this connection");
            }
            InboundMessage::Unknown(raw) => {
                debug!(message_type = ?raw.message_type, "unknown CCS message type");
            }
            InboundMessage::Control(_) | InboundMessage::Receipt(_) => {}
        }

        Ok(Some(message))
    }

    /// Sends `message` to CCS and returns the number of bytes written.
    ///
    /// An empty `message_id` is filled in first and stays on `message`, also
    /// when the write fails. Clear it before retrying to get a fresh one.
    pub async fn send(&self, message: &mut OutboundMessage) -> Result<usize, SendError> {
        if message.to.is_empty() {
            return Err(SendError::MissingRecipient);
        }

        let mut ids = self.writer.lock().await;
        if message.message_id.is_empty() {
            message.message_id = ids.generate()?;
        }

        let stanza = message::encode(message)?;
        let written = self.transport.send_raw(&stanza).await?;
        trace!(message_id = %message.message_id, written, "sent CCS message");
        Ok(written)
    }

    pub async fn close(&self) -> Result<(), CloseError> {
        self.transport.close().await?;
        debug!(host = %self.host, "CCS connection closed");
        Ok(())
    }
}
