//! The `error` module defines the error taxonomy of the CCS client.
//!
//! Every operation of a [`Connection`](crate::connection::Connection) returns
//! its own error type so callers can tell a transport fault apart from an
//! application-level rejection by CCS. Nothing here is retried or logged by
//! the library; all errors travel back to the immediate caller.

use thiserror::Error;

use crate::message::Nack;

/// Errors raised by the underlying stream collaborator.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The stream has been closed locally or by the peer.
    #[error("transport closed")]
    Closed,

    /// Authentication was refused during session establishment.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other collaborator-specific failure.
    #[error("transport error: {0}")]
    Other(String),
}

/// The random source could not provide bytes for a message ID.
#[derive(Error, Debug)]
#[error("entropy source unavailable: {0}")]
pub struct EntropyError(pub String);

/// An outbound message could not be serialized.
#[derive(Error, Debug)]
#[error("failed to encode outbound message: {0}")]
pub struct EncodeError(#[from] pub serde_json::Error);

/// A received payload could not be turned into an inbound message.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The payload is not well-formed JSON of the expected shape.
    #[error("malformed CCS payload: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The payload parsed but cannot be used (e.g. it has no sender).
    #[error("unrecognized CCS message: {0}")]
    Unrecognized(String),
}

/// Session establishment failed.
#[derive(Error, Debug)]
#[error("failed to connect to CCS at {host}: {source}")]
pub struct ConnectError {
    pub host: String,
    #[source]
    pub source: TransportError,
}

/// Errors returned by [`Connection::send`](crate::connection::Connection::send).
#[derive(Error, Debug)]
pub enum SendError {
    /// The message has no recipient.
    #[error("outbound message has no recipient")]
    MissingRecipient,

    /// No message ID could be generated; nothing was written.
    #[error(transparent)]
    Entropy(#[from] EntropyError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Writing the stanza failed.
    #[error("failed to write stanza: {0}")]
    Transport(#[from] TransportError),
}

/// Errors returned by [`Connection::receive`](crate::connection::Connection::receive).
#[derive(Error, Debug)]
pub enum ReceiveError {
    /// Reading from the stream failed. The connection is left open.
    #[error("failed to read from CCS: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    MalformedMessage(#[from] DecodeError),

    /// An ordinary data message arrived but acknowledging it failed.
    #[error("failed to send ack for message {message_id} to CCS: {source}")]
    AckFailed {
        message_id: String,
        #[source]
        source: SendError,
    },

    /// CCS rejected a message sent earlier. Carries the decoded nack.
    #[error("CCS rejected message: {0}")]
    NegativeAck(Nack),

    /// CCS answered with a `<message type="error">` stanza. The payload, if
    /// any, is left undecoded.
    #[error("CCS returned an XMPP error (stanza id {id:?})")]
    StanzaError { id: String, payload: Option<String> },
}

/// Closing the stream failed.
#[derive(Error, Debug)]
#[error("failed to close CCS connection: {0}")]
pub struct CloseError(#[from] pub TransportError);
