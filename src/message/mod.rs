//! The `message` module defines the shapes exchanged with CCS and their wire
//! encoding. It carries no protocol behaviour of its own.
//!
//! Outbound messages are serialized to JSON and wrapped in the fixed stanza
//!
//! ```text
//! <message id=""><gcm xmlns="google:mobile:data">{json}</gcm></message>
//! ```
//!
//! Inbound payloads are parsed into a generic [`RawInbound`] envelope and then
//! narrowed into one [`InboundMessage`] variant per `message_type`.

pub mod inbound;
pub mod outbound;
pub mod stanza;

pub use inbound::{Ack, Control, DataMessage, InboundMessage, Nack, RawInbound, Receipt};
pub use outbound::OutboundMessage;
pub use stanza::{decode, encode, unwrap_stanza};
