use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::error::DecodeError;

/// `control_type` CCS sends shortly before it closes a connection.
pub const CONNECTION_DRAINING: &str = "CONNECTION_DRAINING";

/// The generic JSON envelope of every message coming from CCS.
///
/// Decoding first lands here, then [`InboundMessage::try_from`] narrows the
/// envelope by `message_type`. Every field tolerates being absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInbound {
    pub from: Option<String>,
    pub message_id: Option<String>,
    pub category: Option<String>,
    pub data: Option<HashMap<String, String>>,
    pub message_type: Option<String>,
    pub control_type: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// An upstream message sent by a device application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMessage {
    pub from: String,
    pub message_id: String,
    /// Package name of the sending application.
    pub category: String,
    pub data: HashMap<String, String>,
}

/// CCS accepted a message sent earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub from: String,
    pub message_id: String,
}

/// CCS rejected a message sent earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nack {
    pub from: String,
    pub message_id: String,
    /// Error code such as `BAD_REGISTRATION` or `DEVICE_MESSAGE_RATE_EXCEEDED`.
    pub error: String,
    pub error_description: String,
}

impl fmt::Display for Nack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "From: {}, Message ID: {}, Error: {}, Error Description: {}",
            self.from, self.message_id, self.error, self.error_description
        )
    }
}

/// Delivery receipt for a message sent with `delivery_receipt_requested`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub from: String,
    pub message_id: String,
    pub category: String,
    pub data: HashMap<String, String>,
}

impl Receipt {
    /// `MESSAGE_SENT_TO_DEVICE` on successful delivery.
    pub fn message_status(&self) -> Option<&str> {
        self.data.get("message_status").map(String::as_str)
    }

    /// ID of the outbound message this receipt confirms.
    pub fn original_message_id(&self) -> Option<&str> {
        self.data.get("original_message_id").map(String::as_str)
    }

    pub fn device_registration_id(&self) -> Option<&str> {
        self.data.get("device_registration_id").map(String::as_str)
    }
}

/// Session-management signal from CCS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub from: String,
    pub message_id: String,
    pub control_type: String,
}

impl Control {
    pub fn is_connection_draining(&self) -> bool {
        self.control_type == CONNECTION_DRAINING
    }
}

/// A message received from CCS, classified by its `message_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    Data(DataMessage),
    Ack(Ack),
    Nack(Nack),
    Receipt(Receipt),
    Control(Control),
    /// A `message_type` this client does not know. Kept as-is so new types
    /// sent by CCS never break the session.
    Unknown(RawInbound),
}

impl InboundMessage {
    pub fn sender(&self) -> &str {
        match self {
            InboundMessage::Data(m) => &m.from,
            InboundMessage::Ack(m) => &m.from,
            InboundMessage::Nack(m) => &m.from,
            InboundMessage::Receipt(m) => &m.from,
            InboundMessage::Control(m) => &m.from,
            InboundMessage::Unknown(raw) => raw.from.as_deref().unwrap_or_default(),
        }
    }

    pub fn message_id(&self) -> &str {
        match self {
            InboundMessage::Data(m) => &m.message_id,
            InboundMessage::Ack(m) => &m.message_id,
            InboundMessage::Nack(m) => &m.message_id,
            InboundMessage::Receipt(m) => &m.message_id,
            InboundMessage::Control(m) => &m.message_id,
            InboundMessage::Unknown(raw) => raw.message_id.as_deref().unwrap_or_default(),
        }
    }

    /// The wire tag; empty for data messages.
    pub fn message_type(&self) -> &str {
        match self {
            InboundMessage::Data(_) => "",
            InboundMessage::Ack(_) => "ack",
            InboundMessage::Nack(_) => "nack",
            InboundMessage::Receipt(_) => "receipt",
            InboundMessage::Control(_) => "control",
            InboundMessage::Unknown(raw) => raw.message_type.as_deref().unwrap_or_default(),
        }
    }
}

impl TryFrom<RawInbound> for InboundMessage {
    type Error = DecodeError;

    fn try_from(raw: RawInbound) -> Result<Self, Self::Error> {
        let message_type = raw.message_type.clone().unwrap_or_default();

        // Control messages are addressed to the connection, not from a device.
        if message_type == "control" {
            return Ok(InboundMessage::Control(Control {
                from: raw.from.unwrap_or_default(),
                message_id: raw.message_id.unwrap_or_default(),
                control_type: raw.control_type.unwrap_or_default(),
            }));
        }

        let from = match raw.from.as_deref() {
            Some(from) if !from.is_empty() => from.to_string(),
            _ => {
                let kind = if message_type.is_empty() {
                    "data"
                } else {
                    message_type.as_str()
                };
                return Err(DecodeError::Unrecognized(format!(
                    "{kind} message without sender"
                )));
            }
        };

        let message = match message_type.as_str() {
            "" => InboundMessage::Data(DataMessage {
                from,
                message_id: raw.message_id.unwrap_or_default(),
                category: raw.category.unwrap_or_default(),
                data: raw.data.unwrap_or_default(),
            }),
            "ack" => InboundMessage::Ack(Ack {
                from,
                message_id: raw.message_id.unwrap_or_default(),
            }),
            "nack" => InboundMessage::Nack(Nack {
                from,
                message_id: raw.message_id.unwrap_or_default(),
                error: raw.error.unwrap_or_default(),
                error_description: raw.error_description.unwrap_or_default(),
            }),
            "receipt" => InboundMessage::Receipt(Receipt {
                from,
                message_id: raw.message_id.unwrap_or_default(),
                category: raw.category.unwrap_or_default(),
                data: raw.data.unwrap_or_default(),
            }),
            _ => InboundMessage::Unknown(raw),
        };

        Ok(message)
    }
}
