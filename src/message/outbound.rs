use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default `time_to_live` applied by CCS when the field is omitted (4 weeks).
pub const DEFAULT_TIME_TO_LIVE_SECS: u32 = 2_419_200;

/// An outgoing CCS message addressed to a single recipient.
///
/// Only `to` and `message_id` are always serialized; every other field is
/// omitted at its zero value. The delivery-policy hints are passed through to
/// CCS untouched.
///
/// See <https://developer.android.com/google/gcm/ccs.html#format>.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Registration token of the target device.
    pub to: String,

    /// Assigned by [`Connection::send`](crate::connection::Connection::send)
    /// when left empty.
    pub message_id: String,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub data: HashMap<String, String>,

    /// Empty for data messages, `"ack"` for acknowledgments.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub collapse_key: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub time_to_live: u32,

    #[serde(default, skip_serializing_if = "is_false")]
    pub delay_while_idle: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub delivery_receipt_requested: bool,
}

impl OutboundMessage {
    /// Creates a data message for `to` with an empty payload and no ID.
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            ..Self::default()
        }
    }

    /// Builds the acknowledgment CCS expects for an upstream data message.
    pub fn ack(to: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            message_id: message_id.into(),
            message_type: "ack".to_string(),
            ..Self::default()
        }
    }

    /// Adds a key/value pair to the payload. Google recommends string values
    /// and forbids the reserved words listed in the GCM server documentation.
    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_data(key, value);
        self
    }

    pub fn is_ack(&self) -> bool {
        self.message_type == "ack"
    }
}

impl fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}
