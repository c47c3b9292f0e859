//! Framing between CCS JSON payloads and XMPP `<message>` stanzas.

use super::inbound::{InboundMessage, RawInbound};
use super::outbound::OutboundMessage;
use crate::utils::error::{DecodeError, EncodeError};

const STANZA_OPEN: &str = r#"<message id=""><gcm xmlns="google:mobile:data">"#;
const STANZA_CLOSE: &str = "</gcm></message>";

/// Serializes `message` to JSON and wraps it in the CCS stanza template.
pub fn encode(message: &OutboundMessage) -> Result<String, EncodeError> {
    let json = serde_json::to_string(message)?;
    Ok(frame(&json))
}

/// Decodes the JSON body of a `google:mobile:data` element.
pub fn decode(payload: &str) -> Result<InboundMessage, DecodeError> {
    let raw: RawInbound = serde_json::from_str(payload).map_err(DecodeError::Malformed)?;
    InboundMessage::try_from(raw)
}

/// Wraps an already serialized payload in the stanza template.
pub fn frame(json: &str) -> String {
    let body = escape(json);
    let mut stanza = String::with_capacity(STANZA_OPEN.len() + body.len() + STANZA_CLOSE.len());
    stanza.push_str(STANZA_OPEN);
    stanza.push_str(&body);
    stanza.push_str(STANZA_CLOSE);
    stanza
}

/// Extracts the JSON payload from a stanza produced by [`frame`].
///
/// The body may use any of the five predefined XML entities, not only the
/// three [`frame`] emits, since transports handing over raw XML re-serialize
/// text their own way. Returns `None` when `stanza` does not follow the
/// template.
pub fn unwrap_stanza(stanza: &str) -> Option<String> {
    let body = stanza
        .trim()
        .strip_prefix(STANZA_OPEN)?
        .strip_suffix(STANZA_CLOSE)?;
    Some(unescape(body))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
