//! # gcm-ccs
//!
//! `gcm-ccs` is an application-server client for the GCM Cloud Connection
//! Server (CCS). It sits on top of a persistent XMPP stream, classifies every
//! message CCS sends, acknowledges upstream data messages as the protocol
//! requires and frames outbound messages into the CCS wire envelope.
//!
//! ## Core Modules
//!
//! - `connection`: the session state machine (`connect`, `receive`, `send`, `close`).
//! - `message`: outbound/inbound message shapes and their stanza encoding.
//! - `id`: message ID generation from an injected random source.
//! - `transport`: the seam to the XMPP streaming client, plus an in-memory loopback.
//! - `config`: loading connection settings from files and the environment.
//! - `utils`: error types and logging initialisation.
//!
//! ## Example
//!
//! ```no_run
//! use gcm_ccs::config::load_config;
//! use gcm_ccs::connection::Connection;
//! use gcm_ccs::message::OutboundMessage;
//! use gcm_ccs::transport::Connector;
//!
//! async fn run<C: Connector>(connector: &C) -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = load_config()?;
//!     let conn = Connection::connect_with_settings(connector, &settings.ccs).await?;
//!
//!     let mut hello = OutboundMessage::new("device-registration-id").with_data("msg", "hello");
//!     conn.send(&mut hello).await?;
//!
//!     loop {
//!         match conn.receive().await {
//!             Ok(Some(message)) => println!("from {}: {message:?}", message.sender()),
//!             Ok(None) => {}
//!             Err(e) => eprintln!("CCS error: {e}"),
//!         }
//!     }
//! }
//! ```

pub mod config;
pub mod connection;
pub mod id;
pub mod message;
pub mod transport;
pub mod utils;

pub use connection::Connection;
pub use message::{InboundMessage, OutboundMessage};
pub use utils::error::{CloseError, ConnectError, ReceiveError, SendError};
