//! CCS connection
//!
//! This module contains the protocol state machine that sits on top of one
//! transport session. Responsibilities:
//! - qualify the sender ID with the GCM domain and open the session
//! - classify every inbound stanza and apply the mandated reply (acknowledge
//!   ordinary upstream data messages, surface XMPP error stanzas)
//! - frame outbound messages, assigning an ID when the caller left it empty
//!
//! Concurrency and usage notes:
//! - No task is spawned here. The caller drives [`Connection::receive`] in a
//!   loop, typically on a dedicated task.
//! - `receive` calls are serialised by a reader lock; every write, including
//!   the ack sent from inside `receive`, goes through one writer lock. A
//!   connection can therefore be shared behind an `Arc` between a receive loop
//!   and any number of senders.
//! - A read error does not close the connection. Closing, reconnecting and
//!   retrying are left to the caller.

mod conn;

pub use conn::{Connection, GCM_DOMAIN, qualify_sender_id};
