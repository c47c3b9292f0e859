use std::sync::Arc;
use std::time::Duration;

use super::memory::{self, MemoryConnector};
use super::{Connector, Event, Transport};
use crate::utils::error::TransportError;

#[tokio::test]
async fn test_memory_pair_delivers_events() {
    let (transport, broker) = memory::pair();
    broker.deliver_payload(r#"{"from":"dev"}"#).unwrap();
    broker
        .deliver(Event::Presence {
            from: "gcm.googleapis.com".to_string(),
        })
        .unwrap();

    assert_eq!(transport.recv().await.unwrap(), Event::gcm(r#"{"from":"dev"}"#));
    assert!(matches!(
        transport.recv().await.unwrap(),
        Event::Presence { .. }
    ));
}

#[tokio::test]
async fn test_memory_pair_records_written_stanzas() {
    let (transport, mut broker) = memory::pair();
    let written = transport.send_raw("<message/>").await.unwrap();
    assert_eq!(written, "<message/>".len());
    assert_eq!(broker.next_stanza().await.as_deref(), Some("<message/>"));
    assert_eq!(broker.try_next_stanza(), None);
}

#[tokio::test]
async fn test_recv_fails_once_broker_is_gone() {
    let (transport, broker) = memory::pair();
    drop(broker);
    assert!(matches!(
        transport.recv().await,
        Err(TransportError::Closed)
    ));
}

#[tokio::test]
async fn test_close_is_idempotent_and_stops_io() {
    let (transport, _broker) = memory::pair();
    transport.close().await.unwrap();
    transport.close().await.unwrap();
    assert!(transport.is_closed());
    assert!(matches!(
        transport.send_raw("<message/>").await,
        Err(TransportError::Closed)
    ));
    assert!(matches!(transport.recv().await, Err(TransportError::Closed)));
}

#[tokio::test]
async fn test_close_wakes_pending_recv() {
    let (transport, _broker) = memory::pair();
    let transport = Arc::new(transport);

    let reader = {
        let transport = transport.clone();
        tokio::spawn(async move { transport.recv().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    transport.close().await.unwrap();

    let result = tokio::time::timeout(Duration::from_secs(1), reader)
        .await
        .expect("recv should return after close")
        .unwrap();
    assert!(matches!(result, Err(TransportError::Closed)));
}

#[tokio::test]
async fn test_connector_checks_credential() {
    let connector = MemoryConnector::with_credential("secret");
    let (transport, _broker) = memory::pair();
    connector.push(transport);

    let err = connector
        .connect("localhost:5236", "me@gcm.googleapis.com", "wrong", false)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Auth(_)));

    connector
        .connect("localhost:5236", "me@gcm.googleapis.com", "secret", true)
        .await
        .unwrap();
    assert_eq!(connector.identities().len(), 2);
}

#[tokio::test]
async fn test_connector_without_transports_fails() {
    let connector = MemoryConnector::new();
    let err = connector
        .connect("localhost:5236", "me", "key", false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no route to localhost:5236"));
}
