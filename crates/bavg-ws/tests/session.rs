//! End-to-end stream tests
//!
//! A wiremock server issues tickets and a local tungstenite server plays the
//! streaming host, so the whole ticket, dial, subscribe and read path runs
//! without network access.

use bavg_rest::{ClientConfig, Credentials, RestClient};
use bavg_ws::{StopReason, StreamClient, StreamConfig, StreamError, WsError};
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::Message;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OK: &str = r#"{"event":"message","data":"OK"}"#;

/// Ticket endpoint answering every request with `abc123`
async fn ticket_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/websocket/get_ticket"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ticket":"abc123"}"#))
        .mount(&server)
        .await;
    server
}

/// Streaming host serving one connection
///
/// Each subscribe command is answered with the next entry of `acks`. Once all
/// acks are sent, `frames` are pushed and the socket is held open until the
/// client closes it. The request URI is reported through the returned channel.
async fn stream_server(
    acks: Vec<&'static str>,
    frames: Vec<&'static str>,
) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (uri_tx, uri_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (conn, _) = listener.accept().await.unwrap();
        let capture = |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
            let _ = uri_tx.send(req.uri().to_string());
            Ok(resp)
        };
        let mut ws = tokio_tungstenite::accept_hdr_async(conn, capture)
            .await
            .unwrap();

        for ack in acks {
            match ws.next().await {
                Some(Ok(Message::Text(_))) => ws.send(Message::Text(ack.into())).await.unwrap(),
                _ => return,
            }
        }
        for frame in frames {
            ws.send(Message::Text(frame.into())).await.unwrap();
        }

        while let Some(Ok(msg)) = ws.next().await {
            if msg.is_close() {
                break;
            }
        }
    });

    (format!("ws://{}", addr), uri_rx)
}

fn stream_client(api: &MockServer, ws_base: &str) -> StreamClient {
    let rest = RestClient::with_config(
        Credentials::new("pub", "sec").unwrap(),
        ClientConfig::new().with_api_base(api.uri()),
    )
    .unwrap();

    StreamClient::new(
        rest.ticket_broker(),
        StreamConfig::new()
            .with_ws_base(ws_base)
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

#[tokio::test]
async fn test_ticker_stream_end_to_end() {
    let api = ticket_server().await;
    let (ws_base, uri_rx) = stream_server(
        vec![OK, OK],
        vec![
            r#"{"event":"message","data":{"last":"100.5"}}"#,
            r#"{"event":"message","data":"#,
            r#"{"event":"message","data":{"last":"101.0"}}"#,
        ],
    )
    .await;

    let client = stream_client(&api, &ws_base);
    let mut session = client.ticker_stream(["BTCUSD", "ETHUSD"]).await.unwrap();

    let uri = uri_rx.await.unwrap();
    assert!(uri.starts_with("/websocket/multiple/ticker?"));
    assert!(uri.contains("ticket=abc123"));
    assert!(uri.contains("public_key=pub"));

    let first = timeout(Duration::from_secs(5), session.data.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.last.raw(), Some("100.5"));
    let second = timeout(Duration::from_secs(5), session.data.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.last.raw(), Some("101.0"));

    let error = session.errors.recv().await.unwrap();
    assert!(matches!(error, StreamError::Decode { .. }));

    let reason = timeout(Duration::from_secs(5), session.stop.stop_and_wait())
        .await
        .unwrap();
    assert_eq!(reason, Some(StopReason::Requested));
    assert!(session.data.recv().await.is_none());
    assert!(session.errors.recv().await.is_none());
}

#[tokio::test]
async fn test_exchange_stream_rejected() {
    let api = ticket_server().await;
    let (ws_base, uri_rx) =
        stream_server(vec![r#"{"event":"message","data":"FAIL:unknown"}"#], vec![]).await;

    let client = stream_client(&api, &ws_base);
    let err = client.exchange_stream(["nowhere"]).await.unwrap_err();

    match err {
        WsError::SubscriptionRejected { topic, got } => {
            assert_eq!(topic.name(), "nowhere");
            assert_eq!(got, "FAIL:unknown");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert!(uri_rx.await.unwrap().starts_with("/websocket/multiple/exchanges?"));
}

#[tokio::test]
async fn test_ticket_failure_never_dials() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/websocket/get_ticket"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad signature"))
        .mount(&api)
        .await;

    let client = stream_client(&api, "ws://127.0.0.1:9");
    let err = client.ticker_stream(["BTCUSD"]).await.unwrap_err();

    match err {
        WsError::Ticket(rest) => assert_eq!(rest.status(), Some(401)),
        other => panic!("expected ticket error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_dial_failure_hides_ticket() {
    let api = ticket_server().await;
    let client = stream_client(&api, "ws://127.0.0.1:9");

    let err = client.ticker_stream(["BTCUSD"]).await.unwrap_err();
    match &err {
        WsError::Connection { url, .. } => {
            assert_eq!(url, "ws://127.0.0.1:9/websocket/multiple/ticker");
        }
        other => panic!("expected connection error, got {:?}", other),
    }
    assert!(!err.to_string().contains("abc123"));
    assert!(err.is_retryable());
}
