//! Facade tests against a mocked REST API

use bavg_sdk::prelude::*;
use chrono::{TimeZone, Utc};
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> BitcoinAverageClient {
    BitcoinAverageClient::builder(Credentials::new("pub", "sec").unwrap())
        .with_api_base(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_price_at_timestamp() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/indices/global/history/BTCUSD"))
        .and(query_param("at", "1530000000"))
        .and(query_param("resolution", "hour"))
        .and(header_exists("X-signature"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"average":6119.5,"time":"2018-06-26 08:00:00"}"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let at = Utc.timestamp_opt(1_530_000_000, 0).unwrap();
    let data = client
        .price_at_timestamp(&Pair::new(Pair::BTC_USD), at, HistoryResolution::Hour)
        .await
        .unwrap();

    assert_eq!(data.average.parse().unwrap(), Decimal::new(61195, 1));
    assert_eq!(data.time, "2018-06-26 08:00:00");
}

#[tokio::test]
async fn test_exchanges_and_signature() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/exchanges/ticker/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"name":"bitstamp","symbols":{"BTCUSD":{"last":"6500.1","bid":"6500"}}}]"#,
        ))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let exchanges = client.exchanges(&[], &[]).await.unwrap();

    assert_eq!(exchanges.len(), 1);
    let btc = exchanges[0].symbol("BTCUSD").unwrap();
    assert_eq!(btc.last.value(), Decimal::new(65001, 1));

    // The signature header verifies against the client's own credentials
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none());
    let header = requests[0].headers.get("X-signature").unwrap().to_str().unwrap();
    let token: SignedToken = header.parse().unwrap();
    assert_eq!(token.public_key(), "pub");
    client.rest().credentials().verify(&token).unwrap();
}

#[tokio::test]
async fn test_remote_error_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.tickers(&["BTC"], &[]).await.unwrap_err();

    match &err {
        SdkError::Rest(RestError::Remote { status, body, .. }) => {
            assert_eq!(*status, 503);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected remote error, got {:?}", other),
    }
    assert!(err.is_retryable());
}
