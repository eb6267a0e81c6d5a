//! End-to-end test over a real socket, through the SDK.

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use chain_relay::blockchain::contracts::IRandomPicker;
use chain_relay::config::RelayConfig;
use chain_relay::http::HttpServer;
use chain_relay::lifecycle::Shutdown;
use relay_sdk::{MintRequest, RelayClient, SdkError};

mod common;
use common::{MockGateway, MOCK_TX, RECEIVER};

#[tokio::test]
async fn test_sdk_against_running_server() {
    let gateway = Arc::new(
        MockGateway::new()
            .with_read::<IRandomPicker::getLastPickedCall>(3)
            .with_read::<IRandomPicker::totalItemsCall>(10)
            .with_read::<IRandomPicker::lastPickedNumberCall>(3)
            .with_read::<IRandomPicker::pickCountCall>(1),
    );
    let relay = Arc::new(common::relay(gateway.clone()));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(&RelayConfig::default(), relay);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = RelayClient::new(&format!("http://{}", addr));

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");

    let minted = client
        .mint(
            None,
            &MintRequest {
                address: RECEIVER.to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(minted.success);
    assert_eq!(minted.tx_hash, MOCK_TX.to_string());

    let picked = client.pick_random().await.unwrap();
    assert_eq!(picked.action, "pickRandom");
    assert_eq!(picked.picked_number.as_deref(), Some("3"));

    let updated = client.set_total(10).await.unwrap();
    assert_eq!(updated.new_total.as_deref(), Some("10"));

    let state = client.state().await.unwrap();
    assert_eq!(state.data.total_items, "10");
    assert_eq!(state.data.pick_count, "1");

    let err = client
        .mint(
            None,
            &MintRequest {
                address: "nope".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    match err {
        SdkError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid address: nope");
        }
        other => panic!("unexpected error: {}", other),
    }

    let response = reqwest::get(format!("http://{}/api/mint", addr)).await.unwrap();
    assert_eq!(response.status().as_u16(), 405);

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop after shutdown")
        .unwrap()
        .unwrap();
}
