//! Error handling tests for the wingpay client

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use wingpay::{
    ClientConfig, CreateTransactionOptions, PaymentCode, PaymentOptions, WingPayClient,
    WingPayError,
};

fn test_client(server: &ServerGuard) -> WingPayClient {
    WingPayClient::new(ClientConfig::new(
        server.url(),
        "test-client",
        "test-secret",
    ))
    .unwrap()
}

fn aba_options() -> CreateTransactionOptions {
    CreateTransactionOptions::new(
        "X1",
        "10.00",
        2,
        PaymentCode::Aba,
        PaymentOptions::default(),
    )
}

async fn mock_token(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/v1/oauth/access-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"access_token": "tok-1"}).to_string())
        .create_async()
        .await
}

#[test]
fn test_missing_config_is_rejected_before_any_network_use() {
    for config in [
        ClientConfig::new("", "id", "secret"),
        ClientConfig::new("https://api.example.com", "", "secret"),
        ClientConfig::new("https://api.example.com", "id", ""),
    ] {
        let err = WingPayClient::new(config).unwrap_err();
        assert!(matches!(err, WingPayError::Config { .. }), "{}", err);
    }
}

#[tokio::test]
async fn test_errors_list_takes_priority() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let _create = server
        .mock("POST", "/v1/payments/transactions")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "errors": [{"message": "a"}, {"message": "second, never surfaced"}],
                "message": "b",
                "reason": "c"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut client = test_client(&server);
    let err = client.create_transaction(aba_options()).await.unwrap_err();
    assert_eq!(err.to_string(), "Remote error: a");
}

#[tokio::test]
async fn test_message_and_reason_are_concatenated() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let _create = server
        .mock("POST", "/v1/payments/transactions")
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(json!({"message": "Order rejected", "reason": "duplicate UID"}).to_string())
        .create_async()
        .await;

    let mut client = test_client(&server);
    let err = client.create_transaction(aba_options()).await.unwrap_err();
    assert_eq!(err.to_string(), "Remote error: Order rejected duplicate UID");
}

#[tokio::test]
async fn test_unshaped_body_falls_back_to_status() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let _create = server
        .mock("POST", "/v1/payments/transactions")
        .with_status(500)
        .with_body("<html>gateway exploded</html>")
        .create_async()
        .await;

    let mut client = test_client(&server);
    let err = client.create_transaction(aba_options()).await.unwrap_err();
    assert!(matches!(err, WingPayError::Remote { .. }));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_auth_failure_stops_the_operation() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/v1/oauth/access-token")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({"message": "Invalid credentials"}).to_string())
        .create_async()
        .await;

    let create = server
        .mock("POST", "/v1/payments/transactions")
        .expect(0)
        .create_async()
        .await;

    let mut client = test_client(&server);
    let err = client.create_transaction(aba_options()).await.unwrap_err();
    assert_eq!(err.to_string(), "Remote error: Invalid credentials");
    create.assert_async().await;
}

#[tokio::test]
async fn test_transport_failure_surfaces_unchanged() {
    // nothing is listening here; the reqwest error passes through
    let config = ClientConfig::new("http://127.0.0.1:1", "test-client", "test-secret");
    let mut client = WingPayClient::new(config).unwrap();

    let err = client.create_transaction(aba_options()).await.unwrap_err();
    assert!(matches!(err, WingPayError::Http(_)), "{}", err);
}

#[tokio::test]
async fn test_validation_error_carries_single_first_failure_message() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server).await;

    let mut client = test_client(&server);
    // totalAmount malformed and paymentOptions requirement both violated;
    // only the first-declared failure surfaces
    let mut options = aba_options();
    options.total_amount = "10.5".to_string();
    options.payment_code = PaymentCode::Png;

    let err = client.create_transaction(options).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation error: The totalAmount must be a valid money amount."
    );
}

#[tokio::test]
async fn test_malformed_success_body_is_a_json_error() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let _create = server
        .mock("POST", "/v1/payments/transactions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"state": "PENDING"}).to_string())
        .match_body(Matcher::Any)
        .create_async()
        .await;

    let mut client = test_client(&server);
    // txid is mandatory in the record; its absence is a decode failure
    let err = client.create_transaction(aba_options()).await.unwrap_err();
    assert!(matches!(err, WingPayError::Http(_) | WingPayError::Json(_)));
}
