//! Integration tests for the netopia-rs library.
//!
//! A mock gateway is served by Axum on an ephemeral port so the client,
//! service and notification endpoint can be exercised end to end.

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use http::Request;
use netopia_rs::{
    builder::StartPaymentRequestBuilder,
    client::{endpoints, PaymentClient},
    config::Config,
    errors::NetopiaError,
    payment::{PaymentOperations, PaymentService},
    requests::{BillingData, ConfigData, DataMap, Instrument, ProductsData, StartPaymentRequest},
    server::{router, DEFAULT_IPN_PATH},
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Requests received by the mock gateway, keyed by path.
#[derive(Clone, Default)]
struct Recorded {
    calls: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

impl Recorded {
    fn record(&self, path: &str, headers: &HeaderMap, body: &Bytes) -> Value {
        let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), auth, value.clone()));
        value
    }

    fn last(&self) -> (String, Option<String>, Value) {
        self.calls.lock().unwrap().last().cloned().unwrap()
    }
}

async fn start_handler(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let value = recorded.record(endpoints::START_PAYMENT, &headers, &body);
    Json(json!({
        "customerAction": {
            "type": "Authentication3D",
            "authenticationToken": "auth-token",
            "formData": {"paReq": "xyz"}
        },
        "payment": {
            "ntpID": "1234567",
            "status": 15,
            "amount": value["order"]["amount"],
        },
        "error": {"code": "100", "message": "Approved"}
    }))
}

async fn status_handler(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let value = recorded.record(endpoints::STATUS, &headers, &body);
    Json(json!({
        "order": {"orderID": value["orderID"]},
        "payment": {"ntpID": value["ntpID"], "status": 3}
    }))
}

async fn verify_auth_handler(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    recorded.record(endpoints::VERIFY_AUTH, &headers, &body);
    StatusCode::OK
}

async fn rejecting_handler() -> impl IntoResponse {
    (StatusCode::UNAUTHORIZED, "invalid api key")
}

/// Spawns the mock gateway and returns its base URL.
async fn spawn_gateway(recorded: Recorded) -> String {
    let app = Router::new()
        .route(endpoints::START_PAYMENT, post(start_handler))
        .route(endpoints::STATUS, post(status_handler))
        .route(endpoints::VERIFY_AUTH, post(verify_auth_handler))
        .route("/rejecting/operation/status", post(rejecting_handler))
        .with_state(recorded);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn config() -> Config {
    Config::new(
        "YOUR_API_KEY",
        "POS_SIGNATURE",
        "https://your_notify_url",
        "https://your_redirect_url",
    )
    .with_pos_signature_set(["POS_SIGNATURE"])
}

fn service(base_url: &str) -> PaymentService {
    let client = PaymentClient::new(config()).unwrap().with_base_url(base_url);
    PaymentService::new(client)
}

fn literal_request() -> StartPaymentRequest {
    let customer = BillingData {
        email: "john.doe@example.com".to_string(),
        phone: "1234567890".to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        city: "Bucharest".to_string(),
        country: 1,
        country_name: "Romania".to_string(),
        state: "Bucharest".to_string(),
        postal_code: "010101".to_string(),
        details: "Some details".to_string(),
    };

    StartPaymentRequestBuilder::new()
        .config(ConfigData {
            email_template: "default".to_string(),
            email_subject: "Order Confirmation".to_string(),
            cancel_url: "https://your_cancel_url".to_string(),
            notify_url: "https://your_notify_url".to_string(),
            redirect_url: "https://your_redirect_url".to_string(),
            language: "ro".to_string(),
        })
        .instrument(Instrument {
            kind: "card".to_string(),
            account: "4111111111111111".to_string(),
            exp_month: 12,
            exp_year: 2050,
            secret_code: "123".to_string(),
            token: String::new(),
            client_id: String::new(),
        })
        .order("ORDER123", 10.0, "RON")
        .description("Test order")
        .date_time("2024-12-13T12:00:00Z")
        .billing(customer.clone())
        .shipping(customer)
        .product(ProductsData {
            name: "Product1".to_string(),
            code: "P1".to_string(),
            category: "Category1".to_string(),
            price: 10.0,
            vat: 0.0,
        })
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_start_payment_smoke() {
    let recorded = Recorded::default();
    let base_url = spawn_gateway(recorded.clone()).await;

    let response = service(&base_url)
        .start_payment(literal_request())
        .await
        .unwrap();

    assert_eq!(response["customerAction"]["authenticationToken"], "auth-token");
    assert_eq!(response["payment"]["amount"], 10.0);

    let (path, auth, body) = recorded.last();
    assert_eq!(path, endpoints::START_PAYMENT);
    assert_eq!(auth.as_deref(), Some("YOUR_API_KEY"));
    assert_eq!(body["order"]["orderID"], "ORDER123");
    assert_eq!(body["order"]["posSignature"], "POS_SIGNATURE");
    assert_eq!(body["payment"]["instrument"]["account"], "4111111111111111");
    assert_eq!(body["order"]["products"][0]["code"], "P1");
}

#[tokio::test]
async fn test_start_payment_keeps_caller_signature() {
    let recorded = Recorded::default();
    let base_url = spawn_gateway(recorded.clone()).await;

    let mut request = literal_request();
    request.order.pos_signature = Some("placeholder signature".to_string());
    service(&base_url).start_payment(request).await.unwrap();

    let (_, _, body) = recorded.last();
    assert_eq!(body["order"]["posSignature"], "placeholder signature");
}

#[tokio::test]
async fn test_get_status_smoke() {
    let recorded = Recorded::default();
    let base_url = spawn_gateway(recorded.clone()).await;

    let response = service(&base_url)
        .get_status("ntp-1", "R12345")
        .await
        .unwrap();
    assert_eq!(response["payment"]["status"], 3);

    let (path, _, body) = recorded.last();
    assert_eq!(path, endpoints::STATUS);
    assert_eq!(
        body,
        json!({"posID": "POS_SIGNATURE", "ntpID": "ntp-1", "orderID": "R12345"})
    );
}

#[tokio::test]
async fn test_verify_auth_with_empty_response() {
    let recorded = Recorded::default();
    let base_url = spawn_gateway(recorded.clone()).await;

    let mut form_data = DataMap::new();
    form_data.insert("paRes".to_string(), "issuer-response".to_string());

    let response = service(&base_url)
        .verify_auth("auth-token", "1234567", form_data)
        .await
        .unwrap();
    assert_eq!(response, Value::Null);

    let (path, _, body) = recorded.last();
    assert_eq!(path, endpoints::VERIFY_AUTH);
    assert_eq!(body["authenticationToken"], "auth-token");
    assert_eq!(body["formData"]["paRes"], "issuer-response");
}

#[tokio::test]
async fn test_gateway_error_status() {
    let base_url = spawn_gateway(Recorded::default()).await;

    let err = service(&format!("{}/rejecting", base_url))
        .get_status("ntp-1", "R12345")
        .await
        .unwrap_err();

    match err {
        NetopiaError::ApiError { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("unexpected error: {other}"),
    }
}

async fn post_ipn(body: &str) -> (StatusCode, Value) {
    let operations = Arc::new(service("http://127.0.0.1:1"));
    let app = router(operations, DEFAULT_IPN_PATH);

    let request = Request::builder()
        .method("POST")
        .uri(DEFAULT_IPN_PATH)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_ipn_endpoint_success_has_message() {
    let body = json!({
        "order": {"orderID": "R12345", "posSignature": "POS_SIGNATURE"},
        "payment": {"ntpID": "1234567", "status": 3, "amount": 1.0, "currency": "RON"}
    })
    .to_string();

    let (status, json) = post_ipn(&body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "IPN verified");
    assert_eq!(json["data"]["ack"]["errorType"], 0);
    assert_eq!(json["data"]["payload"]["order"]["orderID"], "R12345");
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_ipn_endpoint_failure_has_error() {
    let bodies = [
        String::new(),
        "not json at all".to_string(),
        json!({"order": {"orderID": "R1"}}).to_string(),
        json!({"order": {"posSignature": "SOMEONE_ELSE"}, "payment": {"status": 3}}).to_string(),
    ];

    for body in bodies {
        let (status, json) = post_ipn(&body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body:?}");
        assert!(json["error"].is_string(), "body: {body:?}");
        assert!(json.get("message").is_none());
    }
}

#[tokio::test]
async fn test_ipn_endpoint_oversized_body_has_error() {
    let app = router(Arc::new(service("http://127.0.0.1:1")), DEFAULT_IPN_PATH);
    let request = Request::builder()
        .method("POST")
        .uri(DEFAULT_IPN_PATH)
        .body(Body::from("x".repeat(3 * 1024 * 1024)))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(json["error"].is_string());
    assert!(json.get("message").is_none());
}

#[tokio::test]
async fn test_ipn_endpoint_rejects_empty_signature() {
    let body = json!({"order": {"posSignature": ""}, "payment": {"status": 3}}).to_string();

    let (status, json) = post_ipn(&body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["ack"]["errorCode"], "verification_failed");
}

#[test]
fn test_env_configuration_is_verbatim() {
    let vars: HashMap<&str, &str> = [
        ("API_KEY", "env-api-key"),
        ("POS_SIGNATURE", "env-pos"),
        ("IS_LIVE", "yes"),
        ("NOTIFY_URL", "https://shop.example.com/ipn"),
        ("REDIRECT_URL", "https://shop.example.com/return"),
        ("PUBLIC_KEY", "-----BEGIN PUBLIC KEY-----"),
        ("PRIVATE_KEY", "env-private"),
    ]
    .into();

    let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(config.api_key, "env-api-key");
    assert_eq!(config.pos_signature, "env-pos");
    assert!(config.is_live);
    assert_eq!(config.notify_url, "https://shop.example.com/ipn");
    assert_eq!(config.redirect_url, "https://shop.example.com/return");
    assert_eq!(config.public_key_str, "-----BEGIN PUBLIC KEY-----");
    assert_eq!(config.pos_signature_set, vec!["env-private".to_string()]);
}
