//! Inbound notification endpoint.
//!
//! A single `POST` route that hands the raw request body to
//! [`PaymentOperations::verify_ipn`] and reports the outcome as JSON.

use crate::ipn::IpnAck;
use crate::payment::PaymentOperations;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Default path of the notification route.
pub const DEFAULT_IPN_PATH: &str = "/ipn";

/// Shared handle to the payment operations.
pub type SharedOperations = Arc<dyn PaymentOperations>;

/// Builds a router with one `POST` route at `path`.
///
/// # Examples
///
/// ```
/// use netopia_rs::client::PaymentClient;
/// use netopia_rs::config::Config;
/// use netopia_rs::payment::PaymentService;
/// use netopia_rs::server::{router, DEFAULT_IPN_PATH};
/// use std::sync::Arc;
///
/// let client = PaymentClient::new(Config::new("key", "POS", "n", "r")).unwrap();
/// let app = router(Arc::new(PaymentService::new(client)), DEFAULT_IPN_PATH);
/// # let _ = app;
/// ```
pub fn router(operations: SharedOperations, path: &str) -> Router {
    Router::new()
        .route(path, post(ipn_handler))
        .with_state(operations)
}

/// Forwards the body unchanged to the verification call.
async fn ipn_handler(
    State(operations): State<SharedOperations>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(status = %rejection.status(), "notification body rejected");
            return (
                rejection.status(),
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };
    let raw_body = String::from_utf8_lossy(&body);

    match operations.verify_ipn(&raw_body).await {
        Ok(verification) => (
            StatusCode::OK,
            Json(json!({
                "message": "IPN verified",
                "data": verification,
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "notification rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": e.to_string(),
                    "ack": IpnAck::for_error(&e),
                })),
            )
                .into_response()
        }
    }
}

/// Serves `app` on `listener` until the process stops.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "notification endpoint listening");
    }
    axum::serve(listener, app).await
}
