//! Payment example with a notification endpoint.
//!
//! Starts a payment and queries its status like `env_payment`, then serves
//! `POST /ipn` so the gateway can deliver instant payment notifications.
//!
//! Run with:
//! ```bash
//! cargo run --example ipn_server
//! ```
//!
//! Environment variables: the ones read by `env_payment`, plus
//! - PORT: Server port (default: 8000)
//! - SKIP_PAYMENT: set to skip the start/status calls and only serve IPNs

use netopia_rs::builder::StartPaymentRequestBuilder;
use netopia_rs::config::Config;
use netopia_rs::payment::{PaymentOperations, PaymentService};
use netopia_rs::requests::{BillingData, ConfigData, Instrument, PaymentOptions, ProductsData};
use netopia_rs::server::{router, serve, DEFAULT_IPN_PATH};
use netopia_rs::utils::{current_datetime, generate_ntp_id, pretty_json};
use netopia_rs::PaymentClient;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

const ORDER_ID: &str = "R12345";

async fn run_payment(service: &PaymentService, config: &Config) -> anyhow::Result<()> {
    let customer = BillingData {
        email: "customer@example.com".to_string(),
        phone: "1234567890".to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        city: "Bucharest".to_string(),
        country: 642,
        country_name: "ROMANIA".to_string(),
        state: "romania state".to_string(),
        postal_code: "550055".to_string(),
        details: "delivery details".to_string(),
    };

    let request = StartPaymentRequestBuilder::new()
        .config(ConfigData {
            email_template: "default".to_string(),
            email_subject: "Order Confirmation".to_string(),
            cancel_url: "https://shop.example.com/cancel".to_string(),
            notify_url: config.notify_url.clone(),
            redirect_url: config.redirect_url.clone(),
            language: "ro".to_string(),
        })
        .options(PaymentOptions {
            installments: 1,
            bonus: 0,
        })
        .instrument(Instrument {
            kind: "card".to_string(),
            account: "4111111111111111".to_string(),
            exp_month: 12,
            exp_year: 2030,
            secret_code: "123".to_string(),
            token: String::new(),
            client_id: String::new(),
        })
        .order(ORDER_ID, 1.0, "RON")
        .description("Test payment order")
        .date_time(current_datetime())
        .billing(customer.clone())
        .shipping(customer)
        .product(ProductsData {
            name: "Product1".to_string(),
            code: "P001".to_string(),
            category: "Category1".to_string(),
            price: 1.0,
            vat: 0.0,
        })
        .build()?;

    let response = service.start_payment(request).await?;
    println!("Start Payment Response:\n{}", pretty_json(&response));

    let response = service.get_status(&generate_ntp_id(), ORDER_ID).await?;
    println!("Order Status Response:\n{}", pretty_json(&response));

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()?;

    let service = PaymentService::new(PaymentClient::new(config.clone())?);

    if std::env::var("SKIP_PAYMENT").is_err() {
        run_payment(&service, &config).await?;
    }

    let app = router(Arc::new(service), DEFAULT_IPN_PATH).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("✅ Notification endpoint on http://{}{}", addr, DEFAULT_IPN_PATH);
    println!("\nTry:");
    println!(
        "  curl -X POST http://localhost:{}{} -d '{{\"payment\":{{\"status\":3}}}}'",
        port, DEFAULT_IPN_PATH
    );
    println!();

    serve(listener, app).await?;

    Ok(())
}
