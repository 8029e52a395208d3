//! Environment-driven payment example.
//!
//! Loads the merchant configuration from the environment, starts a payment
//! and then asks for its status.
//!
//! Run with:
//! ```bash
//! cargo run --example env_payment
//! ```
//!
//! Environment variables (a `.env` file is read when present):
//! - API_KEY, POS_SIGNATURE: merchant credentials
//! - IS_LIVE: `true`/`1`/`yes` for the live gateway (default: sandbox)
//! - NOTIFY_URL, REDIRECT_URL: callback endpoints
//! - PUBLIC_KEY, PRIVATE_KEY: gateway key and accepted IPN signature
//! - AUTHENTICATION_TOKEN, NTP_ID, PA_RES: optional, completes a 3-D Secure round-trip

use netopia_rs::builder::StartPaymentRequestBuilder;
use netopia_rs::config::Config;
use netopia_rs::payment::{PaymentOperations, PaymentService};
use netopia_rs::requests::{
    BillingData, ConfigData, DataMap, Instrument, PaymentOptions, ProductsData,
    StartPaymentRequest,
};
use netopia_rs::utils::{current_datetime, generate_ntp_id, pretty_json};
use netopia_rs::PaymentClient;
use tracing_subscriber::EnvFilter;

const ORDER_ID: &str = "R12345";

fn customer() -> BillingData {
    BillingData {
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
    }
}

fn payment_request(config: &Config) -> netopia_rs::Result<StartPaymentRequest> {
    StartPaymentRequestBuilder::new()
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
        .payment_data("payment data key", "payment data value")
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
        .ntp_id("")
        .pos_signature(config.pos_signature.clone())
        .date_time(current_datetime())
        .billing(customer())
        .shipping(customer())
        .product(ProductsData {
            name: "Product1".to_string(),
            code: "P001".to_string(),
            category: "Category1".to_string(),
            price: 1.0,
            vat: 0.0,
        })
        .order_data("order data key", "order data value")
        .build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    println!("💳 Gateway: {}", config.base_url());

    let service = PaymentService::new(PaymentClient::new(config.clone())?);

    let response = service.start_payment(payment_request(&config)?).await?;
    println!("Start Payment Response:\n{}", pretty_json(&response));

    let response = service.get_status(&generate_ntp_id(), ORDER_ID).await?;
    println!("Order Status Response:\n{}", pretty_json(&response));

    if let (Ok(token), Ok(ntp_id)) = (
        std::env::var("AUTHENTICATION_TOKEN"),
        std::env::var("NTP_ID"),
    ) {
        let mut form_data = DataMap::new();
        form_data.insert(
            "paRes".to_string(),
            std::env::var("PA_RES").unwrap_or_default(),
        );

        let response = service.verify_auth(&token, &ntp_id, form_data).await?;
        println!("Verify Auth Response:\n{}", pretty_json(&response));
    }

    Ok(())
}
