//! Minimal payment example.
//!
//! Builds a literal sandbox configuration, submits a single card payment and
//! prints the gateway's answer.
//!
//! Run with:
//! ```bash
//! cargo run --example minimal
//! ```

use netopia_rs::config::Config;
use netopia_rs::payment::{PaymentOperations, PaymentService};
use netopia_rs::requests::{
    BillingData, ConfigData, Installments, Instrument, OrderData, PaymentData, PaymentOptions,
    ProductsData, ShippingData, StartPaymentRequest,
};
use netopia_rs::utils::pretty_json;
use netopia_rs::PaymentClient;

fn customer() -> BillingData {
    BillingData {
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
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::new(
        "YOUR_API_KEY",
        "POS_SIGNATURE",
        "https://your_notify_url",
        "https://your_redirect_url",
    )
    .with_live(false)
    .with_public_key("-----BEGIN PUBLIC KEY-----\n...\n-----END PUBLIC KEY-----")
    .with_pos_signature_set(["POS_SIGNATURE"]);

    let service = PaymentService::new(PaymentClient::new(config)?);

    let shipping: ShippingData = customer();
    let request = StartPaymentRequest {
        config: ConfigData {
            email_template: "default".to_string(),
            email_subject: "Order Confirmation".to_string(),
            cancel_url: "https://your_cancel_url".to_string(),
            notify_url: "https://your_notify_url".to_string(),
            redirect_url: "https://your_redirect_url".to_string(),
            language: "ro".to_string(),
        },
        payment: PaymentData {
            options: PaymentOptions {
                installments: 0,
                bonus: 0,
            },
            instrument: Some(Instrument {
                kind: "card".to_string(),
                account: "4111111111111111".to_string(),
                exp_month: 12,
                exp_year: 2050,
                secret_code: "123".to_string(),
                token: String::new(),
                client_id: String::new(),
            }),
            data: Default::default(),
        },
        order: OrderData {
            ntp_id: None,
            pos_signature: None,
            date_time: "2024-12-13T12:00:00Z".to_string(),
            description: "Test order".to_string(),
            order_id: "ORDER123".to_string(),
            amount: 10.0,
            currency: "RON".to_string(),
            billing: customer(),
            shipping: Some(shipping),
            products: vec![ProductsData {
                name: "Product1".to_string(),
                code: "P1".to_string(),
                category: "Category1".to_string(),
                price: 10.0,
                vat: 0.0,
            }],
            installments: Some(Installments {
                selected: 0,
                available: vec![],
            }),
            data: Default::default(),
        },
    };

    let response = service.start_payment(request).await?;
    println!("{}", pretty_json(&response));

    Ok(())
}
