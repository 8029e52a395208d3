//! # netopia-rs
//!
//! A typed Rust client for the NETOPIA Payments card API.
//!
//! The crate covers the integration surface a merchant needs: building a
//! configuration, assembling payment requests, calling the gateway, and
//! checking the instant payment notifications (IPN) the gateway sends back.
//!
//! ## Features
//!
//! - **Configuration**: literal values or environment variables (with `.env` support)
//! - **Request models**: the gateway's JSON payloads as plain Rust structs
//! - **Payment operations**: start payment, get status, 3-D Secure verification, IPN verification
//! - **Notification endpoint**: an Axum router that forwards IPN bodies to verification
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netopia_rs::builder::StartPaymentRequestBuilder;
//! use netopia_rs::client::PaymentClient;
//! use netopia_rs::config::Config;
//! use netopia_rs::payment::{PaymentOperations, PaymentService};
//! use netopia_rs::requests::{BillingData, ConfigData};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new(
//!     "YOUR_API_KEY",
//!     "POS_SIGNATURE",
//!     "https://shop.example.com/ipn",
//!     "https://shop.example.com/return",
//! );
//! let service = PaymentService::new(PaymentClient::new(config)?);
//!
//! let request = StartPaymentRequestBuilder::new()
//!     .config(ConfigData::default())
//!     .order("ORDER123", 10.0, "RON")
//!     .billing(BillingData::default())
//!     .build()?;
//!
//! let response = service.start_payment(request).await?;
//! println!("{response}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Payment flow
//!
//! 1. **Start**: the merchant posts order, billing and card details
//! 2. **Authenticate**: if the issuer requires 3-D Secure, the customer completes
//!    it and the merchant calls verify-auth with the returned form data
//! 3. **Notify**: the gateway posts an IPN to the merchant's notify URL
//! 4. **Query**: the merchant can ask for the status of any transaction
//!
//! Cryptographic verification of IPN signature tokens is out of scope; the
//! notification check here is structural.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod builder;
pub mod client;
pub mod config;
pub mod errors;
pub mod ipn;
pub mod payment;
pub mod requests;
pub mod server;
pub mod utils;

// Re-export commonly used items
pub use client::PaymentClient;
pub use config::Config;
pub use errors::{NetopiaError, Result};
pub use ipn::{IpnAck, IpnPayload, IpnVerification, PaymentStatus};
pub use payment::{PaymentOperations, PaymentService};
pub use requests::{
    BillingData, ConfigData, Installments, Instrument, OrderData, PaymentData, PaymentOptions,
    ProductsData, ShippingData, StartPaymentRequest,
};
