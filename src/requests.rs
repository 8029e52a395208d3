//! Request payloads sent to the gateway.
//!
//! Field names follow the gateway's JSON (camelCase); optional fields that are
//! `None` are left out of the serialized body.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form string map attached to payments and orders.
pub type DataMap = BTreeMap<String, String>;

/// Body of `POST /payment/card/start`.
///
/// # Examples
///
/// ```
/// use netopia_rs::requests::*;
///
/// let request = StartPaymentRequest {
///     config: ConfigData::default(),
///     payment: PaymentData::default(),
///     order: OrderData::default(),
/// };
/// let json = serde_json::to_value(&request).unwrap();
/// assert!(json.get("order").is_some());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StartPaymentRequest {
    /// Display and callback settings
    pub config: ConfigData,

    /// Payment instrument and options
    pub payment: PaymentData,

    /// Order details
    pub order: OrderData,
}

/// Display and callback settings for a payment.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigData {
    /// Email template name
    pub email_template: String,

    /// Email subject
    pub email_subject: String,

    /// Where the customer lands after cancelling
    pub cancel_url: String,

    /// IPN callback URL
    pub notify_url: String,

    /// Where the customer lands after paying
    pub redirect_url: String,

    /// Payment page language (e.g., "ro", "en")
    pub language: String,
}

/// Payment section of a start request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PaymentData {
    /// Installment and bonus options
    pub options: PaymentOptions,

    /// Card details; `None` sends the customer to the hosted payment page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<Instrument>,

    /// Additional payment data
    #[serde(default)]
    pub data: DataMap,
}

/// Installment and bonus options.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentOptions {
    /// Number of installments
    pub installments: u32,

    /// Bonus points to use
    pub bonus: u32,
}

/// Card or token used to pay.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    /// Instrument type (e.g., "card")
    #[serde(rename = "type")]
    pub kind: String,

    /// Card number
    pub account: String,

    /// Expiry month (1-12)
    pub exp_month: u32,

    /// Expiry year
    pub exp_year: u32,

    /// Card verification code
    pub secret_code: String,

    /// Saved card token
    #[serde(default)]
    pub token: String,

    /// Client identifier bound to the token
    #[serde(rename = "clientID", default)]
    pub client_id: String,
}

/// Order section of a start request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    /// Gateway transaction id, if already known
    #[serde(rename = "ntpID", skip_serializing_if = "Option::is_none")]
    pub ntp_id: Option<String>,

    /// Point-of-sale signature; filled from the configuration when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_signature: Option<String>,

    /// Order timestamp (ISO 8601)
    pub date_time: String,

    /// Order description
    pub description: String,

    /// Merchant order id
    #[serde(rename = "orderID")]
    pub order_id: String,

    /// Amount in major units
    pub amount: f64,

    /// ISO 4217 currency code
    pub currency: String,

    /// Billing address
    pub billing: BillingData,

    /// Shipping address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingData>,

    /// Line items
    #[serde(default)]
    pub products: Vec<ProductsData>,

    /// Installment plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<Installments>,

    /// Additional order data
    #[serde(default)]
    pub data: DataMap,
}

/// Postal and contact details.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Address {
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    /// Numeric country code (e.g., 642 for Romania)
    pub country: i32,
    pub country_name: String,
    pub state: String,
    pub postal_code: String,
    /// Free-form delivery details
    pub details: String,
}

/// Billing address block.
pub type BillingData = Address;

/// Shipping address block.
pub type ShippingData = Address;

/// A single line item.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProductsData {
    /// Product name
    pub name: String,
    /// Merchant SKU
    pub code: String,
    /// Product category
    pub category: String,
    /// Unit price in major units
    pub price: f64,
    /// VAT rate
    pub vat: f64,
}

/// Installment plan offered to the customer.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Installments {
    /// Selected number of installments
    #[serde(default)]
    pub selected: u32,

    /// Available installment counts
    #[serde(default)]
    pub available: Vec<u32>,
}

/// Body of `POST /operation/status`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusRequest {
    /// Point-of-sale signature
    #[serde(rename = "posID")]
    pub pos_id: String,

    /// Gateway transaction id
    #[serde(rename = "ntpID")]
    pub ntp_id: String,

    /// Merchant order id
    #[serde(rename = "orderID")]
    pub order_id: String,
}

/// Body of `POST /payment/card/verify-auth`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VerifyAuthRequest {
    /// Token returned by the start call when 3-D Secure is required
    #[serde(rename = "authenticationToken")]
    pub authentication_token: String,

    /// Gateway transaction id
    #[serde(rename = "ntpID")]
    pub ntp_id: String,

    /// Form fields posted back by the card issuer (e.g., `paRes`)
    #[serde(rename = "formData")]
    pub form_data: DataMap,
}
