//! Instant payment notifications (IPN).
//!
//! The gateway posts a JSON document describing the outcome of a payment to
//! the merchant's notify URL and expects an [`IpnAck`] back. This module
//! parses that document and checks that it was addressed to one of the
//! merchant's point-of-sale signatures. Signature tokens carried in request
//! headers are not checked here.

use crate::config::Config;
use crate::errors::{NetopiaError, Result};
use crate::requests::DataMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payment status codes reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
#[allow(missing_docs)]
pub enum PaymentStatus {
    New,
    Opened,
    Paid,
    Canceled,
    Confirmed,
    Pending,
    Scheduled,
    Credit,
    ChargebackInit,
    ChargebackComplete,
    ChargebackRefused,
    Declined,
    Fraud,
    Hold,
    /// 3-D Secure authentication required
    ThreeDsAuthRequired,
    /// Any code this crate does not know about
    Other(u32),
}

impl From<u32> for PaymentStatus {
    fn from(code: u32) -> Self {
        match code {
            1 => Self::New,
            2 => Self::Opened,
            3 => Self::Paid,
            4 => Self::Canceled,
            5 => Self::Confirmed,
            6 => Self::Pending,
            7 => Self::Scheduled,
            8 => Self::Credit,
            9 => Self::ChargebackInit,
            10 => Self::ChargebackComplete,
            11 => Self::ChargebackRefused,
            12 => Self::Declined,
            13 => Self::Fraud,
            14 => Self::Hold,
            15 => Self::ThreeDsAuthRequired,
            other => Self::Other(other),
        }
    }
}

impl From<PaymentStatus> for u32 {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::New => 1,
            PaymentStatus::Opened => 2,
            PaymentStatus::Paid => 3,
            PaymentStatus::Canceled => 4,
            PaymentStatus::Confirmed => 5,
            PaymentStatus::Pending => 6,
            PaymentStatus::Scheduled => 7,
            PaymentStatus::Credit => 8,
            PaymentStatus::ChargebackInit => 9,
            PaymentStatus::ChargebackComplete => 10,
            PaymentStatus::ChargebackRefused => 11,
            PaymentStatus::Declined => 12,
            PaymentStatus::Fraud => 13,
            PaymentStatus::Hold => 14,
            PaymentStatus::ThreeDsAuthRequired => 15,
            PaymentStatus::Other(code) => code,
        }
    }
}

impl PaymentStatus {
    /// Whether the money has been captured.
    pub fn is_paid(self) -> bool {
        matches!(self, Self::Paid | Self::Confirmed)
    }

    /// Merchant-facing description used in the acknowledgement.
    pub fn describe(self) -> String {
        match self {
            Self::Paid | Self::Confirmed => "payment was confirmed; deliver goods".to_string(),
            Self::Canceled => "payment was cancelled; do not deliver goods".to_string(),
            Self::Credit => "a previously confirmed payment was refunded".to_string(),
            Self::ChargebackInit | Self::ChargebackComplete | Self::ChargebackRefused => {
                "payment is under chargeback".to_string()
            }
            Self::Declined | Self::Fraud => "payment was declined".to_string(),
            Self::New
            | Self::Opened
            | Self::Pending
            | Self::Scheduled
            | Self::Hold
            | Self::ThreeDsAuthRequired => "payment is in progress".to_string(),
            Self::Other(code) => format!("unknown payment status {code}"),
        }
    }
}

/// Order section of a notification.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IpnOrder {
    /// Merchant order id
    #[serde(rename = "orderID", default)]
    pub order_id: String,

    /// Point-of-sale signature the notification is addressed to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_signature: Option<String>,
}

/// Payment section of a notification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IpnPayment {
    /// Gateway transaction id
    #[serde(rename = "ntpID", default)]
    pub ntp_id: String,

    /// Current status
    pub status: PaymentStatus,

    /// Amount in major units
    #[serde(default)]
    pub amount: f64,

    /// ISO 4217 currency code
    #[serde(default)]
    pub currency: String,

    /// Processor response code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Processor response message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Additional payment data
    #[serde(default)]
    pub data: DataMap,
}

/// A parsed notification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IpnPayload {
    /// Order the notification refers to
    #[serde(default)]
    pub order: IpnOrder,

    /// Payment outcome
    pub payment: IpnPayment,
}

/// Kind of error reported back to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum IpnErrorType {
    /// Notification accepted
    None,
    /// The gateway should resend later
    Temporary,
    /// The gateway should stop resending
    Permanent,
    /// Any code this crate does not know about
    Other(u8),
}

impl From<u8> for IpnErrorType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Temporary,
            2 => Self::Permanent,
            other => Self::Other(other),
        }
    }
}

impl From<IpnErrorType> for u8 {
    fn from(value: IpnErrorType) -> Self {
        match value {
            IpnErrorType::None => 0,
            IpnErrorType::Temporary => 1,
            IpnErrorType::Permanent => 2,
            IpnErrorType::Other(code) => code,
        }
    }
}

/// Acknowledgement returned to the gateway.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IpnAck {
    /// Whether and how the gateway should retry
    pub error_type: IpnErrorType,
    /// Merchant error code, `None` when accepted
    pub error_code: Option<String>,
    /// Human-readable outcome
    pub error_message: String,
}

impl IpnAck {
    /// Acknowledges a notification with the given status.
    pub fn accepted(status: PaymentStatus) -> Self {
        Self {
            error_type: IpnErrorType::None,
            error_code: None,
            error_message: status.describe(),
        }
    }

    /// Rejects a notification.
    pub fn rejected(
        error_type: IpnErrorType,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error_type,
            error_code: Some(code.into()),
            error_message: message.into(),
        }
    }

    /// Acknowledgement for a notification that failed verification.
    ///
    /// Malformed or misaddressed notifications will not improve on resend;
    /// anything else is reported as temporary.
    pub fn for_error(err: &NetopiaError) -> Self {
        let (error_type, code) = match err {
            NetopiaError::InvalidPayload(_) | NetopiaError::JsonError(_) => {
                (IpnErrorType::Permanent, "invalid_payload")
            }
            NetopiaError::VerificationFailed(_) => (IpnErrorType::Permanent, "verification_failed"),
            _ => (IpnErrorType::Temporary, "internal_error"),
        };
        Self::rejected(error_type, code, err.to_string())
    }
}

/// Outcome of a successful notification check.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IpnVerification {
    /// Acknowledgement to send back to the gateway
    pub ack: IpnAck,

    /// The parsed notification
    pub payload: IpnPayload,
}

/// Parses a raw notification body and checks who it is addressed to.
///
/// # Examples
///
/// ```
/// use netopia_rs::config::Config;
/// use netopia_rs::ipn::{verify_notification, PaymentStatus};
///
/// let config = Config::new("key", "POS", "n", "r");
/// let body = r#"{"order":{"orderID":"R1","posSignature":"POS"},"payment":{"ntpID":"N1","status":3}}"#;
///
/// let verification = verify_notification(&config, body).unwrap();
/// assert_eq!(verification.payload.payment.status, PaymentStatus::Paid);
/// ```
pub fn verify_notification(config: &Config, raw_body: &str) -> Result<IpnVerification> {
    if raw_body.trim().is_empty() {
        return Err(NetopiaError::InvalidPayload("empty notification body".to_string()));
    }

    let value: Value = serde_json::from_str(raw_body)?;
    let payload: IpnPayload = serde_json::from_value(value)?;

    if let Some(signature) = &payload.order.pos_signature {
        if !config.accepts_pos_signature(signature) {
            return Err(NetopiaError::VerificationFailed(format!(
                "notification addressed to unknown point of sale {signature}"
            )));
        }
    }

    tracing::info!(
        order_id = %payload.order.order_id,
        ntp_id = %payload.payment.ntp_id,
        status = ?payload.payment.status,
        paid = payload.payment.status.is_paid(),
        "notification verified"
    );

    Ok(IpnVerification {
        ack: IpnAck::accepted(payload.payment.status),
        payload,
    })
}
