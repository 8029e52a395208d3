//! Utility functions shared by callers building requests.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

/// Current time as an ISO 8601 timestamp, suitable for `order.dateTime`.
///
/// # Examples
///
/// ```
/// use netopia_rs::utils::current_datetime;
///
/// let now = current_datetime();
/// assert!(chrono::DateTime::parse_from_rfc3339(&now).is_ok());
/// ```
pub fn current_datetime() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Generates a random transaction identifier.
///
/// # Examples
///
/// ```
/// use netopia_rs::utils::generate_ntp_id;
///
/// let id = generate_ntp_id();
/// assert_eq!(id.len(), 36);
/// ```
pub fn generate_ntp_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Renders a gateway response for display, falling back to compact JSON.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
