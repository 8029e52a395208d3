//! Merchant configuration for the payment gateway.
//!
//! A [`Config`] is built once at startup, either from literal values or from
//! the process environment, and is read-only afterwards.

use crate::errors::{NetopiaError, Result};

/// Base URL of the sandbox gateway.
pub const SANDBOX_BASE_URL: &str = "https://secure.sandbox.netopia-payments.com";

/// Base URL of the live gateway.
pub const LIVE_BASE_URL: &str = "https://secure.mobilpay.ro/pay";

/// Environment variable names read by [`Config::from_env`].
pub mod env_keys {
    /// Merchant API key
    pub const API_KEY: &str = "API_KEY";
    /// Point-of-sale signature
    pub const POS_SIGNATURE: &str = "POS_SIGNATURE";
    /// Live/sandbox switch
    pub const IS_LIVE: &str = "IS_LIVE";
    /// IPN callback URL
    pub const NOTIFY_URL: &str = "NOTIFY_URL";
    /// Customer redirect URL
    pub const REDIRECT_URL: &str = "REDIRECT_URL";
    /// Gateway public key (PEM)
    pub const PUBLIC_KEY: &str = "PUBLIC_KEY";
    /// Accepted point-of-sale signature for notifications
    pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
}

/// Merchant credentials and callback endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// API key sent in the `Authorization` header
    pub api_key: String,

    /// Point-of-sale signature identifying the merchant account
    pub pos_signature: String,

    /// Whether to talk to the live gateway instead of the sandbox
    pub is_live: bool,

    /// URL the gateway posts instant payment notifications to
    pub notify_url: String,

    /// URL the customer is sent back to after payment
    pub redirect_url: String,

    /// Gateway public key, PEM encoded
    pub public_key_str: String,

    /// Point-of-sale signatures accepted in notifications
    pub pos_signature_set: Vec<String>,
}

impl Config {
    /// Creates a sandbox configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use netopia_rs::config::Config;
    ///
    /// let config = Config::new(
    ///     "YOUR_API_KEY",
    ///     "POS_SIGNATURE",
    ///     "https://shop.example.com/ipn",
    ///     "https://shop.example.com/return",
    /// );
    /// assert!(!config.is_live);
    /// assert_eq!(config.pos_signature_set, vec!["POS_SIGNATURE".to_string()]);
    /// ```
    pub fn new(
        api_key: impl Into<String>,
        pos_signature: impl Into<String>,
        notify_url: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        let pos_signature = pos_signature.into();
        Self {
            api_key: api_key.into(),
            pos_signature_set: vec![pos_signature.clone()],
            pos_signature,
            is_live: false,
            notify_url: notify_url.into(),
            redirect_url: redirect_url.into(),
            public_key_str: String::new(),
        }
    }

    /// Switches between live and sandbox.
    pub fn with_live(mut self, is_live: bool) -> Self {
        self.is_live = is_live;
        self
    }

    /// Sets the gateway public key.
    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key_str = public_key.into();
        self
    }

    /// Replaces the set of accepted point-of-sale signatures.
    pub fn with_pos_signature_set<I, S>(mut self, signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pos_signature_set = signatures.into_iter().map(Into::into).collect();
        self
    }

    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first when present.
    /// Values are taken verbatim; missing variables become empty strings and
    /// are reported later by [`Config::validate`].
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("no .env file loaded: {}", e);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use netopia_rs::config::Config;
    /// use std::collections::HashMap;
    ///
    /// let vars: HashMap<&str, &str> = [("API_KEY", "k"), ("IS_LIVE", "Yes")].into();
    /// let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
    /// assert_eq!(config.api_key, "k");
    /// assert!(config.is_live);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();

        Self {
            api_key: get(env_keys::API_KEY),
            pos_signature: get(env_keys::POS_SIGNATURE),
            is_live: parse_flag(lookup(env_keys::IS_LIVE).as_deref()),
            notify_url: get(env_keys::NOTIFY_URL),
            redirect_url: get(env_keys::REDIRECT_URL),
            public_key_str: get(env_keys::PUBLIC_KEY),
            pos_signature_set: lookup(env_keys::PRIVATE_KEY)
                .filter(|key| !key.is_empty())
                .into_iter()
                .collect(),
        }
    }

    /// Checks that the credentials needed to call the gateway are present.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(NetopiaError::ConfigError("api_key is empty".to_string()));
        }
        if self.pos_signature.trim().is_empty() {
            return Err(NetopiaError::ConfigError(
                "pos_signature is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the gateway base URL for the selected environment.
    pub fn base_url(&self) -> &'static str {
        if self.is_live {
            LIVE_BASE_URL
        } else {
            SANDBOX_BASE_URL
        }
    }

    /// Whether `signature` is accepted as the sender of a notification.
    ///
    /// A blank signature is never accepted, even when the configuration
    /// itself carries blank values.
    pub fn accepts_pos_signature(&self, signature: &str) -> bool {
        if signature.trim().is_empty() {
            return false;
        }
        signature == self.pos_signature || self.pos_signature_set.iter().any(|s| s == signature)
    }
}

/// `true`, `1` and `yes` (any case) enable a flag; anything else disables it.
fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("true" | "1" | "yes")
    )
}
