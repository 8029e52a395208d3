//! HTTP transport to the payment gateway.
//!
//! [`PaymentClient`] owns the merchant configuration and a `reqwest` client
//! and posts JSON bodies to gateway endpoints. Responses are handed back as
//! raw JSON; interpreting them is left to the caller.

use crate::config::Config;
use crate::errors::{NetopiaError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Gateway endpoint paths.
pub mod endpoints {
    /// Starts a card payment
    pub const START_PAYMENT: &str = "/payment/card/start";
    /// Queries the status of an operation
    pub const STATUS: &str = "/operation/status";
    /// Completes 3-D Secure authentication
    pub const VERIFY_AUTH: &str = "/payment/card/verify-auth";
}

/// Configured connection to the gateway.
#[derive(Clone, Debug)]
pub struct PaymentClient {
    config: Config,
    base_url: String,
    http_client: Client,
}

impl PaymentClient {
    /// Creates a client for the environment selected in `config`.
    ///
    /// Fails when the API key or point-of-sale signature is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use netopia_rs::client::PaymentClient;
    /// use netopia_rs::config::{Config, SANDBOX_BASE_URL};
    ///
    /// let client = PaymentClient::new(Config::new("key", "POS", "n", "r")).unwrap();
    /// assert_eq!(client.base_url(), SANDBOX_BASE_URL);
    ///
    /// assert!(PaymentClient::new(Config::default()).is_err());
    /// ```
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url().to_string();
        Ok(Self {
            config,
            base_url,
            http_client: Client::new(),
        })
    }

    /// Points the client at a different gateway host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets a custom HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// The merchant configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The gateway base URL in use.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves an endpoint path against the base URL.
    ///
    /// The base URL may carry a path prefix (the live gateway does), so the
    /// endpoint is appended rather than joined.
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&url)?)
    }

    /// Posts `body` as JSON to `path` and returns the decoded response.
    ///
    /// A non-success status becomes [`NetopiaError::ApiError`]; an empty
    /// success body is returned as `Value::Null`.
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(path)?;
        tracing::debug!(%url, "posting to gateway");

        let response = self
            .http_client
            .post(url)
            .header(AUTHORIZATION, &self.config.api_key)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "gateway returned an error");
            return Err(NetopiaError::ApiError {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
