//! Payment operations.
//!
//! [`PaymentOperations`] is the surface the demos and the notification
//! endpoint program against. [`PaymentService`] implements it over a
//! [`PaymentClient`]; tests and alternative transports can provide their own
//! implementation.

use crate::client::{endpoints, PaymentClient};
use crate::errors::Result;
use crate::ipn::{verify_notification, IpnVerification};
use crate::requests::{DataMap, StartPaymentRequest, StatusRequest, VerifyAuthRequest};
use async_trait::async_trait;
use serde_json::Value;

/// The four gateway operations.
#[async_trait]
pub trait PaymentOperations: Send + Sync {
    /// Starts a card payment.
    ///
    /// # Arguments
    ///
    /// * `request` - Display settings, instrument and order details
    ///
    /// # Returns
    ///
    /// The gateway's response, unmodified
    async fn start_payment(&self, request: StartPaymentRequest) -> Result<Value>;

    /// Queries the status of a transaction.
    ///
    /// # Arguments
    ///
    /// * `ntp_id` - Gateway transaction id
    /// * `order_id` - Merchant order id
    async fn get_status(&self, ntp_id: &str, order_id: &str) -> Result<Value>;

    /// Completes a 3-D Secure authentication round-trip.
    ///
    /// # Arguments
    ///
    /// * `authentication_token` - Token returned by [`Self::start_payment`]
    /// * `ntp_id` - Gateway transaction id
    /// * `form_data` - Fields posted back by the card issuer
    async fn verify_auth(
        &self,
        authentication_token: &str,
        ntp_id: &str,
        form_data: DataMap,
    ) -> Result<Value>;

    /// Checks an instant payment notification body.
    ///
    /// # Arguments
    ///
    /// * `raw_body` - The notification body exactly as received
    async fn verify_ipn(&self, raw_body: &str) -> Result<IpnVerification>;
}

/// Gateway operations backed by a [`PaymentClient`].
#[derive(Clone, Debug)]
pub struct PaymentService {
    client: PaymentClient,
}

impl PaymentService {
    /// Wraps a configured client.
    pub fn new(client: PaymentClient) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &PaymentClient {
        &self.client
    }
}

#[async_trait]
impl PaymentOperations for PaymentService {
    async fn start_payment(&self, mut request: StartPaymentRequest) -> Result<Value> {
        if request.order.pos_signature.is_none() {
            request.order.pos_signature = Some(self.client.config().pos_signature.clone());
        }

        tracing::debug!(order_id = %request.order.order_id, "starting payment");
        self.client
            .post_json(endpoints::START_PAYMENT, &request)
            .await
    }

    async fn get_status(&self, ntp_id: &str, order_id: &str) -> Result<Value> {
        let request = StatusRequest {
            pos_id: self.client.config().pos_signature.clone(),
            ntp_id: ntp_id.to_string(),
            order_id: order_id.to_string(),
        };

        tracing::debug!(ntp_id, order_id, "querying payment status");
        self.client.post_json(endpoints::STATUS, &request).await
    }

    async fn verify_auth(
        &self,
        authentication_token: &str,
        ntp_id: &str,
        form_data: DataMap,
    ) -> Result<Value> {
        let request = VerifyAuthRequest {
            authentication_token: authentication_token.to_string(),
            ntp_id: ntp_id.to_string(),
            form_data,
        };

        tracing::debug!(ntp_id, "verifying 3-D Secure authentication");
        self.client.post_json(endpoints::VERIFY_AUTH, &request).await
    }

    async fn verify_ipn(&self, raw_body: &str) -> Result<IpnVerification> {
        verify_notification(self.client.config(), raw_body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ipn::PaymentStatus;

    fn service() -> PaymentService {
        let config = Config::new("key", "POS", "https://n", "https://r");
        PaymentService::new(PaymentClient::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_verify_ipn_uses_client_config() {
        let service = service();
        let body = r#"{"order":{"orderID":"R1","posSignature":"POS"},"payment":{"status":3}}"#;

        let verification = service.verify_ipn(body).await.unwrap();
        assert_eq!(verification.payload.payment.status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_an_error() {
        let client = service().client().clone().with_base_url("http://127.0.0.1:1");
        let service = PaymentService::new(client);
        let err = service.get_status("N1", "O1").await.unwrap_err();
        assert!(matches!(err, crate::errors::NetopiaError::HttpError(_)));
    }
}
