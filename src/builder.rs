//! Assembly of start-payment requests.
//!
//! [`StartPaymentRequestBuilder`] collects the pieces a caller already has
//! (order identity, addresses, card, products) into one
//! [`StartPaymentRequest`]. Nothing is computed or defaulted here; every
//! value comes from the caller.

use crate::errors::{NetopiaError, Result};
use crate::requests::{
    BillingData, ConfigData, DataMap, Installments, Instrument, OrderData, PaymentData,
    PaymentOptions, ProductsData, ShippingData, StartPaymentRequest,
};

/// Builder for [`StartPaymentRequest`].
///
/// # Examples
///
/// ```
/// use netopia_rs::builder::StartPaymentRequestBuilder;
/// use netopia_rs::requests::{BillingData, ConfigData, ProductsData};
///
/// let request = StartPaymentRequestBuilder::new()
///     .config(ConfigData {
///         language: "ro".to_string(),
///         ..Default::default()
///     })
///     .order("ORDER123", 10.0, "RON")
///     .billing(BillingData {
///         email: "john.doe@example.com".to_string(),
///         ..Default::default()
///     })
///     .product(ProductsData {
///         name: "Product1".to_string(),
///         price: 10.0,
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(request.order.order_id, "ORDER123");
/// assert_eq!(request.order.products.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StartPaymentRequestBuilder {
    config: Option<ConfigData>,
    options: PaymentOptions,
    instrument: Option<Instrument>,
    payment_data: DataMap,
    order_id: Option<String>,
    amount: f64,
    currency: String,
    description: String,
    date_time: String,
    ntp_id: Option<String>,
    pos_signature: Option<String>,
    billing: Option<BillingData>,
    shipping: Option<ShippingData>,
    products: Vec<ProductsData>,
    installments: Option<Installments>,
    order_data: DataMap,
}

impl StartPaymentRequestBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets display and callback settings.
    pub fn config(mut self, config: ConfigData) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets installment and bonus options.
    pub fn options(mut self, options: PaymentOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the card or token to charge.
    pub fn instrument(mut self, instrument: Instrument) -> Self {
        self.instrument = Some(instrument);
        self
    }

    /// Adds an entry to the payment data map.
    pub fn payment_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.payment_data.insert(key.into(), value.into());
        self
    }

    /// Sets the order id, amount and currency.
    pub fn order(
        mut self,
        order_id: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
    ) -> Self {
        self.order_id = Some(order_id.into());
        self.amount = amount;
        self.currency = currency.into();
        self
    }

    /// Sets the order description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the order timestamp.
    pub fn date_time(mut self, date_time: impl Into<String>) -> Self {
        self.date_time = date_time.into();
        self
    }

    /// Sets the gateway transaction id.
    pub fn ntp_id(mut self, ntp_id: impl Into<String>) -> Self {
        self.ntp_id = Some(ntp_id.into());
        self
    }

    /// Sets the point-of-sale signature sent with the order.
    pub fn pos_signature(mut self, pos_signature: impl Into<String>) -> Self {
        self.pos_signature = Some(pos_signature.into());
        self
    }

    /// Sets the billing address.
    pub fn billing(mut self, billing: BillingData) -> Self {
        self.billing = Some(billing);
        self
    }

    /// Sets the shipping address.
    pub fn shipping(mut self, shipping: ShippingData) -> Self {
        self.shipping = Some(shipping);
        self
    }

    /// Appends a line item.
    pub fn product(mut self, product: ProductsData) -> Self {
        self.products.push(product);
        self
    }

    /// Appends several line items.
    pub fn products(mut self, products: impl IntoIterator<Item = ProductsData>) -> Self {
        self.products.extend(products);
        self
    }

    /// Sets the installment plan.
    pub fn installments(mut self, installments: Installments) -> Self {
        self.installments = Some(installments);
        self
    }

    /// Adds an entry to the order data map.
    pub fn order_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.order_data.insert(key.into(), value.into());
        self
    }

    /// Assembles the request.
    ///
    /// Fails when the config data, the order id or the billing address was
    /// never supplied.
    pub fn build(self) -> Result<StartPaymentRequest> {
        let config = self
            .config
            .ok_or_else(|| NetopiaError::MissingField("config".to_string()))?;
        let order_id = self
            .order_id
            .ok_or_else(|| NetopiaError::MissingField("order.orderID".to_string()))?;
        let billing = self
            .billing
            .ok_or_else(|| NetopiaError::MissingField("order.billing".to_string()))?;

        Ok(StartPaymentRequest {
            config,
            payment: PaymentData {
                options: self.options,
                instrument: self.instrument,
                data: self.payment_data,
            },
            order: OrderData {
                ntp_id: self.ntp_id,
                pos_signature: self.pos_signature,
                date_time: self.date_time,
                description: self.description,
                order_id,
                amount: self.amount,
                currency: self.currency,
                billing,
                shipping: self.shipping,
                products: self.products,
                installments: self.installments,
                data: self.order_data,
            },
        })
    }
}
