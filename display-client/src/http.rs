//! HTTP client for the POS cart API
//!
//! Two read-only endpoints feed the customer display: the cart being rung up
//! and the payment status of the register. Both are idempotent, so a failed or
//! skipped fetch is simply retried on the next tick.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use shared::{Cart, CartResponse, PaymentResponse, PaymentStatus};

use crate::{ClientError, ClientResult, DisplayConfig};

/// Source of cart and payment snapshots
#[async_trait]
pub trait CartSource: Send + Sync {
    /// Fetch the current cart, reporting why it is unavailable
    async fn try_fetch_cart(&self) -> ClientResult<Cart>;

    /// Fetch the current payment status, reporting why it is unavailable
    async fn try_fetch_payment_status(&self) -> ClientResult<PaymentStatus>;

    /// Fetch the current cart; any failure is logged and yields `None`
    async fn fetch_cart(&self) -> Option<Cart> {
        match self.try_fetch_cart().await {
            Ok(cart) => Some(cart),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch cart");
                None
            }
        }
    }

    /// Fetch the current payment status; any failure is logged and yields `None`
    async fn fetch_payment_status(&self) -> Option<PaymentStatus> {
        match self.try_fetch_payment_status().await {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch payment status");
                None
            }
        }
    }
}

/// Network client for the cart API
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct CartApiClient {
    client: Client,
    cart_url: String,
    payment_url: String,
}

impl CartApiClient {
    pub fn new(config: &DisplayConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.read_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            cart_url: config.cart_url(),
            payment_url: config.payment_url(),
        })
    }

    pub fn cart_url(&self) -> &str {
        &self.cart_url
    }

    pub fn payment_url(&self) -> &str {
        &self.payment_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::trace!(%url, %status, body_len = body.len(), "Response received");

        if !status.is_success() {
            return Err(ClientError::Status { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CartSource for CartApiClient {
    async fn try_fetch_cart(&self) -> ClientResult<Cart> {
        let response: CartResponse = self.get_json(&self.cart_url).await?;
        Ok(response.into_cart()?)
    }

    async fn try_fetch_payment_status(&self) -> ClientResult<PaymentStatus> {
        let response: PaymentResponse = self.get_json(&self.payment_url).await?;
        Ok(response.into_payment_status()?)
    }
}
