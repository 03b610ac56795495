//! API Response envelopes
//!
//! Both display endpoints wrap their payload in the same shape:
//! ```json
//! {
//!     "success": true,
//!     "cart": { ... },
//!     "timestamp": "2024-01-01T00:00:00Z"
//! }
//! ```
//! A payload is only usable when `success` is true.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Cart, PaymentStatus};

/// Why an envelope yielded no usable payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Server answered `success: false`
    #[error("request rejected by server: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),

    /// `success: true` but the payload field is missing or null
    #[error("response is missing its payload")]
    MissingPayload,
}

/// `GET /cart` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart: Option<Cart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Server time the snapshot was taken
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl CartResponse {
    pub fn ok(cart: Cart, timestamp: impl Into<String>) -> Self {
        Self {
            success: true,
            cart: Some(cart),
            error: None,
            timestamp: Some(timestamp.into()),
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            cart: None,
            error: Some(error.into()),
            timestamp: None,
        }
    }

    /// Unwrap the cart, honoring the success flag
    pub fn into_cart(self) -> Result<Cart, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Rejected(self.error));
        }
        self.cart.ok_or(EnvelopeError::MissingPayload)
    }
}

/// `GET /cart/payment` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaymentResponse {
    pub fn ok(payment_status: PaymentStatus) -> Self {
        Self {
            success: true,
            payment_status: Some(payment_status),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            payment_status: None,
            error: Some(error.into()),
        }
    }

    /// Unwrap the payment status, honoring the success flag
    pub fn into_payment_status(self) -> Result<PaymentStatus, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Rejected(self.error));
        }
        self.payment_status.ok_or(EnvelopeError::MissingPayload)
    }
}
