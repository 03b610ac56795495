//! Shared types for the customer display
//!
//! Cart and payment snapshots as published by the POS API, plus the
//! `{ success, ... }` envelopes wrapping each endpoint's response.

pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use models::{Cart, CartItem, Customer, Discount, DiscountKind, PaymentState, PaymentStatus, Tax};
pub use response::{CartResponse, EnvelopeError, PaymentResponse};
pub use serde::{Deserialize, Serialize};
