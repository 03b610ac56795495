//! Payment Status Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{null_as_default, parse_timestamp};

/// Accept any JSON value for `status`; non-strings and unknown strings
/// become [`PaymentState::Unknown`]
fn lenient_state<'de, D>(deserializer: D) -> Result<PaymentState, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawState {
        Known(PaymentState),
        Other(serde::de::IgnoredAny),
    }

    Ok(match RawState::deserialize(deserializer)? {
        RawState::Known(state) => state,
        RawState::Other(_) => PaymentState::Unknown,
    })
}

fn unknown_state() -> PaymentState {
    PaymentState::Unknown
}

/// Payment progress reported by the register
///
/// Values the display does not recognize decode as [`PaymentState::Unknown`]
/// and render like an idle terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    #[default]
    Idle,
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl PaymentState {
    /// Customer-facing status line
    pub fn display_label(&self) -> &'static str {
        match self {
            PaymentState::Processing => "Processing payment...",
            PaymentState::Completed => "Payment completed!",
            PaymentState::Failed => "Payment failed",
            PaymentState::Idle | PaymentState::Unknown => "Ready for payment",
        }
    }

    /// Completed or failed; the register will not move on by itself
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentState::Completed | PaymentState::Failed)
    }
}

impl std::fmt::Display for PaymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentState::Idle => write!(f, "idle"),
            PaymentState::Processing => write!(f, "processing"),
            PaymentState::Completed => write!(f, "completed"),
            PaymentState::Failed => write!(f, "failed"),
            PaymentState::Unknown => write!(f, "unknown"),
        }
    }
}

/// Payment status snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatus {
    #[serde(default = "unknown_state", deserialize_with = "lenient_state")]
    pub status: PaymentState,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    /// Payment method (e.g. "cash", "card")
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl PaymentStatus {
    pub fn timestamp_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }
}
