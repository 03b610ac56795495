//! Cart Model
//!
//! Mirrors the cart currently being rung up at the register. All amounts are
//! computed server-side; the display only transports them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{null_as_default, parse_timestamp};

/// Line item in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Line ID, unique within the cart
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    /// Unit price
    pub price: f64,
    /// Line total (price × quantity, computed by the server)
    pub total: f64,
    /// Weight for goods sold by weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Weight unit (e.g. "g", "kg")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    // === Optional catalog details ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    /// Price before member/manual adjustments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_price: Option<f64>,
    /// Where the line was added from (e.g. "scanner", "manual")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Per-line discount amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// "each" or "weight"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_by: Option<String>,
}

impl CartItem {
    /// Create a line item with only the required fields set
    pub fn new(
        id: impl Into<String>,
        product_id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        price: f64,
        total: f64,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            name: name.into(),
            quantity,
            price,
            total,
            weight: None,
            unit: None,
            variant_id: None,
            original_price: None,
            member_price: None,
            source: None,
            discount: None,
            barcode: None,
            sku: None,
            sold_by: None,
        }
    }

    /// Whether this line is priced by weight
    pub fn is_weighted(&self) -> bool {
        self.weight.is_some()
    }
}

/// Customer attached to the cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Discount kind; the server resolves what `value` means for each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

/// Cart-level discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: f64,
}

impl Default for Discount {
    fn default() -> Self {
        Self {
            kind: DiscountKind::Fixed,
            value: 0.0,
        }
    }
}

/// Cart-level tax
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    /// Fraction, e.g. 0.1 for 10%
    pub rate: f64,
    pub amount: f64,
}

/// Cart snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in display order
    pub items: Vec<CartItem>,
    pub discount: Discount,
    pub tax: Tax,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    /// Final amount due
    pub total: f64,
    /// ISO-8601 timestamp of the last change, if the server sent one
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer.as_ref()?.name.as_deref()
    }

    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated.as_deref().and_then(parse_timestamp)
    }
}
