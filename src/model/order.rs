//! Orders and their fulfillment data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Connection, Metafield};

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// The order's global identifier.
    #[serde(default)]
    pub id: String,

    /// The order name, such as `#1001`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The customer's email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The financial status, such as `PAID`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_financial_status: Option<String>,

    /// The fulfillment status, such as `FULFILLED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_fulfillment_status: Option<String>,

    /// When the order was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the order was cancelled, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,

    /// The ordered items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Connection<LineItem>>,

    /// How the order is split for fulfillment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_orders: Option<Connection<FulfillmentOrder>>,

    /// Custom metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metafields: Option<Connection<Metafield>>,
}

/// An item on an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// The line item's global identifier.
    #[serde(default)]
    pub id: String,

    /// The product title at the time of the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The variant title at the time of the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_title: Option<String>,

    /// The stock keeping unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// The ordered quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

/// A group of line items fulfilled from one location.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentOrder {
    /// The fulfillment order's global identifier.
    #[serde(default)]
    pub id: String,

    /// The status, such as `OPEN` or `CLOSED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// When the fulfillment order was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// The items to fulfill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Connection<FulfillmentOrderLineItem>>,
}

/// One item within a [`FulfillmentOrder`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentOrderLineItem {
    /// The item's global identifier.
    #[serde(default)]
    pub id: String,

    /// The stock keeping unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// The total quantity to fulfill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<i64>,

    /// The quantity still to be fulfilled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_quantity: Option<i64>,
}
