use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Connection, Metafield, Product};

/// A group of products.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// The collection's global identifier.
    #[serde(default)]
    pub id: String,

    /// The collection title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The URL-friendly handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// Description with HTML tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,

    /// When the collection was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Products in the collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Connection<Product>>,

    /// Custom metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metafields: Option<Connection<Metafield>>,
}
