//! Resolution of child lines to node types.
//!
//! A child line in a bulk export only says which parent it belongs to. The
//! resource kind in its `id` (`gid://shopify/ProductVariant/9` →
//! `ProductVariant`) decides both the type it decodes into and the
//! connection field it is attached under (`variants`).

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;

use super::node::BulkNode;
use crate::model::{
    Collection, ExternalVideo, FulfillmentOrder, FulfillmentOrderLineItem, Image, LineItem,
    MediaImage, Metafield, Model3d, Order, Product, ProductVariant, Video,
};

/// Decodes one JSONL line into a [`BulkNode`].
pub type DecodeFn = fn(&[u8]) -> Result<BulkNode, serde_json::Error>;

/// How one resource kind is decoded and where it attaches.
#[derive(Debug, Clone, Copy)]
pub struct KindEntry {
    kind: &'static str,
    field: &'static str,
    decode: DecodeFn,
}

impl KindEntry {
    /// The resource kind, as it appears in global identifiers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// The connection field on the parent.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Decodes a line of this kind.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the line does not match the kind's type.
    pub fn decode(&self, line: &[u8]) -> Result<BulkNode, serde_json::Error> {
        (self.decode)(line)
    }
}

/// Decodes a line as `T` and wraps it.
///
/// Usable as a [`DecodeFn`] for any registered node type:
/// `decode_as::<Metafield>`.
///
/// # Errors
///
/// Returns the JSON error if the line does not decode as `T`.
pub fn decode_as<T>(line: &[u8]) -> Result<BulkNode, serde_json::Error>
where
    T: DeserializeOwned + Into<BulkNode>,
{
    serde_json::from_slice::<T>(line).map(Into::into)
}

/// Immutable table of the resource kinds a bulk export may contain as
/// children.
///
/// Build a table once and share it; the parser only reads it.
///
/// # Example
///
/// ```rust
/// use shopify_bulk::bulk::TypeRegistry;
///
/// let registry = TypeRegistry::global();
/// let entry = registry.resolve("ProductImage").unwrap();
/// assert_eq!(entry.field(), "images");
/// assert!(registry.resolve("Widget").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<&'static str, KindEntry>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the registry of every kind this crate models.
    #[must_use]
    pub fn shopify() -> Self {
        Self::new()
            .with_kind("LineItem", "lineItems", decode_as::<LineItem>)
            .with_kind(
                "FulfillmentOrderLineItem",
                "lineItems",
                decode_as::<FulfillmentOrderLineItem>,
            )
            .with_kind("FulfillmentOrder", "fulfillmentOrders", decode_as::<FulfillmentOrder>)
            .with_kind("MediaImage", "media", decode_as::<MediaImage>)
            .with_kind("Video", "media", decode_as::<Video>)
            .with_kind("Model3d", "media", decode_as::<Model3d>)
            .with_kind("ExternalVideo", "media", decode_as::<ExternalVideo>)
            .with_kind("Metafield", "metafields", decode_as::<Metafield>)
            .with_kind("Order", "orders", decode_as::<Order>)
            .with_kind("Product", "products", decode_as::<Product>)
            .with_kind("ProductVariant", "variants", decode_as::<ProductVariant>)
            .with_kind("Collection", "collections", decode_as::<Collection>)
            .with_kind("ProductImage", "images", decode_as::<Image>)
    }

    /// Returns the process-wide [`shopify`](Self::shopify) registry.
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::shopify)
    }

    /// Adds or replaces the entry for `kind`.
    #[must_use]
    pub fn with_kind(mut self, kind: &'static str, field: &'static str, decode: DecodeFn) -> Self {
        self.entries.insert(kind, KindEntry { kind, field, decode });
        self
    }

    /// Looks up a resource kind.
    #[must_use]
    pub fn resolve(&self, kind: &str) -> Option<&KindEntry> {
        self.entries.get(kind)
    }

    /// Returns the number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no kinds are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the registered kinds in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shopify_registry_maps_kinds_to_fields() {
        let registry = TypeRegistry::shopify();

        let expected = [
            ("LineItem", "lineItems"),
            ("FulfillmentOrderLineItem", "lineItems"),
            ("FulfillmentOrder", "fulfillmentOrders"),
            ("MediaImage", "media"),
            ("Video", "media"),
            ("Model3d", "media"),
            ("ExternalVideo", "media"),
            ("Metafield", "metafields"),
            ("Order", "orders"),
            ("Product", "products"),
            ("ProductVariant", "variants"),
            ("Collection", "collections"),
            ("ProductImage", "images"),
        ];

        assert_eq!(registry.len(), expected.len());
        for (kind, field) in expected {
            let entry = registry.resolve(kind).unwrap();
            assert_eq!(entry.kind(), kind);
            assert_eq!(entry.field(), field, "{kind}");
        }
    }

    #[test]
    fn test_entries_decode_into_their_node_type() {
        let registry = TypeRegistry::shopify();

        let node = registry
            .resolve("ProductImage")
            .unwrap()
            .decode(br#"{"id":"gid://shopify/ProductImage/5","url":"https://cdn/x.png"}"#)
            .unwrap();
        assert!(matches!(node, BulkNode::Image(ref image) if image.url.as_deref() == Some("https://cdn/x.png")));

        let node = registry
            .resolve("ExternalVideo")
            .unwrap()
            .decode(br#"{"id":"gid://shopify/ExternalVideo/6","host":"YOUTUBE"}"#)
            .unwrap();
        assert_eq!(node.type_name(), "Media");
    }

    #[test]
    fn test_decode_reports_type_mismatch() {
        let registry = TypeRegistry::shopify();
        let result = registry
            .resolve("LineItem")
            .unwrap()
            .decode(br#"{"id":"gid://shopify/LineItem/1","quantity":"three"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_with_kind_extends_registry() {
        let registry = TypeRegistry::new().with_kind("AppMetafield", "metafields", decode_as::<Metafield>);

        assert!(!registry.is_empty());
        assert_eq!(registry.kinds().collect::<Vec<_>>(), vec!["AppMetafield"]);
        assert!(registry.resolve("Metafield").is_none());
    }

    #[test]
    fn test_global_registry_is_shared() {
        assert!(std::ptr::eq(TypeRegistry::global(), TypeRegistry::global()));
        assert!(TypeRegistry::global().resolve("Product").is_some());
    }
}
