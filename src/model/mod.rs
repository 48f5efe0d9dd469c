//! Typed GraphQL Admin API resources that bulk operations reconstruct.
//!
//! Every resource here deserializes from the camelCase JSON the Admin API
//! returns, both in regular GraphQL responses and in bulk operation JSONL
//! lines. One-to-many relationships are modeled as [`Connection`]s, which the
//! bulk parser fills in after reading the flattened export.
//!
//! # Example
//!
//! ```rust
//! use shopify_bulk::model::{Connection, Edge, ProductVariant};
//!
//! let variants = Connection::from_edges(vec![Edge::new(ProductVariant {
//!     id: "gid://shopify/ProductVariant/9".to_string(),
//!     ..Default::default()
//! })]);
//!
//! assert_eq!(variants.len(), 1);
//! assert_eq!(variants.nodes().next().map(|v| v.id.as_str()), Some("gid://shopify/ProductVariant/9"));
//! ```

mod collection;
mod connection;
mod gid;
mod metafield;
mod order;
mod product;

pub use collection::Collection;
pub use connection::{Connection, Edge, PageInfo};
pub use gid::{Gid, GidParseError};
pub use metafield::Metafield;
pub use order::{FulfillmentOrder, FulfillmentOrderLineItem, LineItem, Order};
pub use product::{
    ExternalVideo, Image, Media, MediaImage, MediaSource, Model3d, Product, ProductVariant, Video,
};
