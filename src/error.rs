//! Error types for the Shopify bulk client.
//!
//! This module contains the configuration error type. Errors for HTTP,
//! GraphQL and bulk operations live next to the clients that produce them
//! (see [`crate::clients`] and [`crate::bulk`]).
//!
//! # Example
//!
//! ```rust
//! use shopify_bulk::{ConfigError, ShopDomain};
//!
//! let result = ShopDomain::new("not a shop");
//! assert!(matches!(result, Err(ConfigError::InvalidShopDomain { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Every configuration constructor validates its input and returns one of
/// these variants instead of panicking.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2025-01') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://proxy.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A bulk operation setting is out of range.
    #[error("Invalid bulk operation setting '{field}': {reason}")]
    InvalidBulkSetting {
        /// The name of the offending setting.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}
