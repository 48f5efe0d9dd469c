//! # Shopify Bulk
//!
//! A typed client for the Shopify Admin GraphQL API built around bulk
//! operations: asynchronous server-side exports whose results arrive as a
//! flat JSONL file and are rebuilt here into nested, typed values.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ShopifyConfig`] and [`ShopifyConfigBuilder`]
//! - Validated newtypes for shop domains, host URLs and API versions
//! - Session credentials for authenticated API calls
//! - An async HTTP client with retry logic and rate limit handling
//! - A GraphQL client and the [`GraphqlTransport`] trait bulk operations use
//! - Typed resources in [`model`] with relay-style connections
//! - The bulk operation lifecycle and result reconstruction in [`bulk`]
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use shopify_bulk::{ApiVersion, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .api_version(ApiVersion::latest())
//!     .bulk_poll_interval(Duration::from_secs(2))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.bulk_poll_interval(), Duration::from_secs(2));
//! ```
//!
//! ## Running a Bulk Query
//!
//! ```rust,ignore
//! use shopify_bulk::bulk::BulkOperationService;
//! use shopify_bulk::model::Product;
//! use shopify_bulk::{GraphqlClient, Session, ShopDomain};
//! use tokio_util::sync::CancellationToken;
//!
//! let session = Session::new(ShopDomain::new("my-store")?, "access-token");
//! let client = GraphqlClient::new(&session, Some(&config));
//! let service = BulkOperationService::from_client(client, Some(&config));
//!
//! let products: Vec<Product> = service
//!     .run(
//!         r#"{
//!           products {
//!             edges { node {
//!               id title
//!               variants { edges { node { id sku
//!                 metafields { edges { node { id namespace key value } } }
//!               } } }
//!             } }
//!           }
//!         }"#,
//!         &CancellationToken::new(),
//!     )
//!     .await?;
//! ```
//!
//! ## Parsing an Export Directly
//!
//! ```rust
//! use shopify_bulk::bulk::BulkParser;
//! use shopify_bulk::model::Collection;
//!
//! let export = concat!(
//!     r#"{"id":"gid://shopify/Collection/1","title":"Winter"}"#, "\n",
//!     r#"{"id":"gid://shopify/Product/2","__parentId":"gid://shopify/Collection/1"}"#, "\n",
//! );
//!
//! let collections: Vec<Collection> = BulkParser::default().parse(export.as_bytes()).unwrap();
//! assert_eq!(collections[0].products.as_ref().unwrap().len(), 1);
//! ```
//!
//! ## Design Principles
//!
//! - **No mutable global state**: configuration is passed explicitly and the
//!   shared type registry is immutable
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **No silent partial results**: a bulk query either returns everything
//!   or an error naming the stage that failed
//! - **Async-first**: designed for use with the Tokio runtime

pub mod auth;
pub mod bulk;
pub mod clients;
pub mod config;
pub mod error;
pub mod model;

// Re-export public types at crate root for convenience
pub use auth::Session;
pub use config::{ApiVersion, HostUrl, ShopDomain, ShopifyConfig, ShopifyConfigBuilder};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    DataType, GraphqlClient, GraphqlError, GraphqlTransport, HttpClient, HttpError, HttpMethod,
    HttpRequest, HttpRequestBuilder, HttpResponse, HttpResponseError, InvalidHttpRequestError,
    MaxHttpRetriesExceededError,
};

// Re-export bulk operation entry points
pub use bulk::{BulkOperationService, BulkQueryError, BulkStage};
