//! GraphQL API client for the Shopify Admin API.
//!
//! - [`GraphqlClient`]: executes GraphQL documents over [`HttpClient`](crate::clients::HttpClient)
//! - [`GraphqlTransport`]: the trait bulk operations are written against
//! - [`GraphqlError`]: error type for GraphQL calls
//!
//! # Retry Behavior
//!
//! Requests are attempted once by default. [`GraphqlClient::with_tries`]
//! enables automatic retries on 429 (rate limited) and 500 responses; the
//! bulk operation code itself never retries a transport call.

mod client;
mod errors;
mod transport;

pub use client::GraphqlClient;
pub use errors::{GraphqlError, GraphqlErrorDetail};
pub use transport::{extract_data, GraphqlTransport};
