//! HTTP and GraphQL client types for Shopify Admin API communication.
//!
//! # Overview
//!
//! - [`HttpClient`]: the async HTTP client, with retry on 429 and 500
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a parsed response from the API
//! - [`graphql::GraphqlClient`]: GraphQL client for the Admin API
//! - [`graphql::GraphqlTransport`]: the seam bulk operations use to reach the API
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: retries using `Retry-After`, or 1 second if not present
//! - **500 (Server Error)**: retries with a fixed 1-second delay
//! - **Other errors (4xx)**: returned immediately
//!
//! The default `tries` is 1, meaning no automatic retries.

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, QueryCost, ThrottleStatus};

pub use graphql::{GraphqlClient, GraphqlError, GraphqlTransport};
