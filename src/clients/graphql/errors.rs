//! GraphQL-specific error types.
//!
//! - [`GraphqlError::Http`]: wraps underlying HTTP errors
//! - [`GraphqlError::Response`]: top-level `errors` returned with HTTP 200
//! - [`GraphqlError::MissingData`]: a response without a `data` object
//!
//! Mutation `userErrors` are part of `data` and are interpreted by the
//! caller that issued the mutation.

use crate::clients::HttpError;
use serde::Deserialize;
use thiserror::Error;

/// Error codes Shopify uses in `extensions.code` for cost-based throttling.
const THROTTLED_CODES: [&str; 2] = ["THROTTLED", "MAX_COST_EXCEEDED"];

/// One entry of a GraphQL response's top-level `errors` array.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GraphqlErrorDetail {
    /// Human readable message.
    pub message: String,
    /// `extensions.code`, when present.
    #[serde(default, deserialize_with = "deserialize_extension_code", rename = "extensions")]
    pub code: Option<String>,
}

fn deserialize_extension_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Extensions {
        code: Option<String>,
    }

    Ok(Option::<Extensions>::deserialize(deserializer)?.and_then(|e| e.code))
}

fn join_messages(errors: &[GraphqlErrorDetail]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error type for GraphQL API operations.
///
/// # Example
///
/// ```rust
/// use shopify_bulk::clients::graphql::{GraphqlError, GraphqlErrorDetail};
///
/// let error = GraphqlError::Response {
///     errors: vec![GraphqlErrorDetail {
///         message: "Throttled".to_string(),
///         code: Some("THROTTLED".to_string()),
///     }],
/// };
/// assert!(error.is_throttled());
/// assert!(error.to_string().contains("Throttled"));
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server answered with a top-level `errors` array.
    #[error("GraphQL request returned errors: {}", join_messages(.errors))]
    Response {
        /// The reported errors, in server order.
        errors: Vec<GraphqlErrorDetail>,
    },

    /// The response body carried neither `errors` nor a `data` object.
    #[error("GraphQL response did not contain a data object")]
    MissingData,
}

impl GraphqlError {
    /// Returns `true` if the request was rejected by rate limiting, either
    /// by HTTP 429 or by a cost-based throttle error.
    #[must_use]
    pub fn is_throttled(&self) -> bool {
        match self {
            Self::Http(e) => e.status() == Some(429),
            Self::Response { errors } => errors.iter().any(|e| {
                e.code
                    .as_deref()
                    .is_some_and(|code| THROTTLED_CODES.contains(&code))
            }),
            Self::MissingData => false,
        }
    }

    /// Returns `true` if retrying the same request later may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_retryable(),
            Self::Response { .. } => self.is_throttled(),
            Self::MissingData => false,
        }
    }
}
