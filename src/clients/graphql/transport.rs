//! The seam between bulk operations and the network.

use async_trait::async_trait;
use serde_json::Value;

use crate::clients::graphql::{GraphqlClient, GraphqlError, GraphqlErrorDetail};

/// Executes a GraphQL document and returns its `data` object.
///
/// [`GraphqlClient`] is the production implementation; anything that can
/// answer GraphQL documents (a recorded fixture, a proxy) can stand in for it.
/// Retry policy belongs to the implementation, not to its callers.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    /// Executes `query` with optional `variables`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError`] for transport failures, top-level GraphQL
    /// errors, and responses without data.
    async fn execute(&self, query: &str, variables: Option<Value>) -> Result<Value, GraphqlError>;
}

#[async_trait]
impl GraphqlTransport for GraphqlClient {
    async fn execute(&self, query: &str, variables: Option<Value>) -> Result<Value, GraphqlError> {
        let response = self.query(query, variables, None, Some(self.tries())).await?;
        extract_data(response.body)
    }
}

#[async_trait]
impl<T: GraphqlTransport + ?Sized> GraphqlTransport for std::sync::Arc<T> {
    async fn execute(&self, query: &str, variables: Option<Value>) -> Result<Value, GraphqlError> {
        (**self).execute(query, variables).await
    }
}

/// Splits a GraphQL response body into its `data` object or its errors.
///
/// A body with both `data` and `errors` is treated as failed: partial data
/// is never handed to callers as if it were complete.
///
/// # Errors
///
/// Returns [`GraphqlError::Response`] when `errors` is non-empty and
/// [`GraphqlError::MissingData`] when `data` is absent or null.
pub fn extract_data(mut body: Value) -> Result<Value, GraphqlError> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let errors = errors
                .iter()
                .map(|e| {
                    serde_json::from_value::<GraphqlErrorDetail>(e.clone()).unwrap_or_else(|_| {
                        GraphqlErrorDetail {
                            message: e.to_string(),
                            code: None,
                        }
                    })
                })
                .collect();
            return Err(GraphqlError::Response { errors });
        }
    }

    match body.get_mut("data").map(Value::take) {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(GraphqlError::MissingData),
    }
}
