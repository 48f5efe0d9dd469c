//! The bulk operation lifecycle: submit, poll, wait, cancel and collect.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use super::attach::BulkAttach;
use super::download::download_to_tempfile;
use super::errors::{BulkOperationError, BulkQueryError, BulkStage, UserError};
use super::operation::{BulkOperation, BulkOperationErrorCode, BulkOperationStatus};
use super::parser::BulkParser;
use super::registry::TypeRegistry;
use crate::clients::{GraphqlClient, GraphqlTransport};
use crate::config::{ShopifyConfig, DEFAULT_BULK_MAX_NESTING_DEPTH, DEFAULT_BULK_POLL_INTERVAL};

const RUN_QUERY_MUTATION: &str = r"mutation bulkOperationRunQuery($query: String!) {
  bulkOperationRunQuery(query: $query) {
    bulkOperation { id status }
    userErrors { field message code }
  }
}";

const CURRENT_OPERATION_QUERY: &str = r"query currentBulkOperation {
  currentBulkOperation {
    id status errorCode createdAt completedAt
    objectCount rootObjectCount fileSize url partialDataUrl query
  }
}";

const CANCEL_MUTATION: &str = r"mutation bulkOperationCancel($id: ID!) {
  bulkOperationCancel(id: $id) {
    bulkOperation { id status }
    userErrors { field message }
  }
}";

/// Runs bulk queries against the Admin API and reconstructs their results.
///
/// Shopify allows one bulk query per shop at a time. [`run`](Self::run)
/// therefore waits for any operation already in progress before submitting
/// its own, and every wait honors a [`CancellationToken`].
///
/// # Example
///
/// ```rust,ignore
/// use shopify_bulk::bulk::BulkOperationService;
/// use shopify_bulk::model::Product;
/// use shopify_bulk::{GraphqlClient, Session, ShopDomain};
/// use tokio_util::sync::CancellationToken;
///
/// let session = Session::new(ShopDomain::new("my-store")?, "access-token");
/// let service = BulkOperationService::from_client(GraphqlClient::new(&session, None), None);
///
/// let products: Vec<Product> = service
///     .run(
///         "{ products { edges { node { id title variants { edges { node { id sku } } } } } } }",
///         &CancellationToken::new(),
///     )
///     .await?;
/// ```
#[derive(Debug)]
pub struct BulkOperationService<C> {
    transport: C,
    http: reqwest::Client,
    registry: Arc<TypeRegistry>,
    poll_interval: Duration,
    max_depth: usize,
}

impl BulkOperationService<GraphqlClient> {
    /// Creates a service on top of a [`GraphqlClient`], downloading results
    /// with the client's connection pool but without its access token.
    #[must_use]
    pub fn from_client(client: GraphqlClient, config: Option<&ShopifyConfig>) -> Self {
        let http = client.http_client().inner().clone();
        let service = Self::new(client).with_http_client(http);

        match config {
            Some(config) => service
                .with_poll_interval(config.bulk_poll_interval())
                .with_max_depth(config.bulk_max_nesting_depth()),
            None => service,
        }
    }
}

impl<C: GraphqlTransport> BulkOperationService<C> {
    /// Creates a service with default settings and the Shopify type registry.
    #[must_use]
    pub fn new(transport: C) -> Self {
        Self {
            transport,
            http: reqwest::Client::new(),
            registry: Arc::new(TypeRegistry::shopify()),
            poll_interval: DEFAULT_BULK_POLL_INTERVAL,
            max_depth: DEFAULT_BULK_MAX_NESTING_DEPTH,
        }
    }

    /// Sets the HTTP client used to download result files.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Sets the type registry child lines are resolved through.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the fixed delay between status polls.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets how many connection levels may nest below a root item.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the delay between status polls.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &C {
        &self.transport
    }

    /// Submits `query` as a bulk operation and returns the operation id.
    ///
    /// # Errors
    ///
    /// Returns [`BulkOperationError::UserErrors`] if Shopify rejects the
    /// query, including when another bulk query is already in progress,
    /// [`BulkOperationError::MissingOperationId`] if no id comes back, and
    /// transport errors as [`BulkOperationError::Graphql`].
    pub async fn submit(&self, query: &str) -> Result<String, BulkOperationError> {
        let data = self
            .transport
            .execute(RUN_QUERY_MUTATION, Some(json!({ "query": query })))
            .await?;
        let payload = &data["bulkOperationRunQuery"];

        check_user_errors("bulkOperationRunQuery", payload)?;

        let id = payload["bulkOperation"]["id"]
            .as_str()
            .ok_or(BulkOperationError::MissingOperationId)?
            .to_string();

        tracing::info!(bulk_operation_id = %id, "Submitted bulk operation");
        Ok(id)
    }

    /// Reads the shop's current bulk operation, if there is one.
    ///
    /// # Errors
    ///
    /// Returns transport errors and
    /// [`BulkOperationError::InvalidResponse`] for an unreadable payload.
    pub async fn current_operation(&self) -> Result<Option<BulkOperation>, BulkOperationError> {
        let mut data = self.transport.execute(CURRENT_OPERATION_QUERY, None).await?;

        match data.get_mut("currentBulkOperation").map(Value::take) {
            None | Some(Value::Null) => Ok(None),
            Some(operation) => serde_json::from_value(operation).map(Some).map_err(|e| {
                BulkOperationError::InvalidResponse {
                    message: format!("currentBulkOperation: {e}"),
                }
            }),
        }
    }

    /// Reads the current bulk operation and checks that it is `expected_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BulkOperationError::IdMismatch`] if there is no current
    /// operation or it is a different one.
    pub async fn operation_status(
        &self,
        expected_id: &str,
    ) -> Result<BulkOperation, BulkOperationError> {
        let current = self.current_operation().await?;
        ensure_operation(expected_id, current)
    }

    /// Polls until the current bulk operation leaves `CREATED`, `RUNNING`
    /// and `CANCELING`, sleeping `interval` between polls.
    ///
    /// Returns `None` if the shop has no bulk operation at all.
    ///
    /// # Errors
    ///
    /// Returns [`BulkOperationError::Cancelled`] as soon as `cancel` fires,
    /// including in the middle of a sleep or a status request, and any error
    /// from [`current_operation`](Self::current_operation).
    pub async fn wait_until_terminal(
        &self,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> Result<Option<BulkOperation>, BulkOperationError> {
        loop {
            if cancel.is_cancelled() {
                return Err(BulkOperationError::Cancelled);
            }

            let current = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(BulkOperationError::Cancelled),
                current = self.current_operation() => current?,
            };

            let Some(operation) = current else {
                return Ok(None);
            };

            if operation.status.is_terminal() {
                tracing::debug!(
                    bulk_operation_id = %operation.id,
                    status = %operation.status,
                    "Bulk operation reached terminal state"
                );
                return Ok(Some(operation));
            }

            tracing::debug!(
                bulk_operation_id = %operation.id,
                status = %operation.status,
                objects = operation.object_count,
                "Bulk operation still in progress"
            );

            if cancel.is_cancelled() {
                return Err(BulkOperationError::Cancelled);
            }

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(BulkOperationError::Cancelled),
                () = tokio::time::sleep(interval) => {}
            }
        }
    }

    /// Waits for the current bulk operation to finish and returns the URL of
    /// its result file, or `None` if it completed without exporting anything.
    ///
    /// With `expected_id`, the current operation must be that one, both
    /// before and after the wait.
    ///
    /// # Errors
    ///
    /// - [`BulkOperationError::IdMismatch`] if another operation is current
    /// - [`BulkOperationError::NoOperation`] if the shop has none and no id
    ///   was given
    /// - [`BulkOperationError::OperationFailed`] with Shopify's error code if
    ///   the operation failed, or completed while reporting an error code
    /// - [`BulkOperationError::NotCompleted`] if it was canceled or expired
    /// - [`BulkOperationError::MissingResultUrl`] if it completed with
    ///   objects but without a URL
    /// - [`BulkOperationError::Cancelled`] if `cancel` fires while waiting
    pub async fn result_url(
        &self,
        expected_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, BulkOperationError> {
        if let Some(expected_id) = expected_id {
            self.operation_status(expected_id).await?;
        }

        let operation = self.wait_until_terminal(self.poll_interval, cancel).await?;
        let operation = match expected_id {
            Some(expected_id) => ensure_operation(expected_id, operation)?,
            None => operation.ok_or(BulkOperationError::NoOperation)?,
        };

        match operation.status {
            BulkOperationStatus::Completed if !has_error_code(&operation) => {}
            BulkOperationStatus::Completed | BulkOperationStatus::Failed => {
                return Err(BulkOperationError::OperationFailed {
                    id: operation.id,
                    error_code: operation.error_code,
                });
            }
            status => {
                return Err(BulkOperationError::NotCompleted {
                    id: operation.id,
                    status,
                });
            }
        }

        if operation.is_empty() {
            tracing::info!(bulk_operation_id = %operation.id, "Bulk operation completed with no objects");
            return Ok(None);
        }

        let url = operation
            .url
            .ok_or_else(|| BulkOperationError::MissingResultUrl {
                id: operation.id.clone(),
            })?;

        tracing::info!(
            bulk_operation_id = %operation.id,
            objects = operation.object_count,
            root_objects = operation.root_object_count,
            "Bulk operation completed"
        );
        Ok(Some(url))
    }

    /// Waits for whichever bulk operation is current and returns its result
    /// URL, without checking its id.
    ///
    /// # Errors
    ///
    /// See [`result_url`](Self::result_url).
    pub async fn current_result_url(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, BulkOperationError> {
        self.result_url(None, cancel).await
    }

    /// Cancels the current bulk operation if it is `CREATED` or `RUNNING`
    /// and waits until it stops.
    ///
    /// Does nothing when no operation is active.
    ///
    /// # Errors
    ///
    /// Returns [`BulkOperationError::UserErrors`] if Shopify refuses the
    /// cancellation, [`BulkOperationError::Cancelled`] if `cancel` fires
    /// while waiting, and transport errors.
    pub async fn cancel(&self, cancel: &CancellationToken) -> Result<(), BulkOperationError> {
        let Some(operation) = self.current_operation().await? else {
            return Ok(());
        };

        if !operation.status.is_cancellable() {
            tracing::debug!(
                bulk_operation_id = %operation.id,
                status = %operation.status,
                "No bulk operation to cancel"
            );
            return Ok(());
        }

        let data = self
            .transport
            .execute(CANCEL_MUTATION, Some(json!({ "id": operation.id })))
            .await?;
        check_user_errors("bulkOperationCancel", &data["bulkOperationCancel"])?;

        tracing::info!(bulk_operation_id = %operation.id, "Requested bulk operation cancellation");

        let operation = self.wait_until_terminal(self.poll_interval, cancel).await?;
        if let Some(operation) = operation {
            tracing::debug!(
                bulk_operation_id = %operation.id,
                status = %operation.status,
                "Bulk operation stopped"
            );
        }
        Ok(())
    }

    /// Runs `query` as a bulk operation and returns its root items with all
    /// nested connections attached.
    ///
    /// Waits for any bulk operation already in progress, submits the query,
    /// waits for it, downloads the result to a temporary file and parses it.
    /// The temporary file is removed before this returns. An operation that
    /// exports nothing yields an empty `Vec`.
    ///
    /// Cancelling stops the local wait only; the submitted operation keeps
    /// running on Shopify until it finishes or [`cancel`](Self::cancel) is
    /// called.
    ///
    /// # Errors
    ///
    /// Returns a [`BulkQueryError`] naming the [`BulkStage`] that failed.
    #[tracing::instrument(skip_all, fields(output = std::any::type_name::<T>()))]
    pub async fn run<T>(&self, query: &str, cancel: &CancellationToken) -> Result<Vec<T>, BulkQueryError>
    where
        T: DeserializeOwned + BulkAttach + Send + 'static,
    {
        self.wait_until_terminal(self.poll_interval, cancel)
            .await
            .map_err(BulkStage::WaitForPrevious.wrap())?;

        let id = self.submit(query).await.map_err(BulkStage::Submit.wrap())?;

        let Some(url) = self
            .result_url(Some(&id), cancel)
            .await
            .map_err(BulkStage::AwaitResult.wrap())?
        else {
            return Ok(Vec::new());
        };

        let download = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(BulkOperationError::Cancelled),
            file = download_to_tempfile(&self.http, &url) => file,
        };
        let file = download.map_err(BulkStage::Download.wrap())?;

        let parser_registry = Arc::clone(&self.registry);
        let max_depth = self.max_depth;
        let parsed = tokio::task::spawn_blocking(move || {
            let reader = std::io::BufReader::new(file.as_file());
            BulkParser::new(&parser_registry)
                .with_max_depth(max_depth)
                .parse::<T, _>(reader)
        })
        .await;

        match parsed {
            Ok(result) => {
                let items = result
                    .map_err(BulkOperationError::from)
                    .map_err(BulkStage::Parse.wrap())?;
                tracing::info!(bulk_operation_id = %id, items = items.len(), "Bulk query results reconstructed");
                Ok(items)
            }
            Err(join_error) if join_error.is_panic() => std::panic::resume_unwind(join_error.into_panic()),
            Err(_) => Err(BulkStage::Parse.wrap()(BulkOperationError::Cancelled)),
        }
    }
}

fn check_user_errors(operation: &'static str, payload: &Value) -> Result<(), BulkOperationError> {
    let errors: Vec<UserError> = match payload.get("userErrors") {
        None | Some(Value::Null) => return Ok(()),
        Some(errors) => serde_json::from_value(errors.clone()).map_err(|e| {
            BulkOperationError::InvalidResponse {
                message: format!("{operation}.userErrors: {e}"),
            }
        })?,
    };

    if errors.is_empty() {
        Ok(())
    } else {
        Err(BulkOperationError::UserErrors { operation, errors })
    }
}

fn has_error_code(operation: &BulkOperation) -> bool {
    match &operation.error_code {
        None => false,
        Some(BulkOperationErrorCode::Unknown(code)) => !code.is_empty(),
        Some(_) => true,
    }
}

fn ensure_operation(
    expected_id: &str,
    current: Option<BulkOperation>,
) -> Result<BulkOperation, BulkOperationError> {
    match current {
        Some(operation) if operation.id == expected_id => Ok(operation),
        other => Err(BulkOperationError::IdMismatch {
            expected: expected_id.to_string(),
            actual: other.map(|operation| operation.id),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::GraphqlError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Answers each call with the next scripted `data` object, repeating the
    /// last one once the script runs out.
    struct Scripted {
        responses: Mutex<VecDeque<Value>>,
        calls: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(responses: Vec<Value>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GraphqlTransport for Scripted {
        async fn execute(&self, query: &str, _variables: Option<Value>) -> Result<Value, GraphqlError> {
            let name = query
                .split(|c: char| c == '(' || c == '{')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            self.calls.lock().unwrap().push(name);

            let mut responses = self.responses.lock().unwrap();
            let next = if responses.len() > 1 {
                responses.pop_front()
            } else {
                responses.front().cloned()
            };
            next.ok_or(GraphqlError::MissingData)
        }
    }

    fn current(id: &str, status: &str) -> Value {
        json!({ "currentBulkOperation": { "id": id, "status": status, "objectCount": "0" } })
    }

    fn service(responses: Vec<Value>) -> BulkOperationService<Scripted> {
        BulkOperationService::new(Scripted::new(responses)).with_poll_interval(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_submit_returns_operation_id() {
        let service = service(vec![json!({
            "bulkOperationRunQuery": {
                "bulkOperation": { "id": "gid://shopify/BulkOperation/1", "status": "CREATED" },
                "userErrors": []
            }
        })]);

        let id = service.submit("{ products { edges { node { id } } } }").await.unwrap();

        assert_eq!(id, "gid://shopify/BulkOperation/1");
        assert_eq!(service.transport().calls(), vec!["mutation bulkOperationRunQuery"]);
    }

    #[tokio::test]
    async fn test_submit_surfaces_user_errors() {
        let service = service(vec![json!({
            "bulkOperationRunQuery": {
                "bulkOperation": null,
                "userErrors": [{ "field": ["query"], "message": "Invalid bulk query" }]
            }
        })]);

        let err = service.submit("{ nope }").await.unwrap_err();

        match err {
            BulkOperationError::UserErrors { operation, errors } => {
                assert_eq!(operation, "bulkOperationRunQuery");
                assert_eq!(errors[0].field.as_deref(), Some(&["query".to_string()][..]));
            }
            other => panic!("expected user errors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_without_id_fails() {
        let service = service(vec![json!({
            "bulkOperationRunQuery": { "bulkOperation": null, "userErrors": [] }
        })]);

        let err = service.submit("{ products { edges { node { id } } } }").await.unwrap_err();
        assert!(matches!(err, BulkOperationError::MissingOperationId));
    }

    #[tokio::test]
    async fn test_current_operation_handles_null() {
        let service = service(vec![json!({ "currentBulkOperation": null })]);
        assert!(service.current_operation().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_current_operation_rejects_malformed_payload() {
        let service = service(vec![json!({ "currentBulkOperation": { "status": "RUNNING" } })]);

        let err = service.current_operation().await.unwrap_err();
        assert!(matches!(err, BulkOperationError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_operation_status_detects_mismatch() {
        let service = service(vec![current("gid://shopify/BulkOperation/2", "RUNNING")]);

        let err = service
            .operation_status("gid://shopify/BulkOperation/1")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BulkOperationError::IdMismatch { ref actual, .. } if actual.as_deref() == Some("gid://shopify/BulkOperation/2")
        ));
    }

    #[tokio::test]
    async fn test_wait_until_terminal_polls_through_in_progress_states() {
        let service = service(vec![
            current("gid://shopify/BulkOperation/1", "CREATED"),
            current("gid://shopify/BulkOperation/1", "RUNNING"),
            current("gid://shopify/BulkOperation/1", "CANCELING"),
            current("gid://shopify/BulkOperation/1", "CANCELED"),
        ]);

        let operation = service
            .wait_until_terminal(Duration::from_millis(1), &CancellationToken::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(operation.status, BulkOperationStatus::Canceled);
        assert_eq!(service.transport().calls().len(), 4);
    }

    #[tokio::test]
    async fn test_wait_until_terminal_checks_cancellation_first() {
        let service = service(vec![current("gid://shopify/BulkOperation/1", "RUNNING")]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = service
            .wait_until_terminal(Duration::from_millis(1), &cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert!(service.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn test_result_url_reports_failed_operation() {
        let failed = json!({ "currentBulkOperation": {
            "id": "gid://shopify/BulkOperation/1",
            "status": "FAILED",
            "errorCode": "ACCESS_DENIED",
            "objectCount": "0"
        }});
        let service = service(vec![failed]);

        let err = service
            .result_url(Some("gid://shopify/BulkOperation/1"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BulkOperationError::OperationFailed {
                error_code: Some(crate::bulk::BulkOperationErrorCode::AccessDenied),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_result_url_reports_expired_operation() {
        let service = service(vec![current("gid://shopify/BulkOperation/1", "EXPIRED")]);

        let err = service
            .result_url(Some("gid://shopify/BulkOperation/1"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BulkOperationError::NotCompleted {
                status: BulkOperationStatus::Expired,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_result_url_is_none_for_empty_export() {
        let service = service(vec![current("gid://shopify/BulkOperation/1", "COMPLETED")]);

        let url = service
            .result_url(Some("gid://shopify/BulkOperation/1"), &CancellationToken::new())
            .await
            .unwrap();

        assert!(url.is_none());
    }

    #[tokio::test]
    async fn test_result_url_requires_url_when_objects_exist() {
        let service = service(vec![json!({ "currentBulkOperation": {
            "id": "gid://shopify/BulkOperation/1",
            "status": "COMPLETED",
            "objectCount": "3",
            "url": null
        }})]);

        let err = service
            .result_url(Some("gid://shopify/BulkOperation/1"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, BulkOperationError::MissingResultUrl { .. }));
    }

    #[tokio::test]
    async fn test_result_url_rejects_completed_operation_with_error_code() {
        let service = service(vec![json!({ "currentBulkOperation": {
            "id": "gid://shopify/BulkOperation/1",
            "status": "COMPLETED",
            "errorCode": "INTERNAL_SERVER_ERROR",
            "objectCount": "3",
            "url": "https://storage.example.com/result.jsonl"
        }})]);

        let err = service
            .result_url(Some("gid://shopify/BulkOperation/1"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BulkOperationError::OperationFailed {
                error_code: Some(BulkOperationErrorCode::InternalServerError),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_current_result_url_skips_id_check() {
        let service = service(vec![json!({ "currentBulkOperation": {
            "id": "gid://shopify/BulkOperation/9",
            "status": "COMPLETED",
            "objectCount": "3",
            "url": "https://storage.example.com/result.jsonl"
        }})]);

        let url = service
            .current_result_url(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(url.as_deref(), Some("https://storage.example.com/result.jsonl"));
        assert_eq!(service.transport().calls(), vec!["query currentBulkOperation"]);
    }

    #[tokio::test]
    async fn test_current_result_url_without_operation() {
        let service = service(vec![json!({ "currentBulkOperation": null })]);

        let err = service
            .current_result_url(&CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, BulkOperationError::NoOperation));
    }

    #[tokio::test]
    async fn test_cancel_is_noop_without_active_operation() {
        let service = service(vec![json!({ "currentBulkOperation": null })]);
        service.cancel(&CancellationToken::new()).await.unwrap();

        let service = self::service(vec![current("gid://shopify/BulkOperation/1", "COMPLETED")]);
        service.cancel(&CancellationToken::new()).await.unwrap();

        assert_eq!(service.transport().calls(), vec!["query currentBulkOperation"]);
    }

    #[tokio::test]
    async fn test_cancel_sends_mutation_and_waits() {
        let service = service(vec![
            current("gid://shopify/BulkOperation/1", "RUNNING"),
            json!({ "bulkOperationCancel": {
                "bulkOperation": { "id": "gid://shopify/BulkOperation/1", "status": "CANCELING" },
                "userErrors": []
            }}),
            current("gid://shopify/BulkOperation/1", "CANCELING"),
            current("gid://shopify/BulkOperation/1", "CANCELED"),
        ]);

        service.cancel(&CancellationToken::new()).await.unwrap();

        assert_eq!(
            service.transport().calls(),
            vec![
                "query currentBulkOperation",
                "mutation bulkOperationCancel",
                "query currentBulkOperation",
                "query currentBulkOperation",
            ]
        );
    }

    #[test]
    fn test_check_user_errors_accepts_missing_and_empty() {
        assert!(check_user_errors("op", &json!({})).is_ok());
        assert!(check_user_errors("op", &json!({ "userErrors": [] })).is_ok());
        assert!(check_user_errors("op", &json!({ "userErrors": [{ "message": "no" }] })).is_err());
    }
}
