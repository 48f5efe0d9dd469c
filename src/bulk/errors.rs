//! Error types for bulk operations.
//!
//! - [`BulkParseError`]: structural problems in a bulk export
//! - [`BulkOperationError`]: failures of a single bulk operation step
//! - [`BulkQueryError`]: a [`BulkOperationError`] tagged with the
//!   [`BulkStage`] of [`run`](crate::bulk::BulkOperationService::run) it
//!   happened in
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_bulk::bulk::{BulkOperationError, BulkStage};
//!
//! match service.run::<Product>(query, &cancel).await {
//!     Ok(products) => println!("{} products", products.len()),
//!     Err(e) if e.is_cancelled() => println!("cancelled"),
//!     Err(e) if e.is_retryable() => println!("try again later: {e}"),
//!     Err(e) => eprintln!("{}: {}", e.stage, e.source),
//! }
//! ```

use std::fmt;

use thiserror::Error;

use super::operation::{BulkOperationErrorCode, BulkOperationStatus};
use crate::clients::GraphqlError;

/// A `userErrors` entry returned by a bulk operation mutation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct UserError {
    /// Path to the input field that caused the error.
    #[serde(default)]
    pub field: Option<Vec<String>>,

    /// Human-readable message.
    pub message: String,

    /// Machine-readable code, such as `OPERATION_IN_PROGRESS`.
    #[serde(default)]
    pub code: Option<String>,
}

impl UserError {
    /// Returns `true` if the error reports that another bulk operation is
    /// already running for the shop.
    #[must_use]
    pub fn is_operation_in_progress(&self) -> bool {
        self.code.as_deref() == Some("OPERATION_IN_PROGRESS")
            || self.message.contains("already in progress")
    }
}

fn join_messages(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Structural errors found while reading and reconstructing a bulk export.
///
/// None of these are retryable: they mean the output type, the type
/// registry and the query disagree about the shape of the data.
#[derive(Debug, Error)]
pub enum BulkParseError {
    /// A child line has no `id` field.
    #[error("Bulk result line {line} has __parentId but no id")]
    MissingChildId {
        /// 1-based line number.
        line: usize,
    },

    /// A root node exposes no identifier, so children cannot be attached.
    #[error("{type_name} node has no id; the output type does not match the query")]
    MissingNodeId {
        /// The output type.
        type_name: &'static str,
    },

    /// A child line's `id` is not a global identifier.
    #[error("Bulk result line {line} has malformed id '{gid}'")]
    MalformedGid {
        /// 1-based line number.
        line: usize,
        /// The offending identifier.
        gid: String,
    },

    /// The resource kind in a child's id is not in the type registry.
    #[error("Bulk result line {line} has unknown resource kind '{kind}'")]
    UnknownResourceKind {
        /// 1-based line number.
        line: usize,
        /// The unregistered kind.
        kind: String,
    },

    /// A line could not be decoded into its target type.
    #[error("Failed to decode bulk result line {line}: {source}")]
    Decode {
        /// 1-based line number.
        line: usize,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A parent type has no connection field with the buffered name.
    #[error("{parent_type} has no connection field '{field}'")]
    UnknownConnection {
        /// The parent node type.
        parent_type: &'static str,
        /// The buffered field name.
        field: String,
    },

    /// A buffered child cannot be stored in the parent's connection.
    #[error("{parent_type}.{field} holds {expected} nodes, found {found}")]
    NodeTypeMismatch {
        /// The parent node type.
        parent_type: &'static str,
        /// The connection field.
        field: String,
        /// The node type the field holds.
        expected: &'static str,
        /// The node type that was buffered.
        found: &'static str,
    },

    /// Children are nested deeper than the configured maximum.
    #[error("Bulk result nesting exceeds the maximum depth of {max_depth}")]
    DepthExceeded {
        /// The configured maximum.
        max_depth: usize,
    },

    /// The stream could not be read.
    #[error("Failed to read bulk result stream: {0}")]
    Read(#[from] std::io::Error),
}

/// Errors from a single bulk operation step.
#[derive(Debug, Error)]
pub enum BulkOperationError {
    /// The GraphQL call failed.
    #[error(transparent)]
    Graphql(#[from] GraphqlError),

    /// A mutation returned `userErrors`.
    #[error("{operation} failed: {}", join_messages(.errors))]
    UserErrors {
        /// The mutation name.
        operation: &'static str,
        /// The returned errors.
        errors: Vec<UserError>,
    },

    /// A submission returned no operation id.
    #[error("bulkOperationRunQuery returned no bulk operation id")]
    MissingOperationId,

    /// The current operation is not the one that was submitted.
    #[error("Expected bulk operation {expected}, found {}", .actual.as_deref().unwrap_or("none"))]
    IdMismatch {
        /// The submitted operation id.
        expected: String,
        /// The current operation id, if any.
        actual: Option<String>,
    },

    /// The shop has no bulk operation to read a result from.
    #[error("Shop has no current bulk operation")]
    NoOperation,

    /// The operation finished with status `FAILED`, or completed but still
    /// reported an error code.
    #[error("Bulk operation {id} failed with error code {}", .error_code.as_ref().map_or_else(|| "UNKNOWN".to_string(), ToString::to_string))]
    OperationFailed {
        /// The operation id.
        id: String,
        /// The error code Shopify reported.
        error_code: Option<BulkOperationErrorCode>,
    },

    /// The operation reached a terminal state other than `COMPLETED`.
    #[error("Bulk operation {id} ended with status {status}")]
    NotCompleted {
        /// The operation id.
        id: String,
        /// The terminal status.
        status: BulkOperationStatus,
    },

    /// A completed operation with objects has no result URL.
    #[error("Bulk operation {id} completed with objects but no result url")]
    MissingResultUrl {
        /// The operation id.
        id: String,
    },

    /// The caller's cancellation token fired.
    #[error("Bulk operation wait was cancelled")]
    Cancelled,

    /// The API response did not have the expected shape.
    #[error("Invalid bulk operation response: {message}")]
    InvalidResponse {
        /// What was wrong.
        message: String,
    },

    /// The result download failed in transport.
    #[error("Failed to download bulk result: {0}")]
    Download(#[source] reqwest::Error),

    /// The result download returned a non-success status.
    #[error("Bulk result download returned HTTP {code}")]
    DownloadStatus {
        /// The HTTP status code.
        code: u16,
    },

    /// The temporary result file could not be written or read.
    #[error("Bulk result file error: {0}")]
    Io(#[from] std::io::Error),

    /// The export could not be reconstructed.
    #[error(transparent)]
    Parse(#[from] BulkParseError),
}

impl BulkOperationError {
    /// Returns `true` if the caller's cancellation token caused this error.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if the same call may succeed later.
    ///
    /// Submission conflicts, throttling and transient transport failures are
    /// retryable; structural and job failures are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Graphql(e) => e.is_retryable(),
            Self::UserErrors { errors, .. } => errors.iter().any(UserError::is_operation_in_progress),
            Self::Download(e) => e.is_timeout() || e.is_connect(),
            Self::DownloadStatus { code } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

/// The step of a bulk query run an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkStage {
    /// Waiting for a previously started operation to finish.
    WaitForPrevious,
    /// Submitting the bulk query.
    Submit,
    /// Polling the submitted operation to completion.
    AwaitResult,
    /// Downloading the result file.
    Download,
    /// Parsing and reconstructing the result.
    Parse,
}

impl fmt::Display for BulkStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::WaitForPrevious => "waiting for previous bulk operation",
            Self::Submit => "submitting bulk operation",
            Self::AwaitResult => "awaiting bulk operation result",
            Self::Download => "downloading bulk result",
            Self::Parse => "parsing bulk result",
        };
        f.write_str(stage)
    }
}

/// Error returned by [`run`](crate::bulk::BulkOperationService::run).
#[derive(Debug, Error)]
#[error("Bulk query failed while {stage}: {source}")]
pub struct BulkQueryError {
    /// Where the run failed.
    pub stage: BulkStage,
    /// What went wrong.
    #[source]
    pub source: BulkOperationError,
}

impl BulkQueryError {
    /// Creates an error for `stage`.
    #[must_use]
    pub const fn new(stage: BulkStage, source: BulkOperationError) -> Self {
        Self { stage, source }
    }

    /// Returns `true` if the run was cancelled by the caller.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.source.is_cancelled()
    }

    /// Returns `true` if rerunning the query may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.source.is_retryable()
    }
}

impl BulkStage {
    pub(crate) fn wrap(self) -> impl Fn(BulkOperationError) -> BulkQueryError {
        move |source| BulkQueryError::new(self, source)
    }
}
