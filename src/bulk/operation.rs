//! The `BulkOperation` object as reported by the Admin API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// The lifecycle state of a bulk operation.
///
/// `Created → Running → Completed | Failed | Canceling → Canceled`;
/// `Expired` is reported for completed operations whose results are gone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BulkOperationStatus {
    /// Accepted but not started.
    Created,
    /// In progress.
    Running,
    /// Cancellation requested, not yet effective.
    Canceling,
    /// Stopped before completion.
    Canceled,
    /// Finished successfully.
    Completed,
    /// Finished with an error.
    Failed,
    /// Finished, but its results are no longer available.
    Expired,
    /// A status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl BulkOperationStatus {
    /// Returns `true` for states the operation still moves on from
    /// (`CREATED`, `RUNNING`, `CANCELING`).
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::Created | Self::Running | Self::Canceling)
    }

    /// Returns `true` once the operation will not change state again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !self.is_in_progress()
    }

    /// Returns `true` for states that `bulkOperationCancel` applies to.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Created | Self::Running)
    }

    /// Returns the wire representation, such as `RUNNING`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Running => "RUNNING",
            Self::Canceling => "CANCELING",
            Self::Canceled => "CANCELED",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Expired => "EXPIRED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for BulkOperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a bulk operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BulkOperationErrorCode {
    /// The app lacks access to some of the queried data.
    AccessDenied,
    /// Shopify hit an internal error.
    InternalServerError,
    /// The operation ran too long.
    Timeout,
    /// A code this client does not know about.
    Unknown(String),
}

impl From<String> for BulkOperationErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "ACCESS_DENIED" => Self::AccessDenied,
            "INTERNAL_SERVER_ERROR" => Self::InternalServerError,
            "TIMEOUT" => Self::Timeout,
            _ => Self::Unknown(code),
        }
    }
}

impl From<BulkOperationErrorCode> for String {
    fn from(code: BulkOperationErrorCode) -> Self {
        code.to_string()
    }
}

impl fmt::Display for BulkOperationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessDenied => f.write_str("ACCESS_DENIED"),
            Self::InternalServerError => f.write_str("INTERNAL_SERVER_ERROR"),
            Self::Timeout => f.write_str("TIMEOUT"),
            Self::Unknown(code) => f.write_str(code),
        }
    }
}

/// An asynchronous bulk export job.
///
/// Only the Admin API mutates a bulk operation; this client observes it by
/// polling `currentBulkOperation`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BulkOperation {
    /// The operation's global identifier.
    pub id: String,

    /// Where the operation is in its lifecycle.
    pub status: BulkOperationStatus,

    /// Set when `status` is `FAILED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<BulkOperationErrorCode>,

    /// Number of objects written so far, roots and children.
    #[serde(default, deserialize_with = "unsigned_int64")]
    pub object_count: u64,

    /// Number of root objects written so far.
    #[serde(default, deserialize_with = "unsigned_int64")]
    pub root_object_count: u64,

    /// Size of the result file in bytes.
    #[serde(default, deserialize_with = "optional_unsigned_int64")]
    pub file_size: Option<u64>,

    /// Signed URL of the complete JSONL result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Signed URL of whatever was written before a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_data_url: Option<String>,

    /// The submitted query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// When the operation was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the operation reached a terminal state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl BulkOperation {
    /// Returns `true` if the operation completed without exporting anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status == BulkOperationStatus::Completed && self.object_count == 0
    }
}

/// Shopify's `UnsignedInt64` scalar is serialized as a JSON string.
#[derive(Deserialize)]
#[serde(untagged)]
enum UnsignedInt64 {
    Number(u64),
    Text(String),
}

impl UnsignedInt64 {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s
                .parse()
                .map_err(|_| E::custom(format!("invalid UnsignedInt64 '{s}'"))),
        }
    }
}

fn unsigned_int64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(optional_unsigned_int64(deserializer)?.unwrap_or_default())
}

fn optional_unsigned_int64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    Option::<UnsignedInt64>::deserialize(deserializer)?
        .map(UnsignedInt64::into_u64)
        .transpose()
}
