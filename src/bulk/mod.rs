//! Bulk operations: running large GraphQL queries asynchronously on Shopify
//! and rebuilding their nested results.
//!
//! # Overview
//!
//! - [`BulkOperationService`]: submits, polls, cancels and runs bulk queries
//! - [`download_to_tempfile`]: streams a result file to a temporary file
//! - [`BulkParser`]: classifies JSONL lines and reattaches child connections
//! - [`TypeRegistry`]: maps resource kinds to node types and parent fields
//! - [`BulkAttach`]: implemented by every type children can be attached to
//!
//! # Flow
//!
//! [`BulkOperationService::run`] waits for any operation already in
//! progress, submits the query, polls until the operation is terminal,
//! downloads the result and parses it. Each step can fail on its own; the
//! returned [`BulkQueryError`] names the [`BulkStage`].
//!
//! ```rust,ignore
//! use shopify_bulk::bulk::BulkOperationService;
//! use shopify_bulk::model::Order;
//! use tokio_util::sync::CancellationToken;
//!
//! let cancel = CancellationToken::new();
//! let orders: Vec<Order> = service
//!     .run(
//!         "{ orders { edges { node { id name lineItems { edges { node { id sku quantity } } } } } } }",
//!         &cancel,
//!     )
//!     .await?;
//!
//! for order in &orders {
//!     let items = order.line_items.as_ref().map_or(0, |c| c.len());
//!     println!("{}: {items} line items", order.name.as_deref().unwrap_or("?"));
//! }
//! ```

mod attach;
mod download;
mod errors;
mod node;
mod operation;
mod parser;
mod registry;
mod service;

pub use attach::{AttachContext, BulkAttach, ConnectionSink};
pub use download::download_to_tempfile;
pub use errors::{BulkOperationError, BulkParseError, BulkQueryError, BulkStage, UserError};
pub use node::{BulkNode, FromBulkNode};
pub use operation::{BulkOperation, BulkOperationErrorCode, BulkOperationStatus};
pub use parser::{BulkParser, StreamRecord};
pub use registry::{decode_as, DecodeFn, KindEntry, TypeRegistry};
pub use service::BulkOperationService;
