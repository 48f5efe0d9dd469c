//! Streaming reconstruction of bulk operation JSONL exports.
//!
//! An export is one JSON object per line. Lines without `__parentId` are
//! root items and decode straight into the caller's output type. Lines with
//! it are children: their `id` names their resource kind, the
//! [`TypeRegistry`] turns that kind into a node type and connection field,
//! and the decoded edge is buffered until the whole stream has been read.
//! Then every buffered edge is attached to its parent, depth first.
//!
//! ```text
//! {"id":"gid://shopify/Product/1","title":"Board"}
//! {"id":"gid://shopify/ProductVariant/9","__parentId":"gid://shopify/Product/1"}
//! ```
//!
//! reconstructs one product whose `variants` connection holds one edge.
//!
//! Children whose parent never appears are dropped; the export may
//! reference parents the app cannot read.

use std::io::BufRead;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::attach::{AttachContext, BulkAttach, ConnectionSink};
use super::errors::BulkParseError;
use super::node::BulkNode;
use super::registry::TypeRegistry;
use crate::config::DEFAULT_BULK_MAX_NESTING_DEPTH;
use crate::model::{Edge, Gid};

/// One classified line of a bulk export.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamRecord<T> {
    /// A top-level item.
    Root(T),
    /// A nested item, waiting for its parent.
    Child {
        /// The parent's global identifier.
        parent_id: String,
        /// The connection field on the parent.
        field: &'static str,
        /// The decoded child.
        edge: Edge<BulkNode>,
    },
}

/// The only fields read before deciding how to decode a line.
#[derive(Deserialize)]
struct LineHeader {
    #[serde(rename = "__parentId", default)]
    parent_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

/// Reads bulk exports into typed, nested results.
///
/// # Example
///
/// ```rust
/// use shopify_bulk::bulk::{BulkParser, TypeRegistry};
/// use shopify_bulk::model::Product;
///
/// let export = concat!(
///     r#"{"id":"gid://shopify/Product/1","title":"Board"}"#, "\n",
///     r#"{"id":"gid://shopify/ProductVariant/9","sku":"B-1","__parentId":"gid://shopify/Product/1"}"#, "\n",
/// );
///
/// let products: Vec<Product> = BulkParser::new(TypeRegistry::global())
///     .parse(export.as_bytes())
///     .unwrap();
///
/// let variants = products[0].variants.as_ref().unwrap();
/// assert_eq!(variants.edges[0].node.sku.as_deref(), Some("B-1"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BulkParser<'r> {
    registry: &'r TypeRegistry,
    max_depth: usize,
}

impl Default for BulkParser<'static> {
    fn default() -> Self {
        Self::new(TypeRegistry::global())
    }
}

impl<'r> BulkParser<'r> {
    /// Creates a parser resolving child kinds through `registry`.
    #[must_use]
    pub const fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_BULK_MAX_NESTING_DEPTH,
        }
    }

    /// Sets how many connection levels may nest below a root item.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the maximum nesting depth.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Classifies and decodes a single line.
    ///
    /// `line_no` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`BulkParseError::Decode`] for invalid JSON or a type mismatch,
    /// [`BulkParseError::MissingChildId`] for a child without `id`,
    /// [`BulkParseError::MalformedGid`] for an unparseable child id and
    /// [`BulkParseError::UnknownResourceKind`] for an unregistered kind.
    pub fn classify<T: DeserializeOwned>(
        &self,
        line: &[u8],
        line_no: usize,
    ) -> Result<StreamRecord<T>, BulkParseError> {
        let decode_error = |source| BulkParseError::Decode {
            line: line_no,
            source,
        };

        let header: LineHeader = serde_json::from_slice(line).map_err(decode_error)?;

        let Some(parent_id) = header.parent_id else {
            return serde_json::from_slice(line)
                .map(StreamRecord::Root)
                .map_err(decode_error);
        };

        let id = header
            .id
            .ok_or(BulkParseError::MissingChildId { line: line_no })?;
        let gid = Gid::parse(&id).map_err(|e| BulkParseError::MalformedGid {
            line: line_no,
            gid: e.gid,
        })?;
        let entry =
            self.registry
                .resolve(gid.kind())
                .ok_or_else(|| BulkParseError::UnknownResourceKind {
                    line: line_no,
                    kind: gid.kind().to_string(),
                })?;

        let node = entry.decode(line).map_err(decode_error)?;

        Ok(StreamRecord::Child {
            parent_id,
            field: entry.field(),
            edge: Edge::new(node),
        })
    }

    /// Reads a whole export and returns the root items with every
    /// connection attached, in stream order.
    ///
    /// Blank lines are skipped and a final line without a trailing newline
    /// is still read. Nothing is returned unless the whole stream parses.
    ///
    /// # Errors
    ///
    /// Returns [`BulkParseError::Read`] if the reader fails, any error from
    /// [`classify`](Self::classify), and any error from attaching children.
    pub fn parse<T, R>(&self, mut reader: R) -> Result<Vec<T>, BulkParseError>
    where
        T: DeserializeOwned + BulkAttach,
        R: BufRead,
    {
        let mut roots = Vec::new();
        let mut sink = ConnectionSink::new();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            let line = trim_ascii_whitespace(&buf);
            if line.is_empty() {
                continue;
            }

            match self.classify::<T>(line, line_no)? {
                StreamRecord::Root(item) => roots.push(item),
                StreamRecord::Child {
                    parent_id,
                    field,
                    edge,
                } => sink.push(parent_id, field, edge),
            }
        }

        tracing::debug!(
            lines = line_no,
            roots = roots.len(),
            parents = sink.len(),
            "Read bulk result stream"
        );

        let mut ctx = AttachContext::new(&sink, self.max_depth);
        for root in &mut roots {
            ctx.attach(root)?;
        }

        for (parent_id, children) in ctx.orphans() {
            tracing::trace!(%parent_id, children, "Dropping bulk children with no parent in the result");
        }

        Ok(roots)
    }
}

fn trim_ascii_whitespace(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if !first.is_ascii_whitespace() {
            break;
        }
        bytes = rest;
    }
    while let [rest @ .., last] = bytes {
        if !last.is_ascii_whitespace() {
            break;
        }
        bytes = rest;
    }
    bytes
}
