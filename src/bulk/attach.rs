//! Grafting buffered child edges back onto their parents.
//!
//! Bulk exports flatten every nesting level into one stream keyed by the
//! immediate parent's id. The parser buffers child edges in a
//! [`ConnectionSink`]; once the stream is consumed, [`AttachContext`] walks
//! the root items depth-first and hands each node its buckets through
//! [`BulkAttach`]. Buckets are only read, so a node that appears under
//! several parents receives its children every time.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::errors::BulkParseError;
use super::node::{BulkNode, FromBulkNode};
use crate::model::{
    Collection, Connection, Edge, FulfillmentOrder, FulfillmentOrderLineItem, Image, LineItem,
    Media, Metafield, Order, Product, ProductVariant,
};

/// Child edges buffered by parent id and connection field.
///
/// Within one parent and field, edges keep stream order.
#[derive(Debug, Default)]
pub struct ConnectionSink {
    buckets: HashMap<String, BTreeMap<String, Vec<Edge<BulkNode>>>>,
}

impl ConnectionSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a child edge under `parent_id` and `field`.
    pub fn push(&mut self, parent_id: String, field: &str, edge: Edge<BulkNode>) {
        self.buckets
            .entry(parent_id)
            .or_default()
            .entry(field.to_string())
            .or_default()
            .push(edge);
    }

    /// Returns every bucket buffered for `parent_id`, keyed by field.
    #[must_use]
    pub fn get(&self, parent_id: &str) -> Option<&BTreeMap<String, Vec<Edge<BulkNode>>>> {
        self.buckets.get(parent_id)
    }

    /// Returns the number of parents with buffered children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns the parent ids not in `attached`, with how many children
    /// each had.
    pub fn orphans<'a>(
        &'a self,
        attached: &'a HashSet<String>,
    ) -> impl Iterator<Item = (&'a str, usize)> + 'a {
        self.buckets
            .iter()
            .filter(|(parent, _)| !attached.contains(parent.as_str()))
            .map(|(parent, fields)| (parent.as_str(), fields.values().map(Vec::len).sum()))
    }
}

/// A node that child connections from a bulk export can be attached to.
///
/// Implementations match on the connection field names the type declares,
/// convert the edges with [`AttachContext::connect`] and store the result.
/// Any other field name is an [`BulkParseError::UnknownConnection`].
pub trait BulkAttach {
    /// The type's name in error messages.
    const TYPE_NAME: &'static str;

    /// Returns the node's global identifier, if it has one.
    fn node_id(&self) -> Option<&str>;

    /// Stores `edges` in the connection named `field`.
    ///
    /// # Errors
    ///
    /// Returns [`BulkParseError::UnknownConnection`] for fields the type does
    /// not declare and propagates errors from [`AttachContext::connect`].
    fn attach_connection(
        &mut self,
        field: &str,
        edges: Vec<Edge<BulkNode>>,
        ctx: &mut AttachContext<'_>,
    ) -> Result<(), BulkParseError>;
}

/// State of one reconstruction pass.
#[derive(Debug)]
pub struct AttachContext<'s> {
    sink: &'s ConnectionSink,
    attached: HashSet<String>,
    depth: usize,
    max_depth: usize,
}

impl<'s> AttachContext<'s> {
    /// Creates a context that reads `sink`, nesting at most `max_depth`
    /// connections below a root.
    #[must_use]
    pub fn new(sink: &'s ConnectionSink, max_depth: usize) -> Self {
        Self {
            sink,
            attached: HashSet::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Attaches every buffered connection of `node`, then of its children.
    ///
    /// Nodes without buffered children are left untouched. A node reached
    /// again through another parent gets its own copy of the same children.
    ///
    /// # Errors
    ///
    /// Returns [`BulkParseError::MissingNodeId`] if the node has no id and
    /// [`BulkParseError::DepthExceeded`] if children nest deeper than the
    /// maximum, including ids that contain themselves, besides anything the
    /// node's [`BulkAttach`] impl returns.
    pub fn attach<N: BulkAttach>(&mut self, node: &mut N) -> Result<(), BulkParseError> {
        let id = node
            .node_id()
            .filter(|id| !id.is_empty())
            .ok_or(BulkParseError::MissingNodeId {
                type_name: N::TYPE_NAME,
            })?;

        let sink = self.sink;
        let Some(buckets) = sink.get(id) else {
            return Ok(());
        };

        if self.depth >= self.max_depth {
            return Err(BulkParseError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }

        if !self.attached.contains(id) {
            self.attached.insert(id.to_string());
        }

        self.depth += 1;
        for (field, edges) in buckets {
            node.attach_connection(field, edges.clone(), self)?;
        }
        self.depth -= 1;

        Ok(())
    }

    /// Returns buffered parents that no attached node claimed, with how
    /// many children each had.
    pub fn orphans(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.sink.orphans(&self.attached)
    }

    /// Converts buffered edges into a typed connection and attaches the
    /// children's own connections.
    ///
    /// # Errors
    ///
    /// Returns [`BulkParseError::NodeTypeMismatch`] if an edge holds a node of
    /// another type, and propagates errors from nested attachment.
    pub fn connect<P, T>(
        &mut self,
        field: &str,
        edges: Vec<Edge<BulkNode>>,
    ) -> Result<Connection<T>, BulkParseError>
    where
        P: BulkAttach,
        T: FromBulkNode + BulkAttach,
    {
        let mut typed = Vec::with_capacity(edges.len());

        for edge in edges {
            let node = T::from_bulk_node(edge.node).map_err(|other| {
                BulkParseError::NodeTypeMismatch {
                    parent_type: P::TYPE_NAME,
                    field: field.to_string(),
                    expected: <T as FromBulkNode>::TYPE_NAME,
                    found: other.type_name(),
                }
            })?;

            let mut edge = Edge {
                node,
                cursor: edge.cursor,
            };
            self.attach(&mut edge.node)?;
            typed.push(edge);
        }

        Ok(Connection::from_edges(typed))
    }
}

fn unknown_connection<P: BulkAttach>(field: &str) -> BulkParseError {
    BulkParseError::UnknownConnection {
        parent_type: P::TYPE_NAME,
        field: field.to_string(),
    }
}

impl<T: BulkAttach> BulkAttach for Edge<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn node_id(&self) -> Option<&str> {
        self.node.node_id()
    }

    fn attach_connection(
        &mut self,
        field: &str,
        edges: Vec<Edge<BulkNode>>,
        ctx: &mut AttachContext<'_>,
    ) -> Result<(), BulkParseError> {
        self.node.attach_connection(field, edges, ctx)
    }
}

/// Implements [`BulkAttach`] for a model type from its connection fields.
macro_rules! bulk_attach {
    ($ty:ty { $($field:literal => $member:ident),* $(,)? }) => {
        impl BulkAttach for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);

            fn node_id(&self) -> Option<&str> {
                Some(self.id.as_str())
            }

            #[allow(unused_variables)]
            fn attach_connection(
                &mut self,
                field: &str,
                edges: Vec<Edge<BulkNode>>,
                ctx: &mut AttachContext<'_>,
            ) -> Result<(), BulkParseError> {
                match field {
                    $($field => {
                        self.$member = Some(ctx.connect::<Self, _>(field, edges)?);
                        Ok(())
                    })*
                    _ => Err(unknown_connection::<Self>(field)),
                }
            }
        }
    };
}

bulk_attach!(Product {
    "variants" => variants,
    "images" => images,
    "media" => media,
    "metafields" => metafields,
    "collections" => collections,
});

bulk_attach!(ProductVariant {
    "metafields" => metafields,
    "media" => media,
});

bulk_attach!(Collection {
    "products" => products,
    "metafields" => metafields,
});

bulk_attach!(Order {
    "lineItems" => line_items,
    "fulfillmentOrders" => fulfillment_orders,
    "metafields" => metafields,
});

bulk_attach!(FulfillmentOrder {
    "lineItems" => line_items,
});

bulk_attach!(Metafield {});
bulk_attach!(Image {});
bulk_attach!(LineItem {});
bulk_attach!(FulfillmentOrderLineItem {});

impl BulkAttach for Media {
    const TYPE_NAME: &'static str = "Media";

    fn node_id(&self) -> Option<&str> {
        Some(self.id())
    }

    fn attach_connection(
        &mut self,
        field: &str,
        _edges: Vec<Edge<BulkNode>>,
        _ctx: &mut AttachContext<'_>,
    ) -> Result<(), BulkParseError> {
        Err(unknown_connection::<Self>(field))
    }
}
