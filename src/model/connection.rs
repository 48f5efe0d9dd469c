//! Relay-style connection wrappers.

use serde::{Deserialize, Serialize};

/// Pagination metadata attached to a connection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether more edges follow the last one.
    #[serde(default)]
    pub has_next_page: bool,

    /// Whether edges precede the first one.
    #[serde(default)]
    pub has_previous_page: bool,

    /// Cursor of the first edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,

    /// Cursor of the last edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
}

/// One element of a [`Connection`], wrapping a single node.
///
/// Bulk operation exports carry no cursors, so edges built from JSONL lines
/// have `cursor: None`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Edge<T> {
    /// The wrapped node.
    pub node: T,

    /// Opaque pagination cursor, when the API supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl<T> Edge<T> {
    /// Wraps `node` in an edge without a cursor.
    #[must_use]
    pub const fn new(node: T) -> Self {
        Self { node, cursor: None }
    }

    /// Converts the node while keeping the cursor.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Edge<U> {
        Edge {
            node: f(self.node),
            cursor: self.cursor,
        }
    }
}

/// A paginated one-to-many relationship between a parent and its children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// The edges in the order the API returned them.
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,

    /// Pagination metadata, absent in bulk exports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            page_info: None,
        }
    }
}

impl<T> Connection<T> {
    /// Creates a connection from edges, without page info.
    #[must_use]
    pub const fn from_edges(edges: Vec<Edge<T>>) -> Self {
        Self {
            edges,
            page_info: None,
        }
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the connection has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates over the nodes in edge order.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }

    /// Consumes the connection, returning its nodes in edge order.
    #[must_use]
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connection_deserializes_edges_and_page_info() {
        let connection: Connection<serde_json::Value> = serde_json::from_value(json!({
            "edges": [
                { "node": { "id": 1 }, "cursor": "abc" },
                { "node": { "id": 2 }, "cursor": "def" }
            ],
            "pageInfo": { "hasNextPage": true, "endCursor": "def" }
        }))
        .unwrap();

        assert_eq!(connection.len(), 2);
        assert_eq!(connection.edges[0].cursor.as_deref(), Some("abc"));
        let page_info = connection.page_info.unwrap();
        assert!(page_info.has_next_page);
        assert!(!page_info.has_previous_page);
        assert_eq!(page_info.end_cursor.as_deref(), Some("def"));
    }

    #[test]
    fn test_connection_defaults_to_empty_without_edges() {
        let connection: Connection<serde_json::Value> = serde_json::from_value(json!({})).unwrap();
        assert!(connection.is_empty());
        assert!(connection.page_info.is_none());
    }

    #[test]
    fn test_into_nodes_preserves_order() {
        let connection = Connection::from_edges(vec![Edge::new("a"), Edge::new("b"), Edge::new("c")]);
        assert_eq!(connection.into_nodes(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_edge_map_keeps_cursor() {
        let edge = Edge {
            node: 2,
            cursor: Some("c1".to_string()),
        };
        let mapped = edge.map(|n| n * 10);
        assert_eq!(mapped.node, 20);
        assert_eq!(mapped.cursor.as_deref(), Some("c1"));
    }
}
