use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Custom metadata attached to a resource.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Metafield {
    /// The metafield's global identifier.
    #[serde(default)]
    pub id: String,

    /// The container for a group of metafields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// The key, unique within the namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// The stored value, always serialized as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// The metafield type, such as `single_line_text_field`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// When the metafield was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the metafield was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metafield_reads_type_field() {
        let metafield: Metafield = serde_json::from_str(
            r#"{"id":"gid://shopify/Metafield/1","namespace":"custom","key":"care","value":"Hand wash","type":"single_line_text_field"}"#,
        )
        .unwrap();

        assert_eq!(metafield.value_type.as_deref(), Some("single_line_text_field"));
        assert_eq!(metafield.value.as_deref(), Some("Hand wash"));
    }
}
