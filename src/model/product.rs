//! Products, their variants, images and media.
//!
//! A bulk export of products flattens every nested connection into separate
//! JSONL lines; the connection fields on these types stay `None` until the
//! bulk parser attaches the buffered children.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Collection, Connection, Metafield};

/// A product in a Shopify store.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The product's global identifier.
    #[serde(default)]
    pub id: String,

    /// The product title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The URL-friendly handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// Description with HTML tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,

    /// The product vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// The product type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,

    /// `ACTIVE`, `ARCHIVED` or `DRAFT`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Searchable tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// When the product was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the product was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// The product's variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Connection<ProductVariant>>,

    /// Legacy product images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Connection<Image>>,

    /// Images, videos and 3D models attached to the product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Connection<Media>>,

    /// Custom metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metafields: Option<Connection<Metafield>>,

    /// Collections the product belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Connection<Collection>>,
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// The variant's global identifier.
    #[serde(default)]
    pub id: String,

    /// The variant title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The stock keeping unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// The barcode, UPC or ISBN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    /// The price as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// The compare-at price as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<String>,

    /// Available inventory across locations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_quantity: Option<i64>,

    /// Position in the product's variant list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    /// When the variant was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Custom metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metafields: Option<Connection<Metafield>>,

    /// Media associated with the variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Connection<Media>>,
}

/// An image, as exported through a product's `images` connection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// The image's global identifier (`gid://shopify/ProductImage/...`).
    #[serde(default)]
    pub id: String,

    /// The image location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Alternative text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,

    /// Width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,

    /// Height in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
}

/// A file in a media source list (video renditions, 3D model formats).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaSource {
    /// Where the file can be fetched.
    pub url: String,

    /// The MIME type of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// The file format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// A media image.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaImage {
    /// The media's global identifier.
    #[serde(default)]
    pub id: String,

    /// Alternative text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// `UPLOADED`, `PROCESSING`, `READY` or `FAILED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// The MIME type of the image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// The rendered image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

/// A video hosted by Shopify.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// The media's global identifier.
    #[serde(default)]
    pub id: String,

    /// Alternative text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// `UPLOADED`, `PROCESSING`, `READY` or `FAILED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Available renditions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<MediaSource>,
}

/// A 3D model.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Model3d {
    /// The media's global identifier.
    #[serde(default)]
    pub id: String,

    /// Alternative text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// `UPLOADED`, `PROCESSING`, `READY` or `FAILED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Available model files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<MediaSource>,
}

/// A video hosted on YouTube or Vimeo.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalVideo {
    /// The media's global identifier.
    #[serde(default)]
    pub id: String,

    /// Alternative text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// `YOUTUBE` or `VIMEO`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// The URL the video was added from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_url: Option<String>,

    /// The embeddable URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
}

/// Any media attached to a product or variant.
///
/// Regular GraphQL responses tell the variants apart by `__typename`; bulk
/// exports usually omit it, so the bulk parser picks the variant from the
/// kind in the media's global identifier instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "__typename")]
pub enum Media {
    /// A media image.
    #[serde(rename = "MediaImage")]
    Image(MediaImage),
    /// A Shopify-hosted video.
    Video(Video),
    /// A 3D model.
    Model3d(Model3d),
    /// A YouTube or Vimeo video.
    ExternalVideo(ExternalVideo),
}

impl Media {
    /// Returns the media's global identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Image(m) => &m.id,
            Self::Video(m) => &m.id,
            Self::Model3d(m) => &m.id,
            Self::ExternalVideo(m) => &m.id,
        }
    }
}
