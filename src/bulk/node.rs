//! The closed set of node types a bulk export can nest under a parent.

use crate::model::{
    Collection, ExternalVideo, FulfillmentOrder, FulfillmentOrderLineItem, Image, LineItem, Media,
    MediaImage, Metafield, Model3d, Order, Product, ProductVariant, Video,
};

/// A decoded child line, before it is moved into its parent's connection.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkNode {
    /// An order line item.
    LineItem(LineItem),
    /// A fulfillment order line item.
    FulfillmentOrderLineItem(FulfillmentOrderLineItem),
    /// A fulfillment order.
    FulfillmentOrder(FulfillmentOrder),
    /// Product or variant media.
    Media(Media),
    /// A metafield.
    Metafield(Metafield),
    /// An order.
    Order(Order),
    /// A product.
    Product(Product),
    /// A product variant.
    ProductVariant(ProductVariant),
    /// A collection.
    Collection(Collection),
    /// A product image.
    Image(Image),
}

impl BulkNode {
    /// Returns the name of the wrapped type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::LineItem(_) => LineItem::TYPE_NAME,
            Self::FulfillmentOrderLineItem(_) => FulfillmentOrderLineItem::TYPE_NAME,
            Self::FulfillmentOrder(_) => FulfillmentOrder::TYPE_NAME,
            Self::Media(_) => Media::TYPE_NAME,
            Self::Metafield(_) => Metafield::TYPE_NAME,
            Self::Order(_) => Order::TYPE_NAME,
            Self::Product(_) => Product::TYPE_NAME,
            Self::ProductVariant(_) => ProductVariant::TYPE_NAME,
            Self::Collection(_) => Collection::TYPE_NAME,
            Self::Image(_) => Image::TYPE_NAME,
        }
    }
}

/// A type that can be taken back out of a [`BulkNode`].
pub trait FromBulkNode: Sized {
    /// The type's name in error messages.
    const TYPE_NAME: &'static str;

    /// Unwraps the node, or hands it back if it holds another type.
    ///
    /// # Errors
    ///
    /// Returns the original node when it wraps a different type.
    fn from_bulk_node(node: BulkNode) -> Result<Self, BulkNode>;
}

macro_rules! bulk_node_type {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for BulkNode {
                fn from(node: $ty) -> Self {
                    Self::$variant(node)
                }
            }

            impl FromBulkNode for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_bulk_node(node: BulkNode) -> Result<Self, BulkNode> {
                    match node {
                        BulkNode::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )+
    };
}

bulk_node_type! {
    LineItem => LineItem,
    FulfillmentOrderLineItem => FulfillmentOrderLineItem,
    FulfillmentOrder => FulfillmentOrder,
    Media => Media,
    Metafield => Metafield,
    Order => Order,
    Product => Product,
    ProductVariant => ProductVariant,
    Collection => Collection,
    Image => Image,
}

impl From<MediaImage> for BulkNode {
    fn from(media: MediaImage) -> Self {
        Self::Media(Media::Image(media))
    }
}

impl From<Video> for BulkNode {
    fn from(media: Video) -> Self {
        Self::Media(Media::Video(media))
    }
}

impl From<Model3d> for BulkNode {
    fn from(media: Model3d) -> Self {
        Self::Media(Media::Model3d(media))
    }
}

impl From<ExternalVideo> for BulkNode {
    fn from(media: ExternalVideo) -> Self {
        Self::Media(Media::ExternalVideo(media))
    }
}
