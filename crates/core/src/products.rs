//! Product cards attached to videos.
//!
//! A product is a denormalized snapshot: the copy embedded in a video is
//! duplicated into cart rows and order lines at the moment of add-to-cart,
//! so later edits never retroactively change a committed price.

use serde::{Deserialize, Serialize};

use crate::{ids::TypedUuid, users::UserId};

/// Product UUID
pub type ProductId = TypedUuid<Product>;

/// A sellable product card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,

    /// Product name.
    pub name: String,

    /// Optional brand name.
    pub brand: Option<String>,

    /// Unit price in minor units.
    pub price: u64,

    /// Sales copy shown on the card.
    pub description: String,

    /// Image URL.
    pub image: String,

    /// Affiliate commission percentage.
    pub affiliate_commission: u8,

    /// Optional external product page.
    pub product_url: Option<String>,

    /// Star rating, tenths (e.g. 48 = 4.8).
    pub rating: u8,

    /// Review count.
    pub reviews: u32,

    /// Who receives the money for this product.
    pub seller_id: UserId,
}
