use super::rating::{Rating, RatingSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Price currency. The store defaults to INR.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Currency {
    /// US dollar
    Usd,
    /// Indian rupee
    #[default]
    Inr,
}

impl Currency {
    /// Symbol used in price labels.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Inr => "₹",
        }
    }

    /// The other currency of the toggle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Usd => Self::Inr,
            Self::Inr => Self::Usd,
        }
    }
}

/// Unit a stock quantity is measured in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StockUnit {
    /// Kilograms
    #[default]
    Kg,
    /// Grams
    Grm,
    /// Milligrams
    Mg,
    /// Millilitres
    Ml,
    /// Litres
    Ltr,
    /// Pieces
    Pcs,
    /// Metres
    Mts,
}

/// Seller-controlled listing status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProductStatus {
    /// Listed and orderable
    #[default]
    Active,
    /// Paused by the seller
    Inactive,
}

impl ProductStatus {
    /// The opposite status, used by the status toggle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

/// Seller identity embedded in product listings. Unpopulated listings carry
/// only the id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SellerRefRepr")]
pub struct SellerRef {
    /// Seller id
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub username: String,
    /// Company name
    pub company: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SellerRefRepr {
    Id(String),
    Document {
        #[serde(rename = "_id", alias = "id", default)]
        id: String,
        #[serde(default)]
        username: String,
        #[serde(default)]
        company: String,
    },
}

impl From<SellerRefRepr> for SellerRef {
    fn from(repr: SellerRefRepr) -> Self {
        match repr {
            SellerRefRepr::Id(id) => Self {
                id,
                ..Self::default()
            },
            SellerRefRepr::Document {
                id,
                username,
                company,
            } => Self {
                id,
                username,
                company,
            },
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// Backend id
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    /// Free text description
    pub description: String,
    /// Price in [`Product::currency`]
    pub price: f64,
    /// Currency of the price
    pub currency: Currency,
    /// Colour Index number
    pub ci: String,
    /// Shade
    pub tone: String,
    /// Quantity in stock, measured in [`Product::stock_unit`]
    pub stock: f64,
    /// Unit of the stock quantity
    pub stock_unit: StockUnit,
    /// Image URL
    pub image: String,
    /// Shown in the public catalog
    pub is_visible: bool,
    /// Seller-controlled status
    pub status: ProductStatus,
    /// Shown on the home page
    pub is_featured: bool,
    /// Checked by an admin
    pub is_verified: bool,
    /// Units sold so far
    pub sales: u64,
    /// Listing seller
    pub seller: Option<SellerRef>,
    /// When the product was listed
    pub created_at: Option<DateTime<Utc>>,
}

/// Response of the public product detail endpoint.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDetail {
    /// The product itself
    pub product: Product,
    /// Number of ratings
    pub rating_count: u32,
    /// Sum of all stars
    pub rating_sum: f64,
    /// Mean stars
    pub rating_average: f64,
    /// The backend may pad this list with nulls
    pub ratings: Vec<Option<Rating>>,
    /// Rupees per dollar at the time of the request
    pub usd_to_inr_rate: f64,
    /// Seller id
    pub seller_id: String,
    /// Seller username
    pub seller_name: String,
    /// Seller company
    pub seller_company: String,
}

impl ProductDetail {
    /// Ratings with null entries skipped.
    pub fn ratings(&self) -> impl Iterator<Item = &Rating> {
        self.ratings.iter().flatten()
    }

    /// The aggregate as reported by the backend.
    #[must_use]
    pub const fn rating_summary(&self) -> RatingSummary {
        RatingSummary {
            count: self.rating_count,
            sum: self.rating_sum,
            average: self.rating_average,
        }
    }
}
