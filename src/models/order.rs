use super::de;
use super::product::Currency;
use super::request::ContactMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Order lifecycle as set by sellers and admins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrderStatus {
    /// Placed, awaiting the seller
    #[default]
    Pending,
    /// Fulfilled
    Completed,
    /// Called off
    Cancelled,
}

/// A buy transaction placed against a product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    /// Backend id
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Product id
    #[serde(deserialize_with = "de::id_ref")]
    pub product: Option<String>,
    /// Product name at order time
    pub product_name: String,
    /// Buyer name
    pub buyer_name: String,
    /// Buyer's phone number or email
    pub buyer_contact: String,
    /// How the buyer wants to be reached
    pub contact_method: ContactMethod,
    /// Buyer address, if given
    pub buyer_address: String,
    /// Quantity ordered
    pub quantity: f64,
    /// Unit price at order time
    pub price: f64,
    /// Currency of the price
    pub currency: Currency,
    /// Buyer's note
    pub note: String,
    /// Computed by the backend
    pub total_amount: f64,
    /// Fulfilment status
    pub status: OrderStatus,
    /// When the order was placed
    pub created_at: Option<DateTime<Utc>>,
    /// Last status change
    pub updated_at: Option<DateTime<Utc>>,
}
