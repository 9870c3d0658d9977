use super::de;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role of an account. Accounts without a recognised role are buyers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    /// Marketplace administrator
    Admin,
    /// Registered seller
    Seller,
    /// Anyone else
    #[default]
    #[serde(other)]
    Buyer,
}

/// A user, seller, or admin account.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// Backend id
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Display name
    pub username: String,
    /// Login email
    pub email: String,
    /// Phone country code, e.g. `+91`
    pub country_code: String,
    /// Phone number without country code
    pub phone_number: String,
    /// Company name
    pub company: String,
    /// Postal address
    pub address: String,
    /// Free-text profile description
    pub description: String,
    /// Specialties; comma-joined on the wire
    #[serde(
        alias = "specialties",
        deserialize_with = "de::comma_list",
        serialize_with = "de::join_list"
    )]
    pub speciality: Vec<String>,
    /// Account role
    pub role: Role,
    /// Whether the account is enabled
    pub is_active: bool,
    /// Whether an admin has verified the account
    pub is_verified: bool,
    /// Number of listed products, present in admin seller listings
    pub total_products: u64,
    /// Signup time
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Full phone number as shown on profiles.
    #[must_use]
    pub fn phone(&self) -> String {
        format!("{}{}", self.country_code, self.phone_number)
    }
}

/// Seller contact details exposed on a product's buy page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerContact {
    pub username: String,
    /// Contact email
    pub email: String,
    /// Dialing prefix of the phone number
    pub country_code: String,
    /// Phone number without the prefix
    pub phone_number: String,
    /// Company name
    pub company: String,
    /// Postal address
    pub address: String,
}
