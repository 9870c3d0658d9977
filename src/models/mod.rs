//! Data model - the marketplace entities as the backend returns them.
//!
//! The backend owns every entity; these types are decoded copies kept for display.
//! Decoding is lenient: ids are accepted as `_id` or `id`, and optional fields fall
//! back to their defaults when absent.

/// User, seller, and admin accounts
pub mod account;
/// Admin and seller dashboard snapshots
pub mod analytics;
/// Buy transactions
pub mod order;
/// Paginated list responses
pub mod page;
/// Catalog products and product detail
pub mod product;
/// Product ratings and their aggregate
pub mod rating;
/// Buyer stock requests
pub mod request;

pub use account::{Role, SellerContact, User};
pub use analytics::{AdminAnalytics, OrdersAnalytics, ProductsAnalytics, SellerAnalytics};
pub use order::{Order, OrderStatus};
pub use page::{DEFAULT_LIMIT, Page, PageKeys, PageMeta, PageRequest, SortOrder};
pub use product::{Currency, Product, ProductDetail, ProductStatus, SellerRef, StockUnit};
pub use rating::{Rating, RatingSummary};
pub use request::{ContactMethod, RequestStatus, StockRequest};

use serde::{Deserialize, Deserializer, Serializer};

/// Shared serde helpers for backend quirks.
pub(crate) mod de {
    use super::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrList {
        Text(String),
        List(Vec<String>),
    }

    /// Accepts either `"a, b"` or `["a", "b"]`.
    pub fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<TextOrList>::deserialize(deserializer)?;
        Ok(match raw {
            Some(TextOrList::Text(text)) => split_list(&text),
            Some(TextOrList::List(items)) => items
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => Vec::new(),
        })
    }

    /// Writes the list back as the comma-joined string the backend stores.
    pub fn join_list<S>(items: &[String], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&items.join(","))
    }

    /// Splits a comma-joined string into trimmed, non-empty entries.
    #[must_use]
    pub fn split_list(text: &str) -> Vec<String> {
        text.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[derive(Deserialize)]
    struct Populated {
        #[serde(rename = "_id", alias = "id")]
        id: String,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdOrObject {
        Id(String),
        Object(Populated),
    }

    /// A reference that may arrive as a bare id or as a populated document.
    pub fn id_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<IdOrObject>::deserialize(deserializer)?;
        Ok(raw.map(|r| match r {
            IdOrObject::Id(id) => id,
            IdOrObject::Object(obj) => obj.id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "de::comma_list")]
        list: Vec<String>,
        #[serde(default, deserialize_with = "de::id_ref")]
        seller: Option<String>,
    }

    #[test]
    fn test_comma_list_accepts_string_and_array() {
        let from_text: Holder = serde_json::from_value(json!({"list": "dyes, pigments,,"})).unwrap();
        assert_eq!(from_text.list, vec!["dyes", "pigments"]);

        let from_array: Holder =
            serde_json::from_value(json!({"list": [" dyes ", "pigments"]})).unwrap();
        assert_eq!(from_array.list, vec!["dyes", "pigments"]);

        let missing: Holder = serde_json::from_value(json!({"list": null})).unwrap();
        assert!(missing.list.is_empty());
    }

    #[test]
    fn test_id_ref_accepts_id_or_document() {
        let bare: Holder = serde_json::from_value(json!({"seller": "s1"})).unwrap();
        assert_eq!(bare.seller.as_deref(), Some("s1"));

        let populated: Holder =
            serde_json::from_value(json!({"seller": {"_id": "s2", "username": "acme"}})).unwrap();
        assert_eq!(populated.seller.as_deref(), Some("s2"));

        let absent: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(absent.seller.is_none());
    }
}
