use super::de;
use super::product::StockUnit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a buyer wants to be reached.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContactMethod {
    /// WhatsApp chat
    #[default]
    Whatsapp,
    /// Phone call
    Phone,
    /// Email
    Email,
}

/// Lifecycle of a stock request, driven by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RequestStatus {
    /// Open
    #[default]
    Pending,
    /// Fulfilled
    Completed,
    /// Called off
    Cancelled,
}

/// A buyer's request for stock that is not listed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockRequest {
    /// Backend id
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Product wanted
    pub name: String,
    /// Quantity wanted
    pub quantity: f64,
    /// Unit of the quantity
    pub stock_unit: StockUnit,
    /// Colour Index number
    pub ci: String,
    /// Shade
    pub tone: String,
    /// Buyer's phone number or email
    pub contact: String,
    /// How the buyer wants to be reached
    pub contact_method: ContactMethod,
    /// Free text details
    pub note: String,
    /// Reference image URL
    pub image: String,
    /// Published on the public board
    pub is_verified: bool,
    /// Assigned seller id, if any
    #[serde(deserialize_with = "de::id_ref")]
    pub seller: Option<String>,
    /// Assigned seller's username
    pub seller_name: String,
    /// Fulfilment status
    pub status: RequestStatus,
    /// When the request was submitted
    pub created_at: Option<DateTime<Utc>>,
}

impl StockRequest {
    /// Whether an admin has handed this request to a seller.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.seller.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_decodes_admin_row() {
        let request: StockRequest = serde_json::from_value(json!({
            "_id": "r1",
            "name": "Disperse Yellow 54",
            "quantity": 25,
            "stockUnit": "kg",
            "contact": "+919000000000",
            "contactMethod": "whatsapp",
            "note": "urgent",
            "isVerified": false,
            "seller": {"_id": "s9", "username": "acme"},
            "sellerName": "acme",
            "status": "pending",
            "createdAt": "2024-05-01T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(request.id, "r1");
        assert!(request.is_assigned());
        assert_eq!(request.seller.as_deref(), Some("s9"));
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(request.created_at.is_some());
    }

    #[test]
    fn test_unassigned_request() {
        let request: StockRequest =
            serde_json::from_value(json!({"_id": "r2", "seller": null, "status": "cancelled"}))
                .unwrap();
        assert!(!request.is_assigned());
        assert_eq!(request.status, RequestStatus::Cancelled);
        assert_eq!(request.contact_method, ContactMethod::Whatsapp);
    }
}
