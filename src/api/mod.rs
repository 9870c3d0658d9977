//! REST client for the marketplace backend.
//!
//! [`ApiClient`] owns the transport and the session cookie. The endpoint groups
//! are split over several `impl ApiClient` blocks, one file per backend area.

/// Admin management endpoints
pub mod admin;
/// Login, registration, and logout
pub mod auth;
/// Buy orders and product ratings
pub mod buyer;
/// Public product catalog and seller showcases
pub mod catalog;
/// Client core: cookie handling and status mapping
pub mod client;
/// Public inquiry board for buyer stock requests
pub mod inquiry;
/// Seller self-service endpoints
pub mod seller;
/// HTTP transport seam
pub mod transport;

pub use admin::UserStatus;
pub use buyer::{ORDER_PLACED, OrderFilter};
pub use catalog::{CatalogPage, SellerShowcase};
pub use client::{ApiClient, message_of};
pub use seller::SellerProductFilter;
pub use transport::{ApiRequest, ApiResponse, FormField, HttpTransport, Method, RequestBody, Transport};

/// Percent-encodes a user-supplied value used as a path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value.trim()).into_owned()
}
