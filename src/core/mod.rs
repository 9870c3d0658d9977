//! Client-side rules that do not need the network: pagination, currency
//! conversion, form checks, catalog queries, access control, and contact links.

/// Admin and seller area gate
pub mod access;
/// Public catalog query rendering
pub mod catalog_query;
/// Contact form and order deep links
pub mod contact;
/// INR/USD conversion and price labels
pub mod currency;
/// Form models and validation
pub mod forms;
/// Pagination state for list views
pub mod listing;
