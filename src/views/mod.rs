//! View controllers: list, detail, dashboard, and form screens without a UI.
//!
//! Each controller owns the state a page would render, calls the API for every
//! user action, and reports the outcome through a [`Notifier`]. A failed call
//! produces exactly one error notification and leaves the state as it was.
//! Successful flag toggles patch the affected row in place instead of
//! refetching the page.

/// Admin and seller dashboards
pub mod dashboard;
/// Product detail page with ratings
pub mod detail;
/// Form submission screens
pub mod forms;
/// Public inquiry board and the buyer's own requests
pub mod inquiry;
/// Order tables
pub mod orders;
/// Product tables
pub mod products;
/// Stock request tables
pub mod requests;
/// Seller accounts table
pub mod sellers;

pub use dashboard::{AdminDashboard, SellerDashboard};
pub use detail::ProductDetailView;
pub use forms::{FormScreens, Purchase};
pub use inquiry::{BoardQuery, InquiryBoard};
pub use orders::OrderTable;
pub use products::{ProductScope, ProductTable};
pub use requests::RequestTable;
pub use sellers::{SellerFilter, SellerTable};

use crate::errors::Result;
use crate::notify::Notifier;
use tracing::warn;

/// Unwraps an action's result, turning an error into one notification.
pub(crate) fn report<T>(notifier: &dyn Notifier, action: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(%action, %error, "action failed");
            notifier.failure(&error);
            None
        }
    }
}

/// Like [`report`] for mutations: announces the success message as well.
pub(crate) fn announce(notifier: &dyn Notifier, action: &str, result: Result<String>) -> bool {
    report(notifier, action, result).is_some_and(|message| {
        notifier.success(&message);
        true
    })
}
