//! Buy orders and product ratings.
//!
//! Buyers place orders and rate products anonymously; the order list endpoints
//! serve the seller who received the orders.

use super::client::{ApiClient, message_or};
use super::segment;
use super::transport::Method;
use crate::core::forms::{BuyForm, RatingForm, Validate};
use crate::errors::Result;
use crate::models::{Order, OrderStatus, Page, PageKeys, PageRequest, Rating, SortOrder};
use serde_json::json;
use tracing::info;

const ORDERS: PageKeys = PageKeys::new("buy", "totalBuy");
const FILTERED_ORDERS: PageKeys = PageKeys::new("orders", "totalBuy");

/// Text shown after an order was placed.
pub const ORDER_PLACED: &str = "Your request has been sent sent to the supplier so he will contact you soon or you can contact the supplier directly";

/// Which orders to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderFilter {
    /// Every order, sorted by date
    All(SortOrder),
    /// Orders with one status
    Status(OrderStatus),
    /// Orders matching a buyer or product name
    Search(String),
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self::All(SortOrder::Asc)
    }
}

impl ApiClient {
    /// Places an order for `product_id`.
    pub async fn place_order(&self, product_id: &str, form: &BuyForm) -> Result<String> {
        form.validate()?;
        self.send_json(
            Method::Post,
            format!("buy/{}", segment(product_id)),
            form.payload(),
        )
        .await?;
        info!(product = %product_id, quantity = form.quantity, "order placed");
        Ok(ORDER_PLACED.to_string())
    }

    /// Orders received by the logged-in seller.
    pub async fn orders(&self, filter: &OrderFilter, page: PageRequest) -> Result<Page<Order>> {
        match filter {
            OrderFilter::All(sort) => {
                self.get_page("buy", vec![("sort".to_string(), sort.to_string())], page, ORDERS)
                    .await
            }
            OrderFilter::Status(status) => {
                self.get_page(
                    "buy/filter",
                    vec![("status".to_string(), status.to_string())],
                    page,
                    FILTERED_ORDERS,
                )
                .await
            }
            OrderFilter::Search(search) => {
                self.get_page(
                    format!("buy/{}", segment(search)),
                    Vec::new(),
                    page,
                    FILTERED_ORDERS,
                )
                .await
            }
        }
    }

    /// Marks an order completed or cancelled.
    pub async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<String> {
        let body = self
            .send_json(
                Method::Put,
                format!("buy/{}", segment(id)),
                json!({ "status": status.to_string() }),
            )
            .await?;
        Ok(message_or(&body, "Order status updated successfully"))
    }

    /// Posts a review and returns the product's updated rating list with the
    /// backend's message.
    pub async fn add_rating(
        &self,
        product_id: &str,
        form: &RatingForm,
    ) -> Result<(String, Vec<Rating>)> {
        form.validate()?;
        let body = self
            .send_json(
                Method::Post,
                "rating/add",
                json!({
                    "id": product_id,
                    "name": form.name.trim(),
                    "email": form.email.trim(),
                    "rating": form.rating,
                    "comment": form.comment.trim(),
                }),
            )
            .await?;
        let ratings: Vec<Option<Rating>> = match body.get("ratings") {
            Some(list) if list.is_array() => serde_json::from_value(list.clone())?,
            _ => Vec::new(),
        };
        info!(product = %product_id, stars = form.rating, "rating added");
        Ok((
            message_or(&body, "Ratings added successfully"),
            ratings.into_iter().flatten().collect(),
        ))
    }
}
