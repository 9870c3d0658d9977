//! Admin management: moderation of products, sellers, requests, and orders,
//! plus the exchange-rate setting and the dashboard.

use super::buyer::OrderFilter;
use super::client::{ApiClient, form_body, message_or};
use super::segment;
use super::transport::Method;
use crate::core::currency::checked_rate;
use crate::core::forms::{ProductForm, RequestForm, Validate};
use crate::errors::Result;
use crate::models::{
    AdminAnalytics, Order, Page, PageKeys, PageRequest, Product, StockRequest, User,
};
use serde_json::{Value, json};
use strum::{Display, EnumString};
use tracing::info;

const PRODUCTS: PageKeys = PageKeys::new("productsData", "totalProducts");
const USERS: PageKeys = PageKeys::new("usersData", "totalUsers");
const USER_SEARCH: PageKeys = PageKeys::new("users", "totalUsers");
const REQUESTS: PageKeys = PageKeys::new("requests", "total");
const ORDERS: PageKeys = PageKeys::new("buy", "totalBuy");
const FILTERED_ORDERS: PageKeys = PageKeys::new("orders", "totalBuy");

/// Account status filter for the seller table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserStatus {
    /// Account enabled
    Active,
    /// Account disabled by an admin
    Inactive,
}

fn nested<T: serde::de::DeserializeOwned>(body: &Value, key: &str) -> Result<T> {
    Ok(serde_json::from_value(
        body.get(key).cloned().unwrap_or(Value::Null),
    )?)
}

impl ApiClient {
    /// Every product on the platform, newest first.
    pub async fn admin_products(&self, page: PageRequest) -> Result<Page<Product>> {
        self.get_page("admin/products", Vec::new(), page, PRODUCTS)
            .await
    }

    /// One product, for the admin edit form.
    pub async fn admin_product(&self, id: &str) -> Result<Product> {
        let body = self
            .get(format!("admin/product/{}/get", segment(id)), Vec::new())
            .await?;
        nested(&body, "product")
    }

    /// Flips whether the product appears in the public catalog.
    pub async fn toggle_product_visibility(&self, id: &str) -> Result<String> {
        let body = self
            .put_empty(format!("admin/product/{}/visibility", segment(id)))
            .await?;
        Ok(message_or(&body, "Product status updated successfully"))
    }

    /// Flips whether the product is featured on the home page.
    pub async fn toggle_product_featured(&self, id: &str) -> Result<String> {
        let body = self
            .put_empty(format!("admin/product/{}/featured", segment(id)))
            .await?;
        Ok(message_or(&body, "Product status updated successfully"))
    }

    /// Flips a product's verified badge.
    pub async fn verify_product(&self, id: &str) -> Result<String> {
        let body = self
            .put_empty(format!("admin/product/{}/verify", segment(id)))
            .await?;
        Ok(message_or(&body, "Product has been verified successfully"))
    }

    /// Deletes a product.
    pub async fn remove_product(&self, id: &str) -> Result<String> {
        let body = self
            .delete(format!("admin/product/{}/delete", segment(id)))
            .await?;
        Ok(message_or(&body, "Product removed successfully"))
    }

    /// Replaces a product's details on behalf of its seller.
    pub async fn admin_update_product(&self, id: &str, form: &ProductForm) -> Result<String> {
        form.validate()?;
        let (file, url) = form.image.resolve().await?;
        let mut fields = vec![("id", json!(id))];
        fields.extend(form.fields());
        self.send_body(
            Method::Put,
            format!("admin/product/{}/update", segment(id)),
            form_body(fields, file, url),
        )
        .await?;
        info!(product = %id, "product updated by admin");
        Ok("Product updated successfully".to_string())
    }

    /// Every seller account.
    pub async fn admin_users(&self, page: PageRequest) -> Result<Page<User>> {
        self.get_page("admin/users", Vec::new(), page, USERS).await
    }

    /// Seller accounts with the given status.
    pub async fn admin_users_by_status(
        &self,
        status: UserStatus,
        page: PageRequest,
    ) -> Result<Page<User>> {
        self.get_page(
            "admin/user/status",
            vec![("status".to_string(), status.to_string())],
            page,
            USERS,
        )
        .await
    }

    /// Seller accounts matching `search` by name, email, or company.
    pub async fn search_users(&self, search: &str, page: PageRequest) -> Result<Page<User>> {
        self.get_page(
            format!("admin/user/search/{}", segment(search)),
            Vec::new(),
            page,
            USER_SEARCH,
        )
        .await
    }

    /// Activates or deactivates a seller account.
    pub async fn toggle_user_status(&self, id: &str) -> Result<String> {
        let body = self.put_empty(format!("admin/user/{}", segment(id))).await?;
        Ok(message_or(&body, "Seller status updated successfully"))
    }

    /// Flips a seller's verified badge.
    pub async fn verify_user(&self, id: &str) -> Result<String> {
        let body = self
            .put_empty(format!("admin/user/{}/verify", segment(id)))
            .await?;
        Ok(message_or(&body, "Seller has been verified successfully"))
    }

    /// Deletes a seller account.
    pub async fn remove_user(&self, id: &str) -> Result<String> {
        let body = self.delete(format!("admin/user/{}/delete", segment(id))).await?;
        Ok(message_or(&body, "Seller removed successfully"))
    }

    /// Every stock request.
    pub async fn admin_requests(&self, page: PageRequest) -> Result<Page<StockRequest>> {
        self.get_page("admin/requests", Vec::new(), page, REQUESTS)
            .await
    }

    /// One stock request, for the admin edit form.
    pub async fn admin_request(&self, id: &str) -> Result<StockRequest> {
        let body = self
            .get(format!("admin/request/{}", segment(id)), Vec::new())
            .await?;
        nested(&body, "request")
    }

    /// Publishes a request on the inquiry board.
    pub async fn verify_request(&self, id: &str) -> Result<String> {
        let body = self
            .put_empty(format!("admin/request/{}/verify", segment(id)))
            .await?;
        Ok(message_or(&body, "Request has been verified successfully"))
    }

    /// Sellers a request can be assigned to.
    pub async fn assignable_sellers(&self, page: PageRequest) -> Result<Page<User>> {
        self.get_page("admin/request/users", Vec::new(), page, USERS)
            .await
    }

    /// Hands a request to a seller.
    pub async fn assign_request(&self, request_id: &str, seller_id: &str) -> Result<String> {
        let body = self
            .put_empty(format!(
                "admin/request/{}/assign/{}",
                segment(request_id),
                segment(seller_id)
            ))
            .await?;
        info!(request = %request_id, seller = %seller_id, "request assigned");
        Ok(message_or(&body, "Seller has been assigned successfully"))
    }

    /// Replaces a request's details.
    pub async fn admin_update_request(&self, id: &str, form: &RequestForm) -> Result<String> {
        form.validate()?;
        let (file, url) = form.image.resolve().await?;
        let mut fields = vec![("_id", json!(id))];
        fields.extend(form.fields());
        self.send_body(
            Method::Put,
            format!("admin/request/{}/update", segment(id)),
            form_body(fields, file, url),
        )
        .await?;
        Ok(format!("{} has been updated successfully", form.name.trim()))
    }

    /// All orders on the platform.
    pub async fn admin_orders(&self, filter: &OrderFilter, page: PageRequest) -> Result<Page<Order>> {
        match filter {
            OrderFilter::All(sort) => {
                self.get_page(
                    "admin/orders",
                    vec![("sort".to_string(), sort.to_string())],
                    page,
                    ORDERS,
                )
                .await
            }
            OrderFilter::Search(search) => {
                self.get_page(
                    format!("admin/orders/search/{}", segment(search)),
                    Vec::new(),
                    page,
                    FILTERED_ORDERS,
                )
                .await
            }
            OrderFilter::Status(status) => {
                self.get_page(
                    format!("admin/orders/filter/{status}"),
                    Vec::new(),
                    page,
                    FILTERED_ORDERS,
                )
                .await
            }
        }
    }

    /// The USD to INR rate used for every price conversion.
    pub async fn usd_to_inr_rate(&self) -> Result<f64> {
        let body = self.get("admin/settings", Vec::new()).await?;
        checked_rate(body.get("usdToInrRate").and_then(Value::as_f64).unwrap_or(0.0))
    }

    /// Saves a new rate after checking it is positive and finite.
    pub async fn set_usd_to_inr_rate(&self, rate: f64) -> Result<String> {
        let rate = checked_rate(rate)?;
        let body = self
            .send_json(Method::Put, "admin/settings", json!({ "usdToInrRate": rate }))
            .await?;
        info!(rate, "exchange rate updated");
        Ok(message_or(&body, "USD to INR rate updated successfully"))
    }

    /// Platform totals for the admin dashboard.
    pub async fn admin_analytics(&self) -> Result<AdminAnalytics> {
        self.get_as("admin/analytics").await
    }
}
