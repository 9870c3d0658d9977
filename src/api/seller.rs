//! Seller self-service: own products, dashboard, and assigned requests.

use super::client::{ApiClient, form_body, message_or};
use super::segment;
use super::transport::Method;
use crate::core::forms::{ProductForm, Validate};
use crate::errors::Result;
use crate::models::{
    Page, PageKeys, PageRequest, Product, ProductStatus, RequestStatus, SellerAnalytics,
    SellerContact, StockRequest,
};
use serde_json::{Value, json};
use tracing::info;

const PRODUCTS: PageKeys = PageKeys::new("products", "totalProducts");
const REQUESTS: PageKeys = PageKeys::new("requests", "total");

/// Which slice of the seller's own products to list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SellerProductFilter {
    /// Every product
    #[default]
    All,
    /// Active or inactive products
    Status(ProductStatus),
    /// Products shown or hidden in the catalog
    Visibility(bool),
    /// Products matching a name
    Search(String),
}

impl SellerProductFilter {
    fn endpoint(&self) -> (&'static str, Vec<(String, String)>) {
        match self {
            Self::All => ("seller/products", Vec::new()),
            Self::Status(status) => (
                "seller/products/status",
                vec![("status".to_string(), status.to_string())],
            ),
            Self::Visibility(visible) => (
                "seller/products/visibility",
                vec![("visible".to_string(), visible.to_string())],
            ),
            Self::Search(search) => (
                "seller/products/search",
                vec![("search".to_string(), search.trim().to_string())],
            ),
        }
    }
}

impl ApiClient {
    /// Products of the logged-in seller, narrowed by `filter`.
    pub async fn seller_products(
        &self,
        filter: &SellerProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>> {
        let (path, query) = filter.endpoint();
        self.get_page(path, query, page, PRODUCTS).await
    }

    /// One of the seller's own products, for the edit form.
    pub async fn seller_product(&self, id: &str) -> Result<Product> {
        let body = self.get(format!("seller/product/{}", segment(id)), Vec::new()).await?;
        Ok(serde_json::from_value(
            body.get("product").cloned().unwrap_or(Value::Null),
        )?)
    }

    /// Lists a new product. Local files go up as multipart.
    pub async fn add_product(&self, form: &ProductForm) -> Result<String> {
        form.validate()?;
        let (file, url) = form.image.resolve().await?;
        self.send_body(Method::Post, "seller/product/add", form_body(form.fields(), file, url))
            .await?;
        info!(product = %form.name, "product added");
        Ok("Product added successfully".to_string())
    }

    /// Replaces one of the seller's products.
    pub async fn update_seller_product(&self, id: &str, form: &ProductForm) -> Result<String> {
        form.validate()?;
        let (file, url) = form.image.resolve().await?;
        let mut fields = vec![("id", json!(id))];
        fields.extend(form.fields());
        self.send_body(
            Method::Put,
            format!("seller/product/{}", segment(id)),
            form_body(fields, file, url),
        )
        .await?;
        info!(product = %id, "product updated");
        Ok("Product updated successfully".to_string())
    }

    /// Deletes one of the seller's products.
    pub async fn remove_seller_product(&self, id: &str) -> Result<String> {
        let body = self.delete(format!("seller/product/{}", segment(id))).await?;
        Ok(message_or(&body, "Product removed successfully"))
    }

    /// Switches a product between active and inactive.
    pub async fn set_product_status(&self, id: &str, status: ProductStatus) -> Result<String> {
        let body = self
            .send_json(
                Method::Put,
                format!("seller/product/{}/status", segment(id)),
                json!({ "status": status.to_string() }),
            )
            .await?;
        Ok(message_or(&body, "Product status updated successfully"))
    }

    /// Sales, stock, and order totals for the seller dashboard.
    pub async fn seller_analytics(&self) -> Result<SellerAnalytics> {
        self.get_as("seller/analytics").await
    }

    /// Whether an admin has verified the logged-in seller.
    pub async fn verification_status(&self) -> Result<bool> {
        let body = self.get("seller/verification-status", Vec::new()).await?;
        Ok(body.get("isVerified").and_then(Value::as_bool).unwrap_or(false))
    }

    /// Requests an admin assigned to the logged-in seller.
    pub async fn seller_requests(&self, page: PageRequest) -> Result<Page<StockRequest>> {
        self.get_page("seller/requests", Vec::new(), page, REQUESTS)
            .await
    }

    /// Marks an assigned request completed or cancelled.
    pub async fn set_seller_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> Result<String> {
        let body = self
            .send_json(
                Method::Put,
                format!("seller/request/{}", segment(id)),
                json!({ "status": status.to_string() }),
            )
            .await?;
        Ok(message_or(&body, "Request status updated successfully"))
    }

    /// Number of requests assigned to the logged-in seller, for the nav badge.
    pub async fn requests_count(&self) -> Result<u64> {
        let body = self.get("seller/requests/count", Vec::new()).await?;
        Ok(body.get("totalRequests").and_then(Value::as_u64).unwrap_or(0))
    }

    /// Contact details of the seller of `product_id`.
    pub async fn seller_contact(&self, product_id: &str) -> Result<SellerContact> {
        self.get_as(format!("seller/contact/{}", segment(product_id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::RequestBody;
    use crate::core::forms::ImageInput;
    use crate::errors::Error;
    use crate::test_utils::{MockTransport, product_json};

    fn form() -> ProductForm {
        ProductForm {
            name: "Acid Red 88".to_string(),
            description: "Wool and silk".to_string(),
            price: 120.0,
            stock: 40.0,
            image: ImageInput::Url("https://cdn.example/red.png".to_string()),
            ..ProductForm::default()
        }
    }

    #[tokio::test]
    async fn test_filters_pick_endpoint_and_params() -> Result<()> {
        let mock = MockTransport::new();
        for _ in 0..3 {
            mock.push(200, json!({"products": [product_json("p1", "Acid Red 88", 120.0)], "totalProducts": 1}));
        }
        let client = ApiClient::new(mock.clone());

        client
            .seller_products(&SellerProductFilter::Status(ProductStatus::Inactive), PageRequest::default())
            .await?;
        client
            .seller_products(&SellerProductFilter::Visibility(false), PageRequest::default())
            .await?;
        let page = client
            .seller_products(&SellerProductFilter::Search(" red ".to_string()), PageRequest::new(2, 10))
            .await?;

        let requests = mock.requests();
        assert_eq!(requests[0].path, "seller/products/status");
        assert_eq!(requests[0].query_value("status"), Some("inactive"));
        assert_eq!(requests[1].query_value("visible"), Some("false"));
        assert_eq!(requests[2].path, "seller/products/search");
        assert_eq!(requests[2].query_value("search"), Some("red"));
        assert_eq!(requests[2].query_value("page"), Some("2"));
        assert_eq!(page.meta.total, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_sends_id_first_as_json() -> Result<()> {
        let mock = MockTransport::new();
        mock.push(200, json!({"message": "ok"}));
        let client = ApiClient::new(mock.clone());

        let message = client.update_seller_product("p1", &form()).await?;
        assert_eq!(message, "Product updated successfully");

        let request = &mock.requests()[0];
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "seller/product/p1");
        let RequestBody::Json(body) = &request.body else {
            panic!("expected a JSON body");
        };
        assert_eq!(body["id"], "p1");
        assert_eq!(body["image"], "https://cdn.example/red.png");
        assert_eq!(body["stockUnit"], "kg");
        Ok(())
    }

    #[tokio::test]
    async fn test_add_product_rejects_invalid_form_locally() {
        let mock = MockTransport::new();
        let client = ApiClient::new(mock.clone());

        let invalid = ProductForm {
            price: 0.0,
            ..form()
        };
        let result = client.add_product(&invalid).await;
        assert!(matches!(result, Err(Error::Validation { field: "price", .. })));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_status_change_uses_backend_message() -> Result<()> {
        let mock = MockTransport::new();
        mock.push(200, json!({"message": "Product is now inactive"}));
        mock.push(200, json!({}));
        let client = ApiClient::new(mock.clone());

        let first = client.set_product_status("p1", ProductStatus::Inactive).await?;
        let second = client.set_seller_request_status("r1", RequestStatus::Completed).await?;
        assert_eq!(first, "Product is now inactive");
        assert_eq!(second, "Request status updated successfully");
        assert_eq!(
            mock.requests()[1].body,
            RequestBody::Json(json!({"status": "completed"}))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_counters_default_to_zero() -> Result<()> {
        let mock = MockTransport::new();
        mock.push(200, json!({"totalRequests": 4}));
        mock.push(200, json!({}));
        let client = ApiClient::new(mock);

        assert_eq!(client.requests_count().await?, 4);
        assert!(!client.verification_status().await?);
        Ok(())
    }
}
