//! Public catalog: browsing needs no session.

use super::client::ApiClient;
use super::segment;
use crate::core::catalog_query::CatalogQuery;
use crate::errors::Result;
use crate::models::{Page, PageKeys, PageRequest, Product, ProductDetail, User};
use serde_json::Value;

const PRODUCTS: PageKeys = PageKeys::new("products", "totalProducts");
const CATALOG: PageKeys = PageKeys::new("products", "total");
const TOP_SELLERS: PageKeys = PageKeys::new("users", "count");

/// A catalog page together with the facet data for the filter panel.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    /// Matching products
    pub products: Page<Product>,
    /// Companies available for the company filter
    pub companies: Vec<String>,
    /// Upper bound of the price slider
    pub max_price: f64,
    /// Upper bound of the stock slider
    pub max_stock: f64,
}

/// A seller's other products, shown next to one of theirs.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerShowcase {
    /// The seller, when the backend includes them
    pub seller: Option<User>,
    /// Their other products
    pub products: Page<Product>,
}

impl ApiClient {
    /// Searches, filters, and sorts the public catalog.
    pub async fn catalog(&self, query: &CatalogQuery) -> Result<CatalogPage> {
        let mut pairs = query.query();
        pairs.extend(query.page.query());
        let body = self.get("product", pairs).await?;

        let companies = body
            .get("companies")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(CatalogPage {
            products: Page::from_body(&body, CATALOG, query.page)?,
            companies,
            max_price: body.get("maxPrice").and_then(Value::as_f64).unwrap_or(0.0),
            max_stock: body.get("maxStock").and_then(Value::as_f64).unwrap_or(0.0),
        })
    }

    /// Product page data: the product, its ratings, and its seller.
    pub async fn product_detail(&self, id: &str) -> Result<ProductDetail> {
        self.get_as(format!("product/product/{}", segment(id))).await
    }

    /// Products an admin featured on the home page.
    pub async fn featured_products(&self, page: PageRequest) -> Result<Page<Product>> {
        self.get_page("product/featured/products", Vec::new(), page, PRODUCTS)
            .await
    }

    /// Featured sellers for the home page.
    pub async fn featured_sellers(&self, page: PageRequest) -> Result<Vec<User>> {
        let body = self.get("product/featured/users", page.query()).await?;
        match body.get("users") {
            Some(users) if !users.is_null() => Ok(serde_json::from_value(users.clone())?),
            _ => Ok(Vec::new()),
        }
    }

    /// Sellers ranked by sales.
    pub async fn top_sellers(&self, page: PageRequest) -> Result<Page<User>> {
        self.get_page("user/top/sellers", Vec::new(), page, TOP_SELLERS)
            .await
    }

    /// Other products of `seller_id`, excluding `product_id`.
    pub async fn seller_showcase(
        &self,
        seller_id: &str,
        product_id: &str,
        page: PageRequest,
    ) -> Result<SellerShowcase> {
        let path = format!("product/seller/{}/{}", segment(seller_id), segment(product_id));
        let body = self.get(path, page.query()).await?;
        let seller = match body.get("seller") {
            Some(seller) if seller.is_object() => Some(serde_json::from_value(seller.clone())?),
            _ => None,
        };
        Ok(SellerShowcase {
            seller,
            products: Page::from_body(&body, PRODUCTS, page)?,
        })
    }

    /// More products from one seller.
    pub async fn more_products(&self, seller_id: &str, page: PageRequest) -> Result<Page<Product>> {
        self.get_page(
            format!("product/more/{}", segment(seller_id)),
            Vec::new(),
            page,
            PRODUCTS,
        )
        .await
    }

    /// Free-text product search used by the header search box.
    pub async fn search_products(&self, search: &str, page: PageRequest) -> Result<Page<Product>> {
        self.get_page(
            format!("product/{}", segment(search)),
            Vec::new(),
            page,
            PRODUCTS,
        )
        .await
    }
}
