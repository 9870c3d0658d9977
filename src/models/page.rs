use crate::errors::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::{Display, EnumString};

/// Default number of rows per page used by every list view.
pub const DEFAULT_LIMIT: u32 = 25;

/// Sort direction accepted by list endpoints as `sort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    /// Ascending, oldest or cheapest first
    #[default]
    Asc,
    /// Descending, newest or dearest first
    Desc,
}

/// Page and page size sent as `page`/`limit` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, starting at 1
    pub page: u32,
    /// Rows per page
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Creates a request, clamping page and limit to at least 1.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Query pairs for this request.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }
}

/// Where a list endpoint puts its rows and its grand total.
///
/// Every list endpoint returns `count`, `page`, `limit`, and `totalPages`, but
/// the rows and the total use endpoint-specific keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageKeys {
    /// Key of the row array
    pub items: &'static str,
    /// Key of the grand total
    pub total: &'static str,
}

impl PageKeys {
    /// Keys for one endpoint.
    #[must_use]
    pub const fn new(items: &'static str, total: &'static str) -> Self {
        Self { items, total }
    }
}

/// Pagination numbers echoed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageMeta {
    /// Rows on this page
    pub count: u64,
    /// Rows across all pages
    pub total: u64,
    /// Page number echoed back
    pub page: u32,
    /// Rows per page echoed back
    pub limit: u32,
    /// Number of pages
    pub total_pages: u32,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Rows on this page
    pub items: Vec<T>,
    /// Pagination numbers
    pub meta: PageMeta,
    /// Present on catalog, order, and request listings
    pub usd_to_inr_rate: Option<f64>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decodes a list response body.
    ///
    /// Missing numbers fall back to what was asked for: `page`/`limit` from the
    /// request, `count` from the rows received, `total` from `count`, and
    /// `totalPages` from `total / limit` rounded up.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::Decode`] if the rows do not match `T`.
    pub fn from_body(body: &Value, keys: PageKeys, requested: PageRequest) -> Result<Self> {
        let items: Vec<T> = match body.get(keys.items) {
            Some(Value::Null) | None => Vec::new(),
            Some(rows) => serde_json::from_value(rows.clone())?,
        };

        let count = read_u64(body, "count").unwrap_or(items.len() as u64);
        let total = read_u64(body, keys.total).unwrap_or(count);
        let page = read_u32(body, "page").unwrap_or(requested.page);
        let limit = read_u32(body, "limit").unwrap_or(requested.limit).max(1);
        let total_pages = read_u32(body, "totalPages")
            .unwrap_or_else(|| u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX));

        Ok(Self {
            items,
            meta: PageMeta {
                count,
                total,
                page,
                limit,
                total_pages,
            },
            usd_to_inr_rate: body.get("usdToInrRate").and_then(Value::as_f64),
        })
    }
}

// Numbers sometimes arrive as strings from query-echoing backends.
fn read_u64(body: &Value, key: &str) -> Option<u64> {
    match body.get(key)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn read_u32(body: &Value, key: &str) -> Option<u32> {
    read_u64(body, key).and_then(|n| u32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use serde_json::json;

    const PRODUCTS: PageKeys = PageKeys::new("productsData", "totalProducts");

    #[test]
    fn test_page_echoes_backend_numbers() {
        let body = json!({
            "productsData": [{"_id": "p1"}, {"_id": "p2"}],
            "count": 2,
            "totalProducts": 30,
            "page": "2",
            "limit": 25,
            "totalPages": 2
        });
        let page: Page<Product> = Page::from_body(&body, PRODUCTS, PageRequest::new(2, 25)).unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.meta,
            PageMeta {
                count: 2,
                total: 30,
                page: 2,
                limit: 25,
                total_pages: 2
            }
        );
        assert!(page.usd_to_inr_rate.is_none());
    }

    #[test]
    fn test_page_falls_back_to_request() {
        let body = json!({"productsData": [{"_id": "p1"}], "totalProducts": 11, "usdToInrRate": 83.0});
        let page: Page<Product> = Page::from_body(&body, PRODUCTS, PageRequest::new(3, 5)).unwrap();

        assert_eq!(page.meta.page, 3);
        assert_eq!(page.meta.limit, 5);
        assert_eq!(page.meta.count, 1);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.usd_to_inr_rate, Some(83.0));
    }

    #[test]
    fn test_page_with_null_rows_is_empty() {
        let body = json!({"productsData": null, "totalProducts": 0, "totalPages": 0});
        let page: Page<Product> = Page::from_body(&body, PRODUCTS, PageRequest::default()).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.meta.total_pages, 0);
    }

    #[test]
    fn test_page_rejects_malformed_rows() {
        let body = json!({"productsData": "not a list"});
        let result: Result<Page<Product>> = Page::from_body(&body, PRODUCTS, PageRequest::default());
        assert!(matches!(result, Err(crate::errors::Error::Decode(_))));
    }

    #[test]
    fn test_page_request_clamps() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 1);
        assert_eq!(
            request.query(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "1".to_string())
            ]
        );
    }
}
