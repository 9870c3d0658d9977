//! Public catalog query: search text, facet filters, sort, and page.
//!
//! Rendered into the `search`, `filters`, and `sort` parameters of `GET product`.
//! Filters use the backend's compact syntax, `company:a,b;price:lo-hi;stock:lo-hi`,
//! and sort is `key-order`.

use super::currency::plain_number;
use crate::models::{PageRequest, SortOrder};
use strum::{Display, EnumString};

/// Catalog sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortKey {
    /// Backend default order
    #[default]
    Relevant,
    /// By product name
    Name,
    /// By price
    Price,
    /// By stock
    Stock,
}

/// Inclusive numeric range filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Lower bound, inclusive
    pub min: f64,
    /// Upper bound, inclusive
    pub max: f64,
}

impl Range {
    /// Range from `min` to `max`.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether the range narrows a facet whose full span is `0..=bound`.
    #[must_use]
    pub fn narrows(&self, bound: f64) -> bool {
        self.min > 0.0 || self.max < bound
    }

    fn render(&self) -> String {
        format!("{}-{}", plain_number(self.min), plain_number(self.max))
    }
}

/// State of the public catalog page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogQuery {
    /// Free text search
    pub search: String,
    /// Only products of these companies
    pub companies: Vec<String>,
    /// Price bounds
    pub price: Option<Range>,
    /// Stock bounds
    pub stock: Option<Range>,
    /// Sort key
    pub sort: SortKey,
    /// Sort direction
    pub order: SortOrder,
    /// Page to fetch
    pub page: PageRequest,
}

impl CatalogQuery {
    /// Drops range filters that span their whole facet, as reported by the
    /// last catalog response.
    #[must_use]
    pub fn within_bounds(mut self, max_price: f64, max_stock: f64) -> Self {
        self.price = self.price.filter(|r| r.narrows(max_price));
        self.stock = self.stock.filter(|r| r.narrows(max_stock));
        self
    }

    /// The `filters` parameter, or `None` when no facet is active.
    #[must_use]
    pub fn filters(&self) -> Option<String> {
        let mut parts = Vec::new();
        if !self.companies.is_empty() {
            parts.push(format!("company:{}", self.companies.join(",")));
        }
        if let Some(range) = &self.price {
            parts.push(format!("price:{}", range.render()));
        }
        if let Some(range) = &self.stock {
            parts.push(format!("stock:{}", range.render()));
        }
        (!parts.is_empty()).then(|| parts.join(";"))
    }

    /// Number of active facets, shown next to the filter toggle.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.companies.len() + usize::from(self.price.is_some()) + usize::from(self.stock.is_some())
    }

    /// Query pairs for `GET product`, excluding `page`/`limit`.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search".to_string(), search.to_string()));
        }
        if let Some(filters) = self.filters() {
            pairs.push(("filters".to_string(), filters));
        }
        pairs.push(("sort".to_string(), format!("{}-{}", self.sort, self.order)));
        pairs
    }

    /// Resets every facet, keeping search and sort.
    pub fn clear_filters(&mut self) {
        self.companies.clear();
        self.price = None;
        self.stock = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_only_sorts() {
        let query = CatalogQuery::default();
        assert_eq!(
            query.query(),
            vec![("sort".to_string(), "relevant-asc".to_string())]
        );
        assert_eq!(query.active_filter_count(), 0);
    }

    #[test]
    fn test_full_query_renders_filters() {
        let query = CatalogQuery {
            search: "  black ".to_string(),
            companies: vec!["Acme".to_string(), "Dyeco".to_string()],
            price: Some(Range::new(10.0, 250.5)),
            stock: Some(Range::new(0.0, 40.0)),
            sort: SortKey::Price,
            order: SortOrder::Desc,
            page: PageRequest::new(2, 25),
        };
        assert_eq!(
            query.query(),
            vec![
                ("search".to_string(), "black".to_string()),
                (
                    "filters".to_string(),
                    "company:Acme,Dyeco;price:10-250.5;stock:0-40".to_string()
                ),
                ("sort".to_string(), "price-desc".to_string()),
            ]
        );
        assert_eq!(query.active_filter_count(), 4);
    }

    #[test]
    fn test_full_span_ranges_are_dropped() {
        let query = CatalogQuery {
            price: Some(Range::new(0.0, 1000.0)),
            stock: Some(Range::new(5.0, 100.0)),
            ..CatalogQuery::default()
        }
        .within_bounds(1000.0, 100.0);

        assert!(query.price.is_none());
        assert_eq!(query.filters().as_deref(), Some("stock:5-100"));
    }

    #[test]
    fn test_clear_filters_keeps_search() {
        let mut query = CatalogQuery {
            search: "vat".to_string(),
            companies: vec!["Acme".to_string()],
            price: Some(Range::new(1.0, 2.0)),
            ..CatalogQuery::default()
        };
        query.clear_filters();
        assert!(query.filters().is_none());
        assert_eq!(query.search, "vat");
    }

    #[test]
    fn test_sort_key_parses() {
        assert_eq!("Stock".parse::<SortKey>().ok(), Some(SortKey::Stock));
        assert!("weight".parse::<SortKey>().is_err());
    }
}
