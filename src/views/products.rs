use super::{announce, report};
use crate::api::{ApiClient, SellerProductFilter};
use crate::core::listing::PageState;
use crate::errors::Result;
use crate::models::{Page, PageRequest, Product};
use crate::notify::Notifier;
use std::sync::Arc;

/// Whose products the table manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductScope {
    /// Every product on the platform. Status, visibility, and search filters
    /// go through the product listing endpoints the seller pages use.
    Admin(SellerProductFilter),
    /// The logged-in seller's products, narrowed by a filter
    Seller(SellerProductFilter),
}

impl ProductScope {
    /// The filter applied to the listing.
    #[must_use]
    pub const fn filter(&self) -> &SellerProductFilter {
        match self {
            Self::Admin(filter) | Self::Seller(filter) => filter,
        }
    }

    fn with_filter(&self, filter: SellerProductFilter) -> Self {
        match self {
            Self::Admin(_) => Self::Admin(filter),
            Self::Seller(_) => Self::Seller(filter),
        }
    }
}

/// Product management table for the admin and seller dashboards.
pub struct ProductTable {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    scope: ProductScope,
    /// Rows on the current page
    pub products: Vec<Product>,
    /// Pagination position
    pub pages: PageState,
    /// Rupees per dollar from the last listing
    pub usd_to_inr_rate: Option<f64>,
}

impl ProductTable {
    /// Admin table over every product.
    #[must_use]
    pub fn admin(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(api, notifier, ProductScope::Admin(SellerProductFilter::All))
    }

    /// Admin table that starts out filtered.
    #[must_use]
    pub fn admin_filtered(
        api: Arc<ApiClient>,
        notifier: Arc<dyn Notifier>,
        filter: SellerProductFilter,
    ) -> Self {
        Self::new(api, notifier, ProductScope::Admin(filter))
    }

    /// Seller table over the logged-in seller's products.
    #[must_use]
    pub fn seller(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(api, notifier, ProductScope::Seller(SellerProductFilter::All))
    }

    /// Seller table that starts out filtered.
    #[must_use]
    pub fn seller_filtered(
        api: Arc<ApiClient>,
        notifier: Arc<dyn Notifier>,
        filter: SellerProductFilter,
    ) -> Self {
        Self::new(api, notifier, ProductScope::Seller(filter))
    }

    fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>, scope: ProductScope) -> Self {
        Self {
            api,
            notifier,
            scope,
            products: Vec::new(),
            pages: PageState::default(),
            usd_to_inr_rate: None,
        }
    }

    /// Whose products are listed, and how they are filtered.
    #[must_use]
    pub const fn scope(&self) -> &ProductScope {
        &self.scope
    }

    async fn fetch(&self, page: PageRequest) -> Result<Page<Product>> {
        match &self.scope {
            ProductScope::Admin(SellerProductFilter::All) => self.api.admin_products(page).await,
            ProductScope::Admin(filter) | ProductScope::Seller(filter) => {
                self.api.seller_products(filter, page).await
            }
        }
    }

    /// Replaces the rows with page `page`. Returns `false` if the fetch failed.
    pub async fn load(&mut self, page: PageRequest) -> bool {
        let result = self.fetch(page).await;
        let Some(fetched) = report(self.notifier.as_ref(), "load products", result) else {
            return false;
        };
        self.pages.apply(&fetched.meta);
        self.usd_to_inr_rate = fetched.usd_to_inr_rate.or(self.usd_to_inr_rate);
        self.products = fetched.items;
        true
    }

    /// Loads the following page, if any.
    pub async fn next(&mut self) -> bool {
        match self.pages.next_page() {
            Some(page) => self.load(page).await,
            None => false,
        }
    }

    /// Loads the preceding page, if any.
    pub async fn prev(&mut self) -> bool {
        match self.pages.prev_page() {
            Some(page) => self.load(page).await,
            None => false,
        }
    }

    /// Switches the filter and reloads from the first page. The old filter is
    /// kept if the reload fails.
    pub async fn set_filter(&mut self, filter: SellerProductFilter) -> bool {
        let next = self.scope.with_filter(filter);
        let previous = std::mem::replace(&mut self.scope, next);
        let first = self.pages.first_page();
        let loaded = self.load(first).await;
        if !loaded {
            self.scope = previous;
        }
        loaded
    }

    fn row_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Shows or hides a product in the catalog.
    pub async fn toggle_visibility(&mut self, id: &str) -> bool {
        let result = self.api.toggle_product_visibility(id).await;
        if !announce(self.notifier.as_ref(), "toggle visibility", result) {
            return false;
        }
        if let Some(product) = self.row_mut(id) {
            product.is_visible = !product.is_visible;
        }
        true
    }

    /// Features or unfeatures a product on the home page.
    pub async fn toggle_featured(&mut self, id: &str) -> bool {
        let result = self.api.toggle_product_featured(id).await;
        if !announce(self.notifier.as_ref(), "toggle featured", result) {
            return false;
        }
        if let Some(product) = self.row_mut(id) {
            product.is_featured = !product.is_featured;
        }
        true
    }

    /// Flips a product's verified badge.
    pub async fn verify(&mut self, id: &str) -> bool {
        let result = self.api.verify_product(id).await;
        if !announce(self.notifier.as_ref(), "verify product", result) {
            return false;
        }
        if let Some(product) = self.row_mut(id) {
            product.is_verified = !product.is_verified;
        }
        true
    }

    /// Seller status toggle between active and inactive.
    pub async fn toggle_status(&mut self, id: &str) -> bool {
        let Some(current) = self.products.iter().find(|p| p.id == id).map(|p| p.status) else {
            self.notifier.error("Product not found");
            return false;
        };
        let result = self.api.set_product_status(id, current.toggled()).await;
        if !announce(self.notifier.as_ref(), "toggle status", result) {
            return false;
        }
        if let Some(product) = self.row_mut(id) {
            product.status = current.toggled();
        }
        true
    }

    /// Deletes a product and drops its row.
    pub async fn remove(&mut self, id: &str) -> bool {
        let result = match self.scope {
            ProductScope::Admin(_) => self.api.remove_product(id).await,
            ProductScope::Seller(_) => self.api.remove_seller_product(id).await,
        };
        if !announce(self.notifier.as_ref(), "remove product", result) {
            return false;
        }
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() < before {
            self.pages.count = self.pages.count.saturating_sub(1);
            self.pages.total = self.pages.total.saturating_sub(1);
        }
        true
    }
}
