use super::{announce, report};
use crate::api::ApiClient;
use crate::api::buyer::OrderFilter;
use crate::core::listing::PageState;
use crate::errors::Result;
use crate::models::{Order, OrderStatus, Page, PageRequest};
use crate::notify::Notifier;
use std::sync::Arc;

/// Order table for the admin (all orders) or a seller (orders received).
pub struct OrderTable {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    admin: bool,
    /// Current filter
    pub filter: OrderFilter,
    /// Rows on the current page
    pub orders: Vec<Order>,
    /// Pagination position
    pub pages: PageState,
    /// Rupees per dollar from the last listing
    pub usd_to_inr_rate: Option<f64>,
}

impl OrderTable {
    /// Table over every order on the platform.
    #[must_use]
    pub fn admin(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(api, notifier, true)
    }

    /// Table over the logged-in seller's orders.
    #[must_use]
    pub fn seller(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(api, notifier, false)
    }

    fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>, admin: bool) -> Self {
        Self {
            api,
            notifier,
            admin,
            filter: OrderFilter::default(),
            orders: Vec::new(),
            pages: PageState::default(),
            usd_to_inr_rate: None,
        }
    }

    async fn fetch(&self, filter: &OrderFilter, page: PageRequest) -> Result<Page<Order>> {
        if self.admin {
            self.api.admin_orders(filter, page).await
        } else {
            self.api.orders(filter, page).await
        }
    }

    fn take(&mut self, fetched: Page<Order>) {
        self.pages.apply(&fetched.meta);
        self.usd_to_inr_rate = fetched.usd_to_inr_rate.or(self.usd_to_inr_rate);
        self.orders = fetched.items;
    }

    /// Replaces the rows with page `page` of the current filter.
    pub async fn load(&mut self, page: PageRequest) -> bool {
        let result = self.fetch(&self.filter, page).await;
        let Some(fetched) = report(self.notifier.as_ref(), "load orders", result) else {
            return false;
        };
        self.take(fetched);
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

    /// Switches between sort, status filter, and search, starting at page 1.
    pub async fn set_filter(&mut self, filter: OrderFilter) -> bool {
        let result = self.fetch(&filter, self.pages.first_page()).await;
        let Some(fetched) = report(self.notifier.as_ref(), "filter orders", result) else {
            return false;
        };
        self.filter = filter;
        self.take(fetched);
        true
    }

    /// Seller-side status change of one order.
    pub async fn set_status(&mut self, id: &str, status: OrderStatus) -> bool {
        let result = self.api.set_order_status(id, status).await;
        if !announce(self.notifier.as_ref(), "update order status", result) {
            return false;
        }
        if let Some(order) = self.orders.iter_mut().find(|o| o.id == id) {
            order.status = status;
        }
        true
    }
}
