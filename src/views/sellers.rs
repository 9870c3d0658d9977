use super::{announce, report};
use crate::api::{ApiClient, UserStatus};
use crate::core::listing::PageState;
use crate::errors::Result;
use crate::models::{Page, PageRequest, User};
use crate::notify::Notifier;
use std::sync::Arc;

/// Which accounts the seller table lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SellerFilter {
    /// Every seller
    #[default]
    All,
    /// Sellers with one account status
    Status(UserStatus),
    /// Sellers matching a name, email, or company
    Search(String),
}

/// Admin table of seller accounts.
pub struct SellerTable {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    /// Current filter
    pub filter: SellerFilter,
    /// Rows on the current page
    pub sellers: Vec<User>,
    /// Pagination position
    pub pages: PageState,
}

impl SellerTable {
    /// Table over every seller.
    #[must_use]
    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            filter: SellerFilter::All,
            sellers: Vec::new(),
            pages: PageState::default(),
        }
    }

    async fn fetch(&self, filter: &SellerFilter, page: PageRequest) -> Result<Page<User>> {
        match filter {
            SellerFilter::All => self.api.admin_users(page).await,
            SellerFilter::Status(status) => self.api.admin_users_by_status(*status, page).await,
            SellerFilter::Search(search) => self.api.search_users(search, page).await,
        }
    }

    /// Replaces the rows with page `page` of the current filter.
    pub async fn load(&mut self, page: PageRequest) -> bool {
        let result = self.fetch(&self.filter, page).await;
        let Some(fetched) = report(self.notifier.as_ref(), "load sellers", result) else {
            return false;
        };
        self.pages.apply(&fetched.meta);
        self.sellers = fetched.items;
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

    /// Applies a new filter from the first page; the old filter stays if the
    /// fetch fails.
    pub async fn set_filter(&mut self, filter: SellerFilter) -> bool {
        let result = self.fetch(&filter, self.pages.first_page()).await;
        let Some(fetched) = report(self.notifier.as_ref(), "filter sellers", result) else {
            return false;
        };
        self.filter = filter;
        self.pages.apply(&fetched.meta);
        self.sellers = fetched.items;
        true
    }

    fn row_mut(&mut self, id: &str) -> Option<&mut User> {
        self.sellers.iter_mut().find(|u| u.id == id)
    }

    /// Activates or deactivates an account.
    pub async fn toggle_status(&mut self, id: &str) -> bool {
        let result = self.api.toggle_user_status(id).await;
        if !announce(self.notifier.as_ref(), "toggle seller status", result) {
            return false;
        }
        if let Some(user) = self.row_mut(id) {
            user.is_active = !user.is_active;
        }
        true
    }

    /// Flips a seller's verified badge.
    pub async fn verify(&mut self, id: &str) -> bool {
        let result = self.api.verify_user(id).await;
        if !announce(self.notifier.as_ref(), "verify seller", result) {
            return false;
        }
        if let Some(user) = self.row_mut(id) {
            user.is_verified = !user.is_verified;
        }
        true
    }

    /// Deletes a seller and drops the row.
    pub async fn remove(&mut self, id: &str) -> bool {
        let result = self.api.remove_user(id).await;
        if !announce(self.notifier.as_ref(), "remove seller", result) {
            return false;
        }
        let before = self.sellers.len();
        self.sellers.retain(|u| u.id != id);
        if self.sellers.len() < before {
            self.pages.count = self.pages.count.saturating_sub(1);
            self.pages.total = self.pages.total.saturating_sub(1);
        }
        true
    }
}
