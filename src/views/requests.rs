use super::{announce, report};
use crate::api::ApiClient;
use crate::core::listing::PageState;
use crate::errors::Result;
use crate::models::{Page, PageRequest, RequestStatus, StockRequest, User};
use crate::notify::Notifier;
use std::sync::Arc;

/// Stock request table: every request for the admin, assigned ones for a seller.
pub struct RequestTable {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    admin: bool,
    /// Rows on the current page
    pub requests: Vec<StockRequest>,
    /// Pagination position
    pub pages: PageState,
    /// Sellers offered by the assign dialog
    pub assignable: Vec<User>,
    /// Pagination of the assignable sellers
    pub assignable_pages: PageState,
}

impl RequestTable {
    /// Table over every request.
    #[must_use]
    pub fn admin(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(api, notifier, true)
    }

    /// Table over requests assigned to the logged-in seller.
    #[must_use]
    pub fn seller(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(api, notifier, false)
    }

    fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>, admin: bool) -> Self {
        Self {
            api,
            notifier,
            admin,
            requests: Vec::new(),
            pages: PageState::default(),
            assignable: Vec::new(),
            assignable_pages: PageState::default(),
        }
    }

    async fn fetch(&self, page: PageRequest) -> Result<Page<StockRequest>> {
        if self.admin {
            self.api.admin_requests(page).await
        } else {
            self.api.seller_requests(page).await
        }
    }

    /// Replaces the rows with page `page`.
    pub async fn load(&mut self, page: PageRequest) -> bool {
        let result = self.fetch(page).await;
        let Some(fetched) = report(self.notifier.as_ref(), "load requests", result) else {
            return false;
        };
        self.pages.apply(&fetched.meta);
        self.requests = fetched.items;
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

    fn row_mut(&mut self, id: &str) -> Option<&mut StockRequest> {
        self.requests.iter_mut().find(|r| r.id == id)
    }

    /// Publishes a request on the public board.
    pub async fn verify(&mut self, id: &str) -> bool {
        let result = self.api.verify_request(id).await;
        if !announce(self.notifier.as_ref(), "verify request", result) {
            return false;
        }
        if let Some(request) = self.row_mut(id) {
            request.is_verified = !request.is_verified;
        }
        true
    }

    /// Loads one page of the sellers a request can be assigned to.
    pub async fn load_assignable(&mut self, page: PageRequest) -> bool {
        let result = self.api.assignable_sellers(page).await;
        let Some(fetched) = report(self.notifier.as_ref(), "load sellers", result) else {
            return false;
        };
        self.assignable_pages.apply(&fetched.meta);
        self.assignable = fetched.items;
        true
    }

    /// Assigns a request to a seller and updates its row.
    pub async fn assign(&mut self, request_id: &str, seller_id: &str) -> bool {
        let result = self.api.assign_request(request_id, seller_id).await;
        if !announce(self.notifier.as_ref(), "assign request", result) {
            return false;
        }
        let seller_name = self
            .assignable
            .iter()
            .find(|u| u.id == seller_id)
            .map(|u| u.username.clone());
        if let Some(request) = self.row_mut(request_id) {
            request.seller = Some(seller_id.to_string());
            if let Some(name) = seller_name {
                request.seller_name = name;
            }
        }
        true
    }

    /// Seller-side status change of an assigned request.
    pub async fn set_status(&mut self, id: &str, status: RequestStatus) -> bool {
        let result = self.api.set_seller_request_status(id, status).await;
        if !announce(self.notifier.as_ref(), "update request status", result) {
            return false;
        }
        if let Some(request) = self.row_mut(id) {
            request.status = status;
        }
        true
    }
}
