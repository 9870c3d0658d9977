use super::{announce, report};
use crate::api::inquiry::REQUEST_RECORDED;
use crate::core::forms::RequestForm;
use crate::core::listing::PageState;
use crate::errors::Result;
use crate::models::{Page, PageRequest, SortOrder, StockRequest};
use crate::notify::Notifier;
use crate::store::Session;
use std::sync::Arc;
use tracing::warn;

/// What the public board is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardQuery {
    /// Verified requests sorted by date
    Latest(SortOrder),
    /// Verified requests matching a name
    Search(String),
}

impl Default for BoardQuery {
    fn default() -> Self {
        Self::Latest(SortOrder::Desc)
    }
}

/// Public inquiry board plus the requests this client submitted.
pub struct InquiryBoard {
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
    /// What the board is showing
    pub query: BoardQuery,
    /// Rows on the current page
    pub requests: Vec<StockRequest>,
    /// Pagination position
    pub pages: PageState,
    /// Live status of the requests submitted from this client
    pub mine: Vec<StockRequest>,
}

impl InquiryBoard {
    /// Empty board showing the newest requests first.
    #[must_use]
    pub fn new(session: Arc<Session>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            notifier,
            query: BoardQuery::default(),
            requests: Vec::new(),
            pages: PageState::default(),
            mine: Vec::new(),
        }
    }

    async fn fetch(&self, query: &BoardQuery, page: PageRequest) -> Result<Page<StockRequest>> {
        let api = self.session.api();
        match query {
            BoardQuery::Latest(sort) => api.public_requests(*sort, page).await,
            BoardQuery::Search(search) => api.search_public_requests(search, page).await,
        }
    }

    /// Replaces the rows with page `page` of the current query.
    pub async fn load(&mut self, page: PageRequest) -> bool {
        let result = self.fetch(&self.query, page).await;
        let Some(fetched) = report(self.notifier.as_ref(), "load inquiries", result) else {
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

    /// Searches the board; an empty search goes back to the latest requests.
    pub async fn search(&mut self, search: &str) -> bool {
        let query = if search.trim().is_empty() {
            BoardQuery::default()
        } else {
            BoardQuery::Search(search.trim().to_string())
        };
        let result = self.fetch(&query, self.pages.first_page()).await;
        let Some(fetched) = report(self.notifier.as_ref(), "search inquiries", result) else {
            return false;
        };
        self.query = query;
        self.pages.apply(&fetched.meta);
        self.requests = fetched.items;
        true
    }

    /// Refreshes [`InquiryBoard::mine`] from the ids kept in the store.
    pub async fn load_mine(&mut self) -> bool {
        let result = async {
            let ids = self.session.tracked_requests().await?;
            self.session.api().tracked_request_status(&ids).await
        }
        .await;
        let Some(mine) = report(self.notifier.as_ref(), "load my requests", result) else {
            return false;
        };
        self.mine = mine;
        true
    }

    /// Posts a request and remembers its id so it shows up under "my requests".
    pub async fn submit(&mut self, form: &RequestForm) -> bool {
        let result = self.session.api().submit_request(form).await;
        let Some(id) = report(self.notifier.as_ref(), "submit request", result) else {
            return false;
        };
        if let Err(error) = self.session.track_request(&id).await {
            // the request exists on the backend even if we lost track of it
            warn!(request = %id, %error, "could not remember submitted request");
        }
        announce(self.notifier.as_ref(), "submit request", Ok(REQUEST_RECORDED.to_string()))
    }
}
