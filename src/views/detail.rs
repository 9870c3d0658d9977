use super::{announce, report};
use crate::core::currency::display_price;
use crate::core::forms::RatingForm;
use crate::errors::{Error, Result};
use crate::models::{Currency, ProductDetail, Rating, RatingSummary};
use crate::notify::Notifier;
use crate::store::Session;
use std::sync::Arc;

/// Product page: the product, its ratings, and prices in the display currency.
pub struct ProductDetailView {
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
    /// Last loaded product
    pub detail: Option<ProductDetail>,
    /// Ratings shown under the product
    pub ratings: Vec<Rating>,
    /// Rating aggregate, kept current after each review
    pub summary: RatingSummary,
    /// Display currency
    pub currency: Currency,
}

impl ProductDetailView {
    /// Empty page; call [`ProductDetailView::load`].
    #[must_use]
    pub fn new(session: Arc<Session>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            notifier,
            detail: None,
            ratings: Vec::new(),
            summary: RatingSummary::default(),
            currency: Currency::default(),
        }
    }

    /// Loads a product, its ratings, and the display currency.
    pub async fn load(&mut self, product_id: &str) -> bool {
        let result = async {
            let detail = self.session.api().product_detail(product_id).await?;
            let currency = self.session.currency().await?;
            Ok::<_, Error>((detail, currency))
        }
        .await;
        let Some((detail, currency)) = report(self.notifier.as_ref(), "load product", result)
        else {
            return false;
        };
        self.ratings = detail.ratings().cloned().collect();
        self.summary = detail.rating_summary();
        self.currency = currency;
        self.detail = Some(detail);
        true
    }

    /// Switches the display currency for this and every later page.
    pub async fn toggle_currency(&mut self) -> bool {
        let result = self.session.toggle_currency().await;
        let Some(currency) = report(self.notifier.as_ref(), "switch currency", result) else {
            return false;
        };
        self.currency = currency;
        true
    }

    /// Price in the display currency, e.g. `$ 5.06`.
    ///
    /// # Errors
    /// [`Error::InvalidRate`] when a conversion is needed and the product came
    /// without a usable rate.
    pub fn price_label(&self) -> Result<Option<String>> {
        let Some(detail) = &self.detail else {
            return Ok(None);
        };
        let product = &detail.product;
        display_price(product.price, product.currency, self.currency, detail.usd_to_inr_rate)
            .map(Some)
    }

    /// Submits a review. On success the aggregate is updated locally and the
    /// list replaced with the one the backend returned.
    pub async fn rate(&mut self, form: &RatingForm) -> bool {
        let Some(product_id) = self.detail.as_ref().map(|d| d.product.id.clone()) else {
            self.notifier.error("Product not found");
            return false;
        };
        let result = self.session.api().add_rating(&product_id, form).await;
        let Some((message, ratings)) = report(self.notifier.as_ref(), "rate product", result)
        else {
            return false;
        };
        self.summary.record(form.rating);
        if ratings.is_empty() {
            self.ratings.push(Rating {
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                rating: form.rating,
                comment: form.comment.trim().to_string(),
                created_at: None,
            });
        } else {
            self.ratings = ratings;
        }
        announce(self.notifier.as_ref(), "rate product", Ok(message))
    }
}
