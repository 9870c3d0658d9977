use super::report;
use crate::core::currency::{compact_amount, convert, display_price};
use crate::errors::{Error, Result};
use crate::models::{AdminAnalytics, Currency, SellerAnalytics};
use crate::notify::Notifier;
use crate::store::Session;
use std::sync::Arc;
use tracing::warn;

/// Admin dashboard: platform totals and this month's movement.
pub struct AdminDashboard {
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
    /// Last loaded totals
    pub analytics: Option<AdminAnalytics>,
    /// Rupees per dollar, when the backend has one
    pub usd_to_inr_rate: Option<f64>,
    /// Display currency
    pub currency: Currency,
}

impl AdminDashboard {
    /// Empty dashboard; call [`AdminDashboard::load`].
    #[must_use]
    pub fn new(session: Arc<Session>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            notifier,
            analytics: None,
            usd_to_inr_rate: None,
            currency: Currency::default(),
        }
    }

    /// Loads the analytics and the display currency. The exchange rate is
    /// optional: without one, revenue stays in INR.
    pub async fn load(&mut self) -> bool {
        let result = async {
            let analytics = self.session.api().admin_analytics().await?;
            let currency = self.session.currency().await?;
            Ok::<_, Error>((analytics, currency))
        }
        .await;
        let Some((analytics, currency)) = report(self.notifier.as_ref(), "load dashboard", result)
        else {
            return false;
        };
        self.usd_to_inr_rate = match self.session.api().usd_to_inr_rate().await {
            Ok(rate) => Some(rate),
            Err(e) => {
                warn!(error = %e, "exchange rate unavailable, revenue shown in INR");
                None
            }
        };
        self.analytics = Some(analytics);
        self.currency = currency;
        true
    }

    /// Total and this month's revenue, abbreviated to K/M/B. Revenue is stored
    /// in INR and converted only when a rate is known.
    pub fn revenue_labels(&self) -> Result<Option<(String, String)>> {
        let Some(analytics) = &self.analytics else {
            return Ok(None);
        };
        let (to, rate) = match self.usd_to_inr_rate {
            Some(rate) => (self.currency, rate),
            None => (Currency::Inr, 0.0),
        };
        let label = |amount: f64| -> Result<String> {
            let converted = convert(amount, Currency::Inr, to, rate)?;
            Ok(format!("{} {}", to.symbol(), compact_amount(converted)))
        };
        Ok(Some((
            label(analytics.total_revenue)?,
            label(analytics.this_month_revenue)?,
        )))
    }
}

/// Seller dashboard: own products and orders, verification state, and the
/// assigned request count shown as a badge.
pub struct SellerDashboard {
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
    /// Last loaded totals
    pub analytics: Option<SellerAnalytics>,
    /// Whether an admin verified the seller
    pub is_verified: bool,
    /// Requests assigned to the seller
    pub requests_count: u64,
    /// Display currency
    pub currency: Currency,
}

impl SellerDashboard {
    /// Empty dashboard; call [`SellerDashboard::load`].
    #[must_use]
    pub fn new(session: Arc<Session>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            notifier,
            analytics: None,
            is_verified: false,
            requests_count: 0,
            currency: Currency::default(),
        }
    }

    /// Loads the dashboard and saves the request count in the store.
    pub async fn load(&mut self) -> bool {
        let result = async {
            let api = self.session.api();
            let analytics = api.seller_analytics().await?;
            let verified = api.verification_status().await?;
            let count = api.requests_count().await?;
            self.session.set_requests_count(count).await?;
            let currency = self.session.currency().await?;
            Ok::<_, Error>((analytics, verified, count, currency))
        }
        .await;
        let Some((analytics, verified, count, currency)) =
            report(self.notifier.as_ref(), "load dashboard", result)
        else {
            return false;
        };
        self.analytics = Some(analytics);
        self.is_verified = verified;
        self.requests_count = count;
        self.currency = currency;
        true
    }

    /// Revenue and stock value in the display currency.
    pub fn value_labels(&self) -> Result<Option<(String, String)>> {
        let Some(analytics) = &self.analytics else {
            return Ok(None);
        };
        let rate = analytics.usd_to_inr_rate;
        Ok(Some((
            display_price(
                analytics.products_analytics.total_revenue,
                Currency::Inr,
                self.currency,
                rate,
            )?,
            display_price(
                analytics.products_analytics.total_stock_value,
                Currency::Inr,
                self.currency,
                rate,
            )?,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingNotifier, setup_session};
    use serde_json::json;

    #[tokio::test]
    async fn test_admin_dashboard_in_usd() -> Result<()> {
        let (session, mock) = setup_session().await?;
        session.switch_currency(Currency::Usd).await?;
        mock.push(200, json!({"totalRevenue": 8400.0, "thisMonthRevenue": 840.0, "totalUsers": 3}));
        mock.push(200, json!({"usdToInrRate": 84.0}));
        let mut dashboard = AdminDashboard::new(Arc::new(session), RecordingNotifier::new());

        assert!(dashboard.load().await);
        assert_eq!(
            dashboard.revenue_labels()?,
            Some(("$ 100.00".to_string(), "$ 10.00".to_string()))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_admin_dashboard_without_rate_stays_in_inr() -> Result<()> {
        let (session, mock) = setup_session().await?;
        session.switch_currency(Currency::Usd).await?;
        mock.push(
            200,
            json!({"totalRevenue": 1_250_000.0, "thisMonthRevenue": 4200.0, "totalUsers": 7}),
        );
        mock.push(200, json!({}));
        let notifier = RecordingNotifier::new();
        let mut dashboard = AdminDashboard::new(Arc::new(session), notifier.clone());

        assert!(dashboard.load().await);
        assert_eq!(dashboard.analytics.as_ref().map(|a| a.total_users), Some(7));
        assert!(dashboard.usd_to_inr_rate.is_none());
        assert_eq!(
            dashboard.revenue_labels()?,
            Some(("₹ 1.25M".to_string(), "₹ 4.20K".to_string()))
        );
        assert!(notifier.events().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_seller_dashboard_stores_request_count() -> Result<()> {
        let (session, mock) = setup_session().await?;
        mock.push(
            200,
            json!({
                "productsAnalytics": {"totalProducts": 4, "totalRevenue": 1800.0, "totalStockValue": 5000.0},
                "orderAnalytics": {"totalOrders": 9, "totalRevenue": 950.0},
                "usdToInrRate": 80.0
            }),
        );
        mock.push(200, json!({"isVerified": true}));
        mock.push(200, json!({"totalRequests": 3}));
        let session = Arc::new(session);
        let mut dashboard = SellerDashboard::new(session.clone(), RecordingNotifier::new());

        assert!(dashboard.load().await);
        assert!(dashboard.is_verified);
        assert_eq!(session.requests_count().await?, 3);
        assert_eq!(
            dashboard.value_labels()?,
            Some(("₹ 1800".to_string(), "₹ 5000".to_string()))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_dashboard_notifies_once() -> Result<()> {
        let (session, mock) = setup_session().await?;
        mock.push(401, json!({"message": "Please login"}));
        let notifier = RecordingNotifier::new();
        let mut dashboard = SellerDashboard::new(Arc::new(session), notifier.clone());

        assert!(!dashboard.load().await);
        assert!(dashboard.analytics.is_none());
        assert_eq!(notifier.errors(), vec!["Please login"]);
        assert_eq!(mock.requests().len(), 1);
        Ok(())
    }
}
