use super::{announce, report};
use crate::core::contact::OrderSummary;
use crate::core::forms::{
    BuyForm, ContactForm, LoginForm, ProductForm, RequestForm, SignupForm, Validate,
};
use crate::models::{ContactMethod, Product};
use crate::notify::Notifier;
use crate::store::Session;
use std::sync::Arc;

/// Outcome of [`FormScreens::buy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Purchase {
    /// Rejected by validation or by the backend
    NotPlaced,
    /// The order stands but the seller's contact could not be fetched
    Placed,
    /// The order stands; the link forwards its summary to the seller
    Forwarded(String),
}

impl Purchase {
    /// Whether the order went through.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        !matches!(self, Self::NotPlaced)
    }

    /// The seller link, when one could be built.
    #[must_use]
    pub fn seller_link(&self) -> Option<&str> {
        match self {
            Self::Forwarded(link) => Some(link),
            _ => None,
        }
    }
}

/// Submission of the standalone forms: product editing, checkout, account,
/// settings, and contact.
///
/// Every method validates first; a validation failure is reported like any
/// other error and nothing is sent.
pub struct FormScreens {
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
}

impl FormScreens {
    /// Screens sharing one session and notifier.
    #[must_use]
    pub fn new(session: Arc<Session>, notifier: Arc<dyn Notifier>) -> Self {
        Self { session, notifier }
    }

    /// Lists a new product for the logged-in seller.
    pub async fn add_product(&self, form: &ProductForm) -> bool {
        let result = self.session.api().add_product(form).await;
        announce(self.notifier.as_ref(), "add product", result)
    }

    /// Replaces one of the seller's products.
    pub async fn update_product(&self, id: &str, form: &ProductForm) -> bool {
        let result = self.session.api().update_seller_product(id, form).await;
        announce(self.notifier.as_ref(), "update product", result)
    }

    /// Replaces any product as an admin.
    pub async fn admin_update_product(&self, id: &str, form: &ProductForm) -> bool {
        let result = self.session.api().admin_update_product(id, form).await;
        announce(self.notifier.as_ref(), "update product", result)
    }

    /// Replaces a request as an admin.
    pub async fn admin_update_request(&self, id: &str, form: &RequestForm) -> bool {
        let result = self.session.api().admin_update_request(id, form).await;
        announce(self.notifier.as_ref(), "update request", result)
    }

    /// Places an order, then builds the link that forwards the order summary
    /// to the seller over `seller_channel`. The buyer's own contact method
    /// only labels their contact detail in the summary.
    pub async fn buy(
        &self,
        product: &Product,
        form: &BuyForm,
        seller_channel: ContactMethod,
    ) -> Purchase {
        let api = self.session.api();
        let placed = api.place_order(&product.id, form).await;
        if !announce(self.notifier.as_ref(), "place order", placed) {
            return Purchase::NotPlaced;
        }
        let Some(seller) = report(
            self.notifier.as_ref(),
            "fetch seller contact",
            api.seller_contact(&product.id).await,
        ) else {
            return Purchase::Placed;
        };
        let summary = OrderSummary {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity: form.quantity,
            customer: form.name.trim().to_string(),
            contact_method: form.contact_method,
            contact: form.buyer_contact(),
            notes: form.note.trim().to_string(),
            currency: product.currency,
            unit_price: product.price,
        };
        self.notifier.loading("Redirecting...");
        Purchase::Forwarded(summary.seller_link(seller_channel, &seller))
    }

    /// Registers a seller and stores the session.
    pub async fn signup(&self, form: &SignupForm) -> bool {
        let result = self.session.register(form).await;
        announce(self.notifier.as_ref(), "register", result)
    }

    /// Logs in and stores the session.
    pub async fn login(&self, form: &LoginForm) -> bool {
        let result = self.session.login(form).await;
        announce(self.notifier.as_ref(), "login", result)
    }

    /// Logs out and clears the stored user.
    pub async fn logout(&self) -> bool {
        let result = self.session.logout().await;
        announce(self.notifier.as_ref(), "logout", result)
    }

    /// Saves the platform's USD to INR rate.
    pub async fn update_rate(&self, rate: f64) -> bool {
        let result = self.session.api().set_usd_to_inr_rate(rate).await;
        announce(self.notifier.as_ref(), "update rate", result)
    }

    /// Builds the support link for a contact message. Nothing is sent to the
    /// backend.
    #[must_use]
    pub fn contact(&self, form: &ContactForm, method: ContactMethod) -> Option<String> {
        let checked = form.validate().map(|()| form.support_link(method));
        report(self.notifier.as_ref(), "contact support", checked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ORDER_PLACED;
    use crate::api::transport::RequestBody;
    use crate::errors::Result;
    use crate::models::Currency;
    use crate::test_utils::{RecordingNotifier, setup_session, user_json};
    use serde_json::json;

    fn product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Acid Red 88".to_string(),
            price: 120.0,
            currency: Currency::Inr,
            ..Product::default()
        }
    }

    fn buy_form() -> BuyForm {
        BuyForm {
            name: "Kiran".to_string(),
            contact: "98765 43210".to_string(),
            quantity: 2.0,
            ..BuyForm::default()
        }
    }

    #[tokio::test]
    async fn test_buy_returns_whatsapp_link_to_seller() -> Result<()> {
        let (session, mock) = setup_session().await?;
        mock.push(201, json!({}));
        mock.push(
            200,
            json!({"username": "Acme", "email": "sales@acme.in", "countryCode": "+91", "phoneNumber": "9000000001"}),
        );
        let notifier = RecordingNotifier::new();
        let screens = FormScreens::new(Arc::new(session), notifier.clone());

        let purchase = screens.buy(&product(), &buy_form(), ContactMethod::Whatsapp).await;
        let link = purchase.seller_link().unwrap();
        assert!(link.starts_with("https://wa.me/919000000001?text=New%20Order%3A"));
        assert!(link.contains("Subtotal%3A%20%E2%82%B9240.00"));
        assert_eq!(notifier.successes(), vec![ORDER_PLACED]);

        let requests = mock.requests();
        assert_eq!(requests[0].path, "buy/p1");
        assert_eq!(requests[1].path, "seller/contact/p1");
        let RequestBody::Json(body) = &requests[0].body else {
            panic!("expected a JSON body");
        };
        assert_eq!(body["buyerContact"], "+9198765 43210");
        Ok(())
    }

    #[tokio::test]
    async fn test_email_buyer_reaches_seller_on_whatsapp() -> Result<()> {
        let (session, mock) = setup_session().await?;
        mock.push(201, json!({}));
        mock.push(
            200,
            json!({"email": "sales@acme.in", "countryCode": "+91", "phoneNumber": "9000000001"}),
        );
        let screens = FormScreens::new(Arc::new(session), RecordingNotifier::new());
        let form = BuyForm {
            contact: "kiran@example.com".to_string(),
            contact_method: ContactMethod::Email,
            ..buy_form()
        };

        let purchase = screens.buy(&product(), &form, ContactMethod::Whatsapp).await;
        let link = purchase.seller_link().unwrap();
        assert!(link.starts_with("https://wa.me/919000000001?text="));
        // the summary still names how the buyer can be reached
        assert!(link.contains("Contact%3A%20email%20-%20kiran%40example.com"));
        let RequestBody::Json(body) = &mock.requests()[0].body else {
            panic!("expected a JSON body");
        };
        assert_eq!(body["buyerContact"], "kiran@example.com");
        Ok(())
    }

    #[tokio::test]
    async fn test_order_stands_without_seller_contact() -> Result<()> {
        let (session, mock) = setup_session().await?;
        mock.push(201, json!({}));
        mock.push(404, json!({"message": "Seller not found"}));
        let notifier = RecordingNotifier::new();
        let screens = FormScreens::new(Arc::new(session), notifier.clone());

        let purchase = screens.buy(&product(), &buy_form(), ContactMethod::Phone).await;
        assert_eq!(purchase, Purchase::Placed);
        assert!(purchase.is_placed());
        assert!(purchase.seller_link().is_none());
        assert_eq!(notifier.successes(), vec![ORDER_PLACED]);
        assert_eq!(notifier.errors(), vec!["Seller not found"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_buy_validation_blocks_request() -> Result<()> {
        let (session, mock) = setup_session().await?;
        let notifier = RecordingNotifier::new();
        let screens = FormScreens::new(Arc::new(session), notifier.clone());

        let form = BuyForm {
            contact: " ".to_string(),
            ..buy_form()
        };
        let purchase = screens.buy(&product(), &form, ContactMethod::Whatsapp).await;
        assert_eq!(purchase, Purchase::NotPlaced);
        assert_eq!(notifier.errors(), vec!["Contact detail is required"]);
        assert!(mock.requests().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_login_and_logout_through_session() -> Result<()> {
        let (session, mock) = setup_session().await?;
        mock.push(200, user_json("u1", "Asha", "seller"));
        mock.push(200, json!({}));
        let notifier = RecordingNotifier::new();
        let session = Arc::new(session);
        let screens = FormScreens::new(session.clone(), notifier.clone());

        let form = LoginForm {
            email: "asha@example.com".to_string(),
            password: "pw".to_string(),
        };
        assert!(screens.login(&form).await);
        assert!(session.is_authenticated().await?);
        assert!(screens.logout().await);
        assert!(session.user().await?.is_none());
        assert_eq!(
            notifier.successes(),
            vec!["User logged in successfully", "User logged out successfully"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_contact_link_needs_no_network() -> Result<()> {
        let (session, mock) = setup_session().await?;
        let notifier = RecordingNotifier::new();
        let screens = FormScreens::new(Arc::new(session), notifier.clone());

        let form = ContactForm {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            subject: "Bulk order".to_string(),
            message: "Need 2 tonnes".to_string(),
        };
        let link = screens.contact(&form, ContactMethod::Email).unwrap();
        assert!(link.starts_with("mailto:chemstock74@gmail.com?subject=Bulk%20order&body="));

        let empty = ContactForm::default();
        assert!(screens.contact(&empty, ContactMethod::Whatsapp).is_none());
        assert_eq!(notifier.errors(), vec!["Name is required"]);
        assert!(mock.requests().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_rate_rejected_locally() -> Result<()> {
        let (session, mock) = setup_session().await?;
        let notifier = RecordingNotifier::new();
        let screens = FormScreens::new(Arc::new(session), notifier.clone());

        assert!(!screens.update_rate(0.0).await);
        assert_eq!(notifier.errors(), vec!["Invalid USD to INR rate: 0"]);
        assert!(mock.requests().is_empty());
        Ok(())
    }
}
