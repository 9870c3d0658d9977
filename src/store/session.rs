use super::state::{add_tracked_request, delete_value, get_value, set_value, tracked_request_ids};
use crate::api::ApiClient;
use crate::core::access;
use crate::core::forms::{LoginForm, SignupForm};
use crate::errors::{Error, Result};
use crate::models::{Currency, Role, User};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

const USER: &str = "user";
const CURRENCY: &str = "currency";
const IS_AUTHENTICATED: &str = "isAuthenticated";
const IS_LOGGED_IN: &str = "isLoggedIn";
const REQUESTS_COUNT: &str = "requestsCount";
const COOKIE: &str = "cookie";

/// Everything the store holds, read in one go.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub user: Option<User>,
    /// Ids of stock requests submitted from this client
    pub requests: Vec<String>,
    /// Display currency
    pub currency: Currency,
    /// Whether a user is logged in
    pub is_authenticated: bool,
    /// Requests assigned to the logged-in seller
    pub requests_count: u64,
    /// Set once any login or registration succeeded on this client
    pub is_logged_in: bool,
}

/// The persisted client session: store fields plus the API client whose
/// cookie it keeps across runs.
pub struct Session {
    db: DatabaseConnection,
    api: Arc<ApiClient>,
    store: String,
}

impl Session {
    /// Opens the session saved under `store` and restores its cookie into `api`.
    pub async fn open(
        db: DatabaseConnection,
        api: Arc<ApiClient>,
        store: impl Into<String>,
    ) -> Result<Self> {
        let session = Self {
            db,
            api,
            store: store.into(),
        };
        let cookie: Option<String> = session.get(COOKIE).await?;
        debug!(store = %session.store, restored_cookie = cookie.is_some(), "session opened");
        session.api.set_cookie(cookie).await;
        Ok(session)
    }

    /// The API client carrying this session's cookie.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Shared handle to the API client, for views that outlive a borrow.
    #[must_use]
    pub fn api_handle(&self) -> Arc<ApiClient> {
        Arc::clone(&self.api)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        get_value(&self.db, &self.store, key).await
    }

    async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        set_value(&self.db, &self.store, key, value).await
    }

    /// Reads every stored field.
    pub async fn snapshot(&self) -> Result<StoreSnapshot> {
        Ok(StoreSnapshot {
            user: self.user().await?,
            requests: self.tracked_requests().await?,
            currency: self.currency().await?,
            is_authenticated: self.is_authenticated().await?,
            requests_count: self.requests_count().await?,
            is_logged_in: self.get(IS_LOGGED_IN).await?.unwrap_or(false),
        })
    }

    /// The logged-in user, if any.
    pub async fn user(&self) -> Result<Option<User>> {
        Ok(self.get::<Option<User>>(USER).await?.flatten())
    }

    /// Whether a user is logged in.
    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.get(IS_AUTHENTICATED).await?.unwrap_or(false))
    }

    /// Display currency, INR until switched.
    pub async fn currency(&self) -> Result<Currency> {
        Ok(self.get(CURRENCY).await?.unwrap_or_default())
    }

    /// Sets the display currency.
    pub async fn switch_currency(&self, currency: Currency) -> Result<()> {
        self.set(CURRENCY, &currency).await
    }

    /// Flips between INR and USD and returns the new display currency.
    pub async fn toggle_currency(&self) -> Result<Currency> {
        let next = self.currency().await?.toggled();
        self.switch_currency(next).await?;
        Ok(next)
    }

    /// Remembers a submitted request id. Returns `false` if it was already known.
    pub async fn track_request(&self, id: &str) -> Result<bool> {
        add_tracked_request(&self.db, &self.store, id).await
    }

    /// Ids of the requests submitted from this client, oldest first.
    pub async fn tracked_requests(&self) -> Result<Vec<String>> {
        tracked_request_ids(&self.db, &self.store).await
    }

    /// Stores the assigned request count shown on the seller badge.
    pub async fn set_requests_count(&self, count: u64) -> Result<()> {
        self.set(REQUESTS_COUNT, &count).await
    }

    /// The stored assigned request count.
    pub async fn requests_count(&self) -> Result<u64> {
        Ok(self.get(REQUESTS_COUNT).await?.unwrap_or(0))
    }

    /// Session cookie saved with the store.
    pub async fn cookie(&self) -> Result<Option<String>> {
        self.get(COOKIE).await
    }

    async fn save_cookie(&self) -> Result<()> {
        match self.api.cookie().await {
            Some(cookie) => self.set(COOKIE, &cookie).await,
            None => delete_value(&self.db, &self.store, COOKIE).await,
        }
    }

    async fn sign_in(&self, user: &User) -> Result<()> {
        self.set(USER, &Some(user)).await?;
        self.set(IS_AUTHENTICATED, &true).await?;
        self.set(IS_LOGGED_IN, &true).await?;
        self.save_cookie().await
    }

    /// Registers a seller and signs them in.
    ///
    /// # Errors
    /// A `409` (account exists) keeps its status and gets ". Please login"
    /// appended to the backend's message.
    pub async fn register(&self, form: &SignupForm) -> Result<String> {
        let user = match self.api.register(form).await {
            Ok(user) => user,
            Err(Error::Api {
                status: 409,
                message,
            }) => {
                return Err(Error::Api {
                    status: 409,
                    message: format!("{message}. Please login"),
                });
            }
            Err(e) => return Err(e),
        };
        self.sign_in(&user).await?;
        info!(user = %user.username, "session started after registration");
        Ok("User registered successfully".to_string())
    }

    /// Logs in and stores the user and cookie.
    pub async fn login(&self, form: &LoginForm) -> Result<String> {
        let user = self.api.login(form).await?;
        self.sign_in(&user).await?;
        info!(user = %user.username, "session started");
        Ok("User logged in successfully".to_string())
    }

    /// Logs out on the backend, then forgets the user and the cookie. The
    /// store is left untouched if the backend call fails.
    pub async fn logout(&self) -> Result<String> {
        self.api.logout().await?;
        self.set(USER, &None::<User>).await?;
        self.set(IS_AUTHENTICATED, &false).await?;
        self.save_cookie().await?;
        info!("session ended");
        Ok("User logged out successfully".to_string())
    }

    /// The logged-in user, if they may enter the area reserved for `role`.
    ///
    /// # Errors
    /// [`Error::NotAuthenticated`] or [`Error::Forbidden`] per the access gate.
    pub async fn require(&self, role: Role) -> Result<User> {
        let user = self.user().await?;
        let authenticated = self.is_authenticated().await?;
        access::require(authenticated, user.as_ref(), role).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResponse;
    use crate::test_utils::{MockTransport, setup_session, user_json};
    use serde_json::json;

    fn signup() -> SignupForm {
        SignupForm {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "pw".to_string(),
            country_code: "+91".to_string(),
            phone: "9876543210".to_string(),
            company: "Asha Dyes".to_string(),
            ..SignupForm::default()
        }
    }

    fn login_form() -> LoginForm {
        LoginForm {
            email: "asha@example.com".to_string(),
            password: "pw".to_string(),
        }
    }

    #[tokio::test]
    async fn test_defaults() -> Result<()> {
        let (session, _mock) = setup_session().await?;
        assert_eq!(session.snapshot().await?, StoreSnapshot::default());
        assert_eq!(session.currency().await?, Currency::Inr);
        Ok(())
    }

    #[tokio::test]
    async fn test_currency_switch_persists() -> Result<()> {
        let (session, _mock) = setup_session().await?;
        assert_eq!(session.toggle_currency().await?, Currency::Usd);
        assert_eq!(session.currency().await?, Currency::Usd);

        session.switch_currency(Currency::Inr).await?;
        assert_eq!(session.snapshot().await?.currency, Currency::Inr);
        Ok(())
    }

    #[tokio::test]
    async fn test_track_request_ignores_duplicates() -> Result<()> {
        let (session, _mock) = setup_session().await?;
        assert!(session.track_request("r1").await?);
        assert!(!session.track_request("r1").await?);
        assert!(session.track_request("r2").await?);
        assert_eq!(session.tracked_requests().await?, vec!["r1", "r2"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_login_stores_user_and_cookie() -> Result<()> {
        let (session, mock) = setup_session().await?;
        mock.push_response(ApiResponse {
            status: 200,
            body: user_json("u1", "Asha", "seller"),
            set_cookies: vec!["token=abc; HttpOnly".to_string()],
        });

        let message = session.login(&login_form()).await?;
        assert_eq!(message, "User logged in successfully");

        let snapshot = session.snapshot().await?;
        assert!(snapshot.is_authenticated);
        assert!(snapshot.is_logged_in);
        assert_eq!(snapshot.user.map(|u| u.id).as_deref(), Some("u1"));
        assert_eq!(session.cookie().await?.as_deref(), Some("token=abc"));
        assert_eq!(session.require(Role::Seller).await?.id, "u1");
        assert!(matches!(
            session.require(Role::Admin).await,
            Err(Error::Forbidden { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_login_leaves_store_untouched() -> Result<()> {
        let (session, mock) = setup_session().await?;
        mock.push(401, json!({"message": "Invalid credentials"}));

        let err = session.login(&login_form()).await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid credentials");
        assert_eq!(session.snapshot().await?, StoreSnapshot::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_register_conflict_suggests_login() -> Result<()> {
        let (session, mock) = setup_session().await?;
        mock.push(409, json!({"message": "User already exists"}));

        let err = session.register(&signup()).await.unwrap_err();
        assert_eq!(err.user_message(), "User already exists. Please login");
        assert!(!session.is_authenticated().await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_register_signs_in() -> Result<()> {
        let (session, mock) = setup_session().await?;
        mock.push(201, user_json("u7", "Asha", "seller"));

        assert_eq!(session.register(&signup()).await?, "User registered successfully");
        assert!(session.is_authenticated().await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_logout_clears_user() -> Result<()> {
        let (session, mock) = setup_session().await?;
        mock.push_response(ApiResponse {
            status: 200,
            body: user_json("u1", "Asha", "seller"),
            set_cookies: vec!["token=abc".to_string()],
        });
        mock.push(200, json!({}));
        session.login(&login_form()).await?;

        assert_eq!(session.logout().await?, "User logged out successfully");
        let snapshot = session.snapshot().await?;
        assert!(snapshot.user.is_none());
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.is_logged_in);
        assert!(session.cookie().await?.is_none());
        assert!(matches!(
            session.require(Role::Seller).await,
            Err(Error::NotAuthenticated)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_open_restores_cookie() -> Result<()> {
        let (session, mock) = setup_session().await?;
        session.set(COOKIE, "token=saved").await?;

        let reopened = Session::open(session.db.clone(), Arc::new(ApiClient::new(mock.clone())), "chemstock-storage").await?;
        assert_eq!(reopened.api().cookie().await.as_deref(), Some("token=saved"));
        Ok(())
    }
}
