use super::client::ApiClient;
use super::transport::Method;
use crate::core::forms::{LoginForm, SignupForm, Validate};
use crate::errors::Result;
use crate::models::User;
use serde_json::json;
use tracing::info;

impl ApiClient {
    /// Registers a seller account. The backend answers `201` with the new user
    /// and sets the session cookie.
    ///
    /// # Errors
    /// A validation error before anything is sent, or the backend's rejection
    /// (`409` when the email is already registered).
    pub async fn register(&self, form: &SignupForm) -> Result<User> {
        form.validate()?;
        let body = self
            .send_json(Method::Post, "user/register", form.payload())
            .await?;
        let user: User = serde_json::from_value(body)?;
        info!(user = %user.username, "registered");
        Ok(user)
    }

    /// Logs in with email and password, returning the account.
    pub async fn login(&self, form: &LoginForm) -> Result<User> {
        form.validate()?;
        let body = self
            .send_json(
                Method::Post,
                "user/login",
                json!({ "email": form.email.trim(), "password": form.password }),
            )
            .await?;
        let user: User = serde_json::from_value(body)?;
        info!(user = %user.username, role = %user.role, "logged in");
        Ok(user)
    }

    /// Ends the backend session and forgets the local cookie.
    pub async fn logout(&self) -> Result<()> {
        self.send_json(Method::Post, "user/logout", json!({})).await?;
        self.set_cookie(None).await;
        Ok(())
    }
}
