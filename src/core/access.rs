//! Access gate for the admin and seller areas.

use crate::errors::{Error, Result};
use crate::models::{Role, User};

/// Where the home page lives; wrong-role visitors are sent there.
pub const HOME: &str = "/";

/// Outcome of checking a session against an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Not logged in: show the login form
    ShowLogin,
    /// Logged in with the area's role
    Granted,
    /// Logged in with another role
    Redirect(&'static str),
}

/// Decides what a visitor of an area restricted to `role` gets.
#[must_use]
pub fn gate(is_authenticated: bool, user: Option<&User>, role: Role) -> Access {
    match user {
        Some(user) if is_authenticated && user.role == role => Access::Granted,
        Some(_) if is_authenticated => Access::Redirect(HOME),
        _ => Access::ShowLogin,
    }
}

/// Returns the user if the gate grants access, the matching error otherwise.
///
/// # Errors
/// [`Error::NotAuthenticated`] when the login form would be shown,
/// [`Error::Forbidden`] when the visitor would be redirected.
pub fn require(is_authenticated: bool, user: Option<&User>, role: Role) -> Result<&User> {
    match (gate(is_authenticated, user, role), user) {
        (Access::Granted, Some(user)) => Ok(user),
        (Access::Redirect(_), Some(user)) => Err(Error::Forbidden {
            role: user.role.to_string(),
        }),
        _ => Err(Error::NotAuthenticated),
    }
}
