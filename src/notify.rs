//! User-facing notifications.
//!
//! Views report the outcome of every action through a [`Notifier`]: one
//! success or one error per action. The CLI prints them; tests record them.

use crate::errors::Error;

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// An action completed
    Success,
    /// An action failed
    Error,
    /// A follow-up is under way
    Loading,
}

/// Receives notifications from views.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: Level, message: &str);

    fn success(&self, message: &str) {
        self.notify(Level::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(Level::Error, message);
    }

    /// Progress of a long action, e.g. "Redirecting..."
    fn loading(&self, message: &str) {
        self.notify(Level::Loading, message);
    }

    /// Reports a failed action with its user-facing message.
    fn failure(&self, error: &Error) {
        self.error(&error.user_message());
    }
}

/// Prints successes to stdout and errors to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Success => println!("✔ {message}"),
            Level::Loading => println!("… {message}"),
            Level::Error => eprintln!("✘ {message}"),
        }
    }
}
