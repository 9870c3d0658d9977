//! Persisted client session.
//!
//! Mirrors a browser's persisted store: the signed-in user, the display
//! currency, ids of submitted stock requests, and the seller's request count
//! survive restarts. Rows live in SQLite through `SeaORM`.

/// The session facade used by views and commands
pub mod session;
/// Key/value and tracked-request rows
pub mod state;

pub use session::{Session, StoreSnapshot};
