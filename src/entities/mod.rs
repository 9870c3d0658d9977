//! Entity module - SeaORM entities of the persisted client store.
//! Each entity has a Model struct for data and an Entity struct for operations.

/// Key/value rows of the persisted session
pub mod session_state;
/// Ids of requests submitted from this client
pub mod tracked_request;

pub use session_state::{
    Column as SessionStateColumn, Entity as SessionState, Model as SessionStateModel,
};
pub use tracked_request::{
    Column as TrackedRequestColumn, Entity as TrackedRequest, Model as TrackedRequestModel,
};
