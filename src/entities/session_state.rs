//! Session state entity - key/value pairs of the persisted client store.
//!
//! One row per store field (`user`, `currency`, `is_authenticated`, ...), all
//! under the store name the client was configured with. Values are JSON text.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Persisted store field
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "session_state")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Store name, `"chemstock-storage"` unless configured otherwise
    pub store: String,
    /// Field name (e.g. `"currency"`)
    pub key: String,
    /// JSON-encoded field value
    pub value: String,
    /// When the field was last written
    pub updated_at: DateTimeUtc,
}

/// `SessionState` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
