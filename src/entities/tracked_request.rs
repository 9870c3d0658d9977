//! Tracked request entity - ids of stock requests submitted from this client.
//!
//! Buyers post requests anonymously, so the ids are the only handle they have
//! for following them up on the "my inquiries" page.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tracked request database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tracked_requests")]
pub struct Model {
    /// Insertion order
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Store name the id belongs to
    pub store: String,
    /// Backend id of the stock request
    pub request_id: String,
    /// When the request was submitted
    pub created_at: DateTimeUtc,
}

/// `TrackedRequest` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
