//! Row-level access to the persisted store tables.

use crate::entities::{SessionState, TrackedRequest, session_state, tracked_request};
use crate::errors::Result;
use chrono::Utc;
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Reads one store field, `None` when it was never written.
pub async fn get_value<C, T>(db: &C, store: &str, key: &str) -> Result<Option<T>>
where
    C: ConnectionTrait,
    T: DeserializeOwned,
{
    let row = SessionState::find()
        .filter(session_state::Column::Store.eq(store))
        .filter(session_state::Column::Key.eq(key))
        .one(db)
        .await?;

    match row {
        Some(row) => Ok(Some(serde_json::from_str(&row.value)?)),
        None => Ok(None),
    }
}

/// Writes one store field, replacing any previous value.
pub async fn set_value<C, T>(db: &C, store: &str, key: &str, value: &T) -> Result<()>
where
    C: ConnectionTrait,
    T: Serialize + ?Sized,
{
    let encoded = serde_json::to_string(value)?;
    let now = Utc::now();

    let existing = SessionState::find()
        .filter(session_state::Column::Store.eq(store))
        .filter(session_state::Column::Key.eq(key))
        .one(db)
        .await?;

    if let Some(row) = existing {
        let mut active: session_state::ActiveModel = row.into();
        active.value = Set(encoded);
        active.updated_at = Set(now);
        active.update(db).await?;
    } else {
        session_state::ActiveModel {
            store: Set(store.to_string()),
            key: Set(key.to_string()),
            value: Set(encoded),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

/// Removes one store field.
pub async fn delete_value<C: ConnectionTrait>(db: &C, store: &str, key: &str) -> Result<()> {
    SessionState::delete_many()
        .filter(session_state::Column::Store.eq(store))
        .filter(session_state::Column::Key.eq(key))
        .exec(db)
        .await?;
    Ok(())
}

/// Appends a request id unless it is already tracked. Returns whether it was added.
pub async fn add_tracked_request<C: ConnectionTrait>(
    db: &C,
    store: &str,
    request_id: &str,
) -> Result<bool> {
    let existing = TrackedRequest::find()
        .filter(tracked_request::Column::Store.eq(store))
        .filter(tracked_request::Column::RequestId.eq(request_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(false);
    }

    tracked_request::ActiveModel {
        store: Set(store.to_string()),
        request_id: Set(request_id.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(true)
}

/// Tracked request ids in submission order.
pub async fn tracked_request_ids<C: ConnectionTrait>(db: &C, store: &str) -> Result<Vec<String>> {
    let rows = TrackedRequest::find()
        .filter(tracked_request::Column::Store.eq(store))
        .order_by_asc(tracked_request::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|row| row.request_id).collect())
}
