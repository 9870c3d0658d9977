//! Store database connection and table creation.
//!
//! The persisted client store lives in SQLite through `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`
//! and created only if missing, so reopening an existing store keeps its rows.

use crate::entities::{SessionState, TrackedRequest};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::debug;

/// Opens the store at `store_url` and makes sure its tables exist.
///
/// # Errors
/// Returns an error if the database cannot be opened or a table cannot be created.
pub async fn create_connection(store_url: &str) -> Result<DatabaseConnection> {
    debug!(%store_url, "opening session store");
    let db = Database::connect(store_url).await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Creates the store tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut session_table = schema.create_table_from_entity(SessionState);
    let mut tracked_table = schema.create_table_from_entity(TrackedRequest);

    session_table.if_not_exists();
    tracked_table.if_not_exists();

    db.execute(builder.build(&session_table)).await?;
    db.execute(builder.build(&tracked_table)).await?;

    Ok(())
}
