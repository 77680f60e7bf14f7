//! # MongoDB
//!
//! Document store holding every persisted collection.
//!
//! One `Database` handle is built at startup and shared for the process
//! lifetime. There is no reconnect or health-check policy here; the
//! diagnostics route passively reports reachability.

use futures::TryStreamExt;
use mongodb::{
    bson::{to_document, Document},
    Client, Database,
};
use serde::Serialize;

use crate::error::AppError;

pub async fn init_mongo(url: &str, name: &str) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(url).await?;

    Ok(client.database(name))
}

/// Inserts one record into the named collection and returns the
/// store-assigned identifier rendered as text. Store errors propagate
/// unchanged, no retry.
pub async fn insert_document<T: Serialize>(
    db: &Database,
    collection: &str,
    record: &T,
) -> Result<String, AppError> {
    let doc = to_document(record)?;

    let result = db.collection::<Document>(collection).insert_one(doc).await?;

    Ok(match result.inserted_id.as_object_id() {
        Some(oid) => oid.to_hex(),
        None => result.inserted_id.to_string(),
    })
}

/// Fetches up to `limit` raw documents matching `filter` (an empty
/// filter matches all). No ordering guarantee.
pub async fn fetch_documents(
    db: &Database,
    collection: &str,
    filter: Document,
    limit: i64,
) -> Result<Vec<Document>, AppError> {
    let cursor = db
        .collection::<Document>(collection)
        .find(filter)
        .limit(limit)
        .await?;

    Ok(cursor.try_collect().await?)
}
