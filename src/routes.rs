use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;
use validator::Validate;

use crate::{
    database::{fetch_documents, insert_document},
    error::AppError,
    schemas::{
        Blogpost, Contactmessage, User, BLOGPOST_COLLECTION, CONTACTMESSAGE_COLLECTION,
        USER_COLLECTION,
    },
    state::AppState,
};

pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Car Rental SaaS Backend is running" }))
}

pub async fn hello_handler() -> Json<Value> {
    Json(json!({ "message": "Hello from the backend API!" }))
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Ok,
    NotSet,
    NotConfigured,
    Unreachable,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    NotConnected,
}

#[derive(Serialize)]
pub struct DiagnosticsReport {
    pub backend: CheckOutcome,
    pub database: CheckOutcome,
    pub database_url: CheckOutcome,
    pub database_name: CheckOutcome,
    pub connection_status: ConnectionStatus,
    pub collections: Vec<String>,
}

/// Reports the health of every configured dependency. Each sub-check is
/// isolated, so this route answers 200 even when the database is down.
pub async fn diagnostics_handler(State(state): State<Arc<AppState>>) -> Json<DiagnosticsReport> {
    let database_url = presence(&state.config.database_url);
    let database_name = presence(&state.config.database_name);

    let (database, connection_status, collections) = match &state.db {
        None => (
            CheckOutcome::NotConfigured,
            ConnectionStatus::NotConnected,
            Vec::new(),
        ),
        Some(db) => match db.list_collection_names().await {
            Ok(mut names) => {
                names.truncate(10);
                (CheckOutcome::Ok, ConnectionStatus::Connected, names)
            }
            Err(e) => {
                warn!("Database unreachable during diagnostics: {e}");
                (
                    CheckOutcome::Unreachable,
                    ConnectionStatus::NotConnected,
                    Vec::new(),
                )
            }
        },
    };

    Json(DiagnosticsReport {
        backend: CheckOutcome::Ok,
        database,
        database_url,
        database_name,
        connection_status,
        collections,
    })
}

fn presence(value: &Option<String>) -> CheckOutcome {
    match value {
        Some(_) => CheckOutcome::Ok,
        None => CheckOutcome::NotSet,
    }
}

#[derive(Deserialize, Validate)]
pub struct RegisterPayload {
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
}

pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;

    let db = state.db.as_ref().ok_or(AppError::DatabaseNotConfigured)?;

    // The submitted password lands verbatim in the hash field. Picking a
    // hashing scheme is an open hardening decision, see DESIGN.md.
    let user = User {
        name: payload.name,
        email: payload.email,
        password_hash: payload.password,
    };

    let id = insert_document(db, USER_COLLECTION, &user).await?;

    Ok(Json(json!({ "status": "ok", "id": id })))
}

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

pub async fn list_blog_posts_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    let db = state.db.as_ref().ok_or(AppError::DatabaseNotConfigured)?;

    let mut posts = fetch_documents(db, BLOGPOST_COLLECTION, Document::new(), params.limit).await?;

    for post in &mut posts {
        rewrite_native_id(post);
    }

    Ok(Json(posts))
}

// ObjectIds do not survive plain JSON, so the native `_id` becomes a
// text `id` field before documents leave the API.
fn rewrite_native_id(doc: &mut Document) {
    if let Some(id) = doc.remove("_id") {
        let id = match id.as_object_id() {
            Some(oid) => oid.to_hex(),
            None => id.to_string(),
        };

        doc.insert("id", id);
    }
}

#[derive(Deserialize, Validate)]
pub struct BlogCreatePayload {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub author: String,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub async fn create_blog_post_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BlogCreatePayload>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;

    let db = state.db.as_ref().ok_or(AppError::DatabaseNotConfigured)?;

    let post = Blogpost {
        title: payload.title,
        slug: payload.slug,
        excerpt: payload.excerpt,
        content: payload.content,
        author: payload.author,
        cover_image: payload.cover_image,
        tags: payload.tags,
    };

    let id = insert_document(db, BLOGPOST_COLLECTION, &post).await?;

    Ok(Json(json!({ "status": "ok", "id": id })))
}

#[derive(Deserialize, Validate)]
pub struct ContactPayload {
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub subject: String,
    pub message: String,
}

pub async fn submit_contact_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactPayload>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;

    let db = state.db.as_ref().ok_or(AppError::DatabaseNotConfigured)?;

    let message = Contactmessage {
        name: payload.name,
        email: payload.email,
        subject: payload.subject,
        message: payload.message,
    };

    let id = insert_document(db, CONTACTMESSAGE_COLLECTION, &message).await?;

    Ok(Json(json!({ "status": "ok", "id": id })))
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{doc, oid::ObjectId};

    use super::*;

    #[test]
    fn native_id_becomes_text() {
        let oid = ObjectId::new();
        let mut post = doc! { "_id": oid, "title": "Hello" };

        rewrite_native_id(&mut post);

        assert!(!post.contains_key("_id"));
        assert_eq!(post.get_str("id").unwrap(), oid.to_hex());
        assert_eq!(post.get_str("title").unwrap(), "Hello");
    }

    #[test]
    fn document_without_native_id_is_untouched() {
        let mut post = doc! { "title": "Hello" };

        rewrite_native_id(&mut post);

        assert!(!post.contains_key("id"));
    }

    #[test]
    fn limit_defaults_to_ten() {
        let params: ListParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(params.limit, 10);
    }

    #[test]
    fn invalid_email_fails_validation() {
        let payload = ContactPayload {
            name: "A".into(),
            email: "not-an-email".into(),
            subject: "Hi".into(),
            message: "Hello".into(),
        };

        assert!(payload.validate().is_err());
    }
}
