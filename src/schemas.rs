//! Persisted record shapes, one per collection.
//!
//! Every collection is append-only: records are inserted with a
//! store-assigned `_id` and never updated or deleted. No uniqueness
//! constraint (email, slug) is enforced at this layer.

use serde::{Deserialize, Serialize};

pub const USER_COLLECTION: &str = "user";
pub const BLOGPOST_COLLECTION: &str = "blogpost";
pub const CONTACTMESSAGE_COLLECTION: &str = "contactmessage";

/// Registered account. `password_hash` holds the submitted password
/// verbatim; hashing is an open hardening decision, not silently added.
#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Blogpost {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub author: String,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Contactmessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blogpost_optional_fields_default() {
        let post: Blogpost = serde_json::from_value(serde_json::json!({
            "title": "Hello",
            "slug": "hello",
            "content": "World",
            "author": "A",
        }))
        .unwrap();

        assert_eq!(post.excerpt, None);
        assert_eq!(post.cover_image, None);
        assert!(post.tags.is_empty());
    }

    #[test]
    fn blogpost_persists_null_for_absent_optionals() {
        let post = Blogpost {
            title: "Hello".into(),
            slug: "hello".into(),
            excerpt: None,
            content: "World".into(),
            author: "A".into(),
            cover_image: None,
            tags: vec![],
        };

        let doc = mongodb::bson::to_document(&post).unwrap();
        assert_eq!(doc.get("excerpt"), Some(&mongodb::bson::Bson::Null));
        assert_eq!(doc.get_str("title").unwrap(), "Hello");
    }
}
