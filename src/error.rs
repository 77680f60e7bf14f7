use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database not configured")]
    DatabaseNotConfigured,

    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    #[error("{0}")]
    Encode(#[from] mongodb::bson::ser::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseNotConfigured
            | AppError::Database { .. }
            | AppError::Encode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_database_is_internal_error() {
        let response = AppError::DatabaseNotConfigured.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_failure_is_unprocessable() {
        use validator::Validate;

        let errors = crate::routes::ContactPayload {
            name: "A".into(),
            email: "not-an-email".into(),
            subject: "Hi".into(),
            message: "Hello".into(),
        }
        .validate()
        .unwrap_err();

        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
