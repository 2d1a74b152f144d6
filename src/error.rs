use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::models::{ApiError, ApiResponse, FieldErrors};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(FieldErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::ValidationError(fields) => {
                log::warn!("Validation error: {fields}");
                ApiError {
                    code: "VALIDATION_ERROR".to_string(),
                    message: "One or more validation errors occurred".to_string(),
                    fields: Some(fields.clone()),
                }
            }
            AppError::BadRequest(msg) => {
                log::warn!("Bad request: {msg}");
                ApiError::new("BAD_REQUEST", msg)
            }
            AppError::NotFound(msg) => ApiError::new("NOT_FOUND", msg),
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                ApiError::new("DATABASE_ERROR", "Database error")
            }
            _ => {
                log::error!("Internal error: {self}");
                ApiError::new("INTERNAL_ERROR", "Internal server error")
            }
        };

        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::failure(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn validation_error_carries_field_map() {
        let mut fields = FieldErrors::default();
        fields.add("description", "Description is required.");
        let resp = AppError::ValidationError(fields).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            json["error"]["fields"]["description"][0],
            "Description is required."
        );
    }

    #[actix_web::test]
    async fn database_error_hides_driver_message() {
        let err = AppError::DatabaseError(sea_orm::DbErr::Custom("connection reset".into()));
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "DATABASE_ERROR");
        assert_eq!(json["error"]["message"], "Database error");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::NotFound("Order 7 not found".into());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("Order 7"));
    }
}
