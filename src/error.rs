use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failures reported by the catalog and itinerary store collaborators.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("invalid object id: {0}")]
    InvalidId(#[from] mongodb::bson::oid::Error),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum ItineraryError {
    #[error("start date must be on or before the end date")]
    InvalidRange,
    #[error("start date cannot be in the past")]
    PastDate,
    #[error("itinerary cannot exceed {max} days (requested {days})")]
    RangeTooLong { days: i64, max: u32 },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ResponseError for ItineraryError {
    fn status_code(&self) -> StatusCode {
        match self {
            ItineraryError::InvalidRange
            | ItineraryError::PastDate
            | ItineraryError::RangeTooLong { .. }
            | ItineraryError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ItineraryError::NotFound(_) => StatusCode::NOT_FOUND,
            ItineraryError::Forbidden(_) => StatusCode::FORBIDDEN,
            ItineraryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ItineraryError::Storage(err) => {
                log::error!("Storage failure: {}", err);
                "Internal storage error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}
