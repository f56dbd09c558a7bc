use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

/// Header carrying a short diagnostic on configuration failures.
pub const ERROR_HEADER: &str = "X-Error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing Square credentials")]
    Configuration,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Bad gateway: {0}")]
    BadGateway(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MissingCredentials => AppError::Configuration,
            DomainError::InvalidInput(msg) => AppError::BadRequest(msg),
            e @ (DomainError::MissingCheckoutUrl | DomainError::Provider(_)) => {
                AppError::BadGateway(e.to_string())
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Configuration => HttpResponse::InternalServerError()
                .insert_header((ERROR_HEADER, self.to_string()))
                .json(serde_json::json!({
                    "error": "Internal server error"
                })),
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": self.to_string()
            })),
            // Upstream details stay in the logs.
            AppError::BadGateway(_) => HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Bad gateway"
            })),
        }
    }
}
