//! Normalized JSON error responses
//!
//! Every error that reaches a client has the shape `{"error": ..., "code": ...}`.
//! Errors with a 5xx status are logged in full and rendered with an opaque
//! message.

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::errors::SnaplinkError;

pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";
pub const CONTENT_TYPE_REQUIRED_MESSAGE: &str = "Content-Type: application/json header is required";
pub const INVALID_BODY_MESSAGE: &str = "invalid request body";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            error: message.into(),
            code: status.as_u16(),
        }
    }

    pub fn into_response(self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
            .json(self)
    }
}

/// 通用 500 响应，不泄露内部细节
pub fn internal_error_response() -> HttpResponse {
    ErrorBody::new(INTERNAL_ERROR_MESSAGE, StatusCode::INTERNAL_SERVER_ERROR).into_response()
}

impl ResponseError for SnaplinkError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_masked() {
            error!(code = self.code(), "masking internal error: {}", self);
            return internal_error_response();
        }
        ErrorBody::new(self.message(), self.http_status()).into_response()
    }
}

/// Error handler for the JSON body extractor.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("rejecting request body: {}", err);
    match err {
        JsonPayloadError::ContentType => SnaplinkError::validation(CONTENT_TYPE_REQUIRED_MESSAGE),
        _ => SnaplinkError::validation(INVALID_BODY_MESSAGE),
    }
    .into()
}
