use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::constants::{
    CODE_BACKEND_UNAVAILABLE, CODE_INTERNAL_ERROR, ERR_BACKEND_UNAVAILABLE, ERR_VALIDATION_FAILED,
};
use crate::models::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    Unauthorized { code: String, message: String },
    NotFound { code: String, message: String },
    BadGateway { code: String, message: String },
    InternalServerError { code: String, message: String },
    ValidationError { code: String, errors: Vec<String> },
}

impl ApiError {
    /// Machine-readable code carried by every variant.
    pub fn code(&self) -> &str {
        match self {
            ApiError::BadRequest { code, .. }
            | ApiError::Unauthorized { code, .. }
            | ApiError::NotFound { code, .. }
            | ApiError::BadGateway { code, .. }
            | ApiError::InternalServerError { code, .. }
            | ApiError::ValidationError { code, .. } => code,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest { code, message } => {
                write!(f, "Bad Request [{}]: {}", code, message)
            }
            ApiError::Unauthorized { code, message } => {
                write!(f, "Unauthorized [{}]: {}", code, message)
            }
            ApiError::NotFound { code, message } => {
                write!(f, "Not Found [{}]: {}", code, message)
            }
            ApiError::BadGateway { code, message } => {
                write!(f, "Bad Gateway [{}]: {}", code, message)
            }
            ApiError::InternalServerError { code, message } => {
                write!(f, "Internal Server Error [{}]: {}", code, message)
            }
            ApiError::ValidationError { code, errors } => {
                write!(f, "Validation Error [{}]: {:?}", code, errors)
            }
        }
    }
}

fn envelope(code: &str, message: &str, errors: Option<Vec<String>>) -> ErrorResponse {
    ErrorResponse {
        success: false,
        code: code.to_string(),
        message: message.to_string(),
        errors,
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::BadRequest { code, message } => {
                HttpResponse::BadRequest().json(envelope(code, message, None))
            }
            ApiError::Unauthorized { code, message } => {
                HttpResponse::Unauthorized().json(envelope(code, message, None))
            }
            ApiError::NotFound { code, message } => {
                HttpResponse::NotFound().json(envelope(code, message, None))
            }
            ApiError::BadGateway { code, message } => {
                HttpResponse::BadGateway().json(envelope(code, message, None))
            }
            ApiError::InternalServerError { code, message } => {
                HttpResponse::InternalServerError().json(envelope(code, message, None))
            }
            ApiError::ValidationError { code, errors } => HttpResponse::BadRequest().json(
                envelope(code, ERR_VALIDATION_FAILED, Some(errors.clone())),
            ),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InternalServerError {
            code: CODE_INTERNAL_ERROR.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        log::error!("Auth backend request failed: {}", err);
        ApiError::BadGateway {
            code: CODE_BACKEND_UNAVAILABLE.to_string(),
            message: ERR_BACKEND_UNAVAILABLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let err = ApiError::Unauthorized {
            code: "X".to_string(),
            message: "nope".to_string(),
        };
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);

        let err = ApiError::BadGateway {
            code: "X".to_string(),
            message: "down".to_string(),
        };
        assert_eq!(err.error_response().status(), StatusCode::BAD_GATEWAY);

        let err = ApiError::ValidationError {
            code: "X".to_string(),
            errors: vec!["bad".to_string()],
        };
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_display_includes_code() {
        let err = ApiError::NotFound {
            code: "SESSION_NOT_FOUND".to_string(),
            message: "No active session".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Not Found [SESSION_NOT_FOUND]: No active session"
        );
        assert_eq!(err.code(), "SESSION_NOT_FOUND");
    }
}
