//! HTTP boundary error type
//!
//! Every failure that reaches the client goes through [`ApiError`]: domain
//! errors returned by services, gate rejections raised by the middleware,
//! extractor failures, the route fallback and recovered panics.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use hc_core::errors::{DomainError, TokenError};
use hc_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Malformed JSON body, query string or path segment
    #[error("{0}")]
    BadRequest(String),

    /// Request body parsed but failed field validation
    #[error("Request validation failed")]
    InvalidInput(#[from] ValidationErrors),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("The requested route does not exist")]
    RouteNotFound,

    #[error("Internal server error")]
    Panic,

    /// Any other framework error, keeping its status
    #[error("{message}")]
    Status { status: StatusCode, message: String },
}

impl ApiError {
    /// Rebuild an `ApiError` from a framework error of unknown origin
    pub fn from_actix(err: &actix_web::Error, status: StatusCode) -> Self {
        if let Some(api_error) = err.as_error::<ApiError>() {
            return api_error.clone();
        }
        Self::from_status(status, err.to_string())
    }

    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(message.into()),
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message.into()),
            StatusCode::FORBIDDEN => Self::Forbidden(message.into()),
            _ => Self::Status {
                status,
                message: message.into(),
            },
        }
    }

    /// Machine-readable error code placed in the `error` field
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Domain(err) => match err {
                DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
                DomainError::NotFound { .. } => error_codes::NOT_FOUND,
                DomainError::Conflict { .. } => error_codes::CONFLICT,
                DomainError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
                DomainError::Unauthorized => error_codes::UNAUTHORIZED,
                DomainError::Forbidden { .. } => error_codes::FORBIDDEN,
                DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
                DomainError::Token(TokenError::Expired) => error_codes::TOKEN_EXPIRED,
                DomainError::Token(TokenError::GenerationFailed) => error_codes::INTERNAL_ERROR,
                DomainError::Token(_) => error_codes::TOKEN_INVALID,
            },
            ApiError::BadRequest(_) => error_codes::BAD_REQUEST,
            ApiError::InvalidInput(_) => error_codes::VALIDATION_ERROR,
            ApiError::Unauthorized(_) => error_codes::UNAUTHORIZED,
            ApiError::Forbidden(_) => error_codes::FORBIDDEN,
            ApiError::RouteNotFound => error_codes::ROUTE_NOT_FOUND,
            ApiError::Panic => error_codes::INTERNAL_ERROR,
            ApiError::Status { status, .. } if status.is_server_error() => error_codes::INTERNAL_ERROR,
            ApiError::Status { status, .. } if *status == StatusCode::NOT_FOUND => error_codes::NOT_FOUND,
            ApiError::Status { .. } => error_codes::BAD_REQUEST,
        }
    }

    /// Structured body, with internal details withheld from the client
    pub fn body(&self) -> ErrorResponse {
        let message = if self.status_code().is_server_error() {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse::new(self.code(), message);
        match self {
            ApiError::InvalidInput(errors) => body.add_detail("fields", errors),
            ApiError::Domain(DomainError::NotFound { resource }) => body.add_detail("resource", resource),
            _ => body,
        }
    }

    /// Render the error with the request's correlation identifier
    pub fn render(&self, request_id: Option<String>) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body().with_request_id(request_id))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => match err {
                DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Conflict { .. } => StatusCode::CONFLICT,
                DomainError::InvalidCredentials | DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
                DomainError::Forbidden { .. } => StatusCode::FORBIDDEN,
                DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                DomainError::Token(TokenError::GenerationFailed) => StatusCode::INTERNAL_SERVER_ERROR,
                DomainError::Token(_) => StatusCode::UNAUTHORIZED,
            },
            ApiError::BadRequest(_) | ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Panic => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Status { status, .. } => *status,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.render(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_domain_status_mapping() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::not_found("drug"), StatusCode::NOT_FOUND),
            (DomainError::conflict("taken"), StatusCode::CONFLICT),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
            (DomainError::forbidden("no"), StatusCode::FORBIDDEN),
            (DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::Token(TokenError::Expired), StatusCode::UNAUTHORIZED),
            (DomainError::Token(TokenError::WrongPurpose), StatusCode::UNAUTHORIZED),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let body = ApiError::from(DomainError::internal("db password leaked")).body();
        assert_eq!(body.error, error_codes::INTERNAL_ERROR);
        assert!(!body.message.contains("password"));
    }

    #[test]
    fn test_validation_details() {
        #[derive(Validate)]
        struct Probe {
            #[validate(email)]
            email: String,
        }

        let errors = Probe { email: "nope".into() }.validate().unwrap_err();
        let body = ApiError::from(errors).body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], error_codes::VALIDATION_ERROR);
        assert!(json["details"]["fields"].get("email").is_some());
    }

    #[test]
    fn test_from_actix_keeps_api_errors() {
        let err: actix_web::Error = ApiError::RouteNotFound.into();
        let back = ApiError::from_actix(&err, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(back, ApiError::RouteNotFound));

        let foreign = actix_web::error::ErrorMethodNotAllowed("nope");
        let mapped = ApiError::from_actix(&foreign, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(mapped.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(mapped.code(), error_codes::BAD_REQUEST);
    }
}
