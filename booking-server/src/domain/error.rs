use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("phone number already registered")]
    DuplicatePhone,
    #[error("invalid phone number or password")]
    InvalidCredentials,
    #[error("authentication required")]
    Unauthenticated,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid {0}")]
    InvalidField(&'static str),
    #[error("user not found: {0}")]
    UserNotFound(Uuid),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::DuplicatePhone => StatusCode::CONFLICT,
            DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            DomainError::Unauthenticated => StatusCode::SEE_OTHER,
            DomainError::MissingField(_) | DomainError::InvalidField(_) => StatusCode::BAD_REQUEST,
            DomainError::UserNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // A missing session is not an error page: send the client to the
        // login form instead.
        if matches!(self, DomainError::Unauthenticated) {
            return HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/login"))
                .finish();
        }

        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(format!(
                "<!DOCTYPE html><html><body><h1>Something went wrong</h1><p>{}</p></body></html>",
                self
            ))
    }
}
