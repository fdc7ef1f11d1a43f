//! src/error.rs

use crate::domain::ValidationError;
use crate::email_client::TransportError;
use crate::routes::RelayResponse;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};

pub type RelayResult<T> = Result<T, Error>;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[derive(thiserror::Error)]
pub enum Error {
    #[error("Invalid contact submission")]
    ValidationError(#[from] ValidationError),
    #[error("Invalid request body")]
    InvalidBody(String),
    #[error("Email sending failed")]
    TransportError(#[from] TransportError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl Error {
    /// Diagnostic shown to the caller next to the summary message.
    fn detail(&self) -> Option<String> {
        match self {
            Error::ValidationError(e) => Some(e.to_string()),
            Error::InvalidBody(detail) => Some(detail.clone()),
            Error::TransportError(e) => Some(e.to_string()),
            // never leak internals of unexpected failures
            Error::UnexpectedError(_) => None,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ValidationError(_) | Error::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Error::TransportError(_) | Error::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(RelayResponse::failure(
            self.to_string(),
            self.detail(),
        ))
    }
}

/// Render JSON extractor failures (bad syntax, wrong content type, oversized
/// body) with the same response contract as every other relay error.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::InvalidBody(err.to_string()).into()
}
