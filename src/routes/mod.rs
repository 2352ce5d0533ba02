mod admin;
mod health_check;
mod home;
mod motivations;
mod subscriptions;
mod unsubscribe;

use std::fmt::Debug;
use std::fmt::Formatter;

use actix_web::error::JsonPayloadError;
use actix_web::error::QueryPayloadError;
use actix_web::http::StatusCode;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::ResponseError;
pub use admin::*;
pub use health_check::*;
pub use home::*;
pub use motivations::*;
use serde::Serialize;
pub use subscriptions::*;
pub use unsubscribe::*;

/// Print an error followed by each of its causes, one per line. Used for the
/// `Debug` impls of our error types, so that logs contain the full chain.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// The JSON API's error type. Every variant renders as `{"error": "..."}`,
/// where the message is the `Display` of the error (for the `anyhow`
/// variants, the outermost context only).
#[derive(thiserror::Error)]
pub enum ApiError {
    /// Malformed or out-of-range client input
    #[error("{0}")]
    ValidationError(String),
    /// Missing or incorrect admin credential
    #[error(transparent)]
    AuthError(anyhow::Error),
    /// The db call failed; details are logged, not returned
    #[error(transparent)]
    StorageError(#[from] anyhow::Error),
}

impl Debug for ApiError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::AuthError(_) => StatusCode::UNAUTHORIZED,
            Self::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::StorageError(_) => tracing::error!(
                error.cause_chain=?self,
                error.message=%self,
                "request failed"
            ),
            Self::AuthError(_) => tracing::warn!(
                error.cause_chain=?self,
                "rejected unauthorized request"
            ),
            Self::ValidationError(_) => {}
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

/// Registered with `web::JsonConfig`, so malformed bodies (bad JSON, wrongly
/// typed fields, wrong content type) get the same JSON 400 as any other
/// validation failure.
pub fn json_error_handler(
    err: JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    ApiError::ValidationError(format!("Invalid request body: {err}")).into()
}

/// Like `json_error_handler`, for query strings
pub fn query_error_handler(
    err: QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    ApiError::ValidationError(format!("Invalid query parameters: {err}")).into()
}
