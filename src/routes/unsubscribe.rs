use std::fmt::Debug;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use anyhow::Context;
use serde::Deserialize;

use super::error_chain_fmt;
use crate::store::PublicStore;

#[derive(Deserialize)]
pub struct UnsubscribeParams {
    email: Option<String>,
}

/// Unlike the JSON API, this endpoint is hit straight from a mail client, so
/// errors are plain text.
#[derive(thiserror::Error)]
pub enum UnsubscribeError {
    #[error("Email is required.")]
    MissingEmail,
    #[error("Failed to unsubscribe.")]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for UnsubscribeError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for UnsubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingEmail => StatusCode::BAD_REQUEST,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::UnexpectedError(_) = self {
            tracing::error!(
                error.cause_chain=?self,
                error.message=%self,
                "request failed"
            );
        }
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.to_string())
    }
}

/// `GET /api/unsubscribe?email=john@foo.com`
///
/// Deactivates the subscription for `email`, if there is one. The response is
/// the same whether or not the address was ever subscribed, so this can't be
/// used to probe the list.
#[tracing::instrument(name = "Unsubscribing", skip(params, store))]
pub async fn unsubscribe(
    params: web::Query<UnsubscribeParams>,
    store: web::Data<PublicStore>,
) -> Result<HttpResponse, UnsubscribeError> {
    let email = params
        .0
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or(UnsubscribeError::MissingEmail)?
        .to_lowercase();

    store
        .unsubscribe(&email)
        .await
        .context("Failed to deactivate subscriber")?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(include_str!("./unsubscribed.html")))
}
