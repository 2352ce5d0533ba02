use actix_web::web;
use actix_web::HttpResponse;
use anyhow::Context;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::SubscriberEmail;
use crate::store::PublicStore;
use crate::store::SubscribeOutcome;

/// `email` is taken as any JSON value, so that a number or object gets the same
/// "required" message as a missing field
#[derive(Deserialize)]
pub struct SubscribeData {
    email: Option<serde_json::Value>,
}

impl TryFrom<SubscribeData> for SubscriberEmail {
    type Error = String;
    fn try_from(value: SubscribeData) -> Result<Self, Self::Error> {
        match value.email.as_ref().and_then(serde_json::Value::as_str) {
            Some(email) if !email.trim().is_empty() => SubscriberEmail::parse(email),
            _ => Err("Email is required.".to_string()),
        }
    }
}

#[derive(Serialize)]
struct SubscribeResponse {
    message: &'static str,
}

/// `POST /api/subscribe`
///
/// Idempotent per (normalised) address: a new address is added (201), an
/// active one is left alone, an inactive one is reactivated (both 200).
/// There is no confirmation email; new subscribers are confirmed immediately.
///
/// # Request example
///
/// ```sh
///     curl --json '{"email": "john@foo.com"}' http://127.0.0.1:8000/api/subscribe
/// ```
#[tracing::instrument(
    name = "Adding new subscriber",
    skip(body, store),
    fields(subscriber_email=tracing::field::Empty)
)]
pub async fn subscribe(
    body: web::Json<SubscribeData>,
    store: web::Data<PublicStore>,
) -> Result<HttpResponse, ApiError> {
    let email: SubscriberEmail = body.0.try_into().map_err(ApiError::ValidationError)?;
    tracing::Span::current().record("subscriber_email", tracing::field::display(email.as_ref()));

    let outcome = store
        .subscribe(&email)
        .await
        .context("Failed to subscribe. Please try again.")?;

    let resp = match outcome {
        SubscribeOutcome::Created => HttpResponse::Created().json(SubscribeResponse {
            message: "You're subscribed! You'll receive a daily motivation in your inbox.",
        }),
        SubscribeOutcome::AlreadySubscribed => HttpResponse::Ok().json(SubscribeResponse {
            message: "You're already subscribed!",
        }),
        SubscribeOutcome::Reactivated => HttpResponse::Ok().json(SubscribeResponse {
            message: "Welcome back! Your subscription has been reactivated.",
        }),
    };
    Ok(resp)
}
