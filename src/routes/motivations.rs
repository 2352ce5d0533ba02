use actix_web::web;
use actix_web::HttpResponse;
use anyhow::Context;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::ApiError;
use crate::domain::MotivationText;
use crate::domain::NewMotivation;
use crate::store::PublicMotivation;
use crate::store::PublicStore;

/// Body of `POST /api/motivations`. Any other field (notably `status`) is
/// ignored.
#[derive(Debug, Deserialize)]
pub struct SubmissionData {
    text: Option<String>,
    author: Option<String>,
    is_anonymous: Option<bool>,
}

impl TryFrom<SubmissionData> for NewMotivation {
    type Error = String;
    fn try_from(value: SubmissionData) -> Result<Self, Self::Error> {
        let text = MotivationText::parse(value.text.unwrap_or_default())?;
        Ok(NewMotivation::new(
            text,
            value.author.as_deref(),
            value.is_anonymous.unwrap_or(false),
        ))
    }
}

#[derive(Serialize)]
struct SubmissionResponse {
    message: &'static str,
    id: Uuid,
}

#[derive(Serialize)]
struct RandomMotivationResponse {
    motivation: Option<PublicMotivation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

/// `POST /api/motivations`
///
/// Parse the submission, and store it for review. The new motivation is
/// always `pending`, and is not visible to anyone but admins until approved.
///
/// # Request example
///
/// ```sh
///     curl --json '{"text": "Keep going, you have got this.", "author": "Me"}' http://127.0.0.1:8000/api/motivations
/// ```
#[tracing::instrument(
    name = "Submitting new motivation",
    skip(body, store),
    fields(
        is_anonymous=tracing::field::Empty,
        motivation_id=tracing::field::Empty,
    )
)]
pub async fn submit_motivation(
    body: web::Json<SubmissionData>,
    store: web::Data<PublicStore>,
) -> Result<HttpResponse, ApiError> {
    let new_motivation: NewMotivation = body.0.try_into().map_err(ApiError::ValidationError)?;
    tracing::Span::current().record("is_anonymous", new_motivation.is_anonymous);

    let id = store
        .insert_motivation(&new_motivation)
        .await
        .context("Failed to submit motivation")?;
    tracing::Span::current().record("motivation_id", tracing::field::display(id));

    Ok(HttpResponse::Created().json(SubmissionResponse {
        message: "Your motivation has been submitted for review. Thank you!",
        id,
    }))
}

/// `GET /api/motivations`
///
/// One approved motivation, chosen at random. Having nothing approved yet is
/// not an error: `motivation` is then `null`.
#[tracing::instrument(name = "Fetching random motivation", skip(store))]
pub async fn random_motivation(store: web::Data<PublicStore>) -> Result<HttpResponse, ApiError> {
    let motivation = store
        .random_approved()
        .await
        .context("Failed to fetch motivation")?;

    let message = match motivation {
        Some(_) => None,
        None => Some("No motivations available yet. Be the first to submit one!"),
    };

    Ok(HttpResponse::Ok().json(RandomMotivationResponse {
        motivation,
        message,
    }))
}
