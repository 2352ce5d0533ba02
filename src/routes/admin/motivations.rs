use actix_web::web;
use actix_web::HttpResponse;
use anyhow::Context;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::AuthorName;
use crate::domain::MotivationStatus;
use crate::domain::MotivationText;
use crate::domain::Pagination;
use crate::domain::StatusFilter;
use crate::routes::ApiError;
use crate::store::Motivation;
use crate::store::MotivationChanges;
use crate::store::ServiceStore;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    status: Option<String>,
    page: Option<i64>,
    limit: Option<i64>,
}

#[derive(Serialize)]
struct MotivationPage {
    motivations: Vec<Motivation>,
    total: i64,
    page: i64,
    #[serde(rename = "totalPages")]
    total_pages: i64,
}

/// `GET /api/admin/motivations?status=pending&page=1&limit=20`
///
/// Every parameter is optional. `status` is one of `all` (default),
/// `pending`, `approved`, `rejected`.
#[tracing::instrument(name = "Listing motivations", skip(store))]
pub async fn list_motivations(
    params: web::Query<ListParams>,
    store: web::ReqData<ServiceStore>,
) -> Result<HttpResponse, ApiError> {
    let filter = StatusFilter::parse(params.status.as_deref()).map_err(ApiError::ValidationError)?;
    let pagination = Pagination::new(params.page, params.limit);

    let (motivations, total) = store
        .list_motivations(filter, pagination)
        .await
        .context("Failed to fetch motivations")?;

    Ok(HttpResponse::Ok().json(MotivationPage {
        motivations,
        total,
        page: pagination.page(),
        total_pages: pagination.total_pages(total),
    }))
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Only has that effect together with `#[serde(default)]`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct UpdateData {
    id: Option<Uuid>,
    status: Option<MotivationStatus>,
    text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    author: Option<Option<String>>,
}

impl TryFrom<UpdateData> for (Uuid, MotivationChanges) {
    type Error = String;
    fn try_from(value: UpdateData) -> Result<Self, Self::Error> {
        let id = value.id.ok_or("Motivation ID is required")?;
        let text = value.text.map(MotivationText::parse).transpose()?;
        // both `null` and a blank name clear the author
        let author = value
            .author
            .map(|a| a.as_deref().and_then(AuthorName::parse));
        Ok((
            id,
            MotivationChanges {
                status: value.status,
                text,
                author,
            },
        ))
    }
}

#[derive(Serialize)]
struct UpdateResponse {
    motivation: Option<Motivation>,
}

/// `PATCH /api/admin/motivations`
///
/// Partial update; only the fields present in the body are changed. An
/// unknown `id` is not an error, but `motivation` is then `null`.
///
/// # Request example
///
/// ```sh
///     curl -X PATCH -H "Authorization: Bearer $SECRET" \
///         --json '{"id": "...", "status": "approved"}' \
///         http://127.0.0.1:8000/api/admin/motivations
/// ```
#[tracing::instrument(name = "Updating motivation", skip(body, store), fields(motivation_id=tracing::field::Empty))]
pub async fn update_motivation(
    body: web::Json<UpdateData>,
    store: web::ReqData<ServiceStore>,
) -> Result<HttpResponse, ApiError> {
    let (id, changes): (Uuid, MotivationChanges) =
        body.0.try_into().map_err(ApiError::ValidationError)?;
    tracing::Span::current().record("motivation_id", tracing::field::display(id));

    let motivation = store
        .update_motivation(id, changes)
        .await
        .context("Failed to update motivation")?;

    Ok(HttpResponse::Ok().json(UpdateResponse { motivation }))
}

#[derive(Debug, Deserialize)]
pub struct DeleteData {
    id: Option<Uuid>,
}

#[derive(Serialize)]
struct DeleteResponse {
    message: &'static str,
}

/// `DELETE /api/admin/motivations`, body `{"id": "..."}`
///
/// Deleting a motivation that does not exist (any more) still succeeds.
#[tracing::instrument(name = "Deleting motivation", skip(store))]
pub async fn delete_motivation(
    body: web::Json<DeleteData>,
    store: web::ReqData<ServiceStore>,
) -> Result<HttpResponse, ApiError> {
    let id = body
        .id
        .ok_or_else(|| ApiError::ValidationError("Motivation ID is required".to_string()))?;

    let deleted = store
        .delete_motivation(id)
        .await
        .context("Failed to delete motivation")?;
    if deleted == 0 {
        tracing::info!("no motivation with id {id}");
    }

    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: "Motivation deleted",
    }))
}
