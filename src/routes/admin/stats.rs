use actix_web::web;
use actix_web::HttpResponse;
use anyhow::Context;

use crate::routes::ApiError;
use crate::store::ServiceStore;

/// `GET /api/admin/stats`
///
/// `{"pending": n, "approved": n, "rejected": n}`
#[tracing::instrument(name = "Fetching motivation stats", skip(store))]
pub async fn motivation_stats(store: web::ReqData<ServiceStore>) -> Result<HttpResponse, ApiError> {
    let stats = store
        .count_by_status()
        .await
        .context("Failed to fetch stats")?;
    Ok(HttpResponse::Ok().json(stats))
}
