use actix_web::http::header::ContentDisposition;
use actix_web::http::header::ContentType;
use actix_web::http::header::DispositionParam;
use actix_web::http::header::DispositionType;
use actix_web::mime;
use actix_web::web;
use actix_web::HttpResponse;
use anyhow::Context;
use chrono::SecondsFormat;
use serde::Deserialize;
use serde::Serialize;

use crate::routes::ApiError;
use crate::store::ServiceStore;
use crate::store::Subscriber;

const CSV_HEADER: &str = "Email,Status,Confirmed,Subscribed Date";

#[derive(Debug, Deserialize)]
pub struct SubscribersParams {
    format: Option<String>,
}

#[derive(Serialize)]
struct SubscriberList {
    total: usize,
    subscribers: Vec<Subscriber>,
}

/// Quote a CSV field if it contains a delimiter, quote or line break
fn escape_csv(field: &str) -> String {
    match field.contains([',', '"', '\n', '\r']) {
        true => format!("\"{}\"", field.replace('"', "\"\"")),
        false => field.to_string(),
    }
}

fn subscribers_csv(subscribers: &[Subscriber]) -> String {
    let rows = subscribers.iter().map(|s| {
        [
            escape_csv(&s.email),
            (if s.is_active { "Active" } else { "Inactive" }).to_string(),
            (if s.confirmed { "Yes" } else { "No" }).to_string(),
            s.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        ]
        .join(",")
    });
    std::iter::once(CSV_HEADER.to_string())
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `GET /api/admin/subscribers`, or `GET /api/admin/subscribers?format=csv`
/// for a spreadsheet-friendly download
#[tracing::instrument(name = "Listing subscribers", skip(store))]
pub async fn list_subscribers(
    params: web::Query<SubscribersParams>,
    store: web::ReqData<ServiceStore>,
) -> Result<HttpResponse, ApiError> {
    let subscribers = store
        .list_subscribers()
        .await
        .context("Failed to fetch subscribers")?;

    if params.format.as_deref() == Some("csv") {
        return Ok(HttpResponse::Ok()
            .content_type(ContentType(mime::TEXT_CSV))
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename("subscribers.csv".to_string())],
            })
            .body(subscribers_csv(&subscribers)));
    }

    Ok(HttpResponse::Ok().json(SubscriberList {
        total: subscribers.len(),
        subscribers,
    }))
}
