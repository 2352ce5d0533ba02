use actix_web::body::MessageBody;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::http::header::HeaderMap;
use actix_web::web;
use actix_web::HttpMessage;
use actix_web_lab::middleware::Next;
use anyhow::Context;

use super::AdminGate;
use crate::routes::ApiError;

/// Extract the token from an `Authorization: Bearer <token>` header. This does
/// not check the token itself; for that, see `AdminGate::authorize`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, anyhow::Error> {
    let token = headers
        .get(header::AUTHORIZATION)
        .context("No Authorization header")?
        .to_str()
        .context("Authorization header is not valid UTF-8")?
        .strip_prefix("Bearer ")
        .context("Authorization scheme was not 'Bearer'")?;
    Ok(token)
}

/// Guards every `/api/admin/*` route (bar `/api/admin/auth`). Runs before any
/// handler, so an unauthorized request never reaches a query.
///
/// On success the privileged `ServiceStore` is embedded in the request, where
/// handlers pick it up with `web::ReqData<ServiceStore>`; this is the only way
/// a handler can get hold of it.
pub async fn reject_unauthorized(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let gate = req
        .app_data::<web::Data<AdminGate>>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("AdminGate is not registered as app data"))?;

    let store = bearer_token(req.headers())
        .and_then(|token| {
            gate.authorize(token)
                .context("Bearer token does not match the admin secret")
        })
        .context("Unauthorized")
        .map_err(ApiError::AuthError)?;

    req.extensions_mut().insert(store);
    next.call(req).await
}
