use actix_web::web;
use actix_web::HttpResponse;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;
use serde::Serialize;

use crate::authentication::AdminGate;
use crate::routes::ApiError;

#[derive(Deserialize)]
pub struct AdminLoginData {
    password: Option<Secret<String>>,
}

#[derive(Serialize)]
struct AdminLoginResponse {
    authenticated: bool,
    /// The bearer token for subsequent `/api/admin/*` calls
    token: String,
}

/// `POST /api/admin/auth`
///
/// Check a candidate admin secret. There is no session: on success the secret
/// itself is handed back as the bearer token.
#[tracing::instrument(name = "Admin login", skip(body, gate))]
pub async fn admin_login(
    body: web::Json<AdminLoginData>,
    gate: web::Data<AdminGate>,
) -> Result<HttpResponse, ApiError> {
    let password = body
        .0
        .password
        .filter(|p| !p.expose_secret().is_empty())
        .ok_or_else(|| ApiError::ValidationError("Password is required".to_string()))?;

    if !gate.verify(password.expose_secret()) {
        return Err(ApiError::AuthError(anyhow::anyhow!("Invalid password")));
    }

    Ok(HttpResponse::Ok().json(AdminLoginResponse {
        authenticated: true,
        token: password.expose_secret().to_owned(),
    }))
}
