use actix_web::HttpResponse;

/// `GET /health_check`
///
/// Does not touch the database, so this succeeds even when Postgres is down.
///
/// Note: viewing http response requires `curl -v`
pub async fn health_check() -> HttpResponse { HttpResponse::Ok().finish() }
