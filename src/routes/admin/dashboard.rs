use actix_web::http::header::ContentType;
use actix_web::HttpResponse;

/// `GET /admin`
///
/// The page itself is public; it asks for the admin secret and sends it as a
/// bearer token on every `/api/admin/*` call.
pub async fn admin_dashboard() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(include_str!("./admin.html"))
}
