use actix_web::http::header::ContentType;
use actix_web::HttpResponse;

/// `GET /`
pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        // path relative to this file (checked at compile time!)
        .content_type(ContentType::html())
        .body(include_str!("./home.html"))
}
