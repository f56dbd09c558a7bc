use actix_web::HttpResponse;

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String)),
    tag = "health"
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}
