use actix_web::{HttpResponse, Responder};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "API is up", body = Object, example = json!({
        "message": "HRMS Lite API running"
    }))),
    tag = "Health"
)]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "HRMS Lite API running" }))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Health probe", body = Object, example = json!({
        "status": "healthy"
    }))),
    tag = "Health"
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "healthy" }))
}
