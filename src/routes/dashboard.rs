use actix_web::HttpResponse;

/// GET /dashboard
///
/// Sits behind the route gate; reaching it means a session cookie was sent.
pub async fn dashboard() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
