use actix_web::{get, post, HttpResponse};
use chrono::Utc;
use crate::models::health::HealthResponse;

#[get("/")]
pub async fn health_check() -> HttpResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        message: "Survey backend is running".to_string(),
        time: Utc::now(),
    };

    HttpResponse::Ok().json(response)
}

// Diagnostic: vérifie qu'un POST traverse bien le serveur
#[post("/test")]
pub async fn diagnostic_echo() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}
