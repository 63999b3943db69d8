pub mod health;
pub mod admin;
pub mod surveys;

use actix_web::{error, web, HttpResponse};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health::health_check)
        .service(
            web::scope("/api")
                .service(health::diagnostic_echo)
                .configure(admin::admin_routes)
                .configure(surveys::survey_routes)
        );
}

// JSON mal formé ou champ manquant => 400 avec un message lisible
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(serde_json::json!({
            "error": err.to_string()
        }));
        error::InternalError::from_response(err, response).into()
    })
}
