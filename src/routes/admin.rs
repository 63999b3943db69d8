use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::models::dto::SurveyCreate;
use crate::services::respondent_service::RespondentService;
use crate::services::survey_service::SurveyService;

/// POST /api/admin/surveys - Créer un sondage avec ses questions
#[post("")]
pub async fn create_survey(
    db: web::Data<DatabaseConnection>,
    body: web::Json<SurveyCreate>,
) -> Result<HttpResponse, AppError> {
    let survey = SurveyService::create_survey(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(survey))
}

/// GET /api/admin/surveys - Tous les sondages (avec questions et options)
#[get("")]
pub async fn list_surveys(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    let surveys = SurveyService::list_surveys(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(surveys))
}

#[get("/{survey_id}")]
pub async fn get_admin_survey(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let survey_id = path.into_inner();

    match SurveyService::get_survey(db.get_ref(), survey_id).await? {
        Some(survey) => Ok(HttpResponse::Ok().json(survey)),
        None => Err(AppError::NotFound("Survey not found".to_string())),
    }
}

/// PUT /api/admin/surveys/{id} - Remplace le sondage et toutes ses questions
/// Sondage absent => 500 (erreur générique du service), pas 404
#[put("/{survey_id}")]
pub async fn update_survey(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    body: web::Json<SurveyCreate>,
) -> Result<HttpResponse, AppError> {
    let survey = SurveyService::update_survey(db.get_ref(), path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(survey))
}

#[delete("/{survey_id}")]
pub async fn delete_survey(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    SurveyService::delete_survey(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true })))
}

/// GET /api/admin/surveys/{id}/stats - Répondants + réponses (dump brut)
#[get("/{survey_id}/stats")]
pub async fn survey_stats(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let stats = RespondentService::get_survey_stats(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[delete("/{respondent_id}")]
pub async fn delete_respondent(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    RespondentService::delete_respondent(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true })))
}

pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/surveys")
            .service(create_survey)
            .service(list_surveys)
            .service(survey_stats)
            .service(get_admin_survey)
            .service(update_survey)
            .service(delete_survey)
    )
    .service(
        web::scope("/admin/respondents")
            .service(delete_respondent)
    );
}
