use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::models::dto::{SubmitResponse, SubmitSurveyRequest};
use crate::services::respondent_service::RespondentService;
use crate::services::survey_service::SurveyService;

/// GET /api/surveys/token/{token} - Lien public envoyé aux répondants
#[get("/token/{token}")]
pub async fn get_survey_by_token(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let token = path.into_inner();

    match SurveyService::get_survey_by_token(db.get_ref(), &token).await? {
        Some(survey) => Ok(HttpResponse::Ok().json(survey)),
        None => Err(AppError::NotFound("Survey not found".to_string())),
    }
}

#[get("/{survey_id}")]
pub async fn get_survey(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    match SurveyService::get_survey(db.get_ref(), path.into_inner()).await? {
        Some(survey) => Ok(HttpResponse::Ok().json(survey)),
        None => Err(AppError::NotFound("Survey not found".to_string())),
    }
}

/// POST /api/surveys/{id}/submit - Réponses d'un répondant (PUBLIC)
#[post("/{survey_id}/submit")]
pub async fn submit_survey(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    body: web::Json<SubmitSurveyRequest>,
) -> Result<HttpResponse, AppError> {
    let respondent = RespondentService::create_respondent_and_answers(
        db.get_ref(),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(SubmitResponse {
        message: "Thank you for your answers!".to_string(),
        respondent_id: respondent.id,
    }))
}

pub fn survey_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/surveys")
            .service(get_survey_by_token)
            .service(get_survey)
            .service(submit_survey)
    );
}
