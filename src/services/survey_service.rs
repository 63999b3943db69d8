use sea_orm::*;
use sea_orm::sea_query::Expr;
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{answer, option, question, respondent, survey};
use crate::models::dto::{OptionRead, QuestionCreate, QuestionRead, SurveyCreate, SurveyRead};

pub struct SurveyService;

impl SurveyService {
    /// Crée un sondage avec ses questions et options (ordre d'entrée conservé)
    /// Le token d'accès public est un UUID v4 généré ici
    pub async fn create_survey(
        db: &DatabaseConnection,
        request: SurveyCreate,
    ) -> Result<SurveyRead, DbErr> {
        let txn = db.begin().await?;

        let new_survey = survey::ActiveModel {
            token: Set(Uuid::new_v4().to_string()),
            title: Set(request.title),
            description: Set(request.description),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let survey = new_survey.insert(&txn).await?;
        Self::insert_questions(&txn, survey.id, request.questions).await?;

        txn.commit().await?;
        log::info!("Created survey {} (token {})", survey.id, survey.token);

        Self::reload(db, survey.id).await
    }

    /// Remplace titre, description et TOUTES les questions du sondage
    /// Les anciennes questions/options sont supprimées (avec les réponses qui
    /// les citent) puis recréées avec de nouveaux ids, même si rien n'a changé
    pub async fn update_survey(
        db: &DatabaseConnection,
        survey_id: i32,
        request: SurveyCreate,
    ) -> Result<SurveyRead, DbErr> {
        let txn = db.begin().await?;

        // Erreur générique (500), pas un 404: comportement historique de PUT
        let existing = survey::Entity::find_by_id(survey_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Survey not found".to_string()))?;

        let mut active_survey: survey::ActiveModel = existing.into();
        active_survey.title = Set(request.title);
        active_survey.description = Set(request.description);
        active_survey.update(&txn).await?;

        Self::delete_questions(&txn, survey_id).await?;
        Self::insert_questions(&txn, survey_id, request.questions).await?;

        txn.commit().await?;
        log::info!("Updated survey {}", survey_id);

        Self::reload(db, survey_id).await
    }

    pub async fn get_survey(
        db: &DatabaseConnection,
        survey_id: i32,
    ) -> Result<Option<SurveyRead>, DbErr> {
        let survey = survey::Entity::find_by_id(survey_id).one(db).await?;

        match survey {
            Some(survey) => Ok(Self::load_nested(db, vec![survey]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Même contenu que get_survey, mais via le lien public
    pub async fn get_survey_by_token(
        db: &DatabaseConnection,
        token: &str,
    ) -> Result<Option<SurveyRead>, DbErr> {
        let survey = survey::Entity::find()
            .filter(survey::Column::Token.eq(token))
            .one(db)
            .await?;

        match survey {
            Some(survey) => Ok(Self::load_nested(db, vec![survey]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list_surveys(db: &DatabaseConnection) -> Result<Vec<SurveyRead>, DbErr> {
        let surveys = survey::Entity::find()
            .order_by_asc(survey::Column::Id)
            .all(db)
            .await?;

        Self::load_nested(db, surveys).await
    }

    /// Supprime le sondage s'il existe (sinon ne fait rien)
    /// Les répondants restent, avec survey_id = NULL
    pub async fn delete_survey(db: &DatabaseConnection, survey_id: i32) -> Result<(), DbErr> {
        let txn = db.begin().await?;

        let Some(survey) = survey::Entity::find_by_id(survey_id).one(&txn).await? else {
            txn.rollback().await?;
            log::debug!("Delete survey {}: nothing to delete", survey_id);
            return Ok(());
        };

        Self::delete_questions(&txn, survey_id).await?;

        respondent::Entity::update_many()
            .col_expr(respondent::Column::SurveyId, Expr::value(Option::<i32>::None))
            .filter(respondent::Column::SurveyId.eq(survey_id))
            .exec(&txn)
            .await?;

        survey.delete(&txn).await?;

        txn.commit().await?;
        log::info!("Deleted survey {}", survey_id);
        Ok(())
    }

    /// Insère questions puis options, une par une pour garder l'ordre des ids
    async fn insert_questions<C: ConnectionTrait>(
        db: &C,
        survey_id: i32,
        questions: Vec<QuestionCreate>,
    ) -> Result<(), DbErr> {
        for q in questions {
            let new_question = question::ActiveModel {
                survey_id: Set(survey_id),
                text: Set(q.text),
                question_type: Set(q.question_type),
                ..Default::default()
            };
            let question = new_question.insert(db).await?;

            for o in q.options {
                let new_option = option::ActiveModel {
                    question_id: Set(question.id),
                    text: Set(o.text),
                    ..Default::default()
                };
                new_option.insert(db).await?;
            }
        }

        Ok(())
    }

    /// Cascade explicite (même transaction que l'appelant):
    ///   1. réponses qui citent ces questions -> supprimées
    ///   2. réponses qui citent ces options -> option_id = NULL
    ///   3. options -> supprimées
    ///   4. questions -> supprimées
    async fn delete_questions<C: ConnectionTrait>(db: &C, survey_id: i32) -> Result<(), DbErr> {
        let question_ids: Vec<i32> = question::Entity::find()
            .select_only()
            .column(question::Column::Id)
            .filter(question::Column::SurveyId.eq(survey_id))
            .into_tuple()
            .all(db)
            .await?;

        if question_ids.is_empty() {
            return Ok(());
        }

        let option_ids: Vec<i32> = option::Entity::find()
            .select_only()
            .column(option::Column::Id)
            .filter(option::Column::QuestionId.is_in(question_ids.clone()))
            .into_tuple()
            .all(db)
            .await?;

        answer::Entity::delete_many()
            .filter(answer::Column::QuestionId.is_in(question_ids.clone()))
            .exec(db)
            .await?;

        if !option_ids.is_empty() {
            answer::Entity::update_many()
                .col_expr(answer::Column::OptionId, Expr::value(Option::<i32>::None))
                .filter(answer::Column::OptionId.is_in(option_ids.clone()))
                .exec(db)
                .await?;

            option::Entity::delete_many()
                .filter(option::Column::Id.is_in(option_ids))
                .exec(db)
                .await?;
        }

        question::Entity::delete_many()
            .filter(question::Column::Id.is_in(question_ids))
            .exec(db)
            .await?;

        Ok(())
    }

    async fn reload(db: &DatabaseConnection, survey_id: i32) -> Result<SurveyRead, DbErr> {
        Self::get_survey(db, survey_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Survey {} vanished after commit", survey_id)))
    }

    /// Charge questions et options de plusieurs sondages en 2 queries
    /// (au lieu d'une query par question), triées par id = ordre d'insertion
    async fn load_nested<C: ConnectionTrait>(
        db: &C,
        surveys: Vec<survey::Model>,
    ) -> Result<Vec<SurveyRead>, DbErr> {
        if surveys.is_empty() {
            return Ok(Vec::new());
        }

        let survey_ids: Vec<i32> = surveys.iter().map(|s| s.id).collect();

        let questions = question::Entity::find()
            .filter(question::Column::SurveyId.is_in(survey_ids))
            .order_by_asc(question::Column::Id)
            .all(db)
            .await?;

        let question_ids: Vec<i32> = questions.iter().map(|q| q.id).collect();

        let options = if question_ids.is_empty() {
            Vec::new()
        } else {
            option::Entity::find()
                .filter(option::Column::QuestionId.is_in(question_ids))
                .order_by_asc(option::Column::Id)
                .all(db)
                .await?
        };

        let mut options_by_question: HashMap<i32, Vec<OptionRead>> = HashMap::new();
        for o in options {
            options_by_question
                .entry(o.question_id)
                .or_default()
                .push(OptionRead::from(o));
        }

        let mut questions_by_survey: HashMap<i32, Vec<QuestionRead>> = HashMap::new();
        for q in questions {
            let options = options_by_question.remove(&q.id).unwrap_or_default();
            questions_by_survey
                .entry(q.survey_id)
                .or_default()
                .push(QuestionRead::from_model(q, options));
        }

        let response = surveys
            .into_iter()
            .map(|s| {
                let questions = questions_by_survey.remove(&s.id).unwrap_or_default();
                SurveyRead::from_model(s, questions)
            })
            .collect();

        Ok(response)
    }
}
