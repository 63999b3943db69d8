use sea_orm::*;
use chrono::Utc;
use std::collections::HashMap;

use crate::models::{answer, respondent};
use crate::models::dto::{RespondentRead, SubmitSurveyRequest};

pub struct RespondentService;

impl RespondentService {
    /// Enregistre un répondant et ses réponses dans une seule transaction
    /// Les question_id / option_id fournis par le client ne sont PAS vérifiés
    /// contre le sondage: seule la base (clés étrangères) peut les refuser
    pub async fn create_respondent_and_answers(
        db: &DatabaseConnection,
        survey_id: i32,
        submission: SubmitSurveyRequest,
    ) -> Result<respondent::Model, DbErr> {
        let txn = db.begin().await?;

        let new_respondent = respondent::ActiveModel {
            first_name: Set(submission.respondent.first_name),
            last_name: Set(submission.respondent.last_name),
            started_at: Set(Utc::now()),
            finished_at: Set(None),
            survey_id: Set(Some(survey_id)),
            ..Default::default()
        };

        let respondent = new_respondent.insert(&txn).await?;

        let answer_count = submission.answers.len();
        for ans in submission.answers {
            let new_answer = answer::ActiveModel {
                respondent_id: Set(respondent.id),
                question_id: Set(ans.question_id),
                option_id: Set(ans.option_id),
                text: Set(ans.text),
                ..Default::default()
            };
            new_answer.insert(&txn).await?;
        }

        txn.commit().await?;
        log::info!(
            "Respondent {} submitted {} answers for survey {}",
            respondent.id,
            answer_count,
            survey_id
        );

        Ok(respondent)
    }

    /// Dump brut: chaque répondant du sondage avec ses réponses
    /// (pas de comptage / agrégation)
    pub async fn get_survey_stats(
        db: &DatabaseConnection,
        survey_id: i32,
    ) -> Result<Vec<RespondentRead>, DbErr> {
        let respondents = respondent::Entity::find()
            .filter(respondent::Column::SurveyId.eq(survey_id))
            .order_by_asc(respondent::Column::Id)
            .all(db)
            .await?;

        if respondents.is_empty() {
            return Ok(Vec::new());
        }

        let respondent_ids: Vec<i32> = respondents.iter().map(|r| r.id).collect();

        let answers = answer::Entity::find()
            .filter(answer::Column::RespondentId.is_in(respondent_ids))
            .order_by_asc(answer::Column::Id)
            .all(db)
            .await?;

        let mut answers_by_respondent: HashMap<i32, Vec<answer::Model>> = HashMap::new();
        for a in answers {
            answers_by_respondent.entry(a.respondent_id).or_default().push(a);
        }

        let response = respondents
            .into_iter()
            .map(|r| RespondentRead {
                answers: answers_by_respondent.remove(&r.id).unwrap_or_default(),
                respondent: r,
            })
            .collect();

        Ok(response)
    }

    /// Supprime le répondant et ses réponses; ne fait rien s'il n'existe pas
    pub async fn delete_respondent(db: &DatabaseConnection, respondent_id: i32) -> Result<(), DbErr> {
        let txn = db.begin().await?;

        let Some(respondent) = respondent::Entity::find_by_id(respondent_id).one(&txn).await? else {
            txn.rollback().await?;
            log::debug!("Delete respondent {}: nothing to delete", respondent_id);
            return Ok(());
        };

        answer::Entity::delete_many()
            .filter(answer::Column::RespondentId.eq(respondent_id))
            .exec(&txn)
            .await?;

        respondent.delete(&txn).await?;

        txn.commit().await?;
        log::info!("Deleted respondent {}", respondent_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;
    use crate::models::dto::{AnswerCreate, OptionCreate, QuestionCreate, RespondentCreate, SurveyCreate, SurveyRead};
    use crate::services::survey_service::SurveyService;

    async fn seed_survey(db: &DatabaseConnection, title: &str) -> SurveyRead {
        SurveyService::create_survey(
            db,
            SurveyCreate {
                title: title.to_string(),
                description: Some("seed".to_string()),
                questions: vec![
                    QuestionCreate {
                        text: "Why?".to_string(),
                        question_type: "text".to_string(),
                        options: vec![],
                    },
                    QuestionCreate {
                        text: "Which?".to_string(),
                        question_type: "select".to_string(),
                        options: vec![
                            OptionCreate { text: "A".to_string() },
                            OptionCreate { text: "B".to_string() },
                        ],
                    },
                ],
            },
        )
        .await
        .unwrap()
    }

    fn submission(first_name: &str, answers: Vec<AnswerCreate>) -> SubmitSurveyRequest {
        SubmitSurveyRequest {
            respondent: RespondentCreate {
                first_name: first_name.to_string(),
                last_name: "Doe".to_string(),
            },
            answers,
        }
    }

    #[tokio::test]
    async fn submission_creates_respondent_with_answers() {
        let db = test_connection().await;
        let survey = seed_survey(&db, "S").await;

        let respondent = RespondentService::create_respondent_and_answers(
            &db,
            survey.id,
            submission(
                "Jane",
                vec![
                    AnswerCreate {
                        question_id: survey.questions[0].id,
                        option_id: None,
                        text: Some("because".to_string()),
                    },
                    AnswerCreate {
                        question_id: survey.questions[1].id,
                        option_id: Some(survey.questions[1].options[1].id),
                        text: None,
                    },
                ],
            ),
        )
        .await
        .unwrap();

        assert_eq!(respondent.first_name, "Jane");
        assert_eq!(respondent.survey_id, Some(survey.id));
        assert!(respondent.finished_at.is_none());

        let stats = RespondentService::get_survey_stats(&db, survey.id).await.unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].answers.len(), 2);
        assert_eq!(stats[0].answers[0].text.as_deref(), Some("because"));
        assert_eq!(stats[0].answers[1].option_id, Some(survey.questions[1].options[1].id));
    }

    #[tokio::test]
    async fn stats_of_survey_without_respondents_is_empty() {
        let db = test_connection().await;
        let survey = seed_survey(&db, "Empty").await;

        assert!(RespondentService::get_survey_stats(&db, survey.id).await.unwrap().is_empty());
        assert!(RespondentService::get_survey_stats(&db, 12345).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn answers_may_reference_another_survey() {
        let db = test_connection().await;
        let first = seed_survey(&db, "First").await;
        let second = seed_survey(&db, "Second").await;

        let respondent = RespondentService::create_respondent_and_answers(
            &db,
            first.id,
            submission(
                "Cross",
                vec![AnswerCreate {
                    question_id: second.questions[0].id,
                    option_id: None,
                    text: Some("wrong survey".to_string()),
                }],
            ),
        )
        .await
        .unwrap();

        let stats = RespondentService::get_survey_stats(&db, first.id).await.unwrap();
        assert_eq!(stats[0].respondent.id, respondent.id);
        assert_eq!(stats[0].answers[0].question_id, second.questions[0].id);
    }

    #[tokio::test]
    async fn delete_respondent_removes_its_answers_only() {
        let db = test_connection().await;
        let survey = seed_survey(&db, "S").await;
        let question_id = survey.questions[0].id;

        let keep = RespondentService::create_respondent_and_answers(
            &db,
            survey.id,
            submission(
                "Keep",
                vec![AnswerCreate { question_id, option_id: None, text: Some("k".to_string()) }],
            ),
        )
        .await
        .unwrap();
        let removed = RespondentService::create_respondent_and_answers(
            &db,
            survey.id,
            submission(
                "Drop",
                vec![AnswerCreate { question_id, option_id: None, text: Some("d".to_string()) }],
            ),
        )
        .await
        .unwrap();

        RespondentService::delete_respondent(&db, removed.id).await.unwrap();

        let stats = RespondentService::get_survey_stats(&db, survey.id).await.unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].respondent.id, keep.id);
        assert_eq!(stats[0].answers.len(), 1);

        let orphan_answers = answer::Entity::find()
            .filter(answer::Column::RespondentId.eq(removed.id))
            .all(&db)
            .await
            .unwrap();
        assert!(orphan_answers.is_empty());
    }

    #[tokio::test]
    async fn failed_submission_writes_nothing() {
        let db = test_connection().await;
        let survey = seed_survey(&db, "S").await;

        let result = RespondentService::create_respondent_and_answers(
            &db,
            survey.id,
            submission(
                "Partial",
                vec![
                    AnswerCreate {
                        question_id: survey.questions[0].id,
                        option_id: None,
                        text: Some("fine".to_string()),
                    },
                    AnswerCreate {
                        question_id: 99999,
                        option_id: None,
                        text: Some("dangling".to_string()),
                    },
                ],
            ),
        )
        .await;

        assert!(result.is_err());
        assert!(respondent::Entity::find().all(&db).await.unwrap().is_empty());
        assert!(answer::Entity::find().all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_of_missing_respondent_is_a_no_op() {
        let db = test_connection().await;

        RespondentService::delete_respondent(&db, 77).await.unwrap();
    }
}
