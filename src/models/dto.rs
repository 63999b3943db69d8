//pour les entrées JSON et les réponses structurées
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{answer, option, question, respondent, survey};

// ----------------------------------------------------------------------------
// Entrées (ce que le client doit fournir)
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct OptionCreate {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionCreate {
    pub text: String,
    // Pas d'énumération imposée ici: 'text', 'select', 'multiselect' par convention
    #[serde(rename = "type")]
    pub question_type: String,
    // Absent ou null => aucune option
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<OptionCreate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurveyCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub questions: Vec<QuestionCreate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespondentCreate {
    pub first_name: String,
    pub last_name: String,
}

// option_id et text ne s'excluent pas mutuellement
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerCreate {
    pub question_id: i32,
    #[serde(default)]
    pub option_id: Option<i32>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitSurveyRequest {
    pub respondent: RespondentCreate,
    pub answers: Vec<AnswerCreate>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// ----------------------------------------------------------------------------
// Réponses (ce que le serveur renvoie)
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionRead {
    pub id: i32,
    pub text: String,
}

impl From<option::Model> for OptionRead {
    fn from(model: option::Model) -> Self {
        OptionRead {
            id: model.id,
            text: model.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRead {
    pub id: i32,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub options: Vec<OptionRead>,
}

impl QuestionRead {
    pub fn from_model(model: question::Model, options: Vec<OptionRead>) -> Self {
        QuestionRead {
            id: model.id,
            text: model.text,
            question_type: model.question_type,
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyRead {
    pub id: i32,
    pub token: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<QuestionRead>,
}

impl SurveyRead {
    pub fn from_model(model: survey::Model, questions: Vec<QuestionRead>) -> Self {
        SurveyRead {
            id: model.id,
            token: model.token,
            title: model.title,
            description: model.description,
            created_at: model.created_at,
            questions,
        }
    }
}

// Dump brut pour /stats: toutes les colonnes du répondant + ses réponses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RespondentRead {
    #[serde(flatten)]
    pub respondent: respondent::Model,
    pub answers: Vec<answer::Model>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: String,
    pub respondent_id: i32,
}
