// ============================================================================
// MODÈLE : ANSWER
// ============================================================================
//
// Colonnes de la table answers:
//   - id (INTEGER, PRIMARY KEY)
//   - respondent_id (INTEGER, NOT NULL, FK vers respondents, ON DELETE CASCADE)
//   - question_id (INTEGER, NOT NULL, FK vers questions, ON DELETE CASCADE)
//   - option_id (INTEGER, NULL, FK vers options, ON DELETE SET NULL)
//   - text (TEXT, NULL) - réponse libre pour les questions 'text'
//
// Points d'attention:
//   - Supprimer une question supprime aussi les réponses passées qui la citent
//   - Aucune vérification que question_id / option_id appartiennent au
//     sondage du répondant
//   - option_id et text peuvent être présents tous les deux (ou aucun)
//
// ============================================================================

use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub respondent_id: i32,
    pub question_id: i32,
    pub option_id: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub text: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::respondent::Entity",
        from = "Column::RespondentId",
        to = "super::respondent::Column::Id",
        on_delete = "Cascade"
    )]
    Respondent,

    #[sea_orm(
        belongs_to = "super::question::Entity",
        from = "Column::QuestionId",
        to = "super::question::Column::Id",
        on_delete = "Cascade"
    )]
    Question,

    #[sea_orm(
        belongs_to = "super::option::Entity",
        from = "Column::OptionId",
        to = "super::option::Column::Id",
        on_delete = "SetNull"
    )]
    SelectedOption,
}

impl Related<super::respondent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Respondent.def()
    }
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SelectedOption.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
