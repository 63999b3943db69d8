// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque entité correspond à une table avec SeaORM.
//
// Liste des modules:
//   - health : Health check API
//   - survey : Sondages (titre, description, token d'accès public)
//   - question : Questions d'un sondage ('text', 'select', 'multiselect')
//   - option : Choix possibles d'une question
//   - respondent : Une soumission d'un répondant
//   - answer : Réponse d'un répondant à une question
//   - dto : Entrées validées et réponses de l'API
//
// Points d'attention:
//   - Les relations (et leurs ON DELETE) sont définies dans chaque modèle
//   - Les services appliquent aussi les cascades explicitement dans la
//     transaction, sans dépendre du moteur de base de données
//
// ============================================================================

pub mod health;
pub mod survey;
pub mod question;
pub mod option;
pub mod respondent;
pub mod answer;
pub mod dto;
