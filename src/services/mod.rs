/*
services/
├─ survey_service.rs       ← sondages + questions + options (admin et public)
└─ respondent_service.rs   ← soumissions, stats brutes, suppression répondant

Chaque opération d'écriture = une transaction (commit ou rien).
*/
pub mod survey_service;
pub mod respondent_service;
