// connexion BD + création des tables

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};

use crate::models::{answer, option, question, respondent, survey};

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging_level(log::LevelFilter::Debug);

    Database::connect(options).await
}

/// Crée les tables manquantes à partir des entités.
/// L'ordre suit les clés étrangères: parents d'abord.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, survey::Entity).await?;
    create_table(db, question::Entity).await?;
    create_table(db, option::Entity).await?;
    create_table(db, respondent::Entity).await?;
    create_table(db, answer::Entity).await?;

    log::info!("Schema ready (surveys, questions, options, respondents, answers)");
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    Ok(())
}

/// Une seule connexion gardée ouverte, puis création du schéma.
/// Nécessaire pour `sqlite::memory:` (chaque connexion y verrait sa propre
/// base vide).
pub async fn establish_single_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    create_schema(&db).await?;
    Ok(db)
}

#[cfg(test)]
pub async fn test_connection() -> DatabaseConnection {
    establish_single_connection("sqlite::memory:")
        .await
        .expect("sqlite in-memory database")
}
