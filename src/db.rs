use anyhow::Context;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

/// Tables in creation order; labels use a binary collation so uniqueness is exact.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS postes (
        id BINARY(16) NOT NULL PRIMARY KEY,
        label VARCHAR(100) COLLATE utf8mb4_bin NOT NULL,
        kind VARCHAR(32) NOT NULL,
        CONSTRAINT uq_postes_label UNIQUE (label)
    ) DEFAULT CHARSET = utf8mb4"#,
    r#"CREATE TABLE IF NOT EXISTS departements (
        id BINARY(16) NOT NULL PRIMARY KEY,
        label VARCHAR(100) COLLATE utf8mb4_bin NOT NULL,
        CONSTRAINT uq_departements_label UNIQUE (label)
    ) DEFAULT CHARSET = utf8mb4"#,
    r#"CREATE TABLE IF NOT EXISTS employes (
        id BINARY(16) NOT NULL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(150) NOT NULL,
        hire_date DATE NOT NULL,
        salary DOUBLE NOT NULL,
        poste_id BINARY(16) NOT NULL,
        departement_id BINARY(16) NOT NULL,
        CONSTRAINT fk_employes_poste FOREIGN KEY (poste_id)
            REFERENCES postes (id) ON DELETE RESTRICT,
        CONSTRAINT fk_employes_departement FOREIGN KEY (departement_id)
            REFERENCES departements (id) ON DELETE RESTRICT
    ) DEFAULT CHARSET = utf8mb4"#,
];

pub async fn init_db(database_url: &str, max_connections: u32) -> anyhow::Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

pub async fn ensure_schema(pool: &MySqlPool) -> anyhow::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to create schema")?;
    }
    info!(tables = SCHEMA.len(), "Schema ready");
    Ok(())
}
