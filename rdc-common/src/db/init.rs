//! Database initialization
//!
//! Creates the database file on first run and applies the schema. Table
//! creation is idempotent so startup is safe against an existing database.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Open (or create) the intake database and apply the schema
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    configure_connection(&pool).await?;
    create_tables(&pool).await?;

    Ok(pool)
}

/// Apply connection pragmas (foreign keys, WAL, busy timeout)
pub async fn configure_connection(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    // WAL allows concurrent readers while one request writes
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;

    Ok(())
}

/// Create all tables (idempotent - safe to call multiple times)
pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    create_participants_table(pool).await?;
    create_participant_images_table(pool).await?;
    Ok(())
}

async fn create_participants_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS participants (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            gender TEXT NOT NULL,
            city TEXT NOT NULL,
            country TEXT NOT NULL,
            hair_type TEXT NOT NULL,
            hair_length TEXT NOT NULL,
            hair_density TEXT NOT NULL,
            hair_condition TEXT NOT NULL,
            scalp_type TEXT NOT NULL,
            recent_treatments TEXT NOT NULL,
            treatment_details TEXT,
            scalp_conditions TEXT NOT NULL,
            condition_details TEXT,
            submitted_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_participant_images_table(pool: &SqlitePool) -> Result<()> {
    // UNIQUE(participant_id, image_type): at most one image per slot
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS participant_images (
            id TEXT PRIMARY KEY,
            participant_id TEXT NOT NULL REFERENCES participants(id),
            image_type TEXT NOT NULL,
            filename TEXT NOT NULL,
            original_name TEXT NOT NULL,
            mime_type TEXT NOT NULL,
            file_size INTEGER NOT NULL,
            uploaded_at TEXT NOT NULL,
            UNIQUE(participant_id, image_type)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_creates_database_file_and_tables() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("rdc.db");

        let pool = init_database(&db_path).await.unwrap();
        assert!(db_path.exists());

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
             AND name IN ('participants', 'participant_images')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn create_tables_is_idempotent() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_tables(&pool).await.unwrap();
        create_tables(&pool).await.unwrap();
    }
}
