use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::model::{StoredFile, Subject};

/// Errors from the subject store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("stored file list is not valid JSON: {0}")]
    CorruptFiles(#[from] serde_json::Error),

    #[error("stored subject id is not a UUID: {0}")]
    CorruptId(#[from] uuid::Error),

    #[error("stored timestamp is not RFC 3339: {0}")]
    CorruptTimestamp(#[from] chrono::ParseError),
}

/// Document store for subjects. Every operation is a single statement against
/// the one targeted row; file-list mutations happen inside the database, so
/// concurrent appends and removals are serialized by the store rather than by
/// this gateway.
#[derive(Clone)]
pub struct SubjectStore {
    pool: SqlitePool,
}

impl SubjectStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS subjects (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                files TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        info!("subject store ready at {}", database_url);
        Ok(Self { pool })
    }

    /// Pings the store to ensure connectivity
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// All subjects in insertion order.
    pub async fn list(&self) -> Result<Vec<Subject>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, files, created_at FROM subjects ORDER BY created_at, rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(subject_from_row).collect()
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Subject>, StoreError> {
        let row = sqlx::query("SELECT id, name, files, created_at FROM subjects WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(subject_from_row).transpose()
    }

    pub async fn create(&self, name: &str) -> Result<Subject, StoreError> {
        let subject = Subject {
            id: Uuid::new_v4(),
            name: name.to_string(),
            files: Vec::new(),
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO subjects (id, name, files, created_at) VALUES (?, ?, '[]', ?)")
            .bind(subject.id.to_string())
            .bind(&subject.name)
            .bind(subject.created_at.to_rfc3339())
            .execute(&self.pool)
            .await?;

        Ok(subject)
    }

    /// Returns false when no subject has the given id.
    pub async fn rename(&self, id: Uuid, name: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE subjects SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes the subject and, with it, every file it contains.
    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Appends a file to the subject's list in one atomic statement.
    /// Returns false when the subject does not exist.
    pub async fn append_file(&self, id: Uuid, file: &StoredFile) -> Result<bool, StoreError> {
        let payload = serde_json::to_string(file)?;

        let result =
            sqlx::query("UPDATE subjects SET files = json_insert(files, '$[#]', json(?)) WHERE id = ?")
                .bind(payload)
                .bind(id.to_string())
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes every entry whose id matches, preserving the order of the
    /// rest, in one atomic statement. Returns false when the subject does
    /// not exist; a miss on the file id leaves the list unchanged.
    pub async fn remove_file(&self, id: Uuid, file_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE subjects
             SET files = (
                 SELECT coalesce(json_group_array(json(value)), json_array())
                 FROM json_each(subjects.files)
                 WHERE json_extract(value, '$.id') <> ?
             )
             WHERE id = ?",
        )
        .bind(file_id)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn subject_from_row(row: SqliteRow) -> Result<Subject, StoreError> {
    let id: String = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    let files: String = row.try_get("files")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Subject {
        id: Uuid::parse_str(&id)?,
        name,
        files: serde_json::from_str(&files)?,
        created_at: DateTime::parse_from_rfc3339(&created_at)?.with_timezone(&Utc),
    })
}
