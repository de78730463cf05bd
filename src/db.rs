use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::Result;

pub type DbPool = SqlitePool;

/// Open (creating if needed) the database file and run migrations
pub async fn initialize_db(db_path: &Path) -> Result<DbPool> {
  if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }
  let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

  info!(path = %db_path.display(), "Initializing database");

  // One writer, one session: a single connection keeps writes ordered
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .connect(&db_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database initialized successfully");

  Ok(pool)
}

/// Fetch the stored document body under `key`, if any
pub async fn load_document(pool: &DbPool, key: &str) -> Result<Option<String>> {
  let body: Option<String> = sqlx::query_scalar("SELECT body FROM program_documents WHERE key = ?1")
    .bind(key)
    .fetch_optional(pool)
    .await?;

  Ok(body)
}

/// Insert or overwrite the document body under `key`
pub async fn save_document(pool: &DbPool, key: &str, body: &str) -> Result<()> {
  sqlx::query(
    r#"
    INSERT INTO program_documents (key, body, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET
      body = excluded.body,
      updated_at = excluded.updated_at
    "#,
  )
  .bind(key)
  .bind(body)
  .bind(Utc::now().to_rfc3339())
  .execute(pool)
  .await?;

  Ok(())
}

/// Remove the document under `key`; returns whether a row existed
pub async fn delete_document(pool: &DbPool, key: &str) -> Result<bool> {
  let result = sqlx::query("DELETE FROM program_documents WHERE key = ?1")
    .bind(key)
    .execute(pool)
    .await?;

  Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{setup_test_db, teardown_test_db, TEST_DOCUMENT_KEY};

  #[tokio::test]
  async fn test_load_missing_document_is_none() {
    let pool = setup_test_db().await;

    let body = load_document(&pool, TEST_DOCUMENT_KEY)
      .await
      .expect("Should query documents");
    assert!(body.is_none());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_save_then_overwrite_document() {
    let pool = setup_test_db().await;

    save_document(&pool, TEST_DOCUMENT_KEY, r#"{"weekNumber":1}"#)
      .await
      .expect("Should save");
    save_document(&pool, TEST_DOCUMENT_KEY, r#"{"weekNumber":2}"#)
      .await
      .expect("Should overwrite");

    let body = load_document(&pool, TEST_DOCUMENT_KEY)
      .await
      .expect("Should load");
    assert_eq!(body.as_deref(), Some(r#"{"weekNumber":2}"#));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM program_documents")
      .fetch_one(&pool)
      .await
      .expect("Failed to count documents");
    assert_eq!(count, 1);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_keys_are_isolated() {
    let pool = setup_test_db().await;

    save_document(&pool, "planner-v1", "{}").await.expect("Should save v1");
    save_document(&pool, "planner-v2", "[]").await.expect("Should save v2");

    let v1 = load_document(&pool, "planner-v1").await.expect("Should load v1");
    assert_eq!(v1.as_deref(), Some("{}"));

    assert!(delete_document(&pool, "planner-v1").await.expect("Should delete"));
    assert!(!delete_document(&pool, "planner-v1").await.expect("Should delete"));
    let v2 = load_document(&pool, "planner-v2").await.expect("Should load v2");
    assert_eq!(v2.as_deref(), Some("[]"));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_initialize_db_creates_file_and_parent_dir() {
    let dir = std::env::temp_dir().join(format!("rehab-planner-test-{}", std::process::id()));
    let path = dir.join("nested").join("planner.db");

    let pool = initialize_db(&path).await.expect("Should initialize");
    save_document(&pool, "k", "{}").await.expect("Should save");
    pool.close().await;

    assert!(path.exists());
    let _ = fs::remove_dir_all(&dir);
  }
}
