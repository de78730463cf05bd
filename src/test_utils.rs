//! Test utilities shared by unit tests
//!
//! - In-memory database setup/teardown
//! - Config and state fixtures

use sqlx::SqlitePool;
use std::path::PathBuf;

use crate::config::PlannerConfig;
use crate::models::{Mood, PainRegion, ProgramState};
use crate::selection::SelectionPolicy;
use crate::store::{apply, Command};

pub const TEST_DOCUMENT_KEY: &str = "rehab-planner-test";

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Fixtures
/// ---------------------------------------------------------------------------

pub fn test_config(policy: SelectionPolicy) -> PlannerConfig {
  PlannerConfig {
    db_path: PathBuf::from(":memory:"),
    document_key: TEST_DOCUMENT_KEY.to_string(),
    selection_policy: policy,
    log_level: "debug".to_string(),
  }
}

/// A state with the given mood and every pain region at `pain`
pub fn state_with(mood: Mood, pain: u8, week: u32) -> ProgramState {
  let mut commands = vec![Command::SetMood(mood), Command::SetWeek(week)];
  commands.extend(PainRegion::ALL.iter().map(|r| Command::SetPain(*r, pain)));

  commands.iter().fold(ProgramState::default(), |state, command| {
    apply(&state, command).expect("Fixture command should apply")
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name = 'program_documents'",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_state_fixture() {
    let state = state_with(Mood::Flare, 3, 4);
    assert_eq!(state.mood, Mood::Flare);
    assert_eq!(state.total_pain(), 12);
    assert_eq!(state.week_number, 4);
    assert!(state.current_week().is_some());
  }
}
