//! Import and export of the program document as a file

use std::fs;
use std::path::Path;

use crate::error::PlannerError;
use crate::models::ProgramState;
use crate::planner::Planner;

/// Write the pretty JSON export to `path`
pub fn export_to_file(planner: &Planner, path: &Path) -> Result<usize, String> {
  let bytes = planner
    .export_document()
    .map_err(|e| format!("Failed to export: {}", e))?;
  fs::write(path, &bytes)
    .map_err(|e| format!("Failed to write {}: {}", path.display(), PlannerError::from(e)))?;
  Ok(bytes.len())
}

/// Pretty JSON export as text
pub fn export_to_string(planner: &Planner) -> Result<String, String> {
  let bytes = planner
    .export_document()
    .map_err(|e| format!("Failed to export: {}", e))?;
  String::from_utf8(bytes).map_err(|e| format!("Failed to export: {}", e))
}

/// Replace the program with the file at `path`. Invalid JSON leaves it unchanged.
pub async fn import_from_file(planner: &mut Planner, path: &Path) -> Result<ProgramState, String> {
  let bytes = fs::read(path)
    .map_err(|e| format!("Failed to read {}: {}", path.display(), PlannerError::from(e)))?;
  planner
    .import_document(&bytes)
    .await
    .cloned()
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::selection::SelectionPolicy;
  use crate::store::Command;
  use crate::test_utils::{setup_test_db, teardown_test_db, test_config};

  #[tokio::test]
  async fn test_file_roundtrip() {
    let pool = setup_test_db().await;
    let mut planner = Planner::open(pool.clone(), &test_config(SelectionPolicy::MoodStack))
      .await
      .expect("Should open");
    planner.execute(Command::SetWeek(9)).await.expect("Should set week");
    let expected = planner.state().clone();

    let path = std::env::temp_dir().join(format!("rehab-export-{}.json", std::process::id()));
    let written = export_to_file(&planner, &path).expect("Should export");
    assert!(written > 0);

    planner.reset().await.expect("Should reset");
    let state = import_from_file(&mut planner, &path).await.expect("Should import");
    assert_eq!(state, expected);

    let _ = fs::remove_file(&path);
    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_invalid_file_reports_notice() {
    let pool = setup_test_db().await;
    let mut planner = Planner::open(pool.clone(), &test_config(SelectionPolicy::MoodStack))
      .await
      .expect("Should open");

    let path = std::env::temp_dir().join(format!("rehab-bad-{}.json", std::process::id()));
    fs::write(&path, "not json at all").expect("Should write fixture");

    let err = import_from_file(&mut planner, &path).await.unwrap_err();
    assert!(err.starts_with("Invalid import"));
    assert_eq!(planner.state(), &ProgramState::default());

    let missing = import_from_file(&mut planner, Path::new("/definitely/not/here.json")).await;
    assert!(missing.is_err());

    let _ = fs::remove_file(&path);
    teardown_test_db(pool).await;
  }
}
