//! Runtime configuration, read from the environment (and `.env`)

use std::env;
use std::path::PathBuf;

use crate::error::{PlannerError, Result};
use crate::selection::SelectionPolicy;

pub const DEFAULT_DB_PATH: &str = "rehab-planner.db";
/// Schema version lives only in the key name
pub const DEFAULT_DOCUMENT_KEY: &str = "rehab-planner-state-v2";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
  pub db_path: PathBuf,
  pub document_key: String,
  pub selection_policy: SelectionPolicy,
  pub log_level: String,
}

impl Default for PlannerConfig {
  fn default() -> Self {
    Self {
      db_path: PathBuf::from(DEFAULT_DB_PATH),
      document_key: DEFAULT_DOCUMENT_KEY.to_string(),
      selection_policy: SelectionPolicy::default(),
      log_level: DEFAULT_LOG_LEVEL.to_string(),
    }
  }
}

impl PlannerConfig {
  /// Read `REHAB_*` variables; unset ones take their defaults.
  /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
  pub fn from_env() -> Result<Self> {
    let selection_policy = match env::var("REHAB_SELECTION_POLICY") {
      Ok(raw) => raw
        .trim()
        .parse()
        .map_err(|e: String| PlannerError::Config(format!("REHAB_SELECTION_POLICY: {}", e)))?,
      Err(_) => SelectionPolicy::default(),
    };

    Ok(Self {
      db_path: env::var("REHAB_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH)),
      document_key: env::var("REHAB_DOCUMENT_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DOCUMENT_KEY.to_string()),
      selection_policy,
      log_level: env::var("REHAB_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
    })
  }
}
