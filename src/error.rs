use thiserror::Error;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PlannerError {
  /// Import bytes were not a JSON object. The store is unchanged.
  #[error("Invalid import: {0}")]
  Import(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration failed: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("Serialization failed: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Confirmation required: {0}")]
  ConfirmationRequired(String),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
