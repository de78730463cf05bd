pub mod calendar;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod db;
pub mod document;
pub mod error;
pub mod logging;
pub mod models;
pub mod planner;
pub mod progression;
pub mod selection;
pub mod store;

#[cfg(test)]
mod test_utils;

use config::PlannerConfig;
use error::Result;
use planner::Planner;

/// Open the database named by `config` and load the planner from it
pub async fn open_planner(config: &PlannerConfig) -> Result<Planner> {
  let pool = db::initialize_db(&config.db_path).await?;
  Planner::open(pool, config).await
}
