//! Handlers for day, week, mood and pain changes

use crate::models::{Mood, PainRegion, ProgramState, ThemePreference};
use crate::planner::Planner;
use crate::store::Command;

use super::resolve_day;

async fn run(planner: &mut Planner, command: Command) -> Result<ProgramState, String> {
  let name = command.name();
  planner
    .execute(command)
    .await
    .cloned()
    .map_err(|e| format!("Failed to {}: {}", name.replace('_', " "), e))
}

pub async fn set_mood(planner: &mut Planner, mood: &str) -> Result<ProgramState, String> {
  let mood: Mood = mood.parse()?;
  run(planner, Command::SetMood(mood)).await
}

pub async fn set_pain(
  planner: &mut Planner,
  region: &str,
  value: u8,
) -> Result<ProgramState, String> {
  let region: PainRegion = region.parse()?;
  run(planner, Command::SetPain(region, value)).await
}

/// Jump to week `n`; 0 is treated as 1
pub async fn set_week(planner: &mut Planner, week: u32) -> Result<ProgramState, String> {
  run(planner, Command::SetWeek(week)).await
}

pub async fn next_week(planner: &mut Planner) -> Result<ProgramState, String> {
  let week = planner.state().week_number.saturating_add(1);
  run(planner, Command::SetWeek(week)).await
}

/// Never goes below week 1
pub async fn prev_week(planner: &mut Planner) -> Result<ProgramState, String> {
  let week = planner.state().week_number.saturating_sub(1);
  run(planner, Command::SetWeek(week)).await
}

pub async fn toggle_exercise(
  planner: &mut Planner,
  exercise_id: &str,
  day: Option<usize>,
) -> Result<ProgramState, String> {
  let command = Command::ToggleExerciseDone {
    week: planner.state().week_number,
    day: resolve_day(day)?,
    exercise_id: exercise_id.to_string(),
  };
  run(planner, command).await
}

pub async fn complete_day(
  planner: &mut Planner,
  day: Option<usize>,
) -> Result<ProgramState, String> {
  let command = Command::MarkDayComplete {
    week: planner.state().week_number,
    day: resolve_day(day)?,
  };
  run(planner, command).await
}

pub async fn reopen_day(
  planner: &mut Planner,
  day: Option<usize>,
  confirmed: bool,
) -> Result<ProgramState, String> {
  let command = Command::ReopenDay {
    week: planner.state().week_number,
    day: resolve_day(day)?,
    confirmed,
  };
  run(planner, command).await
}

pub async fn set_notes(
  planner: &mut Planner,
  text: &str,
  day: Option<usize>,
) -> Result<ProgramState, String> {
  let command = Command::SetDayNotes {
    week: planner.state().week_number,
    day: resolve_day(day)?,
    text: text.to_string(),
  };
  run(planner, command).await
}

pub async fn set_supplement(planner: &mut Planner, enabled: bool) -> Result<ProgramState, String> {
  run(planner, Command::SetIncludeSupplement(enabled)).await
}

pub async fn set_theme(planner: &mut Planner, theme: &str) -> Result<ProgramState, String> {
  let theme: ThemePreference = theme.parse()?;
  run(planner, Command::SetTheme(theme)).await
}

pub async fn set_plan_name(planner: &mut Planner, name: &str) -> Result<ProgramState, String> {
  run(planner, Command::SetPlanName(name.trim().to_string())).await
}
