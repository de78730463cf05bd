//! Command handlers for the presentation layer
//!
//! Thin wrappers over `Planner` that take user-facing arguments (1-based
//! days, region names) and turn errors into display strings at the edge.

pub mod program;
pub mod stack;
pub mod transfer;

use crate::calendar;
use crate::models::program::DAYS_PER_WEEK;
use crate::models::{Exercise, Mood};
use crate::planner::{Planner, TodayView, WeekSummary};
use crate::progression::hold_schedule;

/// Longest hold preview the catalog command will build
pub const MAX_SCHEDULE_WEEKS: u32 = 52;

/// Step from the chosen day to a neighbouring one, wrapping around the week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStep {
  Next,
  Prev,
}

/// Resolve a 1-based day from the user, defaulting to today's weekday
pub fn resolve_day(day: Option<usize>) -> Result<usize, String> {
  match day {
    None => Ok(calendar::today_day_index()),
    Some(d) if (1..=DAYS_PER_WEEK).contains(&d) => Ok(d - 1),
    Some(d) => Err(format!("Day must be between 1 and {}, got {}", DAYS_PER_WEEK, d)),
  }
}

/// Today's list for the chosen day of the current week
pub fn get_today(planner: &Planner, day: Option<usize>) -> Result<TodayView, String> {
  match day {
    None => Ok(planner.today()),
    Some(_) => Ok(planner.today_view(resolve_day(day)?)),
  }
}

/// The day after or before the chosen one (default today), Sunday wraps to Monday
pub fn get_adjacent_day(
  planner: &Planner,
  day: Option<usize>,
  step: DayStep,
) -> Result<TodayView, String> {
  let from = resolve_day(day)?;
  let index = match step {
    DayStep::Next => calendar::next_day(from),
    DayStep::Prev => calendar::prev_day(from),
  };
  Ok(planner.today_view(index))
}

/// Seven-day overview of the current week
pub fn get_week(planner: &Planner) -> WeekSummary {
  planner.week_summary()
}

/// Every catalog exercise
pub fn get_catalog(planner: &Planner) -> Vec<Exercise> {
  planner.catalog().exercises().to_vec()
}

/// Hold targets for weeks 1..=weeks of one exercise, capped at `MAX_SCHEDULE_WEEKS`
pub fn get_hold_schedule(
  planner: &Planner,
  exercise_id: &str,
  mood: Mood,
  weeks: u32,
) -> Result<Vec<(u32, u32)>, String> {
  hold_schedule(planner.catalog(), exercise_id, mood, 1..=weeks.clamp(1, MAX_SCHEDULE_WEEKS))
    .ok_or_else(|| format!("{} is not a hold exercise in the catalog", exercise_id))
}
