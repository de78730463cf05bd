//! Program State Store
//!
//! Every user action is a `Command`. `apply` is a pure transition from one
//! `ProgramState` to the next; the input value is never touched. `ProgramStore`
//! owns the current value and swaps it wholesale on each command.

use crate::document;
use crate::error::{PlannerError, Result};
use crate::models::program::DAYS_PER_WEEK;
use crate::models::{DayKey, Mood, PainRegion, ProgramState, ThemePreference, Week};

// ---------------------------------------------------------------------------
/// Commands
// ---------------------------------------------------------------------------

/// Edits to a mood's stack. Out-of-range indices are no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEdit {
    /// Append an exercise id
    Insert(String),
    RemoveAt(usize),
    MoveUp(usize),
    MoveDown(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetMood(Mood),
    /// Values above 4 are clamped
    SetPain(PainRegion, u8),
    /// Week 0 is clamped to 1; an unseen week is materialized
    SetWeek(u32),
    ToggleExerciseDone {
        week: u32,
        day: usize,
        exercise_id: String,
    },
    /// One-directional; see `ReopenDay`
    MarkDayComplete { week: u32, day: usize },
    /// Clears a day's completed flag. Refused unless `confirmed`.
    ReopenDay {
        week: u32,
        day: usize,
        confirmed: bool,
    },
    SetDayNotes {
        week: u32,
        day: usize,
        text: String,
    },
    EditStack(Mood, StackEdit),
    SetIncludeSupplement(bool),
    SetTheme(ThemePreference),
    SetPlanName(String),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetMood(_) => "set_mood",
            Command::SetPain(..) => "set_pain",
            Command::SetWeek(_) => "set_week",
            Command::ToggleExerciseDone { .. } => "toggle_exercise_done",
            Command::MarkDayComplete { .. } => "mark_day_complete",
            Command::ReopenDay { .. } => "reopen_day",
            Command::SetDayNotes { .. } => "set_day_notes",
            Command::EditStack(..) => "edit_stack",
            Command::SetIncludeSupplement(_) => "set_include_supplement",
            Command::SetTheme(_) => "set_theme",
            Command::SetPlanName(_) => "set_plan_name",
        }
    }
}

// ---------------------------------------------------------------------------
/// Transitions
// ---------------------------------------------------------------------------

/// Compute the state after `command`.
///
/// Only an unconfirmed `ReopenDay` fails; everything else clamps.
pub fn apply(state: &ProgramState, command: &Command) -> Result<ProgramState> {
    let mut next = state.clone();

    match command {
        Command::SetMood(mood) => next.mood = *mood,
        Command::SetPain(region, value) => next.pain.set(*region, *value),
        Command::SetWeek(week) => {
            let week = clamp_week(*week);
            next.week_number = week;
            next.weeks.entry(week).or_default();
        }
        Command::ToggleExerciseDone {
            week,
            day,
            exercise_id,
        } => {
            let key = DayKey::new(clamp_week(*week), clamp_day(*day));
            next.done_map.toggle(key, exercise_id);
        }
        Command::MarkDayComplete { week, day } => {
            week_mut(&mut next, *week).day_mut(clamp_day(*day)).completed = true;
        }
        Command::ReopenDay {
            week,
            day,
            confirmed,
        } => {
            if !confirmed {
                return Err(PlannerError::ConfirmationRequired(format!(
                    "reopening day {} of week {} clears its completion",
                    clamp_day(*day) + 1,
                    clamp_week(*week)
                )));
            }
            week_mut(&mut next, *week).day_mut(clamp_day(*day)).completed = false;
        }
        Command::SetDayNotes { week, day, text } => {
            week_mut(&mut next, *week).day_mut(clamp_day(*day)).notes = text.clone();
        }
        Command::EditStack(mood, edit) => edit_stack(next.stacks.get_mut(*mood), edit),
        Command::SetIncludeSupplement(flag) => next.include_supplement = *flag,
        Command::SetTheme(theme) => next.theme = *theme,
        Command::SetPlanName(name) => next.plan_name = name.clone(),
    }

    Ok(next)
}

fn edit_stack(stack: &mut Vec<String>, edit: &StackEdit) {
    match edit {
        StackEdit::Insert(id) => stack.push(id.clone()),
        StackEdit::RemoveAt(index) => {
            if *index < stack.len() {
                stack.remove(*index);
            }
        }
        StackEdit::MoveUp(index) => {
            if *index > 0 && *index < stack.len() {
                stack.swap(*index - 1, *index);
            }
        }
        StackEdit::MoveDown(index) => {
            if index + 1 < stack.len() {
                stack.swap(*index, *index + 1);
            }
        }
    }
}

/// The week at `week`, created with defaults if it has never been visited
fn week_mut(state: &mut ProgramState, week: u32) -> &mut Week {
    state.weeks.entry(clamp_week(week)).or_default()
}

fn clamp_week(week: u32) -> u32 {
    week.max(1)
}

fn clamp_day(day: usize) -> usize {
    day.min(DAYS_PER_WEEK - 1)
}

// ---------------------------------------------------------------------------
/// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ProgramStore {
    state: ProgramState,
}

impl ProgramStore {
    pub fn new(state: ProgramState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ProgramState {
        &self.state
    }

    /// Apply one command; on error the current state is kept
    pub fn dispatch(&mut self, command: &Command) -> Result<&ProgramState> {
        self.state = apply(&self.state, command)?;
        Ok(&self.state)
    }

    /// Replace the whole state from untrusted bytes. On error nothing changes.
    pub fn import_document(&mut self, bytes: &[u8]) -> Result<&ProgramState> {
        self.state = document::decode(bytes)?;
        Ok(&self.state)
    }

    pub fn export_document(&self) -> Result<Vec<u8>> {
        document::encode_pretty(&self.state)
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
