//! Planner service
//!
//! Owns the program store, the database handle and the selection policy.
//! Every command is applied in memory and then persisted before the call
//! returns, so the next command always starts from a saved state.
//!
//! Views are recomputed from the current state on every read.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calendar;
use crate::catalog::Catalog;
use crate::config::PlannerConfig;
use crate::db::{self, DbPool};
use crate::document;
use crate::error::Result;
use crate::models::program::DAYS_PER_WEEK;
use crate::models::{Day, DayKey, Mood, PainVector, ProgramState, Week};
use crate::progression::{prescribe, PrescribedExercise};
use crate::selection::{rationale, SelectionPolicy, StackSelector};
use crate::store::{Command, ProgramStore};

// ---------------------------------------------------------------------------
/// Views handed to the presentation layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TodayView {
    pub plan_name: String,
    pub week_number: u32,
    pub day_index: usize,
    pub day: Day,
    pub mood: Mood,
    /// Tier actually served; differs from `mood` only under the pain-tier policy
    pub effective_mood: Mood,
    pub rationale: String,
    pub policy: SelectionPolicy,
    pub pain: PainVector,
    pub total_pain: u32,
    pub include_supplement: bool,
    pub exercises: Vec<PrescribedExercise>,
    pub done_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub index: usize,
    pub title: String,
    pub notes: String,
    pub completed: bool,
    pub exercises_done: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekSummary {
    pub week_number: u32,
    pub days: Vec<DaySummary>,
    pub completed_days: usize,
}

// ---------------------------------------------------------------------------
/// Planner
// ---------------------------------------------------------------------------

pub struct Planner {
    store: ProgramStore,
    pool: DbPool,
    document_key: String,
    selector: StackSelector,
    catalog: Catalog,
}

impl Planner {
    /// Load the persisted program, or start from the default one
    pub async fn open(pool: DbPool, config: &PlannerConfig) -> Result<Self> {
        let state = load_state(&pool, &config.document_key).await?;
        info!(
            week = state.week_number,
            policy = %config.selection_policy,
            "Planner ready"
        );

        Ok(Self {
            store: ProgramStore::new(state),
            pool,
            document_key: config.document_key.clone(),
            selector: StackSelector::new(config.selection_policy),
            catalog: Catalog::builtin(),
        })
    }

    pub fn state(&self) -> &ProgramState {
        self.store.state()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.selector.policy()
    }

    /// Apply a command and persist the result.
    ///
    /// If the save fails the in-memory state still holds the change and the
    /// database error is returned, so the caller can warn and offer an export.
    pub async fn execute(&mut self, command: Command) -> Result<&ProgramState> {
        debug!(command = command.name(), "Executing command");
        self.store.dispatch(&command)?;
        self.persist().await?;
        Ok(self.store.state())
    }

    /// Replace the program from an import file. Invalid bytes change nothing.
    pub async fn import_document(&mut self, bytes: &[u8]) -> Result<&ProgramState> {
        if let Err(e) = self.store.import_document(bytes) {
            warn!(error = %e, "Import rejected");
            return Err(e);
        }
        let state = self.store.state();
        info!(
            week = state.week_number,
            tracked_days = state.done_map.len(),
            "Program imported"
        );
        self.persist().await?;
        Ok(self.store.state())
    }

    pub fn export_document(&self) -> Result<Vec<u8>> {
        self.store.export_document()
    }

    /// Drop the stored document and start over from defaults
    pub async fn reset(&mut self) -> Result<&ProgramState> {
        let existed = db::delete_document(&self.pool, &self.document_key).await?;
        info!(existed, "Program reset");
        self.store = ProgramStore::default();
        self.persist().await?;
        Ok(self.store.state())
    }

    /// Today's resolved list with intensities, for the given day of the current week
    pub fn today_view(&self, day_index: usize) -> TodayView {
        let state = self.store.state();
        let day_index = day_index.min(DAYS_PER_WEEK - 1);
        let key = DayKey::new(state.week_number, day_index);
        let effective_mood = self.selector.effective_mood(state.mood, &state.pain);

        let resolved = self.selector.select(
            state.mood,
            &state.pain,
            &state.stacks,
            &self.catalog,
            state.include_supplement,
        );
        let exercises = prescribe(
            &resolved,
            state.week_number,
            effective_mood,
            &state.done_map,
            key,
        );
        let done_count = exercises.iter().filter(|ex| ex.done).count();

        let day = state
            .current_week()
            .map(|week| week.day(day_index).clone())
            .unwrap_or_else(|| Week::default().day(day_index).clone());

        TodayView {
            plan_name: state.plan_name.clone(),
            week_number: state.week_number,
            day_index,
            day,
            mood: state.mood,
            effective_mood,
            rationale: rationale(effective_mood).to_string(),
            policy: self.policy(),
            pain: state.pain.clone(),
            total_pain: state.total_pain(),
            include_supplement: state.include_supplement,
            exercises,
            done_count,
        }
    }

    /// View for today's weekday
    pub fn today(&self) -> TodayView {
        self.today_view(calendar::today_day_index())
    }

    /// The current week's seven days at a glance
    pub fn week_summary(&self) -> WeekSummary {
        let state = self.store.state();
        let week = state.current_week().cloned().unwrap_or_default();

        let days: Vec<DaySummary> = week
            .days()
            .iter()
            .enumerate()
            .map(|(index, day)| DaySummary {
                index,
                title: day.title.clone(),
                notes: day.notes.clone(),
                completed: day.completed,
                exercises_done: state
                    .done_map
                    .done_count(DayKey::new(state.week_number, index)),
            })
            .collect();

        WeekSummary {
            week_number: state.week_number,
            completed_days: week.completed_count(),
            days,
        }
    }

    async fn persist(&self) -> Result<()> {
        let body = document::encode(self.store.state())?;
        db::save_document(&self.pool, &self.document_key, &body).await?;
        debug!(bytes = body.len(), "Program saved");
        Ok(())
    }
}

/// Stored state under `key`; absent or unreadable documents yield the default
pub async fn load_state(pool: &DbPool, key: &str) -> Result<ProgramState> {
    let Some(body) = db::load_document(pool, key).await? else {
        info!(key, "No saved program, starting from defaults");
        return Ok(ProgramState::default());
    };

    match document::decode(body.as_bytes()) {
        Ok(state) => Ok(state),
        Err(e) => {
            warn!(key, error = %e, "Saved program unreadable, starting from defaults");
            Ok(ProgramState::default())
        }
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
