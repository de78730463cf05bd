//! Hold Progression
//!
//! Today's hold target for an isometric exercise, from its base duration,
//! the program week and the (effective) mood.
//!
//! Key rules:
//! - +3s per completed week, capped after week 10 (+27s)
//! - Okay days cap the bonus at +12s
//! - Flare days ignore the week entirely: 60% of base, never below 12s
//! - Non-hold exercises keep their fixed description

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::{DayKey, DoneMap, Exercise, ExerciseKind, Mood};

/// Seconds added per program week
pub const WEEKLY_BUMP_SECONDS: u32 = 3;
/// Weeks of progression before the bonus stops growing
pub const MAX_PROGRESSION_WEEKS: u32 = 9;
/// Bonus ceiling on Okay days
pub const OKAY_BUMP_CAP_SECONDS: u32 = 12;
/// Floor for Flare holds
pub const FLARE_FLOOR_SECONDS: u32 = 12;
/// Fraction of base served on Flare days
pub const FLARE_SCALE: f64 = 0.6;

// ---------------------------------------------------------------------------
/// Hold Duration
// ---------------------------------------------------------------------------

/// Bonus seconds earned by week `week_number` (week 0 counts as week 1)
pub fn weekly_bump(week_number: u32) -> u32 {
    week_number.saturating_sub(1).min(MAX_PROGRESSION_WEEKS) * WEEKLY_BUMP_SECONDS
}

/// Target hold in seconds for today
pub fn hold_duration(base_seconds: u32, week_number: u32, mood: Mood) -> u32 {
    match mood {
        Mood::Flare => {
            let scaled = (f64::from(base_seconds) * FLARE_SCALE).round() as u32;
            scaled.max(FLARE_FLOOR_SECONDS)
        }
        Mood::Okay => base_seconds + weekly_bump(week_number).min(OKAY_BUMP_CAP_SECONDS),
        Mood::Good => base_seconds + weekly_bump(week_number),
    }
}

// ---------------------------------------------------------------------------
/// Prescription: what the presentation layer renders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Target {
    /// Computed hold for today
    Seconds { seconds: u32 },
    /// Fixed description, unaffected by week or mood
    Reps { description: String },
}

impl Target {
    pub fn for_exercise(exercise: &Exercise, week_number: u32, mood: Mood) -> Self {
        match &exercise.kind {
            ExerciseKind::Hold { base_seconds } => Target::Seconds {
                seconds: hold_duration(*base_seconds, week_number, mood),
            },
            ExerciseKind::Breath { reps } | ExerciseKind::Mobility { reps } => Target::Reps {
                description: reps.clone(),
            },
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Seconds { seconds } => write!(f, "{}s hold", seconds),
            Target::Reps { description } => write!(f, "{}", description),
        }
    }
}

/// One row of today's list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescribedExercise {
    pub id: String,
    pub name: String,
    pub area: String,
    pub kind: String,
    pub target: Target,
    pub done: bool,
    pub setup_steps: Vec<String>,
    pub cues: Vec<String>,
}

/// Attach today's targets and done flags to a resolved stack
pub fn prescribe(
    exercises: &[&Exercise],
    week_number: u32,
    mood: Mood,
    done_map: &DoneMap,
    day: DayKey,
) -> Vec<PrescribedExercise> {
    exercises
        .iter()
        .map(|ex| PrescribedExercise {
            id: ex.id.clone(),
            name: ex.name.clone(),
            area: ex.area.clone(),
            kind: ex.kind.label().to_string(),
            target: Target::for_exercise(ex, week_number, mood),
            done: done_map.is_done(day, &ex.id),
            setup_steps: ex.setup_steps.clone(),
            cues: ex.cues.clone(),
        })
        .collect()
}

/// Hold targets for one exercise across a range of weeks, for previews
pub fn hold_schedule(
    catalog: &Catalog,
    exercise_id: &str,
    mood: Mood,
    weeks: std::ops::RangeInclusive<u32>,
) -> Option<Vec<(u32, u32)>> {
    let base = catalog.get(exercise_id)?.base_seconds()?;
    Some(weeks.map(|w| (w, hold_duration(base, w, mood))).collect())
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::StackSelector;
    use crate::test_utils::state_with;

    #[test]
    fn test_good_progression_by_week() {
        assert_eq!(hold_duration(25, 1, Mood::Good), 25);
        assert_eq!(hold_duration(25, 3, Mood::Good), 31);
        assert_eq!(hold_duration(25, 5, Mood::Good), 37);
        assert_eq!(hold_duration(25, 10, Mood::Good), 52);
        assert_eq!(hold_duration(25, 11, Mood::Good), 52);
        assert_eq!(hold_duration(25, 40, Mood::Good), 52);
    }

    #[test]
    fn test_good_matches_formula_for_all_weeks() {
        for week in 1..=30 {
            let expected = 25 + (week - 1).min(9) * 3;
            assert_eq!(hold_duration(25, week, Mood::Good), expected, "week {}", week);
        }
    }

    #[test]
    fn test_okay_caps_at_plus_twelve() {
        assert_eq!(hold_duration(20, 1, Mood::Okay), 20);
        assert_eq!(hold_duration(20, 3, Mood::Okay), 26);
        assert_eq!(hold_duration(20, 5, Mood::Okay), 32);
        assert_eq!(hold_duration(20, 50, Mood::Okay), 32);
        for week in 1..=60 {
            assert!(hold_duration(20, week, Mood::Okay) <= 32);
        }
    }

    #[test]
    fn test_flare_ignores_week() {
        for week in [1, 2, 5, 10, 25] {
            assert_eq!(hold_duration(25, week, Mood::Flare), 15);
        }
    }

    #[test]
    fn test_flare_floor() {
        assert_eq!(hold_duration(10, 4, Mood::Flare), 12);
        assert_eq!(hold_duration(0, 1, Mood::Flare), 12);
        // 20 * 0.6 = 12, 30 * 0.6 = 18, 33 * 0.6 = 19.8 -> 20
        assert_eq!(hold_duration(20, 1, Mood::Flare), 12);
        assert_eq!(hold_duration(30, 1, Mood::Flare), 18);
        assert_eq!(hold_duration(33, 1, Mood::Flare), 20);
    }

    #[test]
    fn test_week_zero_treated_as_week_one() {
        assert_eq!(weekly_bump(0), 0);
        assert_eq!(hold_duration(25, 0, Mood::Good), 25);
    }

    #[test]
    fn test_reps_target_is_unchanged() {
        let catalog = Catalog::builtin();
        let ex = catalog.get("box-breathing").unwrap();
        for mood in Mood::ALL {
            assert_eq!(
                Target::for_exercise(ex, 8, mood),
                Target::Reps {
                    description: "3 min".to_string()
                }
            );
        }
    }

    #[test]
    fn test_good_week_three_scenario() {
        // Good, pain 2/2/2/2 (total 8), week 3
        let catalog = Catalog::builtin();
        let state = state_with(Mood::Good, 2, 3);
        assert_eq!(state.total_pain(), 8);

        let list = StackSelector::default().select(
            state.mood,
            &state.pain,
            &state.stacks,
            &catalog,
            state.include_supplement,
        );
        let rows = prescribe(
            &list,
            state.week_number,
            state.mood,
            &state.done_map,
            DayKey::new(3, 0),
        );

        assert_eq!(rows.len(), state.stacks.good.len() + 1);
        for row in rows.iter().filter(|r| r.kind == "hold") {
            assert_eq!(row.target, Target::Seconds { seconds: 31 });
        }
        assert_eq!(rows.last().map(|r| r.id.as_str()), Some(crate::catalog::SUPPLEMENT_ID));
    }

    #[test]
    fn test_prescribe_reads_done_flags() {
        let catalog = Catalog::builtin();
        let wall_sit = catalog.get("wall-sit").unwrap();
        let key = DayKey::new(2, 4);
        let mut done = DoneMap::default();
        done.toggle(key, "wall-sit");

        let rows = prescribe(&[wall_sit], 2, Mood::Good, &done, key);
        assert!(rows[0].done);

        let other_day = prescribe(&[wall_sit], 2, Mood::Good, &done, DayKey::new(2, 5));
        assert!(!other_day[0].done);
    }

    #[test]
    fn test_hold_schedule() {
        let catalog = Catalog::builtin();
        let schedule = hold_schedule(&catalog, "wall-sit", Mood::Good, 1..=3).unwrap();
        assert_eq!(schedule, vec![(1, 25), (2, 28), (3, 31)]);
        assert!(hold_schedule(&catalog, "cat-camel", Mood::Good, 1..=3).is_none());
    }

    #[test]
    fn test_target_display() {
        assert_eq!(Target::Seconds { seconds: 31 }.to_string(), "31s hold");
    }
}
