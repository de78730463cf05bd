//! Program document codec
//!
//! Export writes `ProgramState` as pretty JSON. Import treats the bytes as
//! untrusted: the top level must be a JSON object, then every field is
//! decoded on its own and falls back to its default when missing or
//! malformed. The decoded state always satisfies the store invariants.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

use crate::catalog::default_stack;
use crate::error::{PlannerError, Result};
use crate::models::program::{DEFAULT_PAIN, DEFAULT_PLAN_NAME, MAX_PAIN};
use crate::models::{
    DayKey, DoneMap, Mood, PainRegion, PainVector, ProgramState, Stacks, ThemePreference, Week,
};

/// Suggested filename for exports
pub const EXPORT_FILENAME: &str = "rehab-planner-data.json";

/// Pretty-printed export bytes
pub fn encode_pretty(state: &ProgramState) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(state)?)
}

/// Compact form used for the persisted copy
pub fn encode(state: &ProgramState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Parse untrusted bytes into a valid state.
///
/// Fails only when the bytes are not JSON or the top level is not an object.
pub fn decode(bytes: &[u8]) -> Result<ProgramState> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| PlannerError::Import(format!("not valid JSON: {}", e)))?;

    match value {
        Value::Object(map) => Ok(decode_object(&map)),
        other => Err(PlannerError::Import(format!(
            "expected a JSON object at the top level, found {}",
            json_type(&other)
        ))),
    }
}

fn decode_object(map: &Map<String, Value>) -> ProgramState {
    let week_number = match map.get("weekNumber").and_then(Value::as_u64) {
        Some(n) => n.clamp(1, u64::from(u32::MAX)) as u32,
        None => {
            fallback("weekNumber");
            1
        }
    };

    let mut state = ProgramState {
        plan_name: match map.get("planName").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => {
                fallback("planName");
                DEFAULT_PLAN_NAME.to_string()
            }
        },
        mood: field_or_default(map, "mood"),
        pain: decode_pain(map.get("pain")),
        week_number,
        weeks: decode_weeks(map.get("weeks")),
        stacks: decode_stacks(map.get("stacks")),
        done_map: decode_done_map(map.get("doneMap")),
        include_supplement: match map.get("includeSupplement").and_then(Value::as_bool) {
            Some(flag) => flag,
            None => {
                fallback("includeSupplement");
                true
            }
        },
        theme: field_or_default::<ThemePreference>(map, "theme"),
    };

    state.weeks.entry(state.week_number).or_default();
    state
}

fn field_or_default<T: DeserializeOwned + Default>(map: &Map<String, Value>, field: &str) -> T {
    map.get(field)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_else(|| {
            fallback(field);
            T::default()
        })
}

fn decode_pain(value: Option<&Value>) -> PainVector {
    let mut pain = PainVector::default();
    let Some(entries) = value.and_then(Value::as_object) else {
        fallback("pain");
        return pain;
    };

    for region in PainRegion::ALL {
        let level = entries
            .get(&region.to_string())
            .and_then(Value::as_i64)
            .map(|v| v.clamp(0, i64::from(MAX_PAIN)) as u8)
            .unwrap_or(DEFAULT_PAIN);
        pain.set(region, level);
    }

    for key in entries.keys() {
        if key.parse::<PainRegion>().is_err() {
            warn!(region = %key, "Dropping unknown pain region from import");
        }
    }

    pain
}

fn decode_weeks(value: Option<&Value>) -> BTreeMap<u32, Week> {
    let mut weeks = BTreeMap::new();
    let Some(entries) = value.and_then(Value::as_object) else {
        fallback("weeks");
        return weeks;
    };

    for (key, raw) in entries {
        let number = key.parse::<u32>().ok().filter(|n| *n >= 1);
        let week = serde_json::from_value::<Week>(raw.clone()).ok();
        match (number, week) {
            (Some(n), Some(w)) => {
                weeks.insert(n, w);
            }
            _ => warn!(week = %key, "Dropping malformed week from import"),
        }
    }

    weeks
}

fn decode_stacks(value: Option<&Value>) -> Stacks {
    let entries = value.and_then(Value::as_object);
    if entries.is_none() {
        fallback("stacks");
    }

    let mut stacks = Stacks::default();
    for mood in Mood::ALL {
        let ids = entries
            .and_then(|e| e.get(&mood.to_string()))
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_else(|| default_stack(mood));
        *stacks.get_mut(mood) = ids;
    }
    stacks
}

fn decode_done_map(value: Option<&Value>) -> DoneMap {
    let mut done = DoneMap::default();
    let Some(entries) = value.and_then(Value::as_object) else {
        fallback("doneMap");
        return done;
    };

    for (key, raw) in entries {
        let (Ok(day_key), Some(flags)) = (key.parse::<DayKey>(), raw.as_object()) else {
            warn!(key = %key, "Dropping malformed done-map entry from import");
            continue;
        };
        let flags: BTreeMap<String, bool> = flags
            .iter()
            .filter_map(|(id, flag)| flag.as_bool().map(|b| (id.clone(), b)))
            .collect();
        done.insert_day(day_key, flags);
    }

    done
}

fn fallback(field: &str) {
    warn!(field, "Field missing or malformed in document, using default");
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Command, StackEdit};
    use serde_json::json;

    fn busy_state() -> ProgramState {
        let mut state = ProgramState::default();
        for command in [
            Command::SetMood(Mood::Good),
            Command::SetPain(PainRegion::Knee, 4),
            Command::SetWeek(3),
            Command::ToggleExerciseDone {
                week: 3,
                day: 2,
                exercise_id: "wall-sit".to_string(),
            },
            Command::MarkDayComplete { week: 3, day: 2 },
            Command::SetDayNotes {
                week: 3,
                day: 2,
                text: "Knee fine at 30s".to_string(),
            },
            Command::EditStack(Mood::Flare, StackEdit::MoveDown(0)),
            Command::SetTheme(ThemePreference::Dark),
        ] {
            state = crate::store::apply(&state, &command).unwrap();
        }
        state
    }

    #[test]
    fn test_export_then_import_is_identity() {
        let state = busy_state();
        let bytes = encode_pretty(&state).unwrap();
        let restored = decode(&bytes).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_export_is_pretty_printed() {
        let bytes = encode_pretty(&ProgramState::default()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\n  \"planName\""));
    }

    #[test]
    fn test_non_json_is_rejected() {
        let err = decode(b"{not json").unwrap_err();
        assert!(matches!(err, PlannerError::Import(_)));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = decode(b"[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_empty_object_becomes_default_state() {
        let state = decode(b"{}").unwrap();
        assert_eq!(state, ProgramState::default());
    }

    #[test]
    fn test_fields_fall_back_independently() {
        let raw = json!({
            "planName": "Shoulder block",
            "mood": "Sleepy",
            "pain": { "ribs": 9, "knee": "bad", "elbow": -1, "shoulder": 3 },
            "weekNumber": 0,
            "weeks": { "2": [], "x": [] },
            "stacks": { "Good": ["wall-sit", 7, "dead-bug-hold"] },
            "doneMap": { "1-3": { "wall-sit": true, "cat-camel": "yes" }, "9-9": {} },
            "includeSupplement": "no",
            "theme": "neon"
        });
        let state = decode(raw.to_string().as_bytes()).unwrap();

        assert_eq!(state.plan_name, "Shoulder block");
        assert_eq!(state.mood, Mood::Okay);
        assert_eq!(state.pain.get(PainRegion::Ribs), 4);
        assert_eq!(state.pain.get(PainRegion::Knee), 2);
        assert_eq!(state.pain.get(PainRegion::Elbow), 0);
        assert_eq!(state.pain.get(PainRegion::Fatigue), 2);
        assert_eq!(state.week_number, 1);
        // both malformed weeks dropped, current week materialized
        assert_eq!(state.weeks.keys().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(state.stacks.good, vec!["wall-sit", "dead-bug-hold"]);
        assert_eq!(state.stacks.okay, default_stack(Mood::Okay));
        assert!(state.done_map.is_done(DayKey::new(1, 3), "wall-sit"));
        assert!(!state.done_map.is_done(DayKey::new(1, 3), "cat-camel"));
        assert_eq!(state.done_map.len(), 1);
        assert!(state.include_supplement);
        assert_eq!(state.theme, ThemePreference::System);
    }

    #[test]
    fn test_negative_pain_clamps_to_zero() {
        let state = decode(br#"{"pain":{"ribs":-1,"elbow":0,"knee":0,"fatigue":0}}"#).unwrap();
        assert_eq!(state.pain.get(PainRegion::Ribs), 0);
        assert_eq!(state.total_pain(), 0);
    }

    #[test]
    fn test_current_week_is_materialized_on_import() {
        let raw = json!({ "weekNumber": 4, "weeks": {} });
        let state = decode(raw.to_string().as_bytes()).unwrap();
        assert_eq!(state.week_number, 4);
        assert!(state.current_week().is_some());
    }

    #[test]
    fn test_dangling_stack_ids_are_kept() {
        let raw = json!({ "stacks": { "Good": ["retired-exercise"], "Okay": [], "Flare": [] } });
        let state = decode(raw.to_string().as_bytes()).unwrap();
        assert_eq!(state.stacks.good, vec!["retired-exercise"]);
        assert!(state.stacks.okay.is_empty());
    }
}
