//! Handlers for editing a mood's stack

use crate::models::{Mood, ProgramState};
use crate::planner::Planner;
use crate::store::{Command, StackEdit};

/// One row of a stack listing; `known` is false for ids the catalog no longer has
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StackEntry {
  pub position: usize,
  pub id: String,
  pub name: Option<String>,
  pub known: bool,
}

pub fn get_stack(planner: &Planner, mood: &str) -> Result<Vec<StackEntry>, String> {
  let mood: Mood = mood.parse()?;
  let entries = planner
    .state()
    .stacks
    .get(mood)
    .iter()
    .enumerate()
    .map(|(i, id)| {
      let exercise = planner.catalog().get(id);
      StackEntry {
        position: i + 1,
        id: id.clone(),
        name: exercise.map(|ex| ex.name.clone()),
        known: exercise.is_some(),
      }
    })
    .collect();
  Ok(entries)
}

/// Append an exercise. Unknown ids are refused here so typos do not
/// silently vanish from the day's list.
pub async fn add_to_stack(
  planner: &mut Planner,
  mood: &str,
  exercise_id: &str,
) -> Result<ProgramState, String> {
  if !planner.catalog().contains(exercise_id) {
    return Err(format!("Unknown exercise: {}", exercise_id));
  }
  edit(planner, mood, StackEdit::Insert(exercise_id.to_string())).await
}

/// `position` is 1-based, as listed by `get_stack`
pub async fn remove_from_stack(
  planner: &mut Planner,
  mood: &str,
  position: usize,
) -> Result<ProgramState, String> {
  edit(planner, mood, StackEdit::RemoveAt(position.saturating_sub(1))).await
}

pub async fn move_up(
  planner: &mut Planner,
  mood: &str,
  position: usize,
) -> Result<ProgramState, String> {
  edit(planner, mood, StackEdit::MoveUp(position.saturating_sub(1))).await
}

pub async fn move_down(
  planner: &mut Planner,
  mood: &str,
  position: usize,
) -> Result<ProgramState, String> {
  edit(planner, mood, StackEdit::MoveDown(position.saturating_sub(1))).await
}

async fn edit(planner: &mut Planner, mood: &str, edit: StackEdit) -> Result<ProgramState, String> {
  let mood: Mood = mood.parse()?;
  planner
    .execute(Command::EditStack(mood, edit))
    .await
    .cloned()
    .map_err(|e| format!("Failed to edit {} stack: {}", mood, e))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::selection::SelectionPolicy;
  use crate::test_utils::{setup_test_db, teardown_test_db, test_config};

  #[tokio::test]
  async fn test_add_move_remove() {
    let pool = setup_test_db().await;
    let mut planner = Planner::open(pool.clone(), &test_config(SelectionPolicy::MoodStack))
      .await
      .expect("Should open");
    let original = planner.state().stacks.flare.clone();

    let state = add_to_stack(&mut planner, "flare", "wall-sit").await.expect("Should add");
    assert_eq!(state.stacks.flare.last().map(String::as_str), Some("wall-sit"));

    let last = state.stacks.flare.len();
    let state = move_up(&mut planner, "flare", last).await.expect("Should move");
    assert_eq!(state.stacks.flare[last - 2], "wall-sit");

    let state = remove_from_stack(&mut planner, "flare", last - 1).await.expect("Should remove");
    assert_eq!(state.stacks.flare, original);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_unknown_ids_refused_and_dangling_listed() {
    let pool = setup_test_db().await;
    let mut planner = Planner::open(pool.clone(), &test_config(SelectionPolicy::MoodStack))
      .await
      .expect("Should open");

    assert!(add_to_stack(&mut planner, "good", "made-up").await.is_err());

    let doc = br#"{"stacks": {"Good": ["wall-sit", "retired-exercise"], "Okay": [], "Flare": []}}"#;
    planner.import_document(doc).await.expect("Should import");
    let entries = get_stack(&planner, "good").expect("Should list");

    assert_eq!(entries.len(), 2);
    assert!(entries[0].known);
    assert_eq!(entries[0].name.as_deref(), Some("Wall sit"));
    assert!(!entries[1].known);
    assert_eq!(entries[1].position, 2);

    teardown_test_db(pool).await;
  }
}
