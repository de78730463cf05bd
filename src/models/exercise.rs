use serde::{Deserialize, Serialize};

/// How an exercise is dosed. Only holds progress with the program week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExerciseKind {
  /// Isometric hold, dosed in seconds
  Hold { base_seconds: u32 },
  /// Breathing drill with a fixed description ("4 x 5 slow breaths")
  Breath { reps: String },
  /// Mobility or movement work with a fixed description
  Mobility { reps: String },
}

impl ExerciseKind {
  pub fn label(&self) -> &'static str {
    match self {
      ExerciseKind::Hold { .. } => "hold",
      ExerciseKind::Breath { .. } => "breath",
      ExerciseKind::Mobility { .. } => "mobility",
    }
  }
}

/// Reference data for one exercise. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
  pub id: String,
  pub name: String,
  pub area: String,
  pub kind: ExerciseKind,
  pub setup_steps: Vec<String>,
  pub cues: Vec<String>,
}

impl Exercise {
  /// Base hold in seconds; `None` for anything that is not a hold
  pub fn base_seconds(&self) -> Option<u32> {
    match &self.kind {
      ExerciseKind::Hold { base_seconds } => Some(*base_seconds),
      _ => None,
    }
  }

  /// Fixed dosing text; `None` for holds
  pub fn reps_description(&self) -> Option<&str> {
    match &self.kind {
      ExerciseKind::Hold { .. } => None,
      ExerciseKind::Breath { reps } | ExerciseKind::Mobility { reps } => Some(reps),
    }
  }
}
