pub mod exercise;
pub mod program;

pub use exercise::{Exercise, ExerciseKind};
pub use program::{
  Day, DayKey, DoneMap, Mood, PainRegion, PainVector, ProgramState, Stacks, ThemePreference, Week,
};
