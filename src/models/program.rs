use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DAYS_PER_WEEK: usize = 7;
pub const MAX_PAIN: u8 = 4;
pub const DEFAULT_PAIN: u8 = 2;
pub const DEFAULT_PLAN_NAME: &str = "10-Week Rehab Sprint";

const DAY_FOCUSES: [&str; DAYS_PER_WEEK] = [
  "Legs + Feet",
  "Core",
  "Arms + Upper Back",
  "Ribs + Breath",
  "Glutes + Adductors",
  "Cardio Focus",
  "Restore & Reset",
];

/// ---------------------------------------------------------------------------
/// Mood
/// ---------------------------------------------------------------------------

/// Self-reported readiness for the day. Picks the active stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Mood {
  Good,
  #[default]
  Okay,
  Flare,
}

impl Mood {
  pub const ALL: [Mood; 3] = [Mood::Good, Mood::Okay, Mood::Flare];
}

impl fmt::Display for Mood {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Mood::Good => write!(f, "Good"),
      Mood::Okay => write!(f, "Okay"),
      Mood::Flare => write!(f, "Flare"),
    }
  }
}

impl FromStr for Mood {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "good" => Ok(Self::Good),
      "okay" | "ok" => Ok(Self::Okay),
      "flare" => Ok(Self::Flare),
      _ => Err(format!("Unknown mood: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Pain
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PainRegion {
  Ribs,
  Elbow,
  Knee,
  Fatigue,
}

impl PainRegion {
  pub const ALL: [PainRegion; 4] = [
    PainRegion::Ribs,
    PainRegion::Elbow,
    PainRegion::Knee,
    PainRegion::Fatigue,
  ];
}

impl fmt::Display for PainRegion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PainRegion::Ribs => write!(f, "ribs"),
      PainRegion::Elbow => write!(f, "elbow"),
      PainRegion::Knee => write!(f, "knee"),
      PainRegion::Fatigue => write!(f, "fatigue"),
    }
  }
}

impl FromStr for PainRegion {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "ribs" => Ok(Self::Ribs),
      "elbow" => Ok(Self::Elbow),
      "knee" => Ok(Self::Knee),
      "fatigue" => Ok(Self::Fatigue),
      _ => Err(format!("Unknown pain region: {}", s)),
    }
  }
}

/// Severity per body region, each in 0..=4
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PainVector(BTreeMap<PainRegion, u8>);

impl Default for PainVector {
  fn default() -> Self {
    Self(PainRegion::ALL.iter().map(|r| (*r, DEFAULT_PAIN)).collect())
  }
}

impl PainVector {
  pub fn get(&self, region: PainRegion) -> u8 {
    self.0.get(&region).copied().unwrap_or(0)
  }

  /// Values above the scale are clamped to 4
  pub fn set(&mut self, region: PainRegion, value: u8) {
    self.0.insert(region, value.min(MAX_PAIN));
  }

  /// Derived scalar, never stored
  pub fn total(&self) -> u32 {
    self.0.values().map(|v| u32::from(*v)).sum()
  }

  pub fn iter(&self) -> impl Iterator<Item = (PainRegion, u8)> + '_ {
    self.0.iter().map(|(r, v)| (*r, *v))
  }
}

/// ---------------------------------------------------------------------------
/// Days and Weeks
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
  pub title: String,
  pub notes: String,
  pub completed: bool,
}

/// Exactly seven days, index 0 is Monday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Week([Day; DAYS_PER_WEEK]);

impl Default for Week {
  fn default() -> Self {
    Self(std::array::from_fn(|i| Day {
      title: format!("Day {} – {}", i + 1, DAY_FOCUSES[i]),
      notes: String::new(),
      completed: false,
    }))
  }
}

impl Week {
  /// Out-of-range indices land on the last day
  pub fn day(&self, index: usize) -> &Day {
    &self.0[index.min(DAYS_PER_WEEK - 1)]
  }

  pub fn day_mut(&mut self, index: usize) -> &mut Day {
    &mut self.0[index.min(DAYS_PER_WEEK - 1)]
  }

  pub fn days(&self) -> &[Day] {
    &self.0
  }

  pub fn completed_count(&self) -> usize {
    self.0.iter().filter(|d| d.completed).count()
  }
}

/// ---------------------------------------------------------------------------
/// Completion ledger
/// ---------------------------------------------------------------------------

/// Composite `(week, day)` key, stored as `"<week>-<day>"` in JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey {
  pub week: u32,
  pub day: usize,
}

impl DayKey {
  pub fn new(week: u32, day: usize) -> Self {
    Self { week, day }
  }
}

impl fmt::Display for DayKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.week, self.day)
  }
}

impl FromStr for DayKey {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (week, day) = s
      .split_once('-')
      .ok_or_else(|| format!("Malformed day key: {}", s))?;
    let week: u32 = week
      .parse()
      .map_err(|_| format!("Malformed week in day key: {}", s))?;
    let day: usize = day
      .parse()
      .map_err(|_| format!("Malformed day in day key: {}", s))?;
    if week < 1 || day >= DAYS_PER_WEEK {
      return Err(format!("Day key out of range: {}", s));
    }
    Ok(Self { week, day })
  }
}

impl Serialize for DayKey {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for DayKey {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(de::Error::custom)
  }
}

/// Per-day, per-exercise done flags. Absence means "not done".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoneMap(BTreeMap<DayKey, BTreeMap<String, bool>>);

impl DoneMap {
  pub fn is_done(&self, key: DayKey, exercise_id: &str) -> bool {
    self
      .0
      .get(&key)
      .and_then(|day| day.get(exercise_id))
      .copied()
      .unwrap_or(false)
  }

  /// Flip one flag, creating the day entry on first touch
  pub fn toggle(&mut self, key: DayKey, exercise_id: &str) {
    let day = self.0.entry(key).or_default();
    let flag = day.entry(exercise_id.to_string()).or_insert(false);
    *flag = !*flag;
  }

  pub fn done_count(&self, key: DayKey) -> usize {
    self
      .0
      .get(&key)
      .map(|day| day.values().filter(|done| **done).count())
      .unwrap_or(0)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub(crate) fn insert_day(&mut self, key: DayKey, flags: BTreeMap<String, bool>) {
    self.0.insert(key, flags);
  }
}

/// ---------------------------------------------------------------------------
/// Stacks
/// ---------------------------------------------------------------------------

/// One ordered id list per mood. Ids may dangle; they are dropped on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stacks {
  #[serde(rename = "Good")]
  pub good: Vec<String>,
  #[serde(rename = "Okay")]
  pub okay: Vec<String>,
  #[serde(rename = "Flare")]
  pub flare: Vec<String>,
}

impl Default for Stacks {
  fn default() -> Self {
    Self {
      good: crate::catalog::default_stack(Mood::Good),
      okay: crate::catalog::default_stack(Mood::Okay),
      flare: crate::catalog::default_stack(Mood::Flare),
    }
  }
}

impl Stacks {
  pub fn get(&self, mood: Mood) -> &[String] {
    match mood {
      Mood::Good => &self.good,
      Mood::Okay => &self.okay,
      Mood::Flare => &self.flare,
    }
  }

  pub fn get_mut(&mut self, mood: Mood) -> &mut Vec<String> {
    match mood {
      Mood::Good => &mut self.good,
      Mood::Okay => &mut self.okay,
      Mood::Flare => &mut self.flare,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Theme
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
  #[default]
  System,
  Light,
  Dark,
}

impl FromStr for ThemePreference {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "system" => Ok(Self::System),
      "light" => Ok(Self::Light),
      "dark" => Ok(Self::Dark),
      _ => Err(format!("Unknown theme: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Program document
/// ---------------------------------------------------------------------------

/// Root aggregate: everything that is persisted and exported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramState {
  pub plan_name: String,
  pub mood: Mood,
  pub pain: PainVector,
  pub week_number: u32,
  pub weeks: BTreeMap<u32, Week>,
  pub stacks: Stacks,
  pub done_map: DoneMap,
  pub include_supplement: bool,
  pub theme: ThemePreference,
}

impl Default for ProgramState {
  fn default() -> Self {
    let mut weeks = BTreeMap::new();
    weeks.insert(1, Week::default());
    Self {
      plan_name: DEFAULT_PLAN_NAME.to_string(),
      mood: Mood::Okay,
      pain: PainVector::default(),
      week_number: 1,
      weeks,
      stacks: Stacks::default(),
      done_map: DoneMap::default(),
      include_supplement: true,
      theme: ThemePreference::System,
    }
  }
}

impl ProgramState {
  /// The week the pointer is on; materialized by every command that moves it
  pub fn current_week(&self) -> Option<&Week> {
    self.weeks.get(&self.week_number)
  }

  pub fn total_pain(&self) -> u32 {
    self.pain.total()
  }
}
