//! Stack Selector
//!
//! Maps the declared mood (and, under the pain-tier policy, the total pain)
//! to the ordered list of exercises served today.
//!
//! Two policies exist and exactly one is active per planner:
//! - `MoodStack` (default): serve the user's stack for the declared mood.
//!   Pain never changes which exercises appear.
//! - `PainTier`: high total pain drops the whole tier one step
//!   (Good -> Okay at 6+, Okay -> Flare at 8+) and that tier's stack is
//!   served instead.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::{Exercise, Mood, PainVector, Stacks};

/// Total pain at which a Good day is served the Okay tier
pub const GOOD_TO_OKAY_PAIN: u32 = 6;
/// Total pain at which an Okay day is served the Flare tier
pub const OKAY_TO_FLARE_PAIN: u32 = 8;

// ---------------------------------------------------------------------------
/// Selection Policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Fixed stack per declared mood
    #[default]
    MoodStack,
    /// Pain can substitute a lower tier's stack
    PainTier,
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MoodStack => write!(f, "mood_stack"),
            Self::PainTier => write!(f, "pain_tier"),
        }
    }
}

impl std::str::FromStr for SelectionPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mood_stack" => Ok(Self::MoodStack),
            "pain_tier" => Ok(Self::PainTier),
            _ => Err(format!("Unknown selection policy: {}", s)),
        }
    }
}

impl SelectionPolicy {
    /// The tier actually served. Under `PainTier` this also drives
    /// intensity, supplement eligibility and the rationale label.
    pub fn effective_mood(&self, mood: Mood, pain: &PainVector) -> Mood {
        match self {
            SelectionPolicy::MoodStack => mood,
            SelectionPolicy::PainTier => {
                let total = pain.total();
                match mood {
                    Mood::Good if total >= GOOD_TO_OKAY_PAIN => Mood::Okay,
                    Mood::Okay if total >= OKAY_TO_FLARE_PAIN => Mood::Flare,
                    other => other,
                }
            }
        }
    }
}

/// Short label explaining why today's list looks the way it does
pub fn rationale(mood: Mood) -> &'static str {
    match mood {
        Mood::Good => "Good day: full stack, holds progress with the program week",
        Mood::Okay => "Okay day: steady stack, progression capped at +12s",
        Mood::Flare => "Flare day: calm-down stack, holds trimmed and not progressed",
    }
}

// ---------------------------------------------------------------------------
/// Selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct StackSelector {
    policy: SelectionPolicy,
}

impl StackSelector {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn effective_mood(&self, mood: Mood, pain: &PainVector) -> Mood {
        self.policy.effective_mood(mood, pain)
    }

    /// Resolve today's ordered exercise list.
    ///
    /// Ids missing from the catalog are skipped. The supplement is appended
    /// once for non-Flare tiers, even if the stack already contains it.
    pub fn select<'a>(
        &self,
        mood: Mood,
        pain: &PainVector,
        stacks: &Stacks,
        catalog: &'a Catalog,
        include_supplement: bool,
    ) -> Vec<&'a Exercise> {
        let tier = self.effective_mood(mood, pain);

        let mut exercises: Vec<&Exercise> = stacks
            .get(tier)
            .iter()
            .filter_map(|id| catalog.get(id))
            .collect();

        if include_supplement && tier != Mood::Flare {
            if let Some(supplement) = catalog.supplement() {
                exercises.push(supplement);
            }
        }

        exercises
    }
}
