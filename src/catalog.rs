//! Built-in exercise catalog
//!
//! Static reference data: every exercise a stack can point at, the
//! supplementary add-on, and the default stack for each mood.

use crate::models::{Exercise, ExerciseKind, Mood};

/// Appended to Good and Okay days when the supplement is enabled
pub const SUPPLEMENT_ID: &str = "zone2-walk";

const GOOD_STACK: &[&str] = &[
    "side-plank-knees",
    "wall-sit",
    "dead-bug-hold",
    "glute-bridge-hold",
    "cat-camel",
];

const OKAY_STACK: &[&str] = &[
    "rib-expansion",
    "heel-slides",
    "elbow-iso-flexion",
    "adductor-squeeze",
    "glute-bridge-hold",
];

const FLARE_STACK: &[&str] = &["box-breathing", "lymph-sweep", "supported-bridge", "cat-camel"];

/// Ids of the default stack for a mood
pub fn default_stack(mood: Mood) -> Vec<String> {
    let ids = match mood {
        Mood::Good => GOOD_STACK,
        Mood::Okay => OKAY_STACK,
        Mood::Flare => FLARE_STACK,
    };
    ids.iter().map(|id| id.to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct Catalog {
    exercises: Vec<Exercise>,
}

impl Catalog {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    /// Look up an exercise by id
    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|ex| ex.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn supplement(&self) -> Option<&Exercise> {
        self.get(SUPPLEMENT_ID)
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// The catalog shipped with the planner
    pub fn builtin() -> Self {
        Self::new(vec![
            // Holds
            hold(
                "side-plank-knees",
                "Side plank from knees",
                "Core/Obliques",
                25,
                &["Lie on your side, knees bent to 90°", "Elbow directly under shoulder"],
                &["Lift hips until knees, hips and shoulders line up", "Breathe into the top ribs"],
            ),
            hold(
                "wall-sit",
                "Wall sit",
                "Quads/Knee",
                25,
                &["Back flat on the wall", "Slide down until knees are over ankles"],
                &["Stop above any painful angle", "Weight through the whole foot"],
            ),
            hold(
                "dead-bug-hold",
                "Dead bug hold",
                "Core (deep)",
                25,
                &["Lie on your back, arms to the ceiling", "Knees over hips, shins level"],
                &["Low back stays heavy on the floor", "Slow exhale through pursed lips"],
            ),
            hold(
                "glute-bridge-hold",
                "Glute bridge hold",
                "Glutes",
                25,
                &["Feet hip width, heels close to glutes"],
                &["Squeeze glutes before lifting", "Ribs down, no arching"],
            ),
            hold(
                "elbow-iso-flexion",
                "Isometric elbow flexion (wall)",
                "Elbow",
                20,
                &["Stand side-on to a wall, elbow bent to 90°", "Palm up under a fixed edge"],
                &["Press up at about half effort", "Pain should stay at 3/10 or less"],
            ),
            hold(
                "adductor-squeeze",
                "Adductor ball squeeze",
                "Adductors",
                20,
                &["Lie on your back, knees bent", "Ball or cushion between the knees"],
                &["Squeeze gently, build to firm", "Keep the pelvis level"],
            ),
            hold(
                "supported-bridge",
                "Supported bridge hold",
                "Glutes/Low back",
                20,
                &["Block or cushion under the sacrum"],
                &["Let the support take the weight", "Long, slow breaths"],
            ),
            // Breathing
            breath(
                "box-breathing",
                "Box breathing 4-4-6-2",
                "Nervous system",
                "3 min",
                &["Sit or lie supported"],
                &["In 4, hold 4, out 6, rest 2"],
            ),
            breath(
                "rib-expansion",
                "Lateral rib expansion",
                "Ribs/Breathing",
                "4 x 5 slow breaths",
                &["Lie on your back, hands on the lower ribs"],
                &["Breathe into the hands, sideways", "Let the exhale fully finish"],
            ),
            // Mobility
            mobility(
                "cat-camel",
                "Cat-camel",
                "Spine",
                "2 x 8 slow",
                &["Hands under shoulders, knees under hips"],
                &["Move one segment at a time", "Stay inside a pain-free range"],
            ),
            mobility(
                "heel-slides",
                "Heel slide with breath",
                "Core",
                "2 x 8/side",
                &["Lie on your back, knees bent"],
                &["Exhale as the heel slides away", "Pelvis stays still"],
            ),
            mobility(
                "lymph-sweep",
                "Lymph sweep (neck, ear, jaw)",
                "Lymph",
                "2 min",
                &["Sit tall, shoulders relaxed"],
                &["Light skin pressure only", "Sweep towards the collarbone"],
            ),
            mobility(
                SUPPLEMENT_ID,
                "Zone 2 walk",
                "Cardio/Lymph",
                "12-15 min easy",
                &["Flat route, supportive shoes"],
                &["Conversational pace", "Nasal breathing if you can"],
            ),
        ])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn hold(
    id: &str,
    name: &str,
    area: &str,
    base_seconds: u32,
    setup: &[&str],
    cues: &[&str],
) -> Exercise {
    build(id, name, area, ExerciseKind::Hold { base_seconds }, setup, cues)
}

fn breath(id: &str, name: &str, area: &str, reps: &str, setup: &[&str], cues: &[&str]) -> Exercise {
    let kind = ExerciseKind::Breath {
        reps: reps.to_string(),
    };
    build(id, name, area, kind, setup, cues)
}

fn mobility(
    id: &str,
    name: &str,
    area: &str,
    reps: &str,
    setup: &[&str],
    cues: &[&str],
) -> Exercise {
    let kind = ExerciseKind::Mobility {
        reps: reps.to_string(),
    };
    build(id, name, area, kind, setup, cues)
}

fn build(
    id: &str,
    name: &str,
    area: &str,
    kind: ExerciseKind,
    setup: &[&str],
    cues: &[&str],
) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.to_string(),
        area: area.to_string(),
        kind,
        setup_steps: setup.iter().map(|s| s.to_string()).collect(),
        cues: cues.iter().map(|s| s.to_string()).collect(),
    }
}
