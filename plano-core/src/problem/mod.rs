//! Problem generation: (mode, difficulty) → figure, prompt and ordered verification steps.
//!
//! Generation is a fixed lookup; the same inputs always yield the same problem.

use std::{fmt, str::FromStr};

use log::debug;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    error::ProblemError,
    figure::{Circle, Figure, FigureKind, Line},
};

pub const CIRCLE_PROMPT: &str = "Dibuja el círculo de centro (h,k) y radio r. Escribe la ecuación estándar.";
pub const LINE_PROMPT: &str = "Determina la ecuación de la recta en la forma ax + by = c.";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Build a circle from its center and radius
    Construye,
    /// Identify the coefficients of a line
    Identifica,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Facil,
    Medio,
    Dificil,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "lowercase")]
pub enum StepKey {
    H,
    K,
    R,
    A,
    B,
    C,
    Eq,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Construye, Mode::Identifica];
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Construye => "construye",
            Mode::Identifica => "identifica",
        }
    }
    /// Difficulty for this mode from a raw selector value. Line problems don't use it, so any
    /// value is accepted for them.
    pub fn difficulty(&self, name: &str) -> Result<Difficulty, ProblemError> {
        match self {
            Mode::Construye => name.parse(),
            Mode::Identifica => Ok(name.parse().unwrap_or_default()),
        }
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Facil, Difficulty::Medio, Difficulty::Dificil];
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Facil => "facil",
            Difficulty::Medio => "medio",
            Difficulty::Dificil => "dificil",
        }
    }
}

impl StepKey {
    pub fn name(&self) -> &'static str {
        match self {
            StepKey::H => "h",
            StepKey::K => "k",
            StepKey::R => "r",
            StepKey::A => "a",
            StepKey::B => "b",
            StepKey::C => "c",
            StepKey::Eq => "eq",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ProblemError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Mode::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ProblemError::UnknownMode(s.to_string()))
    }
}

impl FromStr for Difficulty {
    type Err = ProblemError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| ProblemError::UnknownDifficulty(s.to_string()))
    }
}

/// One sub-answer the learner must supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Step {
    pub label: String,
    /// Placeholder hint shown in the empty answer field
    pub formula: String,
    pub key: StepKey,
}

impl Step {
    pub fn new(label: &str, formula: &str, key: StepKey) -> Self {
        Step { label: label.to_string(), formula: formula.to_string(), key }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Problem {
    pub figure: Figure,
    pub text: String,
    /// Insertion order is the suggested completion order; it is not enforced.
    pub steps: Vec<Step>,
}

impl Problem {
    pub fn kind(&self) -> FigureKind {
        self.figure.kind()
    }
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
    /// Index of the step verifying `key`, if any.
    pub fn step_index(&self, key: StepKey) -> Option<usize> {
        self.steps.iter().position(|s| s.key == key)
    }
}

/// (h, k, r) for each difficulty
fn circle_for(difficulty: Difficulty) -> Circle {
    match difficulty {
        Difficulty::Facil => Circle { h: 0., k: 0., r: 4. },
        Difficulty::Medio => Circle { h: 2., k: -1., r: 3. },
        Difficulty::Dificil => Circle { h: -3., k: 2., r: 5. },
    }
}

const LINE: Line = Line { a: 2., b: 1., c: 4. };

pub fn generate(mode: Mode, difficulty: Difficulty) -> Problem {
    let problem = match mode {
        Mode::Construye => Problem {
            figure: circle_for(difficulty).into(),
            text: CIRCLE_PROMPT.to_string(),
            steps: vec![
                Step::new("Centro h", "h = ...", StepKey::H),
                Step::new("Centro k", "k = ...", StepKey::K),
                Step::new("Radio r", "r = ...", StepKey::R),
                Step::new("Ecuación estándar", "(x - h)^2 + (y - k)^2 = r^2", StepKey::Eq),
            ],
        },
        // Difficulty doesn't affect line problems
        Mode::Identifica => Problem {
            figure: LINE.into(),
            text: LINE_PROMPT.to_string(),
            steps: vec![
                Step::new("a", "a = ...", StepKey::A),
                Step::new("b", "b = ...", StepKey::B),
                Step::new("c", "c = ...", StepKey::C),
                Step::new("Ecuación", "ax + by = c", StepKey::Eq),
            ],
        },
    };
    debug!("generated {} problem ({}, {}): {}", problem.kind(), mode, difficulty, problem.figure);
    problem
}

/// Raw selector values → (mode, difficulty). An empty mode is no selection (`Ok(None)`), and
/// the difficulty is checked only after the mode, and only for modes that use it.
pub fn parse_selection(mode: &str, difficulty: &str) -> Result<Option<(Mode, Difficulty)>, ProblemError> {
    let mode = mode.trim();
    if mode.is_empty() {
        return Ok(None);
    }
    let mode: Mode = mode.parse()?;
    Ok(Some((mode, mode.difficulty(difficulty)?)))
}

/// Generate from raw selector names; `None` for an unrecognized mode, or an unrecognized
/// difficulty on a circle problem.
pub fn generate_named(mode: &str, difficulty: &str) -> Option<Problem> {
    parse_selection(mode, difficulty)
        .ok()
        .flatten()
        .map(|(mode, difficulty)| generate(mode, difficulty))
}
