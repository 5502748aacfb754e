use std::fmt;

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{fmt::NumStr, figure::Figure, problem::StepKey};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
pub enum Verdict {
    #[default]
    Unverified,
    Correct,
    Incorrect,
}

impl Verdict {
    /// Inline marker shown next to a step.
    pub fn marker(&self) -> &'static str {
        match self {
            Verdict::Unverified => "",
            Verdict::Correct => "✔ Correcto",
            Verdict::Incorrect => "❌ Incorrecto",
        }
    }
    pub fn is_correct(&self) -> bool {
        *self == Verdict::Correct
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Per-step state, reset whenever a new problem is installed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
pub struct StepResult {
    /// Last submitted input, as typed
    pub attempted: String,
    pub verdict: Verdict,
    /// Set once the step is correct; the answer can no longer change
    pub locked: bool,
}

/// Strip every whitespace character.
pub fn normalize(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Exact string match against the figure: the canonical equation for [`StepKey::Eq`], the
/// coefficient's default string form otherwise. No numeric tolerance: `"4.0"` ≠ `"4"`.
pub fn check(figure: &Figure, key: StepKey, input: &str) -> Verdict {
    let input = normalize(input);
    let expected = match key {
        StepKey::Eq => normalize(&figure.expected_equation()),
        key => match figure.value(key) {
            Some(v) => v.num_str(),
            None => return Verdict::Incorrect,
        },
    };
    if input == expected {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}
