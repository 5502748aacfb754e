//! Progress through a problem: per-step verification and completion.
//!
//! A [`Session`] is a plain owned value. The UI collaborator holds exactly one, feeds it
//! learner actions ("start", "verify step i", "next problem", "reset") and reads back the
//! resulting state. Each step goes `Unverified → {Correct, Incorrect}`; `Incorrect` may be
//! retried indefinitely, `Correct` locks the step. Steps can be verified in any order; the
//! problem is complete once every step is `Correct`.

pub mod verdict;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    error::SessionError,
    problem::{generate, Difficulty, Mode, Problem},
};
use verdict::{check, StepResult, Verdict};

/// Shown when the learner leaves their name empty.
pub const ANONYMOUS: &str = "(sin nombre)";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
pub struct Selection {
    pub mode: Mode,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Session {
    /// Display name echoed back to the learner
    pub learner: Option<String>,
    /// Last mode/difficulty chosen; "next problem" regenerates from it
    pub selection: Option<Selection>,
    pub problem: Option<Problem>,
    /// One entry per step of `problem`
    pub results: Vec<StepResult>,
    /// Every step of `problem` is correct; the "next problem" affordance is visible
    pub complete: bool,
}

/// Outcome of a single `verify` call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
pub struct Verification {
    pub index: usize,
    pub verdict: Verdict,
    /// True only for the verification that completed the problem
    pub completed: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Echo the learner's name, remember the selection and install a fresh problem. Without a
    /// mode nothing changes.
    pub fn start(&mut self, name: &str, mode: Option<Mode>, difficulty: Difficulty) -> Result<&Problem, SessionError> {
        let mode = mode.ok_or(SessionError::MissingMode)?;
        let name = name.trim();
        self.learner = Some(if name.is_empty() { ANONYMOUS } else { name }.to_string());
        self.selection = Some(Selection { mode, difficulty });
        info!("start: learner {:?}, {} / {}", self.learner_name(), mode, difficulty);
        Ok(self.install(generate(mode, difficulty)))
    }

    /// Change the remembered mode/difficulty without touching the active problem.
    pub fn select(&mut self, mode: Mode, difficulty: Difficulty) {
        self.selection = Some(Selection { mode, difficulty });
    }

    /// Replace a completed problem with a new one from the remembered selection.
    pub fn next_problem(&mut self) -> Result<&Problem, SessionError> {
        if self.problem.is_none() {
            return Err(SessionError::NoProblem);
        }
        if !self.complete {
            return Err(SessionError::NotComplete);
        }
        let Selection { mode, difficulty } = self.selection.ok_or(SessionError::NoSelection)?;
        info!("next problem: {} / {}", mode, difficulty);
        Ok(self.install(generate(mode, difficulty)))
    }

    /// Discard all state.
    pub fn reset(&mut self) {
        info!("reset");
        *self = Session::default();
    }

    pub fn verify(&mut self, index: usize, raw: &str) -> Result<Verification, SessionError> {
        let problem = self.problem.as_ref().ok_or(SessionError::NoProblem)?;
        let step = problem.steps.get(index).ok_or(SessionError::StepOutOfRange { index, len: problem.len() })?;
        // State may round-trip through the UI; keep one result per step
        self.results.resize(problem.len(), StepResult::default());
        if self.results[index].locked {
            return Err(SessionError::StepLocked { index, key: step.key });
        }

        let verdict = check(&problem.figure, step.key, raw);
        debug!("verify step {} ({}): {:?} → {:?}", index, step.key, raw, verdict);
        self.results[index] = StepResult {
            attempted: raw.to_string(),
            verdict,
            locked: verdict.is_correct(),
        };

        let mut completed = false;
        if verdict.is_correct() && !self.complete && self.results.iter().all(|r| r.verdict.is_correct()) {
            info!("problem complete");
            self.complete = true;
            completed = true;
        }
        Ok(Verification { index, verdict, completed })
    }

    fn install(&mut self, problem: Problem) -> &Problem {
        self.results = vec![StepResult::default(); problem.len()];
        self.complete = false;
        self.problem.insert(problem)
    }

    pub fn learner_name(&self) -> &str {
        self.learner.as_deref().unwrap_or(ANONYMOUS)
    }
    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }
    pub fn prompt(&self) -> Option<&str> {
        self.problem.as_ref().map(|p| p.text.as_str())
    }
    pub fn results(&self) -> &[StepResult] {
        &self.results
    }
    /// Whether the "next problem" affordance should be shown.
    pub fn can_advance(&self) -> bool {
        self.problem.is_some() && self.complete
    }
    /// Indices of steps not yet correct.
    pub fn pending(&self) -> Vec<usize> {
        self.results
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.verdict.is_correct())
            .map(|(idx, _)| idx)
            .collect()
    }
}
