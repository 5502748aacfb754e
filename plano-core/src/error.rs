use crate::problem::StepKey;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("Grid spacing must be a positive, finite number of pixels, got {0}")]
    Spacing(f64),

    #[error("Surface dimensions must be positive and finite, got {width}x{height}")]
    Surface { width: f64, height: f64 },

    #[error("Grid spacing {spacing} on a {extent}px surface would need more than {max} lines")]
    Density { spacing: f64, extent: f64, max: usize },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ProblemError {
    #[error("Unrecognized mode: {0:?} (expected \"construye\" or \"identifica\")")]
    UnknownMode(String),

    #[error("Unrecognized difficulty: {0:?} (expected \"facil\", \"medio\" or \"dificil\")")]
    UnknownDifficulty(String),
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Selecciona un modo")]
    MissingMode,

    #[error("No active problem")]
    NoProblem,

    #[error("No mode/difficulty selected yet")]
    NoSelection,

    #[error("Step {index} out of range (problem has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },

    #[error("Step {index} ({key}) is already correct and locked")]
    StepLocked { index: usize, key: StepKey },

    #[error("Current problem is not complete yet")]
    NotComplete,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("invalid log level: {0}")]
pub struct LogLevelError(pub String);
