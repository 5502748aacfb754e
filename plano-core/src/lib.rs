#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

// Organized modules
pub mod geometry;
pub mod problem;
pub mod render;
pub mod session;

// Utility modules
pub mod error;
pub mod fmt;

pub use geometry::figure;
pub use geometry::grid;
pub use geometry::r2;

pub use render::command;
pub use render::plane;
pub use render::surface;

pub use session::verdict;

// Re-export key types for external use
pub use command::{DrawCommand, Frame};
pub use error::{GridError, ProblemError, SessionError};
pub use figure::{Circle, Figure, FigureKind, Line, Point};
pub use grid::{GridConfig, Mapper};
pub use plane::{Plane, Style};
pub use problem::{generate, generate_named, parse_selection, Difficulty, Mode, Problem, Step, StepKey};
pub use r2::R2;
pub use session::{Selection, Session, Verification};
pub use surface::Surface;
pub use verdict::{StepResult, Verdict};

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> Result<log::LevelFilter, error::LogLevelError> {
    match level.map(str::trim) {
        Some("error") => Ok(log::LevelFilter::Error),
        Some("warn") => Ok(log::LevelFilter::Warn),
        Some("info") | Some("") | None => Ok(log::LevelFilter::Info),
        Some("debug") => Ok(log::LevelFilter::Debug),
        Some("trace") => Ok(log::LevelFilter::Trace),
        Some(level) => Err(error::LogLevelError(level.to_string())),
    }
}
