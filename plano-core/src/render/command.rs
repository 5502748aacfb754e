use derive_more::Deref;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::r2::R2;

/// A single drawing instruction in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(tag = "kind")]
pub enum DrawCommand {
    /// Clear the whole surface and fill it with `fill`
    Clear { width: f64, height: f64, fill: String },
    Segment { from: R2, to: R2, stroke: String, line_width: f64 },
    /// One stroked path through consecutive points
    Polyline { points: Vec<R2>, stroke: String, line_width: f64 },
    /// Full-circle stroke
    Arc { center: R2, radius: f64, stroke: String, line_width: f64 },
    Disk { center: R2, radius: f64, fill: String },
    Text { at: R2, text: String, fill: String, font: String },
}

/// Ordered draw commands; later commands paint over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Deref, Serialize, Deserialize)]
pub struct Frame(pub Vec<DrawCommand>);

impl Frame {
    pub fn new() -> Self {
        Frame(Vec::new())
    }
    pub fn push(&mut self, command: DrawCommand) {
        self.0.push(command);
    }
}
