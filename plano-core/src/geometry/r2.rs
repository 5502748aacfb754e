use std::ops::{Add, Sub};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

#[derive(Debug, Display, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[display(fmt = "({}, {})", x, y)]
pub struct R2 {
    pub x: f64,
    pub y: f64,
}

impl R2 {
    pub fn new(x: f64, y: f64) -> Self {
        R2 { x, y }
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for R2 {
    type Output = R2;
    fn add(self, o: R2) -> R2 {
        R2 { x: self.x + o.x, y: self.y + o.y }
    }
}

impl Sub for R2 {
    type Output = R2;
    fn sub(self, o: R2) -> R2 {
        R2 { x: self.x - o.x, y: self.y - o.y }
    }
}

impl From<(f64, f64)> for R2 {
    fn from((x, y): (f64, f64)) -> Self {
        R2 { x, y }
    }
}
