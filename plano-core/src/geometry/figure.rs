use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{fmt::NumStr, problem::StepKey, r2::R2};

pub type Point = R2;

/// Circle in standard form `(x-h)^2+(y-k)^2=r^2`.
#[derive(Debug, Display, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[display(fmt = "Circle {{ h: {}, k: {}, r: {} }}", h, k, r)]
pub struct Circle {
    pub h: f64,
    pub k: f64,
    pub r: f64,
}

impl Circle {
    pub fn center(&self) -> R2 {
        R2 { x: self.h, y: self.k }
    }
    pub fn r_squared(&self) -> f64 {
        self.r * self.r
    }
}

/// Line in standard form `ax+by=c`.
#[derive(Debug, Display, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[display(fmt = "Line {{ a: {}, b: {}, c: {} }}", a, b, c)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    pub fn is_vertical(&self) -> bool {
        self.b == 0.
    }
    /// `y = (c - a·x) / b`; non-finite when the line is vertical.
    pub fn y_at(&self, x: f64) -> f64 {
        (self.c - self.a * x) / self.b
    }
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
pub enum FigureKind {
    Circle,
    Line,
}

#[derive(Debug, Display, Copy, Clone, From, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(tag = "kind")]
pub enum Figure {
    Circle(Circle),
    Line(Line),
}

impl Figure {
    pub fn kind(&self) -> FigureKind {
        match self {
            Figure::Circle(_) => FigureKind::Circle,
            Figure::Line(_) => FigureKind::Line,
        }
    }
    /// Coefficient named by `key`, if this figure has one.
    pub fn value(&self, key: StepKey) -> Option<f64> {
        match (self, key) {
            (Figure::Circle(c), StepKey::H) => Some(c.h),
            (Figure::Circle(c), StepKey::K) => Some(c.k),
            (Figure::Circle(c), StepKey::R) => Some(c.r),
            (Figure::Line(l), StepKey::A) => Some(l.a),
            (Figure::Line(l), StepKey::B) => Some(l.b),
            (Figure::Line(l), StepKey::C) => Some(l.c),
            _ => None,
        }
    }
    /// Canonical equation string, whitespace-free. Values are substituted verbatim, so a
    /// negative center renders as e.g. `(x--3)`.
    pub fn expected_equation(&self) -> String {
        match self {
            Figure::Circle(c) => format!(
                "(x-{})^2+(y-{})^2={}",
                c.h.num_str(),
                c.k.num_str(),
                c.r_squared().num_str(),
            ),
            Figure::Line(l) => format!(
                "{}x+{}y={}",
                l.a.num_str(),
                l.b.num_str(),
                l.c.num_str(),
            ),
        }
    }
}
