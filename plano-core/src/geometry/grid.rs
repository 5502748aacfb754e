//! Logical plane ↔ pixel surface mapping.
//!
//! The logical plane is y-up with its origin at the exact pixel center of the surface; the
//! pixel surface is y-down with its origin at the top-left corner. Every conversion flips the
//! sign of y.

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{error::GridError, r2::R2};

pub const DEFAULT_SPACING: f64 = 25.;
pub const DEFAULT_WIDTH: f64 = 500.;
pub const DEFAULT_HEIGHT: f64 = 500.;
/// Upper bound on grid lines per direction.
pub const MAX_GRID_LINES: usize = 10_000;

/// Grid spacing and surface size, fixed for a session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Tsify)]
pub struct GridConfig {
    /// Pixels per logical unit
    pub spacing: f64,
    /// Surface width in pixels
    pub width: f64,
    /// Surface height in pixels
    pub height: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl GridConfig {
    pub fn new(spacing: f64, width: f64, height: f64) -> Result<GridConfig, GridError> {
        GridConfig { spacing, width, height }.validate()
    }
    pub fn validate(self) -> Result<GridConfig, GridError> {
        let GridConfig { spacing, width, height } = self;
        if !spacing.is_finite() || spacing <= 0. {
            return Err(GridError::Spacing(spacing));
        }
        if !width.is_finite() || !height.is_finite() || width <= 0. || height <= 0. {
            return Err(GridError::Surface { width, height });
        }
        let extent = width.max(height);
        if extent / spacing >= MAX_GRID_LINES as f64 {
            return Err(GridError::Density { spacing, extent, max: MAX_GRID_LINES });
        }
        Ok(self)
    }
    /// Offsets `0, spacing, 2·spacing, …` up to and including `extent`, at most
    /// [`MAX_GRID_LINES`] of them (also for configs that skipped [`validate`](Self::validate)).
    pub fn lines(&self, extent: f64) -> impl Iterator<Item = f64> {
        let spacing = self.spacing;
        let n = (extent / spacing + 1e-9).floor();
        let n = if n.is_finite() && n >= 0. { (n as usize).min(MAX_GRID_LINES - 1) } else { 0 };
        (0..=n).map(move |i| i as f64 * spacing)
    }
    pub fn mapper(&self) -> Mapper {
        Mapper::new(*self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mapper {
    config: GridConfig,
    origin: R2,
}

impl Mapper {
    pub fn new(config: GridConfig) -> Self {
        let origin = R2 { x: config.width / 2., y: config.height / 2. };
        Mapper { config, origin }
    }
    pub fn config(&self) -> &GridConfig {
        &self.config
    }
    /// Pixel position of the logical origin.
    pub fn origin(&self) -> R2 {
        self.origin
    }
    pub fn spacing(&self) -> f64 {
        self.config.spacing
    }
    pub fn to_pixel(&self, p: R2) -> R2 {
        R2 {
            x: self.origin.x + p.x * self.config.spacing,
            y: self.origin.y - p.y * self.config.spacing,
        }
    }
    pub fn to_logical(&self, px: R2) -> R2 {
        R2 {
            x: (px.x - self.origin.x) / self.config.spacing,
            y: (self.origin.y - px.y) / self.config.spacing,
        }
    }
    /// Logical length → pixel length.
    pub fn scale(&self, len: f64) -> f64 {
        len * self.config.spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn origin_is_surface_center() {
        for (spacing, width, height) in [(25., 500., 500.), (10., 640., 480.), (7.5, 301., 99.)] {
            let mapper = GridConfig::new(spacing, width, height).unwrap().mapper();
            let o = mapper.to_pixel(R2::new(0., 0.));
            assert_eq!(o, R2::new(width / 2., height / 2.));
            assert_eq!(o, mapper.origin());
        }
    }

    #[test]
    fn y_axis_is_flipped() {
        let mapper = GridConfig::default().mapper();
        assert_eq!(mapper.to_pixel(R2::new(1., 0.)), R2::new(275., 250.));
        assert_eq!(mapper.to_pixel(R2::new(0., 1.)), R2::new(250., 225.));
        assert_eq!(mapper.to_pixel(R2::new(-3., 2.)), R2::new(175., 200.));
        assert_eq!(mapper.to_pixel(R2::new(10., -10.)), R2::new(500., 500.));
    }

    #[test]
    fn round_trip() {
        let mapper = GridConfig::new(17.3, 611., 403.).unwrap().mapper();
        for &(x, y) in &[(0., 0.), (1.25, -3.5), (-1e3, 7e2), (0.1, 0.2), (-19.9, 19.9)] {
            let p = mapper.to_logical(mapper.to_pixel(R2::new(x, y)));
            assert_relative_eq!(p.x, x, epsilon = 1e-9);
            assert_relative_eq!(p.y, y, epsilon = 1e-9);
        }
    }

    #[test]
    fn scale() {
        let mapper = GridConfig::default().mapper();
        assert_eq!(mapper.scale(4.), 100.);
    }

    #[test]
    fn invalid_configs() {
        assert_eq!(GridConfig::new(0., 500., 500.), Err(GridError::Spacing(0.)));
        assert_eq!(GridConfig::new(-5., 500., 500.), Err(GridError::Spacing(-5.)));
        assert!(GridConfig::new(f64::NAN, 500., 500.).is_err());
        assert_eq!(
            GridConfig::new(25., 0., 500.),
            Err(GridError::Surface { width: 0., height: 500. }),
        );
        assert!(GridConfig::new(25., 500., f64::INFINITY).is_err());
        assert_eq!(
            GridConfig::new(1e-300, 500., 400.),
            Err(GridError::Density { spacing: 1e-300, extent: 500., max: MAX_GRID_LINES }),
        );
        assert!(GridConfig::new(0.06, 500., 500.).is_ok());
    }

    #[test]
    fn line_offsets() {
        let config = GridConfig::new(40., 200., 120.).unwrap();
        assert_eq!(config.lines(config.width).collect::<Vec<_>>(), vec![0., 40., 80., 120., 160., 200.]);
        assert_eq!(config.lines(config.height).collect::<Vec<_>>(), vec![0., 40., 80., 120.]);
        assert_eq!(GridConfig::default().lines(500.).count(), 21);
        // 0.1 is not exactly representable; the edge line is still included
        let config = GridConfig { spacing: 0.1, width: 1., height: 1. };
        assert_eq!(config.lines(1.).count(), 11);
    }

    #[test]
    fn unvalidated_lines_are_bounded() {
        let config = GridConfig { spacing: 1e-300, width: 500., height: 500. };
        assert_eq!(config.lines(config.width).count(), MAX_GRID_LINES);
        let config = GridConfig { spacing: f64::NAN, width: 500., height: 500. };
        assert_eq!(config.lines(config.width).count(), 1);
    }
}
