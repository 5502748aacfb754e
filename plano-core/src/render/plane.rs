//! Cartesian plane rendering: grid, axes, tick labels and figures, as [`DrawCommand`]s.
//!
//! Nothing here validates its inputs. Non-finite values flow through to the emitted
//! coordinates, and surfaces are expected to skip what they cannot draw.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    command::{DrawCommand, Frame},
    figure::{Circle, Figure, Line},
    grid::{GridConfig, Mapper},
    problem::Problem,
    r2::R2,
};

/// Integer ticks labelled on each axis (0 is skipped).
pub const TICKS: std::ops::RangeInclusive<i32> = -10..=10;
/// Logical x-domain sampled when plotting lines.
pub const LINE_DOMAIN: (f64, f64) = (-20., 20.);
pub const LINE_STEP: f64 = 0.1;

/// Colors, widths and fonts used when rendering the plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(default)]
pub struct Style {
    pub background: String,
    pub grid_stroke: String,
    pub grid_width: f64,
    pub axis_stroke: String,
    pub axis_width: f64,
    pub label_fill: String,
    pub label_font: String,
    /// Offset of x-axis labels from their tick, in pixels
    pub x_label_offset: R2,
    /// Offset of y-axis labels from their tick, in pixels
    pub y_label_offset: R2,
    pub point_color: String,
    pub point_radius: f64,
    pub circle_color: String,
    pub line_color: String,
    pub figure_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: "#fff".to_string(),
            grid_stroke: "#e8e8ee".to_string(),
            grid_width: 1.,
            axis_stroke: "#444".to_string(),
            axis_width: 2.,
            label_fill: "#333".to_string(),
            label_font: "12px Arial".to_string(),
            x_label_offset: R2 { x: -6., y: 14. },
            y_label_offset: R2 { x: -18., y: 4. },
            point_color: "red".to_string(),
            point_radius: 5.,
            circle_color: "green".to_string(),
            line_color: "blue".to_string(),
            figure_width: 1.,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Plane {
    pub mapper: Mapper,
    pub style: Style,
}

impl Plane {
    pub fn new(config: GridConfig, style: Style) -> Self {
        Plane { mapper: config.mapper(), style }
    }

    /// Background, grid lines, axes, then tick labels.
    pub fn draw_grid(&self, frame: &mut Frame) {
        let GridConfig { width, height, .. } = *self.mapper.config();
        let style = &self.style;
        frame.push(DrawCommand::Clear { width, height, fill: style.background.clone() });

        let config = self.mapper.config();
        for x in config.lines(width) {
            frame.push(self.segment((x, 0.), (x, height), &style.grid_stroke, style.grid_width));
        }
        for y in config.lines(height) {
            frame.push(self.segment((0., y), (width, y), &style.grid_stroke, style.grid_width));
        }

        let origin = self.mapper.origin();
        frame.push(self.segment((origin.x, 0.), (origin.x, height), &style.axis_stroke, style.axis_width));
        frame.push(self.segment((0., origin.y), (width, origin.y), &style.axis_stroke, style.axis_width));

        for i in TICKS.filter(|i| *i != 0) {
            let v = i as f64;
            let tick = self.mapper.to_pixel(R2 { x: v, y: 0. });
            frame.push(self.label(tick + style.x_label_offset, i));
            let tick = self.mapper.to_pixel(R2 { x: 0., y: -v });
            frame.push(self.label(tick + style.y_label_offset, -i));
        }
    }

    pub fn plot_point(&self, frame: &mut Frame, p: R2, color: &str) {
        frame.push(DrawCommand::Disk {
            center: self.mapper.to_pixel(p),
            radius: self.style.point_radius,
            fill: color.to_string(),
        });
    }

    pub fn plot_circle(&self, frame: &mut Frame, circle: &Circle, color: &str) {
        frame.push(DrawCommand::Arc {
            center: self.mapper.to_pixel(circle.center()),
            radius: self.mapper.scale(circle.r),
            stroke: color.to_string(),
            line_width: self.style.figure_width,
        });
    }

    /// Samples `y = (c - a·x) / b` across [`LINE_DOMAIN`]. A vertical line (`b == 0`) yields
    /// non-finite samples and renders degenerate; this is a known limitation.
    pub fn plot_line(&self, frame: &mut Frame, line: &Line, color: &str) {
        if line.is_vertical() {
            warn!("plotting vertical line {}: b = 0, samples will be non-finite", line);
        }
        let (lo, hi) = LINE_DOMAIN;
        let n = ((hi - lo) / LINE_STEP).round() as usize;
        let points = (0..=n)
            .map(|i| {
                let x = lo + i as f64 * LINE_STEP;
                self.mapper.to_pixel(R2 { x, y: line.y_at(x) })
            })
            .collect();
        frame.push(DrawCommand::Polyline {
            points,
            stroke: color.to_string(),
            line_width: self.style.figure_width,
        });
    }

    /// Plot a figure in its default color.
    pub fn plot_figure(&self, frame: &mut Frame, figure: &Figure) {
        match figure {
            Figure::Circle(c) => self.plot_circle(frame, c, &self.style.circle_color),
            Figure::Line(l) => self.plot_line(frame, l, &self.style.line_color),
        }
    }

    /// Fresh grid, then the problem's figure.
    pub fn render_problem(&self, problem: &Problem) -> Frame {
        let mut frame = self.empty();
        self.plot_figure(&mut frame, &problem.figure);
        debug!("rendered {} problem: {} commands", problem.kind(), frame.len());
        frame
    }

    /// Grid only.
    pub fn empty(&self) -> Frame {
        let mut frame = Frame::new();
        self.draw_grid(&mut frame);
        frame
    }

    fn segment(&self, from: (f64, f64), to: (f64, f64), stroke: &str, line_width: f64) -> DrawCommand {
        DrawCommand::Segment {
            from: from.into(),
            to: to.into(),
            stroke: stroke.to_string(),
            line_width,
        }
    }

    fn label(&self, at: R2, value: i32) -> DrawCommand {
        DrawCommand::Text {
            at,
            text: value.to_string(),
            fill: self.style.label_fill.clone(),
            font: self.style.label_font.clone(),
        }
    }
}

impl Default for Plane {
    fn default() -> Self {
        Plane::new(GridConfig::default(), Style::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{generate, Difficulty, Mode};
    use test_log::test;

    fn segments(frame: &Frame, stroke: &str) -> Vec<(R2, R2)> {
        frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Segment { from, to, stroke: s, .. } if s == stroke => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    fn labels(frame: &Frame) -> Vec<(R2, String)> {
        frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { at, text, .. } => Some((*at, text.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn grid_order() {
        let frame = Plane::default().empty();
        let kinds: Vec<&str> = frame
            .iter()
            .map(|c| match c {
                DrawCommand::Clear { .. } => "clear",
                DrawCommand::Segment { stroke, .. } if stroke == "#444" => "axis",
                DrawCommand::Segment { .. } => "grid",
                DrawCommand::Text { .. } => "label",
                _ => "other",
            })
            .collect();
        let mut dedup = kinds.clone();
        dedup.dedup();
        assert_eq!(dedup, vec!["clear", "grid", "axis", "label"]);
        // 500px / 25px → 21 lines in each direction, edges included
        assert_eq!(kinds.iter().filter(|k| **k == "grid").count(), 42);
        assert_eq!(kinds.iter().filter(|k| **k == "axis").count(), 2);
        assert_eq!(kinds.iter().filter(|k| **k == "label").count(), 40);
    }

    #[test]
    fn grid_lines_cover_surface() {
        let plane = Plane::new(GridConfig::new(40., 200., 120.).unwrap(), Style::default());
        let frame = plane.empty();
        let grid = segments(&frame, "#e8e8ee");
        let verticals: Vec<f64> = grid.iter().filter(|(f, t)| f.x == t.x).map(|(f, _)| f.x).collect();
        let horizontals: Vec<f64> = grid.iter().filter(|(f, t)| f.y == t.y).map(|(f, _)| f.y).collect();
        assert_eq!(verticals, vec![0., 40., 80., 120., 160., 200.]);
        assert_eq!(horizontals, vec![0., 40., 80., 120.]);

        let axes = segments(&frame, "#444");
        assert_eq!(axes, vec![
            (R2::new(100., 0.), R2::new(100., 120.)),
            (R2::new(0., 60.), R2::new(200., 60.)),
        ]);
    }

    #[test]
    fn dense_unvalidated_grid_terminates() {
        let config = GridConfig { spacing: 1e-300, width: 500., height: 500. };
        let frame = Plane::new(config, Style::default()).empty();
        assert_eq!(segments(&frame, "#e8e8ee").len(), 2 * crate::grid::MAX_GRID_LINES);
    }

    #[test]
    fn tick_labels() {
        let frame = Plane::default().empty();
        let labels = labels(&frame);
        assert!(labels.iter().all(|(_, t)| t != "0"));
        // x = 1 → pixel (275, 250), label offset (-6, +14)
        assert!(labels.contains(&(R2::new(269., 264.), "1".to_string())));
        // y = 1 → pixel (250, 225), label offset (-18, +4)
        assert!(labels.contains(&(R2::new(232., 229.), "1".to_string())));
        // y = -10 → pixel (250, 500)
        assert!(labels.contains(&(R2::new(232., 504.), "-10".to_string())));
        // First iteration pairs x = -10 with y = 10
        assert_eq!(labels[0], (R2::new(0. - 6., 264.), "-10".to_string()));
        assert_eq!(labels[1], (R2::new(232., 4.), "10".to_string()));
    }

    #[test]
    fn point() {
        let plane = Plane::default();
        let mut frame = Frame::new();
        plane.plot_point(&mut frame, R2::new(2., -1.), "red");
        assert_eq!(frame.0, vec![DrawCommand::Disk {
            center: R2::new(300., 275.),
            radius: 5.,
            fill: "red".to_string(),
        }]);
    }

    #[test]
    fn circle() {
        let plane = Plane::default();
        let mut frame = Frame::new();
        plane.plot_circle(&mut frame, &Circle { h: -3., k: 2., r: 5. }, "green");
        assert_eq!(frame.0, vec![DrawCommand::Arc {
            center: R2::new(175., 200.),
            radius: 125.,
            stroke: "green".to_string(),
            line_width: 1.,
        }]);
    }

    #[test]
    fn line_samples() {
        let plane = Plane::default();
        let mut frame = Frame::new();
        plane.plot_line(&mut frame, &Line { a: 2., b: 1., c: 4. }, "blue");
        let points = match &frame[0] {
            DrawCommand::Polyline { points, stroke, .. } => {
                assert_eq!(stroke, "blue");
                points.clone()
            }
            c => panic!("Expected polyline, got {:?}", c),
        };
        assert_eq!(points.len(), 401);
        // x = -20 → y = 44
        assert_relative_eq!(points[0].x, 250. - 500., epsilon = 1e-9);
        assert_relative_eq!(points[0].y, 250. - 44. * 25., epsilon = 1e-9);
        // x = 20 → y = -36
        assert_relative_eq!(points[400].x, 750., epsilon = 1e-9);
        assert_relative_eq!(points[400].y, 250. + 36. * 25., epsilon = 1e-9);
        // Every sample lies on the line
        let mapper = plane.mapper;
        for p in &points {
            let l = mapper.to_logical(*p);
            assert_relative_eq!(2. * l.x + l.y, 4., epsilon = 1e-9);
        }
    }

    #[test]
    fn vertical_line_is_degenerate() {
        let plane = Plane::default();
        let mut frame = Frame::new();
        plane.plot_line(&mut frame, &Line { a: 1., b: 0., c: 2. }, "blue");
        match &frame[0] {
            DrawCommand::Polyline { points, .. } => {
                assert_eq!(points.len(), 401);
                assert!(points.iter().all(|p| !p.y.is_finite()));
            }
            c => panic!("Expected polyline, got {:?}", c),
        }
    }

    #[test]
    fn nan_input_does_not_panic() {
        let plane = Plane::default();
        let mut frame = Frame::new();
        plane.plot_point(&mut frame, R2::new(f64::NAN, 0.), "red");
        plane.plot_circle(&mut frame, &Circle { h: 0., k: 0., r: f64::NAN }, "green");
        assert_eq!(frame.len(), 2);
    }

    #[test]
    fn problem_frames() {
        let plane = Plane::default();
        let grid_len = plane.empty().len();

        let frame = plane.render_problem(&generate(Mode::Construye, Difficulty::Facil));
        assert_eq!(frame.len(), grid_len + 1);
        assert_eq!(frame.last(), Some(&DrawCommand::Arc {
            center: R2::new(250., 250.),
            radius: 100.,
            stroke: "green".to_string(),
            line_width: 1.,
        }));

        let frame = plane.render_problem(&generate(Mode::Identifica, Difficulty::Dificil));
        assert_eq!(frame.len(), grid_len + 1);
        assert!(matches!(frame.last(), Some(DrawCommand::Polyline { stroke, .. }) if stroke == "blue"));
    }

    #[test]
    fn style_deserializes_partially() {
        let style: Style = serde_json::from_str(r#"{ "circle_color": "purple", "point_radius": 3 }"#).unwrap();
        assert_eq!(style.circle_color, "purple");
        assert_eq!(style.point_radius, 3.);
        assert_eq!(style.line_color, "blue");
    }
}
