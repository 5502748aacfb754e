//! SVG rendering of plane frames.

use std::fmt::Write;

use log::trace;
use plano_core::{DrawCommand, Frame, Surface};

/// Builds an SVG document from draw commands, one element per command.
#[derive(Debug)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, body: String::new() }
    }

    pub fn finish(self) -> String {
        let mut svg = String::new();
        // Writing to a String is infallible
        let _ = writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Split a CSS font shorthand like `12px Arial` into size and family.
fn font_parts(font: &str) -> (&str, &str) {
    match font.split_once(' ') {
        Some((size, family)) => (size, family.trim()),
        None => (font, "sans-serif"),
    }
}

impl Surface for SvgSurface {
    type Error = std::fmt::Error;

    fn draw(&mut self, command: &DrawCommand) -> Result<(), Self::Error> {
        let svg = &mut self.body;
        match command {
            DrawCommand::Clear { width, height, fill } => {
                // Clearing drops everything drawn so far
                svg.clear();
                writeln!(svg, r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#, width, height, fill)?;
            }
            DrawCommand::Segment { from, to, stroke, line_width } => {
                if !from.is_finite() || !to.is_finite() {
                    trace!("skipping non-finite segment {} → {}", from, to);
                    return Ok(());
                }
                writeln!(
                    svg,
                    r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                    from.x, from.y, to.x, to.y, stroke, line_width,
                )?;
            }
            DrawCommand::Polyline { points, stroke, line_width } => {
                let mut path = String::new();
                for p in points.iter().filter(|p| p.is_finite()) {
                    let op = if path.is_empty() { "M" } else { " L" };
                    write!(&mut path, "{} {} {}", op, p.x, p.y)?;
                }
                if path.is_empty() {
                    trace!("skipping polyline with no finite points");
                    return Ok(());
                }
                writeln!(
                    svg,
                    r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                    path, stroke, line_width,
                )?;
            }
            DrawCommand::Arc { center, radius, stroke, line_width } => {
                if !center.is_finite() || !radius.is_finite() {
                    return Ok(());
                }
                writeln!(
                    svg,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                    center.x, center.y, radius, stroke, line_width,
                )?;
            }
            DrawCommand::Disk { center, radius, fill } => {
                if !center.is_finite() || !radius.is_finite() {
                    return Ok(());
                }
                writeln!(
                    svg,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    center.x, center.y, radius, fill,
                )?;
            }
            DrawCommand::Text { at, text, fill, font } => {
                let (size, family) = font_parts(font);
                writeln!(
                    svg,
                    r#"  <text x="{}" y="{}" font-size="{}" font-family="{}" fill="{}">{}</text>"#,
                    at.x, at.y, size, family, fill, escape(text),
                )?;
            }
        }
        Ok(())
    }
}

/// Render a frame to a standalone SVG document.
pub fn render_svg(frame: &Frame, width: f64, height: f64) -> Result<String, std::fmt::Error> {
    let mut surface = SvgSurface::new(width, height);
    surface.render(frame)?;
    Ok(surface.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plano_core::{generate, Difficulty, GridConfig, Line, Mode, Plane, Style, R2};
    use test_log::test;

    #[test]
    fn test_render_circle_problem() {
        let plane = Plane::default();
        let frame = plane.render_problem(&generate(Mode::Construye, Difficulty::Medio));
        let svg = render_svg(&frame, 500., 500.).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r##"<rect x="0" y="0" width="500" height="500" fill="#fff"/>"##));
        // (2, -1) → (300, 275), r = 3 → 75px
        assert!(svg.contains(r#"<circle cx="300" cy="275" r="75" fill="none" stroke="green" stroke-width="1"/>"#));
        assert_eq!(svg.matches("<text").count(), 40);
        assert!(svg.contains(r##"font-size="12px" font-family="Arial" fill="#333">-10</text>"##));
    }

    #[test]
    fn test_render_line_problem() {
        let plane = Plane::new(GridConfig::default(), Style::default());
        let frame = plane.render_problem(&generate(Mode::Identifica, Difficulty::Facil));
        let svg = render_svg(&frame, 500., 500.).unwrap();
        let path = svg.lines().find(|l| l.contains("<path")).unwrap();
        assert!(path.contains(r#"stroke="blue""#));
        assert_eq!(path.matches(" L ").count(), 400);
    }

    #[test]
    fn test_vertical_line_is_absent() {
        let plane = Plane::default();
        let mut frame = plane.empty();
        plane.plot_line(&mut frame, &Line { a: 1., b: 0., c: 2. }, "blue");
        let svg = render_svg(&frame, 500., 500.).unwrap();
        assert!(!svg.contains("<path"));
        assert!(!svg.contains("inf"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn test_clear_resets_body() {
        let plane = Plane::default();
        let mut frame = plane.empty();
        plane.plot_point(&mut frame, R2::new(1., 1.), "red");
        plane.draw_grid(&mut frame);
        let svg = render_svg(&frame, 500., 500.).unwrap();
        assert_eq!(svg.matches("<rect").count(), 1);
        assert!(!svg.contains(r#"fill="red""#));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b&c>"), "a&lt;b&amp;c&gt;");
    }
}
