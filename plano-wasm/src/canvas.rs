//! Executes draw commands on a browser `CanvasRenderingContext2d`.

use std::f64::consts::PI;

use log::trace;
use plano_core::{r2::R2, DrawCommand, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

/// Look up `<canvas id=…>` and its 2D context.
pub fn context_2d(canvas_id: &str) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {:?}", canvas_id)))?
        .dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;
    Ok((canvas, ctx))
}

impl Surface for CanvasSurface<'_> {
    type Error = JsValue;

    fn draw(&mut self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = self.ctx;
        match command {
            DrawCommand::Clear { width, height, fill } => {
                ctx.clear_rect(0., 0., *width, *height);
                ctx.set_fill_style_str(fill);
                ctx.fill_rect(0., 0., *width, *height);
            }
            DrawCommand::Segment { from, to, stroke, line_width } => {
                if !from.is_finite() || !to.is_finite() {
                    trace!("skipping non-finite segment {} → {}", from, to);
                    return Ok(());
                }
                ctx.set_stroke_style_str(stroke);
                ctx.set_line_width(*line_width);
                ctx.begin_path();
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
                ctx.stroke();
            }
            DrawCommand::Polyline { points, stroke, line_width } => {
                ctx.set_stroke_style_str(stroke);
                ctx.set_line_width(*line_width);
                ctx.begin_path();
                let mut finite = points.iter().filter(|p| p.is_finite());
                if let Some(R2 { x, y }) = finite.next() {
                    ctx.move_to(*x, *y);
                }
                for R2 { x, y } in finite {
                    ctx.line_to(*x, *y);
                }
                ctx.stroke();
            }
            DrawCommand::Arc { center, radius, stroke, line_width } => {
                if !center.is_finite() || !radius.is_finite() {
                    trace!("skipping non-finite arc at {} r {}", center, radius);
                    return Ok(());
                }
                ctx.set_stroke_style_str(stroke);
                ctx.set_line_width(*line_width);
                ctx.begin_path();
                ctx.arc(center.x, center.y, *radius, 0., PI * 2.)?;
                ctx.stroke();
            }
            DrawCommand::Disk { center, radius, fill } => {
                if !center.is_finite() || !radius.is_finite() {
                    trace!("skipping non-finite disk at {} r {}", center, radius);
                    return Ok(());
                }
                ctx.set_fill_style_str(fill);
                ctx.begin_path();
                ctx.arc(center.x, center.y, *radius, 0., PI * 2.)?;
                ctx.fill();
            }
            DrawCommand::Text { at, text, fill, font } => {
                ctx.set_fill_style_str(fill);
                ctx.set_font(font);
                ctx.fill_text(text, at.x, at.y)?;
            }
        }
        Ok(())
    }
}
