//! WASM bindings for the Cartesian plane practice tool.
//!
//! The page owns a single session value and threads it through these functions: each call
//! takes the current session, applies one learner action and returns the updated session.
//! Rendering goes through [`draw`], which paints the session's grid and figure onto a canvas.

pub mod canvas;

use std::fmt::Display;

use log::{error, info};
use plano_core::{
    generate_named, parse_selection, GridConfig, Plane, Session, SessionError, Style, Surface,
    Verification,
};
use serde::{de::DeserializeOwned, Serialize};
use tsify::Tsify;
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;

use canvas::{context_2d, CanvasSurface};

/// Result of [`verify`]: the updated session plus the verdict for the submitted step.
#[derive(Serialize, Tsify)]
pub struct Verified {
    pub session: Session,
    pub verification: Verification,
}

fn js_err<E: Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse {}: {}", what, e)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
}

/// `undefined`/`null` → default.
fn from_js_or_default<T: DeserializeOwned + Default>(value: JsValue, what: &str) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        from_js(value, what)
    }
}

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => error!("failed to set console.logger: {}", e),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty or null.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) -> Result<(), JsValue> {
    let level: Option<String> = from_js(level, "log level")?;
    let level = plano_core::parse_log_level(level.as_deref()).map_err(js_err)?;
    log::set_max_level(level);
    Ok(())
}

/// Creates an empty session (no learner, no problem).
#[wasm_bindgen]
pub fn new_session() -> Result<JsValue, JsValue> {
    to_js(&Session::new())
}

/// Starts a problem for the selected mode and difficulty.
///
/// # Arguments
/// * `session` - Current session.
/// * `name` - Learner name; empty names display as "(sin nombre)".
/// * `mode` - "construye" or "identifica". Empty or missing throws "Selecciona un modo"
///   and leaves the session as it was.
/// * `difficulty` - "facil", "medio" or "dificil". Ignored for "identifica".
///
/// # Returns
/// The updated session, with every step unverified.
#[wasm_bindgen]
pub fn start(session: JsValue, name: &str, mode: Option<String>, difficulty: &str) -> Result<JsValue, JsValue> {
    let mut session: Session = from_js(session, "session")?;
    let (mode, difficulty) = parse_selection(mode.as_deref().unwrap_or(""), difficulty)
        .map_err(js_err)?
        .unzip();
    session.start(name, mode, difficulty.unwrap_or_default()).map_err(js_err)?;
    to_js(&session)
}

/// Verifies the learner's answer for one step.
///
/// # Arguments
/// * `session` - Current session.
/// * `index` - Zero-based step index.
/// * `input` - Answer text as typed; whitespace is ignored.
///
/// # Returns
/// A [`Verified`] object. `verification.completed` is true exactly once per problem, on the
/// answer that makes every step correct. Throws if the step is already correct.
#[wasm_bindgen]
pub fn verify(session: JsValue, index: usize, input: &str) -> Result<JsValue, JsValue> {
    let mut session: Session = from_js(session, "session")?;
    let verification = session.verify(index, input).map_err(js_err)?;
    to_js(&Verified { session, verification })
}

/// Replaces a completed problem with a new one, using the current selector values.
#[wasm_bindgen]
pub fn next_problem(session: JsValue, mode: &str, difficulty: &str) -> Result<JsValue, JsValue> {
    let mut session: Session = from_js(session, "session")?;
    let (mode, difficulty) = parse_selection(mode, difficulty)
        .map_err(js_err)?
        .ok_or_else(|| js_err(SessionError::MissingMode))?;
    session.select(mode, difficulty);
    session.next_problem().map_err(js_err)?;
    to_js(&session)
}

/// Discards all state; equivalent to [`new_session`].
#[wasm_bindgen]
pub fn reset(session: JsValue) -> Result<JsValue, JsValue> {
    let mut session: Session = from_js(session, "session")?;
    session.reset();
    to_js(&session)
}

/// Whether the "next problem" control should be visible.
#[wasm_bindgen]
pub fn can_advance(session: JsValue) -> Result<bool, JsValue> {
    let session: Session = from_js(session, "session")?;
    Ok(session.can_advance())
}

/// Inline verdict markers ("✔ Correcto", "❌ Incorrecto", or "") for each step.
#[wasm_bindgen]
pub fn step_markers(session: JsValue) -> Result<JsValue, JsValue> {
    let session: Session = from_js(session, "session")?;
    let markers: Vec<&str> = session.results().iter().map(|r| r.verdict.marker()).collect();
    to_js(&markers)
}

/// Generates a problem directly from selector names.
///
/// # Returns
/// The [`plano_core::Problem`], or `null` for unrecognized names.
#[wasm_bindgen]
pub fn generate_problem(mode: &str, difficulty: &str) -> Result<JsValue, JsValue> {
    match generate_named(mode, difficulty) {
        Some(problem) => to_js(&problem),
        None => Ok(JsValue::NULL),
    }
}

/// Computes the draw commands for a session: the grid, plus the active problem's figure.
///
/// # Arguments
/// * `session` - Current session.
/// * `grid` - Optional [`GridConfig`]; defaults to 25px spacing on a 500×500 surface.
/// * `style` - Optional (partial) [`Style`].
#[wasm_bindgen]
pub fn render_frame(session: JsValue, grid: JsValue, style: JsValue) -> Result<JsValue, JsValue> {
    let session: Session = from_js(session, "session")?;
    let grid: GridConfig = from_js_or_default::<GridConfig>(grid, "grid")?.validate().map_err(js_err)?;
    let style: Style = from_js_or_default(style, "style")?;
    let plane = Plane::new(grid, style);
    let frame = match session.problem() {
        Some(problem) => plane.render_problem(problem),
        None => plane.empty(),
    };
    to_js(&frame)
}

/// Paints the session onto `<canvas id={canvas_id}>`, sized from the canvas element.
///
/// # Arguments
/// * `canvas_id` - Element id of the target canvas.
/// * `session` - Current session; an empty session draws only the grid.
/// * `spacing` - Pixels per unit (default 25).
/// * `style` - Optional (partial) [`Style`].
#[wasm_bindgen]
pub fn draw(canvas_id: &str, session: JsValue, spacing: Option<f64>, style: JsValue) -> Result<(), JsValue> {
    let session: Session = from_js(session, "session")?;
    let style: Style = from_js_or_default(style, "style")?;
    let (canvas, ctx) = context_2d(canvas_id)?;
    let grid = GridConfig::new(
        spacing.unwrap_or(GridConfig::default().spacing),
        canvas.width() as f64,
        canvas.height() as f64,
    ).map_err(js_err)?;
    let plane = Plane::new(grid, style);
    let frame = match session.problem() {
        Some(problem) => plane.render_problem(problem),
        None => plane.empty(),
    };
    CanvasSurface::new(&ctx).render(&frame)
}
