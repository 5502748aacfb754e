//! Terminal front-end for Cartesian plane practice.
//!
//! Provides:
//! - SVG rendering of a problem's plane (grid, axes, labels, figure)
//! - JSON dump of a generated problem
//! - Interactive, step-by-step solving over stdin/stdout

mod play;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use plano_core::{generate, Difficulty, GridConfig, Mode, Plane, Style};

use play::Play;
use render::render_svg;

#[derive(Parser)]
#[command(name = "plano")]
#[command(about = "Cartesian plane practice: circles and lines, step by step", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PLANO_BUILD_SHA"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug or trace (default: $RUST_LOG, else warn)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GridArgs {
    /// Surface width in pixels
    #[arg(long, default_value_t = plano_core::grid::DEFAULT_WIDTH)]
    width: f64,

    /// Surface height in pixels
    #[arg(long, default_value_t = plano_core::grid::DEFAULT_HEIGHT)]
    height: f64,

    /// Pixels per logical unit
    #[arg(long, default_value_t = plano_core::grid::DEFAULT_SPACING)]
    spacing: f64,

    /// Style overrides (JSON object, partial)
    #[arg(long)]
    style: Option<PathBuf>,
}

impl GridArgs {
    fn plane(&self) -> Result<Plane> {
        let grid = GridConfig::new(self.spacing, self.width, self.height)?;
        let style = match &self.style {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading style {}", path.display()))?;
                serde_json::from_str::<Style>(&json)
                    .with_context(|| format!("parsing style {}", path.display()))?
            }
            None => Style::default(),
        };
        Ok(Plane::new(grid, style))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a problem's plane as SVG (grid only when no mode is given)
    Render {
        /// construye (circle) or identifica (line)
        #[arg(short, long)]
        mode: Option<Mode>,

        /// facil, medio or dificil
        #[arg(short, long, default_value = "facil")]
        difficulty: Difficulty,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Print a generated problem as JSON
    Show {
        #[arg(short, long)]
        mode: Mode,

        #[arg(short, long, default_value = "facil")]
        difficulty: Difficulty,
    },

    /// Solve problems interactively
    Play {
        /// Learner name
        #[arg(short, long, default_value = "")]
        name: String,

        #[arg(short, long)]
        mode: Option<Mode>,

        #[arg(short, long, default_value = "facil")]
        difficulty: Difficulty,

        /// Keep an SVG of the current plane up to date at this path
        #[arg(long)]
        svg: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,
    },
}

fn init_logging(level: Option<&str>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if level.is_some() {
        builder.filter_level(plano_core::parse_log_level(level)?);
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    match cli.command {
        Commands::Render { mode, difficulty, output, grid } => {
            let plane = grid.plane()?;
            let frame = match mode {
                Some(mode) => plane.render_problem(&generate(mode, difficulty)),
                None => plane.empty(),
            };
            let svg = render_svg(&frame, grid.width, grid.height)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
                    info!("wrote {}", path.display());
                }
                None => io::stdout().write_all(svg.as_bytes())?,
            }
        }
        Commands::Show { mode, difficulty } => {
            let problem = generate(mode, difficulty);
            println!("{}", serde_json::to_string_pretty(&problem)?);
        }
        Commands::Play { name, mode, difficulty, svg, grid } => {
            let plane = grid.plane()?;
            let stdout = io::stdout();
            let mut play = Play::new(&name, plane, svg, stdout.lock());
            play.start(mode, difficulty)?;
            play.print_help()?;
            play.run(io::stdin().lock())?;
        }
    }
    Ok(())
}
