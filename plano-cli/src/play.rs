//! Interactive terminal session.
//!
//! The terminal plays the part of the page: it reads learner actions line by line, applies
//! them to a [`Session`] and prints prompts and verdicts. Optionally the plane is re-rendered
//! to an SVG file whenever the problem changes.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use itertools::Itertools;
use log::{debug, info};
use plano_core::{Difficulty, Mode, Plane, Session, SessionError, Verdict};

use crate::render::render_svg;

pub const HELP: &str = "\
Comandos:
  <n> <respuesta>          verifica el paso n (1, 2, …)
  start <modo> [dificultad] empieza un problema (construye | identifica; facil | medio | dificil)
  next                     siguiente problema (cuando el actual está completo)
  status                   muestra el problema y el estado de cada paso
  reset                    descarta todo
  help                     esta ayuda
  quit                     salir";

pub struct Play<W: Write> {
    pub session: Session,
    name: String,
    plane: Plane,
    svg: Option<PathBuf>,
    out: W,
}

#[derive(Debug, PartialEq)]
enum Command {
    Verify { step: usize, answer: String },
    Start { mode: Option<Mode>, difficulty: Difficulty },
    Next,
    Status,
    Reset,
    Help,
    Quit,
}

fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let command = match head {
        "next" => Command::Next,
        "status" => Command::Status,
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "start" => {
            let mut args = rest.split_whitespace();
            let mode = args.next().map(str::parse::<Mode>).transpose().map_err(|e| e.to_string())?;
            let difficulty = args.next().map(str::parse::<Difficulty>).transpose().map_err(|e| e.to_string())?;
            Command::Start { mode, difficulty: difficulty.unwrap_or_default() }
        }
        n => match n.parse::<usize>() {
            Ok(step) if step >= 1 => Command::Verify { step: step - 1, answer: rest.to_string() },
            _ => return Err(format!("Comando desconocido: {:?} (escribe `help`)", head)),
        },
    };
    Ok(Some(command))
}

impl<W: Write> Play<W> {
    pub fn new(name: &str, plane: Plane, svg: Option<PathBuf>, out: W) -> Self {
        Play { session: Session::new(), name: name.to_string(), plane, svg, out }
    }

    /// Start the first problem. A missing mode prints the notice and leaves the session empty.
    pub fn start(&mut self, mode: Option<Mode>, difficulty: Difficulty) -> Result<()> {
        match self.session.start(&self.name, mode, difficulty) {
            Ok(_) => {
                writeln!(self.out, "Estudiante: {}", self.session.learner_name())?;
                self.show_problem()?;
            }
            Err(SessionError::MissingMode) => {
                writeln!(self.out, "{}", SessionError::MissingMode)?;
                self.redraw()?;
            }
            Err(e) => writeln!(self.out, "error: {}", e)?,
        }
        Ok(())
    }

    /// Process input lines until EOF or `quit`.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        for line in input.lines() {
            let line = line.context("reading input")?;
            let command = match parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(msg) => {
                    writeln!(self.out, "{}", msg)?;
                    continue;
                }
            };
            debug!("command: {:?}", command);
            if command == Command::Quit {
                break;
            }
            self.apply(command)?;
        }
        info!("session ended: {}", self.status_line());
        Ok(())
    }

    fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Verify { step, answer } => match self.session.verify(step, &answer) {
                Ok(v) => {
                    let label = self.session.problem().map(|p| p.steps[v.index].label.clone()).unwrap_or_default();
                    writeln!(self.out, "  {}: {}", label, v.verdict)?;
                    if v.completed {
                        writeln!(self.out, "¡Problema completo! Escribe `next` para el siguiente.")?;
                    }
                }
                Err(e) => writeln!(self.out, "error: {}", e)?,
            },
            Command::Start { mode, difficulty } => self.start(mode, difficulty)?,
            Command::Next => match self.session.next_problem() {
                Ok(_) => self.show_problem()?,
                Err(e) => writeln!(self.out, "error: {}", e)?,
            },
            Command::Status => match self.session.problem() {
                Some(_) => self.show_problem()?,
                None => writeln!(self.out, "Sin problema activo (escribe `start <modo>`)")?,
            },
            Command::Reset => {
                self.session.reset();
                writeln!(self.out, "Reiniciado.")?;
                self.redraw()?;
            }
            Command::Help => self.print_help()?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn show_problem(&mut self) -> Result<()> {
        let Some(problem) = self.session.problem() else {
            return Ok(());
        };
        writeln!(self.out, "{}", problem.text)?;
        for (idx, (step, result)) in problem.steps.iter().zip(self.session.results()).enumerate() {
            let state = match result.verdict {
                Verdict::Unverified => format!("({})", step.formula),
                verdict => format!("{} {}", result.attempted.trim(), verdict),
            };
            writeln!(self.out, "  {}. {}: {}", idx + 1, step.label, state)?;
        }
        self.redraw()
    }

    /// Rewrite the SVG file, if any, with the current plane.
    fn redraw(&mut self) -> Result<()> {
        let Some(path) = &self.svg else {
            return Ok(());
        };
        let frame = match self.session.problem() {
            Some(problem) => self.plane.render_problem(problem),
            None => self.plane.empty(),
        };
        let config = self.plane.mapper.config();
        let svg = render_svg(&frame, config.width, config.height)?;
        std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
        debug!("wrote {}", path.display());
        Ok(())
    }

    fn status_line(&self) -> String {
        self.session
            .results()
            .iter()
            .map(|r| match r.verdict {
                Verdict::Unverified => "·",
                Verdict::Correct => "✔",
                Verdict::Incorrect => "✘",
            })
            .join(" ")
    }

    pub fn print_help(&mut self) -> Result<()> {
        writeln!(self.out, "{}", HELP)?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn play(mode: Option<Mode>, difficulty: Difficulty, input: &str) -> (Session, String) {
        let mut play = Play::new("Ada", Plane::default(), None, Vec::new());
        play.start(mode, difficulty).unwrap();
        play.run(input.as_bytes()).unwrap();
        let session = play.session.clone();
        (session, String::from_utf8(play.into_output()).unwrap())
    }

    #[test]
    fn parse_commands() {
        assert_eq!(parse("  "), Ok(None));
        assert_eq!(parse("next"), Ok(Some(Command::Next)));
        assert_eq!(
            parse("2  (x - 0)^2 + (y-0)^2 = 16 "),
            Ok(Some(Command::Verify { step: 1, answer: "(x - 0)^2 + (y-0)^2 = 16".to_string() })),
        );
        assert_eq!(
            parse("start identifica"),
            Ok(Some(Command::Start { mode: Some(Mode::Identifica), difficulty: Difficulty::Facil })),
        );
        assert_eq!(
            parse("start construye dificil"),
            Ok(Some(Command::Start { mode: Some(Mode::Construye), difficulty: Difficulty::Dificil })),
        );
        assert_eq!(parse("start"), Ok(Some(Command::Start { mode: None, difficulty: Difficulty::Facil })));
        assert!(parse("start grafica").is_err());
        assert!(parse("0 4").is_err());
        assert!(parse("jump").is_err());
    }

    #[test]
    fn solve_circle() {
        let input = "1 0\n2 0\n3 4.0\n3 4\n4 (x - 0)^2 + (y - 0)^2 = 16\nstatus\n";
        let (session, out) = play(Some(Mode::Construye), Difficulty::Facil, input);
        assert!(session.can_advance());
        assert!(out.starts_with("Estudiante: Ada\n"));
        assert!(out.contains("  Radio r: ❌ Incorrecto\n"));
        assert!(out.contains("  Radio r: ✔ Correcto\n"));
        assert_eq!(out.matches("¡Problema completo!").count(), 1);
        assert!(out.contains("  4. Ecuación estándar: (x - 0)^2 + (y - 0)^2 = 16 ✔ Correcto\n"));
    }

    #[test]
    fn locked_and_next() {
        let input = "1 2\n1 3\nnext\n2 1\n3 4\n4 2x+1y=4\nnext\n";
        let (session, out) = play(Some(Mode::Identifica), Difficulty::Medio, input);
        assert!(out.contains("error: Step 0 (a) is already correct and locked"));
        assert!(out.contains("error: Current problem is not complete yet"));
        // Second problem installed, nothing verified yet
        assert!(!session.can_advance());
        assert!(session.results().iter().all(|r| r.verdict == Verdict::Unverified));
        assert_eq!(out.matches(plano_core::problem::LINE_PROMPT).count(), 2);
    }

    #[test]
    fn missing_mode() {
        let (session, out) = play(None, Difficulty::Facil, "1 2\nstart identifica\n1 2\nquit\n3 4\n");
        assert!(out.starts_with("Selecciona un modo\n"));
        assert!(out.contains("error: No active problem"));
        assert!(out.contains("  a: ✔ Correcto"));
        // Lines after `quit` are ignored
        assert_eq!(session.results()[2].verdict, Verdict::Unverified);
    }

    #[test]
    fn reset_clears() {
        let (session, out) = play(Some(Mode::Construye), Difficulty::Medio, "1 2\nreset\nstatus\n");
        assert_eq!(session, Session::default());
        assert!(out.contains("Reiniciado."));
        assert!(out.contains("Sin problema activo"));
    }

    #[test]
    fn svg_follows_problem() {
        let dir = std::env::temp_dir().join(format!("plano-play-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("plane.svg");
        let mut play = Play::new("", Plane::default(), Some(path.clone()), Vec::new());
        play.start(Some(Mode::Construye), Difficulty::Dificil).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains(r#"<circle cx="175" cy="200" r="125""#));
        play.run("reset\n".as_bytes()).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(!svg.contains("<circle"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
