//! Console command interpreter
//!
//! Reads one command per line, dispatches it to a built-in action or a
//! registered handler, and reports failures on the error stream.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing::{debug, info};

use crate::backend::{Controller, Simulation};
use crate::cli::control::StepControl;
use crate::commands::handlers::{self, CommandContext, Handler};
use crate::commands::{Args, CommandTable};
use crate::core::Result;

/// Result of executing one line
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// `stop` was entered
    Exit,
    /// A step-control flag changed
    Control,
    /// A handler ran and reported success or failure
    Invoked { command: String, success: bool },
    /// A handler refused its arguments
    InvalidArguments { command: String, reason: String },
    /// The token names no command
    Unknown(String),
    /// Nothing to do
    None,
}

/// Line-oriented interpreter bound to a controller and a simulation
pub struct CommandInterpreter<'a, R, W, E> {
    controller: &'a mut dyn Controller,
    simulation: &'a mut dyn Simulation,
    control: Arc<StepControl>,
    table: &'static CommandTable,
    input: R,
    out: W,
    err: E,
    prompt: Option<String>,
}

impl<'a> CommandInterpreter<'a, io::StdinLock<'static>, io::Stdout, io::Stderr> {
    /// Create an interpreter on the process's standard streams
    pub fn stdio(
        controller: &'a mut dyn Controller,
        simulation: &'a mut dyn Simulation,
        step_by_step: bool,
    ) -> Self {
        Self::new(
            controller,
            simulation,
            step_by_step,
            io::stdin().lock(),
            io::stdout(),
            io::stderr(),
        )
    }
}

impl<'a, R, W, E> CommandInterpreter<'a, R, W, E>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    /// Create an interpreter reading from `input`
    pub fn new(
        controller: &'a mut dyn Controller,
        simulation: &'a mut dyn Simulation,
        step_by_step: bool,
        input: R,
        out: W,
        err: E,
    ) -> Self {
        Self {
            controller,
            simulation,
            control: Arc::new(StepControl::new(step_by_step)),
            table: CommandTable::global(),
            input,
            out,
            err,
            prompt: None,
        }
    }

    /// Print `prompt` before each read
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Run until `stop` or end of input
    pub fn run(&mut self) -> Result<()> {
        let mut line = String::new();

        while !self.control.done() {
            if let Some(prompt) = &self.prompt {
                write!(self.out, "{}", prompt)?;
                self.out.flush()?;
            }

            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    info!("End of input, stopping simulation");
                    self.control.stop();
                    break;
                }
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    writeln!(self.err, "Error reading input: {}", e)?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            }

            self.execute_line(&line)?;
        }

        Ok(())
    }

    /// Execute a single command line
    pub fn execute_line(&mut self, line: &str) -> Result<CommandResult> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(CommandResult::None);
        }

        let (token, rest) = match line.split_once(char::is_whitespace) {
            Some((token, rest)) => (token, rest.trim()),
            None => (line, ""),
        };
        debug!(command = token, args = rest, "dispatch");

        match token {
            "stop" => {
                info!("Stopping simulation");
                self.control.stop();
                Ok(CommandResult::Exit)
            }
            "pause" => {
                let paused = self.control.toggle_step_by_step();
                debug!(step_by_step = paused, "step mode toggled");
                Ok(CommandResult::Control)
            }
            "next" | "n" | "step" | "s" => {
                self.control.next_step();
                Ok(CommandResult::Control)
            }
            "help" | "?" => {
                self.print_help()?;
                Ok(CommandResult::None)
            }
            _ => {
                if let Some(handler) = self.table.get(token).map(|spec| spec.handler) {
                    return self.invoke(token, handler, rest);
                }
                match token {
                    "open" | "o" => self.invoke(token, handlers::open_grippers, ""),
                    "close" | "c" => self.invoke(token, handlers::close_grippers, ""),
                    _ => {
                        writeln!(self.err, "unknown command {}", token)?;
                        Ok(CommandResult::Unknown(token.to_string()))
                    }
                }
            }
        }
    }

    fn invoke(&mut self, command: &str, handler: Handler, rest: &str) -> Result<CommandResult> {
        let mut args = Args::new(rest);
        let mut ctx = CommandContext {
            controller: &mut *self.controller,
            simulation: &mut *self.simulation,
            out: &mut self.out,
        };

        match handler(&mut ctx, &mut args) {
            Ok(success) => {
                if !success {
                    writeln!(self.err, "Failed to invoke the previous command")?;
                }
                Ok(CommandResult::Invoked {
                    command: command.to_string(),
                    success,
                })
            }
            Err(e) if e.is_invalid_argument() => {
                writeln!(self.err, "invalid arguments for {}: {}", command, e)?;
                Ok(CommandResult::InvalidArguments {
                    command: command.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    fn print_help(&mut self) -> Result<()> {
        let table = self.table;
        writeln!(self.out, "Commands:")?;
        writeln!(self.out, "  stop                      stop the simulation")?;
        writeln!(self.out, "  pause                     toggle step-by-step mode")?;
        writeln!(self.out, "  next | n | step | s       advance one step")?;
        writeln!(self.out, "  open | o                  same as open_grippers")?;
        writeln!(self.out, "  close | c                 same as close_grippers")?;
        for spec in table.all() {
            let call = if spec.usage.is_empty() {
                spec.name.to_string()
            } else {
                format!("{} {}", spec.name, spec.usage)
            };
            writeln!(self.out, "  {:<40}  {}", call, spec.summary)?;
        }
        Ok(())
    }

    /// Shared step-control flags, for the stepping loop
    pub fn control(&self) -> Arc<StepControl> {
        Arc::clone(&self.control)
    }

    /// Whether `stop` was entered or the input ended
    pub fn done(&self) -> bool {
        self.control.done()
    }

    /// Whether a single step was requested
    pub fn next(&self) -> bool {
        self.control.next()
    }

    /// Whether the simulation only advances on explicit steps
    pub fn step_by_step(&self) -> bool {
        self.control.step_by_step()
    }

    /// Acknowledge a step request
    pub fn play(&self) {
        self.control.play();
    }

    /// Flip step-by-step mode
    pub fn toggle_step_by_step(&self) {
        self.control.toggle_step_by_step();
    }

    /// Request a single step independent of console input
    pub fn next_step(&self) {
        self.control.next_step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LoopbackController, LoopbackSimulation};
    use crate::core::config::{RobotConfig, SimulationConfig};
    use std::io::Cursor;

    fn backend() -> (LoopbackController, LoopbackSimulation) {
        (
            LoopbackController::from_config(&RobotConfig::default()),
            LoopbackSimulation::from_config(&SimulationConfig::default()),
        )
    }

    #[test]
    fn test_split_token_and_remainder() {
        let (mut controller, mut simulation) = backend();
        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
        let mut cli = CommandInterpreter::new(
            &mut controller,
            &mut simulation,
            false,
            Cursor::new(""),
            &mut out,
            &mut err,
        );

        let result = cli
            .execute_line("  set_external_force   torso 0 0 0 10 0 0  \n")
            .unwrap();
        assert_eq!(
            result,
            CommandResult::Invoked {
                command: "set_external_force".to_string(),
                success: true
            }
        );
        drop(cli);
        assert!(err.is_empty());
    }

    #[test]
    fn test_blank_line_is_ignored() {
        let (mut controller, mut simulation) = backend();
        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
        let mut cli = CommandInterpreter::new(
            &mut controller,
            &mut simulation,
            false,
            Cursor::new(""),
            &mut out,
            &mut err,
        );
        assert_eq!(cli.execute_line("   \t").unwrap(), CommandResult::None);
        drop(cli);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_flag_accessors() {
        let (mut controller, mut simulation) = backend();
        let cli = CommandInterpreter::new(
            &mut controller,
            &mut simulation,
            true,
            Cursor::new(""),
            io::sink(),
            io::sink(),
        );
        assert!(cli.step_by_step());
        cli.toggle_step_by_step();
        assert!(!cli.step_by_step());

        cli.next_step();
        assert!(cli.next());
        assert!(cli.control().next());
        cli.play();
        assert!(!cli.next());
        assert!(!cli.done());
    }

    #[test]
    fn test_prompt_is_printed_per_read() {
        let (mut controller, mut simulation) = backend();
        let mut out = Vec::<u8>::new();
        let mut cli = CommandInterpreter::new(
            &mut controller,
            &mut simulation,
            false,
            Cursor::new("pause\n"),
            &mut out,
            io::sink(),
        )
        .with_prompt("> ");
        cli.run().unwrap();
        drop(cli);
        assert_eq!(String::from_utf8(out).unwrap(), "> > ");
    }

    #[test]
    fn test_help_lists_commands() {
        let (mut controller, mut simulation) = backend();
        let mut out = Vec::<u8>::new();
        let mut cli = CommandInterpreter::new(
            &mut controller,
            &mut simulation,
            false,
            Cursor::new(""),
            &mut out,
            io::sink(),
        );
        assert_eq!(cli.execute_line("help").unwrap(), CommandResult::None);
        drop(cli);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("set_external_force <body> cx cy cz fx fy fz"));
        assert!(text.contains("half_sitting"));
        assert!(text.contains("pause"));
    }
}
