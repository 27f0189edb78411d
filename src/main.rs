//! simcli - operator console for a robot simulation
//!
//! Main entry point for the CLI application.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use simcli::backend::{LoopbackController, LoopbackSimulation};
use simcli::{CommandInterpreter, Config, Stepper};

/// simcli - operator console for a robot simulation
#[derive(Parser, Debug)]
#[command(name = "simcli")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (default: ~/.config/simcli/config.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Start in step-by-step mode
    #[arg(long)]
    step_by_step: bool,

    /// Read commands from a file instead of stdin
    #[arg(long, short = 's')]
    script: Option<PathBuf>,

    /// Prompt printed before each command
    #[arg(long, short = 'p')]
    prompt: Option<String>,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::default_config_toml());
        return Ok(());
    }

    let default_filter = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    // Build configuration
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Apply CLI overrides
    if args.step_by_step {
        config.interpreter.step_by_step = true;
    }

    if let Some(prompt) = args.prompt {
        config.interpreter.prompt = Some(prompt);
    }

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("Failed to open script {}", path.display())
        })?)),
        None => Box::new(io::stdin().lock()),
    };

    let mut controller = LoopbackController::from_config(&config.robot);
    let mut simulation = LoopbackSimulation::from_config(&config.simulation);

    info!(
        robot = %config.robot.name,
        step_by_step = config.interpreter.step_by_step,
        "Starting simulation console"
    );

    let mut cli = CommandInterpreter::new(
        &mut controller,
        &mut simulation,
        config.interpreter.step_by_step,
        input,
        io::stdout(),
        io::stderr(),
    );
    if let Some(prompt) = &config.interpreter.prompt {
        cli = cli.with_prompt(prompt.clone());
    }

    let stepper = Stepper::new(
        cli.control(),
        Duration::from_millis(config.stepper.timestep_ms),
    );
    let stepping = thread::spawn(move || stepper.run());

    let result = cli.run();
    // Make sure the stepping loop ends even if the console failed
    cli.control().stop();

    let steps = stepping
        .join()
        .map_err(|_| anyhow::anyhow!("stepping loop panicked"))?;
    info!(steps, "Simulation stopped");

    result?;
    Ok(())
}
