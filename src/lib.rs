//! simcli - operator console for a robot simulation
//!
//! Reads whitespace-delimited commands from a text stream and forwards them
//! to a whole-body controller and a simulated-world adapter.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **Backend**: Controller/simulation traits with a loopback implementation
//! - **Commands**: Argument parsing, handlers, and the command registry
//! - **CLI**: The command interpreter and its step-control flags
//! - **Runner**: The simulation stepping loop
//!
//! # Usage
//!
//! ```rust,no_run
//! use simcli::backend::{LoopbackController, LoopbackSimulation};
//! use simcli::{CommandInterpreter, Config};
//!
//! let config = Config::default();
//! let mut controller = LoopbackController::from_config(&config.robot);
//! let mut simulation = LoopbackSimulation::from_config(&config.simulation);
//!
//! let mut cli = CommandInterpreter::stdio(&mut controller, &mut simulation, false);
//! cli.run().unwrap();
//! ```

pub mod backend;
pub mod cli;
pub mod commands;
pub mod core;
pub mod runner;

// Re-export commonly used items
pub use cli::{CommandInterpreter, CommandResult, StepControl};
pub use crate::core::{Config, Result, SimCliError};
pub use runner::Stepper;
