//! CLI module - command-line interface
//!
//! Contains the command interpreter and the step-control flags it shares
//! with the stepping loop.

pub mod control;
pub mod interpreter;

pub use control::StepControl;
pub use interpreter::{CommandInterpreter, CommandResult};
