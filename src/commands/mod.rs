//! Commands module - console command handlers
//!
//! Contains the argument stream, the handlers, and the command registry.

pub mod args;
pub mod handlers;
pub mod registry;

pub use args::Args;
pub use handlers::{CommandContext, Handler};
pub use registry::{CommandSpec, CommandTable};
