//! Command registry - maps command names to handlers
//!
//! The table is built once per process and never modified afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::commands::handlers::{self, Handler};

/// A registered command
#[derive(Clone, Copy)]
pub struct CommandSpec {
    /// Name typed at the console
    pub name: &'static str,
    /// Argument synopsis shown by `help`
    pub usage: &'static str,
    /// One-line description shown by `help`
    pub summary: &'static str,
    /// Function run on invocation
    pub handler: Handler,
}

/// Registry of available commands
pub struct CommandTable {
    commands: HashMap<&'static str, CommandSpec>,
}

static GLOBAL: OnceLock<CommandTable> = OnceLock::new();

impl CommandTable {
    /// Create a table with the default commands
    pub fn new() -> Self {
        let mut table = Self {
            commands: HashMap::new(),
        };
        table.register_robot_commands();
        table.register_simulation_commands();
        table
    }

    /// The process-wide table
    pub fn global() -> &'static CommandTable {
        GLOBAL.get_or_init(CommandTable::new)
    }

    fn register_robot_commands(&mut self) {
        self.register(
            "get_joint_pos",
            "<joint>",
            "print the first coordinate of a joint",
            handlers::get_joint_pos,
        );
        self.register(
            "open_grippers",
            "",
            "fully open every gripper",
            handlers::open_grippers,
        );
        self.register(
            "close_grippers",
            "",
            "fully close every gripper",
            handlers::close_grippers,
        );
        self.register(
            "set_gripper",
            "<gripper> [q...]",
            "set a gripper's joint target configuration",
            handlers::set_gripper,
        );
        self.register(
            "GoToHalfSitPose",
            "",
            "go to the half-sitting pose",
            handlers::go_to_half_sit_pose,
        );
        self.register(
            "half_sitting",
            "",
            "same as GoToHalfSitPose",
            handlers::go_to_half_sit_pose,
        );
        self.register(
            "enable_controller",
            "<name>",
            "switch to the named sub-controller",
            handlers::enable_controller,
        );
    }

    fn register_simulation_commands(&mut self) {
        self.register(
            "set_external_force",
            "<body> cx cy cz fx fy fz",
            "apply a sustained force to a body",
            handlers::set_external_force,
        );
        self.register(
            "remove_external_force",
            "<body>",
            "remove the sustained force from a body",
            handlers::remove_external_force,
        );
        self.register(
            "apply_impact",
            "<body> cx cy cz fx fy fz",
            "apply an impact to a body",
            handlers::apply_impact,
        );
    }

    /// Register a command, replacing any command with the same name
    pub fn register(
        &mut self,
        name: &'static str,
        usage: &'static str,
        summary: &'static str,
        handler: Handler,
    ) {
        self.commands.insert(
            name,
            CommandSpec {
                name,
                usage,
                summary,
                handler,
            },
        );
    }

    /// Look up a command by name
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    /// Whether a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered commands, sorted by name
    pub fn all(&self) -> Vec<&CommandSpec> {
        let mut specs: Vec<_> = self.commands.values().collect();
        specs.sort_by_key(|s| s.name);
        specs
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_commands() {
        let table = CommandTable::new();
        for name in [
            "get_joint_pos",
            "open_grippers",
            "close_grippers",
            "set_gripper",
            "GoToHalfSitPose",
            "half_sitting",
            "enable_controller",
            "set_external_force",
            "remove_external_force",
            "apply_impact",
        ] {
            assert!(table.contains(name), "missing {}", name);
        }
        assert_eq!(table.all().len(), 10);
    }

    #[test]
    fn test_builtins_not_registered() {
        let table = CommandTable::global();
        for name in ["stop", "pause", "next", "n", "open", "c", "help"] {
            assert!(table.get(name).is_none());
        }
    }

    #[test]
    fn test_all_sorted() {
        let table = CommandTable::new();
        let names: Vec<_> = table.all().iter().map(|s| s.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
