//! Command handlers
//!
//! Each handler receives the collaborators and the argument stream of one
//! invocation, and reports whether the collaborator accepted the request.

use std::io::Write;

use tracing::debug;

use crate::backend::{Controller, Simulation};
use crate::commands::args::Args;
use crate::core::{Result, GRIPPER_CLOSED, GRIPPER_OPEN};

/// Collaborators and output sink available to a handler
pub struct CommandContext<'c> {
    pub controller: &'c mut dyn Controller,
    pub simulation: &'c mut dyn Simulation,
    pub out: &'c mut dyn Write,
}

/// Signature shared by every registered command
pub type Handler = fn(&mut CommandContext<'_>, &mut Args<'_>) -> Result<bool>;

/// `get_joint_pos <joint>`
pub fn get_joint_pos(ctx: &mut CommandContext<'_>, args: &mut Args<'_>) -> Result<bool> {
    let joint = args.word("joint name")?;
    let robot = ctx.controller.robot();
    match robot.joint_index_by_name(joint) {
        Some(index) => {
            let position = robot
                .q()
                .get(index)
                .and_then(|q| q.first())
                .copied()
                .unwrap_or(0.0);
            writeln!(ctx.out, "{}: {}", joint, position)?;
        }
        None => writeln!(ctx.out, "no joint named {}", joint)?,
    }
    Ok(true)
}

/// `open_grippers`
pub fn open_grippers(ctx: &mut CommandContext<'_>, _args: &mut Args<'_>) -> Result<bool> {
    set_all_grippers(ctx, GRIPPER_OPEN);
    Ok(true)
}

/// `close_grippers`
pub fn close_grippers(ctx: &mut CommandContext<'_>, _args: &mut Args<'_>) -> Result<bool> {
    set_all_grippers(ctx, GRIPPER_CLOSED);
    Ok(true)
}

fn set_all_grippers(ctx: &mut CommandContext<'_>, percent: f64) {
    let robot = ctx.controller.robot().name().to_string();
    ctx.controller.set_gripper_open_percent(&robot, percent);
}

/// `set_gripper <gripper> [q...]`
pub fn set_gripper(ctx: &mut CommandContext<'_>, args: &mut Args<'_>) -> Result<bool> {
    let gripper = args.word("gripper name")?;
    let q = args.remaining_numbers("q")?;
    let robot = ctx.controller.robot().name().to_string();
    ctx.controller.set_gripper_target_q(&robot, gripper, q);
    Ok(true)
}

/// `GoToHalfSitPose` and `half_sitting`
pub fn go_to_half_sit_pose(ctx: &mut CommandContext<'_>, _args: &mut Args<'_>) -> Result<bool> {
    Ok(ctx.controller.go_to_half_sit_pose())
}

/// `enable_controller <name>`
pub fn enable_controller(ctx: &mut CommandContext<'_>, args: &mut Args<'_>) -> Result<bool> {
    let name = args.word("controller name")?;
    Ok(ctx.controller.enable_controller(name))
}

/// `set_external_force <body> cx cy cz fx fy fz`
pub fn set_external_force(ctx: &mut CommandContext<'_>, args: &mut Args<'_>) -> Result<bool> {
    let body = args.word("body name")?;
    let force = args.force_vec()?;
    debug!(body, %force, "set_external_force");
    Ok(ctx.simulation.set_external_force(body, &force))
}

/// `remove_external_force <body>`
pub fn remove_external_force(ctx: &mut CommandContext<'_>, args: &mut Args<'_>) -> Result<bool> {
    let body = args.word("body name")?;
    Ok(ctx.simulation.remove_external_force(body))
}

/// `apply_impact <body> cx cy cz fx fy fz`
pub fn apply_impact(ctx: &mut CommandContext<'_>, args: &mut Args<'_>) -> Result<bool> {
    let body = args.word("body name")?;
    let force = args.force_vec()?;
    debug!(body, %force, "apply_impact");
    Ok(ctx.simulation.apply_impact(body, &force))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LoopbackController, LoopbackSimulation};
    use crate::core::config::{RobotConfig, SimulationConfig};
    use crate::core::ForceVec;

    struct Fixture {
        controller: LoopbackController,
        simulation: LoopbackSimulation,
        out: Vec<u8>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                controller: LoopbackController::from_config(&RobotConfig::default()),
                simulation: LoopbackSimulation::from_config(&SimulationConfig::default()),
                out: Vec::new(),
            }
        }

        fn call(&mut self, handler: Handler, text: &str) -> Result<bool> {
            let mut ctx = CommandContext {
                controller: &mut self.controller,
                simulation: &mut self.simulation,
                out: &mut self.out,
            };
            handler(&mut ctx, &mut Args::new(text))
        }

        fn output(&self) -> String {
            String::from_utf8_lossy(&self.out).into_owned()
        }
    }

    #[test]
    fn test_get_joint_pos() {
        let mut fx = Fixture::new();
        assert!(fx.call(get_joint_pos, "R_KNEE").unwrap());
        assert!(fx.call(get_joint_pos, "TAIL").unwrap());
        assert_eq!(fx.output(), "R_KNEE: 0.74\nno joint named TAIL\n");
    }

    #[test]
    fn test_get_joint_pos_without_coordinates() {
        let mut fx = Fixture::new();
        assert!(fx.call(get_joint_pos, "Root").unwrap());
        assert_eq!(fx.output(), "Root: 0\n");
    }

    #[test]
    fn test_grippers() {
        let mut fx = Fixture::new();
        assert!(fx.call(close_grippers, "").unwrap());
        assert!(fx.controller.grippers().all(|(_, s)| s.open_percent == 0.0));
        assert!(fx.call(open_grippers, "").unwrap());
        assert!(fx.controller.grippers().all(|(_, s)| s.open_percent == 1.0));
    }

    #[test]
    fn test_set_gripper() {
        let mut fx = Fixture::new();
        assert!(fx.call(set_gripper, "l_gripper 0.5 0.25").unwrap());
        assert_eq!(
            fx.controller.gripper("l_gripper").unwrap().target_q,
            Some(vec![0.5, 0.25])
        );

        assert!(fx.call(set_gripper, "r_gripper").unwrap());
        assert_eq!(
            fx.controller.gripper("r_gripper").unwrap().target_q,
            Some(Vec::new())
        );

        assert!(fx.call(set_gripper, "").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_enable_controller() {
        let mut fx = Fixture::new();
        assert!(fx.call(enable_controller, "Body6d").unwrap());
        assert!(!fx.call(enable_controller, "Unknown").unwrap());
        assert_eq!(fx.controller.active_controller(), Some("Body6d"));
    }

    #[test]
    fn test_forces() {
        let mut fx = Fixture::new();
        assert!(fx.call(set_external_force, "torso 0 0 0 10 0 0").unwrap());
        assert_eq!(
            fx.simulation.external_force("torso"),
            Some(&ForceVec::new([0.0; 3], [10.0, 0.0, 0.0]))
        );
        assert!(fx.call(remove_external_force, "torso").unwrap());
        assert!(fx.simulation.external_force("torso").is_none());

        assert!(fx.call(apply_impact, "l_wrist 1 0 0 0 0 -5").unwrap());
        assert_eq!(
            fx.simulation.impacts()[0],
            (
                "l_wrist".to_string(),
                ForceVec::new([1.0, 0.0, 0.0], [0.0, 0.0, -5.0])
            )
        );

        assert!(!fx.call(set_external_force, "ghost 0 0 0 1 1 1").unwrap());
        assert!(fx
            .call(apply_impact, "torso 0 0")
            .unwrap_err()
            .is_invalid_argument());
        assert_eq!(fx.simulation.impacts().len(), 1);
    }
}
