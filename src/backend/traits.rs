//! Collaborator traits for the controller and the simulation adapter
//!
//! The interpreter only talks to these; the loopback backend is one
//! implementation, a real whole-body controller binding would be another.

use crate::core::ForceVec;

/// Read-only view of the robot driven by a controller
pub trait Robot {
    /// Robot name, used to address its grippers
    fn name(&self) -> &str;

    /// Index of the named joint in the generalized coordinate vector
    fn joint_index_by_name(&self, joint: &str) -> Option<usize>;

    /// Whether the robot has a joint with that name
    fn has_joint(&self, joint: &str) -> bool {
        self.joint_index_by_name(joint).is_some()
    }

    /// Generalized coordinates, one vector per joint
    fn q(&self) -> &[Vec<f64>];
}

/// Whole-body controller operations reachable from the console
pub trait Controller {
    /// The robot currently controlled
    fn robot(&self) -> &dyn Robot;

    /// Set the open percentage of every gripper of `robot`
    fn set_gripper_open_percent(&mut self, robot: &str, percent: f64);

    /// Set the joint target configuration of one gripper
    fn set_gripper_target_q(&mut self, robot: &str, gripper: &str, q: Vec<f64>);

    /// Half-sitting pose service
    fn go_to_half_sit_pose(&mut self) -> bool;

    /// Request a switch to the named sub-controller
    fn enable_controller(&mut self, name: &str) -> bool;
}

/// Simulated world operations on named bodies
pub trait Simulation {
    /// Apply a sustained external force to a body
    fn set_external_force(&mut self, body: &str, force: &ForceVec) -> bool;

    /// Remove the external force applied to a body
    fn remove_external_force(&mut self, body: &str) -> bool;

    /// Apply an instantaneous impact to a body
    fn apply_impact(&mut self, body: &str, force: &ForceVec) -> bool;
}
