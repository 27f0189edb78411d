//! Loopback backend
//!
//! In-process controller and simulation that answer from configuration and
//! record every request, so the console runs without an external simulator.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::backend::traits::{Controller, Robot, Simulation};
use crate::core::config::{RobotConfig, SimulationConfig};
use crate::core::{ForceVec, GRIPPER_OPEN};

/// Table-driven robot model
#[derive(Debug, Clone)]
pub struct LoopbackRobot {
    name: String,
    index: HashMap<String, usize>,
    q: Vec<Vec<f64>>,
    half_sitting: Vec<Vec<f64>>,
}

impl LoopbackRobot {
    /// Build the robot described by a config section
    pub fn from_config(config: &RobotConfig) -> Self {
        let index = config
            .joints
            .iter()
            .enumerate()
            .map(|(i, j)| (j.name.clone(), i))
            .collect();
        Self {
            name: config.name.clone(),
            index,
            q: config.joints.iter().map(|j| j.q.clone()).collect(),
            half_sitting: config
                .joints
                .iter()
                .map(|j| j.half_sitting_q().to_vec())
                .collect(),
        }
    }

    fn reset_to_half_sitting(&mut self) {
        self.q.clone_from(&self.half_sitting);
    }
}

impl Robot for LoopbackRobot {
    fn name(&self) -> &str {
        &self.name
    }

    fn joint_index_by_name(&self, joint: &str) -> Option<usize> {
        self.index.get(joint).copied()
    }

    fn q(&self) -> &[Vec<f64>] {
        &self.q
    }
}

/// Recorded state of one gripper
#[derive(Debug, Clone, PartialEq)]
pub struct GripperState {
    /// Open percentage, 0.0 closed to 1.0 open
    pub open_percent: f64,
    /// Last joint target configuration, if one was set
    pub target_q: Option<Vec<f64>>,
}

/// Controller that records gripper and sub-controller requests
#[derive(Debug, Clone)]
pub struct LoopbackController {
    robot: LoopbackRobot,
    grippers: BTreeMap<String, GripperState>,
    controllers: Vec<String>,
    active: Option<String>,
}

impl LoopbackController {
    /// Build the controller described by a config section
    pub fn from_config(config: &RobotConfig) -> Self {
        let grippers = config
            .grippers
            .iter()
            .map(|g| {
                (
                    g.clone(),
                    GripperState {
                        open_percent: GRIPPER_OPEN,
                        target_q: None,
                    },
                )
            })
            .collect();
        Self {
            robot: LoopbackRobot::from_config(config),
            grippers,
            controllers: config.controllers.clone(),
            active: config.active_controller.clone(),
        }
    }

    /// State of a gripper by name
    pub fn gripper(&self, name: &str) -> Option<&GripperState> {
        self.grippers.get(name)
    }

    /// All grippers, ordered by name
    pub fn grippers(&self) -> impl Iterator<Item = (&str, &GripperState)> {
        self.grippers.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Name of the active sub-controller
    pub fn active_controller(&self) -> Option<&str> {
        self.active.as_deref()
    }
}

impl Controller for LoopbackController {
    fn robot(&self) -> &dyn Robot {
        &self.robot
    }

    fn set_gripper_open_percent(&mut self, robot: &str, percent: f64) {
        if robot != self.robot.name {
            warn!(robot, "gripper request for unknown robot");
            return;
        }
        let percent = percent.clamp(0.0, 1.0);
        for state in self.grippers.values_mut() {
            state.open_percent = percent;
        }
        debug!(robot, percent, "grippers updated");
    }

    fn set_gripper_target_q(&mut self, robot: &str, gripper: &str, q: Vec<f64>) {
        if robot != self.robot.name {
            warn!(robot, "gripper request for unknown robot");
            return;
        }
        match self.grippers.get_mut(gripper) {
            Some(state) => {
                debug!(gripper, ?q, "gripper target set");
                state.target_q = Some(q);
            }
            None => warn!(gripper, "no gripper with that name"),
        }
    }

    fn go_to_half_sit_pose(&mut self) -> bool {
        self.robot.reset_to_half_sitting();
        debug!(robot = %self.robot.name, "reset to half-sitting pose");
        true
    }

    fn enable_controller(&mut self, name: &str) -> bool {
        if self.controllers.iter().any(|c| c == name) {
            debug!(controller = name, "controller enabled");
            self.active = Some(name.to_string());
            true
        } else {
            warn!(controller = name, "no controller with that name");
            false
        }
    }
}

/// Simulation that keeps a ledger of forces applied to known bodies
#[derive(Debug, Clone, Default)]
pub struct LoopbackSimulation {
    bodies: Vec<String>,
    external: BTreeMap<String, ForceVec>,
    impacts: Vec<(String, ForceVec)>,
}

impl LoopbackSimulation {
    /// Build the simulation described by a config section
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            bodies: config.bodies.clone(),
            ..Self::default()
        }
    }

    /// Whether a body accepts forces
    pub fn has_body(&self, body: &str) -> bool {
        self.bodies.iter().any(|b| b == body)
    }

    /// Sustained force currently applied to a body
    pub fn external_force(&self, body: &str) -> Option<&ForceVec> {
        self.external.get(body)
    }

    /// Impacts applied so far, oldest first
    pub fn impacts(&self) -> &[(String, ForceVec)] {
        &self.impacts
    }

    fn check_body(&self, body: &str) -> bool {
        let known = self.has_body(body);
        if !known {
            warn!(body, "no body with that name in the simulation");
        }
        known
    }
}

impl Simulation for LoopbackSimulation {
    fn set_external_force(&mut self, body: &str, force: &ForceVec) -> bool {
        if !self.check_body(body) {
            return false;
        }
        debug!(body, %force, "external force set");
        self.external.insert(body.to_string(), *force);
        true
    }

    fn remove_external_force(&mut self, body: &str) -> bool {
        if !self.check_body(body) {
            return false;
        }
        debug!(body, "external force removed");
        self.external.remove(body);
        true
    }

    fn apply_impact(&mut self, body: &str, force: &ForceVec) -> bool {
        if !self.check_body(body) {
            return false;
        }
        debug!(body, %force, "impact applied");
        self.impacts.push((body.to_string(), *force));
        true
    }
}
