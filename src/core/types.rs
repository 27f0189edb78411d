//! Shared types used across simcli modules
//!
//! Spatial force vectors and gripper constants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gripper open-percentage for a fully open gripper
pub const GRIPPER_OPEN: f64 = 1.0;

/// Gripper open-percentage for a fully closed gripper
pub const GRIPPER_CLOSED: f64 = 0.0;

/// A spatial force: a couple (moment) and a linear force, both 3D
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForceVec {
    /// Moment part (cx, cy, cz)
    pub couple: [f64; 3],
    /// Linear part (fx, fy, fz)
    pub force: [f64; 3],
}

impl ForceVec {
    /// Create a force vector from its couple and force parts
    pub fn new(couple: [f64; 3], force: [f64; 3]) -> Self {
        Self { couple, force }
    }
}

impl fmt::Display for ForceVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [cx, cy, cz] = self.couple;
        let [fx, fy, fz] = self.force;
        write!(
            f,
            "couple ({}, {}, {}) force ({}, {}, {})",
            cx, cy, cz, fx, fy, fz
        )
    }
}
