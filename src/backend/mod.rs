//! Backend module - controller and simulation collaborators
//!
//! Contains the collaborator traits and the in-process loopback backend.

pub mod loopback;
pub mod traits;

pub use loopback::{LoopbackController, LoopbackRobot, LoopbackSimulation};
pub use traits::{Controller, Robot, Simulation};
