//! Simulation stepping loop
//!
//! Advances the simulation clock at a fixed timestep, honoring the step mode
//! chosen at the console.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, trace};

use crate::cli::control::StepControl;

/// Owner of the stepping loop
#[derive(Debug, Clone)]
pub struct Stepper {
    control: Arc<StepControl>,
    timestep: Duration,
    steps: u64,
}

impl Stepper {
    /// Create a stepper polling `control` every `timestep`
    pub fn new(control: Arc<StepControl>, timestep: Duration) -> Self {
        Self {
            control,
            timestep,
            steps: 0,
        }
    }

    /// Steps taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time elapsed so far
    pub fn elapsed(&self) -> Duration {
        self.timestep.saturating_mul(self.steps.min(u32::MAX as u64) as u32)
    }

    /// Advance once if the step mode allows it, returning whether it did
    pub fn tick(&mut self) -> bool {
        if self.control.step_by_step() && !self.control.next() {
            return false;
        }
        self.steps += 1;
        trace!(step = self.steps, "simulation step");
        self.control.play();
        true
    }

    /// Loop until the console is done, returning the number of steps taken
    pub fn run(mut self) -> u64 {
        debug!(timestep = ?self.timestep, "stepping loop started");
        while !self.control.done() {
            self.tick();
            thread::sleep(self.timestep);
        }
        debug!(steps = self.steps, elapsed = ?self.elapsed(), "stepping loop finished");
        self.steps
    }
}
