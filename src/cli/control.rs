//! Step control flags
//!
//! The three flags shared between the console and the stepping loop.

use std::sync::atomic::{AtomicBool, Ordering};

/// `done`, `next` and `step_by_step`, readable from any thread
#[derive(Debug, Default)]
pub struct StepControl {
    done: AtomicBool,
    next: AtomicBool,
    step_by_step: AtomicBool,
}

impl StepControl {
    /// Create the flags with the initial step mode
    pub fn new(step_by_step: bool) -> Self {
        Self {
            done: AtomicBool::new(false),
            next: AtomicBool::new(false),
            step_by_step: AtomicBool::new(step_by_step),
        }
    }

    /// Whether the console has stopped
    pub fn done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Mark the console as stopped
    pub fn stop(&self) {
        self.done.store(true, Ordering::Relaxed);
    }

    /// Whether a single step was requested
    pub fn next(&self) -> bool {
        self.next.load(Ordering::Relaxed)
    }

    /// Request a single step
    pub fn next_step(&self) {
        self.next.store(true, Ordering::Relaxed);
    }

    /// Acknowledge a step request
    pub fn play(&self) {
        self.next.store(false, Ordering::Relaxed);
    }

    /// Whether the simulation only advances on explicit steps
    pub fn step_by_step(&self) -> bool {
        self.step_by_step.load(Ordering::Relaxed)
    }

    /// Flip step-by-step mode, returning the new value
    pub fn toggle_step_by_step(&self) -> bool {
        !self.step_by_step.fetch_xor(true, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_start_clear() {
        let control = StepControl::new(true);
        assert!(!control.done());
        assert!(!control.next());
        assert!(control.step_by_step());
    }

    #[test]
    fn test_toggle_returns_new_value() {
        let control = StepControl::new(false);
        assert!(control.toggle_step_by_step());
        assert!(control.step_by_step());
        assert!(!control.toggle_step_by_step());
        assert!(!control.step_by_step());
    }

    #[test]
    fn test_next_and_play() {
        let control = StepControl::default();
        control.next_step();
        assert!(control.next());
        control.play();
        assert!(!control.next());
    }
}
