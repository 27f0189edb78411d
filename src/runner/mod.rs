//! Runner module - the simulation stepping loop

pub mod stepper;

pub use stepper::Stepper;
