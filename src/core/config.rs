//! Configuration management for simcli
//!
//! Supports environment variables, config files, and runtime overrides.
//! The robot and simulation sections describe the loopback backend.
//!
//! Config file location: ~/.config/simcli/config.toml

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{Result, SimCliError};

/// Main configuration for simcli
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Interpreter configuration
    #[serde(default)]
    pub interpreter: InterpreterConfig,
    /// Stepping loop configuration
    #[serde(default)]
    pub stepper: StepperConfig,
    /// Loopback robot and controller description
    #[serde(default)]
    pub robot: RobotConfig,
    /// Loopback simulation description
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Interpreter behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Start paused, advancing only on explicit steps
    pub step_by_step: bool,
    /// Prompt printed before each read (none by default)
    pub prompt: Option<String>,
}

/// Stepping loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperConfig {
    /// Simulation timestep in milliseconds
    /// Default: 5
    pub timestep_ms: u64,
}

/// One joint of the loopback robot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JointConfig {
    /// Joint name
    pub name: String,
    /// Initial generalized coordinates
    #[serde(default)]
    pub q: Vec<f64>,
    /// Coordinates restored by the half-sitting service (defaults to `q`)
    #[serde(default)]
    pub half_sitting: Option<Vec<f64>>,
}

impl JointConfig {
    /// Create a single-coordinate joint resting at `q`
    pub fn revolute(name: impl Into<String>, q: f64) -> Self {
        Self {
            name: name.into(),
            q: vec![q],
            half_sitting: None,
        }
    }

    /// Coordinates of the half-sitting posture
    pub fn half_sitting_q(&self) -> &[f64] {
        self.half_sitting.as_deref().unwrap_or(&self.q)
    }
}

/// Loopback robot and controller description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Robot name
    pub name: String,
    /// Gripper names
    pub grippers: Vec<String>,
    /// Sub-controllers that can be enabled
    pub controllers: Vec<String>,
    /// Sub-controller active at startup
    pub active_controller: Option<String>,
    /// Joints in kinematic order
    pub joints: Vec<JointConfig>,
}

/// Loopback simulation description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Bodies that accept external forces
    pub bodies: Vec<String>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            step_by_step: env::var("SIMCLI_STEP_BY_STEP")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            prompt: env::var("SIMCLI_PROMPT").ok().filter(|p| !p.is_empty()),
        }
    }
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            timestep_ms: env::var("SIMCLI_TIMESTEP_MS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(5),
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            name: "humanoid".to_string(),
            grippers: vec!["l_gripper".to_string(), "r_gripper".to_string()],
            controllers: vec![
                "Posture".to_string(),
                "Body6d".to_string(),
                "HalfSitPose".to_string(),
            ],
            active_controller: Some("Posture".to_string()),
            joints: vec![
                JointConfig {
                    name: "Root".to_string(),
                    q: Vec::new(),
                    half_sitting: None,
                },
                JointConfig::revolute("R_HIP_P", -0.38),
                JointConfig::revolute("R_KNEE", 0.74),
                JointConfig::revolute("R_ANKLE_P", -0.36),
                JointConfig::revolute("L_HIP_P", -0.38),
                JointConfig::revolute("L_KNEE", 0.74),
                JointConfig::revolute("L_ANKLE_P", -0.36),
                JointConfig::revolute("NECK_Y", 0.0),
            ],
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bodies: vec![
                "base_link".to_string(),
                "torso".to_string(),
                "l_wrist".to_string(),
                "r_wrist".to_string(),
            ],
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("simcli")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > config file > env vars > defaults
    pub fn load() -> Result<Self> {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        let config_path = Self::config_file();
        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        // Fall back to defaults (which respect env vars)
        Ok(Self::default())
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        // Missing sections fall back to env-backed defaults
        let _ = dotenvy::dotenv();

        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SimCliError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| SimCliError::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the loopback backend relies on
    pub fn validate(&self) -> Result<()> {
        if self.stepper.timestep_ms == 0 {
            return Err(SimCliError::config("stepper.timestep_ms must be positive"));
        }

        let mut seen = HashSet::new();
        for joint in &self.robot.joints {
            if !seen.insert(joint.name.as_str()) {
                return Err(SimCliError::config(format!(
                    "duplicate joint name: {}",
                    joint.name
                )));
            }
            if joint.half_sitting_q().len() != joint.q.len() {
                return Err(SimCliError::config(format!(
                    "joint {} has {} coordinates but {} half-sitting values",
                    joint.name,
                    joint.q.len(),
                    joint.half_sitting_q().len()
                )));
            }
        }

        if let Some(active) = &self.robot.active_controller {
            if !self.robot.controllers.contains(active) {
                return Err(SimCliError::config(format!(
                    "active controller {} is not in robot.controllers",
                    active
                )));
            }
        }

        Ok(())
    }

    /// Generate a default config file content for display
    pub fn default_config_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Error generating config"))
    }
}
