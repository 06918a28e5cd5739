//! Runtime configuration for sampling and the string animation.
//!
//! `TrammelConfig` holds every value a host may tune at runtime. The `const`
//! values below are the defaults and the fallback for missing TOML fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConicError, Result};
use crate::tolerance::Tolerance;

// ── Sampling ────────────────────────────────────────────────────────

/// Points per rendered branch polyline.
pub const SAMPLES_PER_BRANCH: usize = 1001;
/// Parameter distance between consecutive branch samples.
pub const SAMPLE_STEP: f64 = 0.1;

// ── Animation ───────────────────────────────────────────────────────

/// Number of steps in one run of the string animation.
pub const ANIMATION_TOTAL_STEPS: u32 = 100;
/// Minimum clock time (seconds) between two animation steps.
pub const ANIMATION_STEP_INTERVAL: f64 = 0.1;

/// Sampling of the two open branches of the conic.
///
/// Sample `i` of the positive branch sits at `t = i * step + offset`, the
/// negative branch mirrors it at `-t`. `offset` keeps the first sample off
/// the removable singularity at `t = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub samples_per_branch: usize,
    pub step: f64,
    pub offset: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            samples_per_branch: SAMPLES_PER_BRANCH,
            step: SAMPLE_STEP,
            offset: f64::EPSILON,
        }
    }
}

/// Step schedule of the string-construction animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub total_steps: u32,
    /// Seconds
    pub step_interval: f64,
    pub offset: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            total_steps: ANIMATION_TOTAL_STEPS,
            step_interval: ANIMATION_STEP_INTERVAL,
            offset: f64::EPSILON,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrammelConfig {
    pub tolerance: Tolerance,
    pub sampling: SamplingConfig,
    pub animation: AnimationConfig,
}

impl TrammelConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConicError::Config(e.to_string()))
    }

    /// Load a config from a TOML file. Falls back to defaults on any error.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => {
                    log::info!("Config loaded from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Malformed config file, using defaults: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the config as pretty TOML.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConicError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }
}
