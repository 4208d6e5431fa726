//! Tunables that would otherwise be inline magic numbers.

use serde::{Deserialize, Serialize};

/// Configuration for [`crate::builder::ProblemBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuilderConfig {
    /// Heuristic total duration (seconds) a segment's timestep is seeded
    /// towards: `dt_segment[i]` is seeded with
    /// `initial_timestep_guess_seconds / N_i`. The source hardcodes this to
    /// `5.0`.
    pub initial_timestep_guess_seconds: f64,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            initial_timestep_guess_seconds: 5.0,
        }
    }
}
