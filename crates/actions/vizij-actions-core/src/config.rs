//! Core configuration for vizij-actions-core.

use serde::{Deserialize, Serialize};

/// Duration used for timed leaves when a document omits one.
pub const DEFAULT_DURATION: f32 = 1.0;

/// Colour blend factor used by colorize when a document omits one.
pub const DEFAULT_BLEND_FACTOR: f32 = 0.5;

/// Defaults applied by the JSON loader and bounds used by timeline lowering.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Duration (seconds) for timed leaves that omit one.
    pub default_duration: f32,
    /// Blend factor for colorize leaves that omit one.
    pub default_blend_factor: f32,

    /// Timeline lowering stops expanding infinite repeats past this time (seconds).
    pub timeline_horizon: f32,
    /// Upper bound on iterations expanded for a single repeat during lowering.
    pub max_repeat_expansion: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration: DEFAULT_DURATION,
            default_blend_factor: DEFAULT_BLEND_FACTOR,
            timeline_horizon: 60.0,
            max_repeat_expansion: 10_000,
        }
    }
}
