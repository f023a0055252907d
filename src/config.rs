//! Runtime-tunable knobs for the detector.
//!
//! The HMM tables in `model` are baked-in trained constants and are
//! deliberately not configurable. Only two variation points live here:
//! which Goertzel magnitude formula to use, and where the detection
//! ceiling sits.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::DEFAULT_DETECTION_MAX;

/// Which form of the Goertzel power formula to use when computing a band's
/// per-frame magnitude.
///
/// `ObservedBug` reproduces the reference implementation's
/// `d1*d2*w` cross term (not the textbook `2*d1*d2*cos(omega)`), preserved
/// for parity since it measurably changes detection behaviour. `Textbook`
/// is offered as an explicit opt-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoertzelFormula {
    ObservedBug,
    Textbook,
}

impl Default for GoertzelFormula {
    fn default() -> Self {
        GoertzelFormula::ObservedBug
    }
}

/// Detector configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Which Goertzel magnitude formula to use.
    #[serde(default)]
    pub goertzel_formula: GoertzelFormula,

    /// Maximum gunshot-state frame count still considered a gunshot.
    /// Recompute this if the sample rate or frame length ever change.
    #[serde(default = "default_detection_max")]
    pub detection_max: usize,
}

fn default_detection_max() -> usize {
    DEFAULT_DETECTION_MAX
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            goertzel_formula: GoertzelFormula::default(),
            detection_max: DEFAULT_DETECTION_MAX,
        }
    }
}

impl DetectorConfig {
    /// Load a configuration from a JSON file on disk, falling back to
    /// documented defaults for any field the file omits.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        log::debug!(
            "loaded detector config from {}: {:?}",
            path.as_ref().display(),
            config
        );
        Ok(config)
    }
}
