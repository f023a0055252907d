//! Acoustic gunshot detector core: a Goertzel feature bank feeding a
//! four-state HMM Viterbi decoder, classifying 32 000-sample (2 s @ 8 kHz)
//! audio windows as gunshot / non-gunshot.
//!
//! The core is pure and total: given a buffer pair it always returns a
//! [`detector::DetectionOutcome`], with no heap allocation and no state
//! carried between calls beyond what a [`detector::Detector`] instance owns
//! exclusively.

pub mod config;
pub mod decoder;
pub mod detector;
pub mod error;
pub mod features;
pub mod fixtures;
pub mod model;

pub use config::{DetectorConfig, GoertzelFormula};
pub use detector::{DetectionOutcome, Detector};
pub use error::ConfigError;
