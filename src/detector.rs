//! Detector entry point: composes the feature extractor and Viterbi decoder
//! and applies the final gunshot/non-gunshot threshold.

use crate::config::DetectorConfig;
use crate::decoder::DecoderCore;
use crate::features::FeatureExtractor;
use crate::model::{BUFFER_SIZE, WINDOW_COUNT};

/// The outcome of one detector call: the raw gunshot-state count and the
/// thresholded boolean decision derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionOutcome {
    /// Number of frames whose most-likely state was Impulse or Tail.
    pub count: usize,
    /// `0 < count <= detection_max`.
    pub detected: bool,
}

/// Owns the per-call scratch memory for the detector: the feature arrays
/// live on the decoder's stack frame, the trellis lives in [`DecoderCore`].
/// A `Detector` call borrows both exclusively via `&mut self`, so two
/// detector calls can never interleave.
pub struct Detector {
    extractor: FeatureExtractor,
    decoder: DecoderCore,
    config: DetectorConfig,
}

impl Detector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            extractor: FeatureExtractor::new(config.goertzel_formula),
            decoder: DecoderCore::new(),
            config,
        }
    }

    /// Classify one 32 000-sample window, split as two 16 000-sample
    /// buffers, returning the gunshot-state count and the thresholded
    /// decision.
    pub fn classify(
        &mut self,
        buffer1: &[i16; BUFFER_SIZE],
        buffer2: &[i16; BUFFER_SIZE],
    ) -> DetectionOutcome {
        let features = self.extractor.extract(buffer1, buffer2);
        let outcome = self.decoder.decode(&features, WINDOW_COUNT);
        let detected = decide(outcome.count, self.config.detection_max);

        log::debug!(
            "window classified: count={} detection_max={} detected={}",
            outcome.count,
            self.config.detection_max,
            detected
        );

        DetectionOutcome {
            count: outcome.count,
            detected,
        }
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

/// A window is a detected gunshot when its gunshot-state count is positive
/// but does not exceed `detection_max` (sustained events longer than that
/// are treated as continuous noise, not a single impulsive event).
#[inline]
pub(crate) fn decide(count: usize, detection_max: usize) -> bool {
    count > 0 && count <= detection_max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn silence_is_never_detected() {
        let mut detector = Detector::default();
        let (buf1, buf2) = fixtures::silence();
        let outcome = detector.classify(&buf1, &buf2);
        assert_eq!(outcome.count, 0);
        assert!(!outcome.detected);
    }

    #[test]
    fn synthetic_impulse_is_detected() {
        let mut detector = Detector::default();
        let (buf1, buf2) = fixtures::synthetic_impulse(42);
        let outcome = detector.classify(&buf1, &buf2);
        assert!(outcome.count <= 10, "count was {}", outcome.count);
        assert!(outcome.detected);
    }

    #[test]
    fn sustained_tone_is_rejected_as_too_long() {
        let mut detector = Detector::default();
        let (buf1, buf2) = fixtures::sustained_tone(1300.0, 7);
        let outcome = detector.classify(&buf1, &buf2);
        assert!(outcome.count >= 94, "count was {}", outcome.count);
        assert!(!outcome.detected);
    }

    #[test]
    fn decision_rule_boundaries() {
        let cases = [(0usize, false), (1, true), (93, true), (94, false), (250, false)];
        for (count, expected) in cases {
            assert_eq!(decide(count, 93), expected, "count={count}");
        }
    }

    #[test]
    fn classify_is_deterministic() {
        let mut a = Detector::default();
        let mut b = Detector::default();
        let (buf1, buf2) = fixtures::synthetic_impulse(99);
        let out_a = a.classify(&buf1, &buf2);
        let out_b = b.classify(&buf1, &buf2);
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn full_scale_dc_count_is_pinned_for_regression() {
        // Full-scale DC is out-of-distribution relative to the trained
        // emissions: the steady-state Goertzel response it settles into
        // classifies as a constant Impulse state across every frame, so
        // the window is rejected as too sustained to be a gunshot. Pinned
        // here so a change to the emission tables or decode recursion that
        // alters this reference count doesn't slip by unnoticed.
        let mut detector = Detector::default();
        let (buf1, buf2) = fixtures::full_scale_dc();
        let outcome = detector.classify(&buf1, &buf2);
        log::info!("full-scale DC reference count: {}", outcome.count);
        assert_eq!(outcome.count, 250);
        assert!(!outcome.detected);
    }
}
