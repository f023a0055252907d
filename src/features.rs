//! Goertzel feature extraction.
//!
//! Reduces a 32 000-sample, two-buffer audio window into three parallel
//! sequences of 250 band-limited amplitude envelopes, one per tuned
//! frequency (350 Hz, 1300 Hz, 3500 Hz).

use crate::config::GoertzelFormula;
use crate::model::{
    BUFFER_SIZE, FRAME_LENGTH, GOERTZEL_COEFFS, NUM_FEATURES, SCALED_HAMMING_FACTORS,
    WINDOW_COUNT,
};

/// Three parallel sequences of 250 band amplitudes, one per tuned frequency.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSet {
    pub bands: [[f32; WINDOW_COUNT]; NUM_FEATURES],
}

impl FeatureSet {
    const fn zeroed() -> Self {
        Self {
            bands: [[0.0; WINDOW_COUNT]; NUM_FEATURES],
        }
    }

    /// Feature triple for frame `t`, one value per band.
    pub fn frame(&self, t: usize) -> [f32; NUM_FEATURES] {
        [self.bands[0][t], self.bands[1][t], self.bands[2][t]]
    }
}

/// Per-band Goertzel recurrence state, reset at every frame boundary.
#[derive(Default, Clone, Copy)]
struct GoertzelState {
    d1: f32,
    d2: f32,
}

impl GoertzelState {
    #[inline]
    fn push(&mut self, x: f32, coeff: f32) {
        let y = x + coeff * self.d1 - self.d2;
        self.d2 = self.d1;
        self.d1 = y;
    }

    #[inline]
    fn magnitude(&self, coeff: f32, formula: GoertzelFormula) -> f32 {
        let cross = match formula {
            GoertzelFormula::ObservedBug => self.d1 * self.d2 * coeff,
            GoertzelFormula::Textbook => 2.0 * self.d1 * self.d2 * coeff,
        };
        (self.d1 * self.d1 + self.d2 * self.d2 - cross).sqrt()
    }

    #[inline]
    fn reset(&mut self) {
        self.d1 = 0.0;
        self.d2 = 0.0;
    }
}

/// Stateless three-band Goertzel filter bank with a Hamming window.
///
/// Holds no per-call state; every [`extract`](Self::extract) starts from a
/// fresh set of band recurrences.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor {
    formula: GoertzelFormula,
}

impl FeatureExtractor {
    pub fn new(formula: GoertzelFormula) -> Self {
        Self { formula }
    }

    /// Extract three 250-long feature sequences from a 32 000-sample window
    /// split across two 16 000-sample buffers.
    pub fn extract(&self, buffer1: &[i16; BUFFER_SIZE], buffer2: &[i16; BUFFER_SIZE]) -> FeatureSet {
        let mut out = FeatureSet::zeroed();
        let mut states = [GoertzelState::default(); NUM_FEATURES];

        let mut frame = 0usize;
        let mut j = 0usize;

        for i in 0..(BUFFER_SIZE * 2) {
            let sample = if i < BUFFER_SIZE {
                buffer1[i]
            } else {
                buffer2[i - BUFFER_SIZE]
            };

            let scaled = sample as f32 * SCALED_HAMMING_FACTORS[j];

            for (band, state) in states.iter_mut().enumerate() {
                state.push(scaled, GOERTZEL_COEFFS[band]);
            }

            j += 1;
            if j == FRAME_LENGTH {
                for (band, state) in states.iter_mut().enumerate() {
                    out.bands[band][frame] = state.magnitude(GOERTZEL_COEFFS[band], self.formula);
                    state.reset();
                }
                j = 0;
                frame += 1;
            }
        }

        debug_assert_eq!(frame, WINDOW_COUNT);
        log::trace!("extracted {} frames across {} bands", frame, NUM_FEATURES);

        out
    }
}
