//! Viterbi decoder over the four-state HMM (Silence, Impulse, Tail, Noise).
//!
//! The trellis (`alpha`, `back`) and backtrace scratch are owned by
//! [`DecoderCore`] so a call borrows them `&mut` instead of reaching into
//! file-scope statics.

use crate::features::FeatureSet;
use crate::model::{
    is_gunshot_state, EMISSION_FLOOR_FRACTION, EMISSION_MEAN, INITIAL, NORMALISATION_FACTORS,
    NUM_FEATURES, NUM_STATES, ONE_OVER_EMISSION_VARIANCE, TRANSITION_MATRIX, WINDOW_COUNT,
};

/// Result of decoding one window of features: the most-likely state
/// sequence and the count of gunshot-bearing (Impulse/Tail) frames in it.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOutcome {
    /// Number of frames whose most-likely state is Impulse or Tail.
    pub count: usize,
    /// Number of frames actually decoded (`frame_count` clamped to 250).
    pub frame_count: usize,
    sequence: [u8; WINDOW_COUNT],
}

impl DecodeOutcome {
    /// The most-likely state sequence, one entry per decoded frame.
    pub fn states(&self) -> &[u8] {
        &self.sequence[..self.frame_count]
    }
}

#[inline]
fn lognormal_pdf(x: f32, mu: f32, normalisation: f32, one_over_variance: f32) -> f32 {
    let mean_diff = x.ln() - mu;
    let e = -0.5 * mean_diff * mean_diff * one_over_variance;
    normalisation * e.exp()
}

/// Owns the dense trellis scratch memory for one decode call.
///
/// No heap allocation: every array here is fixed-size and stack/struct
/// resident. Reentrancy is prevented by Rust's exclusive `&mut self` borrow
/// rather than a runtime guard.
pub struct DecoderCore {
    alpha: [[f32; WINDOW_COUNT]; NUM_STATES],
    back: [[u8; WINDOW_COUNT]; NUM_STATES],
}

impl Default for DecoderCore {
    fn default() -> Self {
        Self {
            alpha: [[0.0; WINDOW_COUNT]; NUM_STATES],
            back: [[0; WINDOW_COUNT]; NUM_STATES],
        }
    }
}

impl DecoderCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `frame_count` frames of `features` (clamped to 250) into the
    /// most-likely state sequence, returning it alongside the gunshot-state
    /// count.
    pub fn decode(&mut self, features: &FeatureSet, frame_count: usize) -> DecodeOutcome {
        let t_len = frame_count.min(WINDOW_COUNT);

        if t_len == 0 {
            return DecodeOutcome {
                count: 0,
                frame_count: 0,
                sequence: [0; WINDOW_COUNT],
            };
        }

        let mut emit = [0f32; NUM_STATES];

        for t in 0..t_len {
            let x = features.frame(t);

            let mut max_emit = -1.0f32;
            for i in 0..NUM_STATES {
                let mut value = 1.0f32;
                for j in 0..NUM_FEATURES {
                    value *= lognormal_pdf(
                        x[j],
                        EMISSION_MEAN[i][j],
                        NORMALISATION_FACTORS[i][j],
                        ONE_OVER_EMISSION_VARIANCE[i][j],
                    );
                }
                emit[i] = value;
                if value > max_emit {
                    max_emit = value;
                }
            }

            let floor = max_emit * EMISSION_FLOOR_FRACTION;
            for value in emit.iter_mut() {
                if *value < floor {
                    *value = floor;
                }
            }

            if t == 0 {
                for k in 0..NUM_STATES {
                    self.alpha[k][0] = INITIAL[k] * emit[k];
                }
            } else {
                let mut col_max = [0f32; NUM_STATES];
                let mut col_argmax = [0u8; NUM_STATES];

                for i in 0..NUM_STATES {
                    for j in 0..NUM_STATES {
                        let product = self.alpha[j][t - 1] * TRANSITION_MATRIX[j][i] * emit[i];
                        if product > col_max[i] {
                            col_max[i] = product;
                            col_argmax[i] = j as u8;
                        }
                    }
                }

                for i in 0..NUM_STATES {
                    self.alpha[i][t] = col_max[i];
                    self.back[i][t] = col_argmax[i];
                }
            }

            let sum: f32 = (0..NUM_STATES).map(|i| self.alpha[i][t]).sum();
            for i in 0..NUM_STATES {
                self.alpha[i][t] /= sum;
                // At t == 0 a NaN column cannot arise given non-degenerate
                // INITIAL/emission values. When every feature is
                // exactly zero it can, in which case we leave it as NaN
                // rather than read the (nonexistent) t-1 column: every
                // downstream comparison against NaN is false, so the
                // argmax naturally falls back to state 0 (Silence).
                if t > 0 && self.alpha[i][t].is_nan() {
                    self.alpha[i][t] = self.alpha[i][t - 1];
                }
            }
        }

        let mut best_state = 0u8;
        let mut best_prob = 0.0f32;
        for i in 0..NUM_STATES {
            if self.alpha[i][t_len - 1] > best_prob {
                best_prob = self.alpha[i][t_len - 1];
                best_state = i as u8;
            }
        }

        let mut sequence = [0u8; WINDOW_COUNT];
        sequence[t_len - 1] = best_state;
        for t in (1..t_len).rev() {
            sequence[t - 1] = self.back[sequence[t] as usize][t];
        }

        let count = sequence[..t_len]
            .iter()
            .filter(|&&state| is_gunshot_state(state))
            .count();

        DecodeOutcome {
            count,
            frame_count: t_len,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NUM_STATES;

    fn flat_features(value: f32) -> FeatureSet {
        FeatureSet {
            bands: [[value; WINDOW_COUNT]; 3],
        }
    }

    #[test]
    fn zero_frames_returns_zero_count_without_underflow() {
        let mut decoder = DecoderCore::new();
        let features = flat_features(1.0);
        let outcome = decoder.decode(&features, 0);
        assert_eq!(outcome.count, 0);
        assert_eq!(outcome.frame_count, 0);
        assert!(outcome.states().is_empty());
    }

    #[test]
    fn count_is_bounded_by_frame_count() {
        let mut decoder = DecoderCore::new();
        let features = flat_features(2.0);
        for t_len in [1usize, 10, 93, 250] {
            let outcome = decoder.decode(&features, t_len);
            assert!(outcome.count <= t_len);
        }
    }

    #[test]
    fn backpointers_and_states_are_valid_indices() {
        let mut decoder = DecoderCore::new();
        let features = flat_features(3.0);
        let outcome = decoder.decode(&features, WINDOW_COUNT);
        for &state in outcome.states() {
            assert!((state as usize) < NUM_STATES);
        }
    }

    #[test]
    fn frame_count_above_250_is_clamped() {
        let mut a = DecoderCore::new();
        let mut b = DecoderCore::new();
        let features = flat_features(1.5);
        let at_cap = a.decode(&features, WINDOW_COUNT);
        let over_cap = b.decode(&features, WINDOW_COUNT + 1000);
        assert_eq!(at_cap.count, over_cap.count);
        assert_eq!(at_cap.frame_count, over_cap.frame_count);
    }

    #[test]
    fn decoding_is_deterministic() {
        let features = flat_features(0.7);
        let mut a = DecoderCore::new();
        let mut b = DecoderCore::new();
        let out_a = a.decode(&features, WINDOW_COUNT);
        let out_b = b.decode(&features, WINDOW_COUNT);
        assert_eq!(out_a.count, out_b.count);
        assert_eq!(out_a.states(), out_b.states());
    }

    #[test]
    fn all_zero_features_yield_constant_silence_and_zero_count() {
        let mut decoder = DecoderCore::new();
        let features = flat_features(0.0);
        let outcome = decoder.decode(&features, WINDOW_COUNT);
        assert!(outcome.states().iter().all(|&s| s == crate::model::STATE_SILENCE));
        assert_eq!(outcome.count, 0);
    }

    #[test]
    fn repeated_decode_calls_on_same_core_do_not_leak_state() {
        let mut decoder = DecoderCore::new();
        let silence = flat_features(0.0);
        let loud = flat_features(5.0);

        let first = decoder.decode(&loud, WINDOW_COUNT);
        let second = decoder.decode(&silence, WINDOW_COUNT);
        let third = decoder.decode(&loud, WINDOW_COUNT);

        assert_eq!(second.count, 0);
        assert_eq!(first.count, third.count);
        assert_eq!(first.states(), third.states());
    }
}
