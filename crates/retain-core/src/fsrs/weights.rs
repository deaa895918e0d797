// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Default model coefficients, indexed `w[0]..w[18]`.
pub const DEFAULT_WEIGHTS: [f64; 19] = [
    0.40255, 1.18385, 3.173, 15.69105, 7.1949, 0.5345, 1.4604, 0.0046, 1.54575, 0.1192, 1.01925,
    1.9395, 0.11, 0.29605, 2.2698, 0.2315, 2.9898, 0.51655, 0.6621,
];

/// What the hard penalty and easy bonus fall back to when a weight list is
/// too short to carry them: a multiplier that changes nothing.
const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// The model coefficients, resolved once from a raw list. Every entry the
/// list lacks (or holds as NaN/infinity) takes the default for its index.
#[derive(Clone, Debug, PartialEq)]
pub struct Weights {
    /// Initial stability per first rating, Again through Easy. w[0..4].
    pub initial_stability: [f64; 4],
    /// Initial difficulty of a Good first review. w[4].
    pub initial_difficulty: f64,
    /// How much each rating step moves the initial difficulty. w[5].
    pub initial_difficulty_scale: f64,
    /// How much each rating step moves the difficulty on later reviews. w[6].
    pub difficulty_step: f64,
    /// Pull of the difficulty back towards its initial value. w[7].
    pub mean_reversion: f64,
    /// w[8], applied as `e^w8`.
    pub recall_scale: f64,
    /// w[9].
    pub recall_stability_decay: f64,
    /// w[10].
    pub recall_retrievability: f64,
    /// w[11].
    pub forget_scale: f64,
    /// w[12].
    pub forget_difficulty: f64,
    /// w[13].
    pub forget_stability: f64,
    /// w[14].
    pub forget_retrievability: f64,
    /// Multiplier on stability growth for a Hard rating. w[15].
    pub hard_penalty: f64,
    /// Multiplier on stability growth for an Easy rating. w[16].
    pub easy_bonus: f64,
    /// w[17].
    pub short_term_scale: f64,
    /// w[18].
    pub short_term_offset: f64,
}

impl Weights {
    pub fn from_slice(w: &[f64]) -> Self {
        let pick = |i: usize| weight_at(w, i).unwrap_or(DEFAULT_WEIGHTS[i]);
        Self {
            initial_stability: [pick(0), pick(1), pick(2), pick(3)],
            initial_difficulty: pick(4),
            initial_difficulty_scale: pick(5),
            difficulty_step: pick(6),
            mean_reversion: pick(7),
            recall_scale: pick(8),
            recall_stability_decay: pick(9),
            recall_retrievability: pick(10),
            forget_scale: pick(11),
            forget_difficulty: pick(12),
            forget_stability: pick(13),
            forget_retrievability: pick(14),
            hard_penalty: weight_at(w, 15).unwrap_or(NEUTRAL_MULTIPLIER),
            easy_bonus: weight_at(w, 16).unwrap_or(NEUTRAL_MULTIPLIER),
            short_term_scale: pick(17),
            short_term_offset: pick(18),
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::from_slice(&DEFAULT_WEIGHTS)
    }
}

fn weight_at(w: &[f64], i: usize) -> Option<f64> {
    w.get(i).copied().filter(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_list() {
        let w = Weights::default();
        assert_eq!(w.initial_stability, [0.40255, 1.18385, 3.173, 15.69105]);
        assert_eq!(w.mean_reversion, 0.0046);
        assert_eq!(w.hard_penalty, 0.2315);
        assert_eq!(w.easy_bonus, 2.9898);
        assert_eq!(w.short_term_offset, 0.6621);
    }

    #[test]
    fn test_empty_list() {
        let w = Weights::from_slice(&[]);
        assert_eq!(w.initial_stability, Weights::default().initial_stability);
        assert_eq!(w.forget_scale, DEFAULT_WEIGHTS[11]);
        assert_eq!(w.hard_penalty, 1.0);
        assert_eq!(w.easy_bonus, 1.0);
    }

    #[test]
    fn test_short_list_keeps_prefix() {
        let w = Weights::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(w.initial_stability, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(w.initial_difficulty, 5.0);
        assert_eq!(w.initial_difficulty_scale, DEFAULT_WEIGHTS[5]);
    }

    #[test]
    fn test_non_finite_entries_use_defaults() {
        let mut raw = DEFAULT_WEIGHTS.to_vec();
        raw[4] = f64::NAN;
        raw[15] = f64::INFINITY;
        let w = Weights::from_slice(&raw);
        assert_eq!(w.initial_difficulty, DEFAULT_WEIGHTS[4]);
        assert_eq!(w.hard_penalty, 1.0);
    }

    #[test]
    fn test_extra_entries_ignored() {
        let mut raw = DEFAULT_WEIGHTS.to_vec();
        raw.extend([0.1, 0.2]);
        assert_eq!(Weights::from_slice(&raw), Weights::default());
    }
}
