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

use crate::fsrs::Difficulty;
use crate::fsrs::MAX_DIFFICULTY;
use crate::fsrs::MAX_STABILITY;
use crate::fsrs::MIN_DIFFICULTY;
use crate::fsrs::MIN_STABILITY;
use crate::fsrs::Rating;
use crate::fsrs::Retrievability;
use crate::fsrs::Stability;
use crate::fsrs::Weights;
use crate::numeric::clamp;

/// Stability after the first-ever review: the base weight for the rating.
pub fn initial_stability(w: &Weights, rating: Rating) -> Stability {
    let s = w.initial_stability[rating as usize - 1];
    clamp(s, MIN_STABILITY, MAX_STABILITY)
}

/// Stability after a successful recall:
///
/// ```text
/// S' = S * (1 + e^w8 * (11 - D) * S^-w9 * (e^(w10 * (1 - R)) - 1) * m)
/// ```
///
/// where `m` is `w15` for Hard, `w16` for Easy and 1 otherwise. Again is
/// handled by [`forget_stability`]; passing it here gets the neutral
/// multiplier.
pub fn recall_stability(
    w: &Weights,
    difficulty: Difficulty,
    stability: Stability,
    retrievability: Retrievability,
    rating: Rating,
) -> Stability {
    let d = clamp(difficulty, MIN_DIFFICULTY, MAX_DIFFICULTY);
    let s = clamp(stability, MIN_STABILITY, MAX_STABILITY);
    let r = clamp(retrievability, 0.0, 1.0);
    let modifier = match rating {
        Rating::Hard => w.hard_penalty,
        Rating::Easy => w.easy_bonus,
        Rating::Again | Rating::Good => 1.0,
    };
    let growth = w.recall_scale.exp()
        * (11.0 - d)
        * s.powf(-w.recall_stability_decay)
        * ((w.recall_retrievability * (1.0 - r)).exp() - 1.0)
        * modifier;
    clamp(s * (1.0 + growth), MIN_STABILITY, MAX_STABILITY)
}

/// Stability after a lapse:
///
/// ```text
/// S' = w11 * D^-w12 * ((S + 1)^w13 - 1) * e^(w14 * (1 - R))
/// ```
///
/// capped at the prior stability, since forgetting never makes a memory more
/// durable.
pub fn forget_stability(
    w: &Weights,
    difficulty: Difficulty,
    stability: Stability,
    retrievability: Retrievability,
) -> Stability {
    let d = clamp(difficulty, MIN_DIFFICULTY, MAX_DIFFICULTY);
    let s = clamp(stability, MIN_STABILITY, MAX_STABILITY);
    let r = clamp(retrievability, 0.0, 1.0);
    let forgotten = w.forget_scale
        * d.powf(-w.forget_difficulty)
        * ((s + 1.0).powf(w.forget_stability) - 1.0)
        * (w.forget_retrievability * (1.0 - r)).exp();
    clamp(forgotten, MIN_STABILITY, s)
}

/// Stability after a review on the same day as the previous one, while the
/// card is still in its learning steps: `S' = S * e^(w17 * (r - 3 + w18))`.
/// A Good or Easy rating never lowers stability.
pub fn short_term_stability(w: &Weights, stability: Stability, rating: Rating) -> Stability {
    let s = clamp(stability, MIN_STABILITY, MAX_STABILITY);
    let next = s * (w.short_term_scale * (rating.value() - 3.0 + w.short_term_offset)).exp();
    let next = match rating {
        Rating::Good | Rating::Easy => next.max(s),
        Rating::Again | Rating::Hard => next,
    };
    clamp(next, MIN_STABILITY, MAX_STABILITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFFICULTIES: [f64; 6] = [1.0, 2.5, 5.0, 7.5, 10.0, 42.0];
    const STABILITIES: [f64; 8] = [0.0, MIN_STABILITY, 0.3, 1.0, 4.0, 30.0, 400.0, 36500.0];
    const RETRIEVABILITIES: [f64; 7] = [0.0, 0.1, 0.5, 0.8, 0.9, 0.99, 1.0];

    /// The default list, cut off before the hard penalty and easy bonus.
    const DEFAULT_WEIGHTS_PREFIX: [f64; 15] = [
        0.40255, 1.18385, 3.173, 15.69105, 7.1949, 0.5345, 1.4604, 0.0046, 1.54575, 0.1192,
        1.01925, 1.9395, 0.11, 0.29605, 2.2698,
    ];

    #[test]
    fn test_initial_stability_per_rating() {
        let w = Weights::default();
        assert_eq!(initial_stability(&w, Rating::Again), 0.40255);
        assert_eq!(initial_stability(&w, Rating::Hard), 1.18385);
        assert_eq!(initial_stability(&w, Rating::Good), 3.173);
        assert_eq!(initial_stability(&w, Rating::Easy), 15.69105);
    }

    #[test]
    fn test_initial_stability_floor() {
        let w = Weights::from_slice(&[0.0, -1.0]);
        assert_eq!(initial_stability(&w, Rating::Again), MIN_STABILITY);
        assert_eq!(initial_stability(&w, Rating::Hard), MIN_STABILITY);
    }

    #[test]
    fn test_recall_grows_stability() {
        let w = Weights::default();
        let s = recall_stability(&w, 5.0, 10.0, 0.9, Rating::Good);
        assert!(s > 10.0);
    }

    #[test]
    fn test_recall_rating_ordering() {
        let w = Weights::default();
        let hard = recall_stability(&w, 5.0, 10.0, 0.8, Rating::Hard);
        let good = recall_stability(&w, 5.0, 10.0, 0.8, Rating::Good);
        let easy = recall_stability(&w, 5.0, 10.0, 0.8, Rating::Easy);
        assert!(hard < good);
        assert!(good < easy);
    }

    #[test]
    fn test_recall_without_multipliers_is_neutral() {
        let short = Weights::from_slice(&DEFAULT_WEIGHTS_PREFIX);
        let hard = recall_stability(&short, 5.0, 10.0, 0.8, Rating::Hard);
        let good = recall_stability(&short, 5.0, 10.0, 0.8, Rating::Good);
        let easy = recall_stability(&short, 5.0, 10.0, 0.8, Rating::Easy);
        assert_eq!(hard, good);
        assert_eq!(easy, good);
    }

    #[test]
    fn test_forget_never_increases_stability() {
        let w = Weights::default();
        for d in DIFFICULTIES {
            for s in STABILITIES {
                for r in RETRIEVABILITIES {
                    let next = forget_stability(&w, d, s, r);
                    let prior = s.max(MIN_STABILITY);
                    assert!(next <= prior, "forget({d}, {s}, {r}) = {next}");
                    assert!(next >= MIN_STABILITY);
                }
            }
        }
    }

    #[test]
    fn test_forget_shrinks_long_memories() {
        let w = Weights::default();
        assert!(forget_stability(&w, 5.0, 100.0, 0.9) < 100.0);
    }

    #[test]
    fn test_recall_floor() {
        let w = Weights::default();
        for d in DIFFICULTIES {
            for s in STABILITIES {
                for r in RETRIEVABILITIES {
                    for rating in Rating::ALL {
                        let next = recall_stability(&w, d, s, r, rating);
                        assert!(next >= MIN_STABILITY);
                        assert!(next >= s.max(MIN_STABILITY));
                    }
                }
            }
        }
    }

    #[test]
    fn test_short_term() {
        let w = Weights::default();
        assert!(short_term_stability(&w, 2.0, Rating::Again) < 2.0);
        assert!(short_term_stability(&w, 2.0, Rating::Good) >= 2.0);
        assert!(short_term_stability(&w, 2.0, Rating::Easy) > 2.0);
        assert!(short_term_stability(&w, 0.0, Rating::Again) >= MIN_STABILITY);
    }
}
