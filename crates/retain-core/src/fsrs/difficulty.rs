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
use crate::fsrs::MIN_DIFFICULTY;
use crate::fsrs::Rating;
use crate::fsrs::Weights;
use crate::numeric::clamp;

/// Difficulty after the first-ever review: `D0(r) = w4 - (r - 3) * w5`,
/// clamped into `[1, 10]`.
pub fn initial_difficulty(w: &Weights, rating: Rating) -> Difficulty {
    let d = w.initial_difficulty - (rating.value() - 3.0) * w.initial_difficulty_scale;
    clamp(d, MIN_DIFFICULTY, MAX_DIFFICULTY)
}

/// Difficulty after a later review. The rating moves the difficulty by
/// `w6` per step away from Good, and the result is pulled towards
/// `D0(rating)` with strength `w7`.
pub fn next_difficulty(w: &Weights, difficulty: Difficulty, rating: Rating) -> Difficulty {
    let d = clamp(difficulty, MIN_DIFFICULTY, MAX_DIFFICULTY);
    let shifted = d - w.difficulty_step * (rating.value() - 3.0);
    let reverted =
        w.mean_reversion * initial_difficulty(w, rating) + (1.0 - w.mean_reversion) * shifted;
    clamp(reverted, MIN_DIFFICULTY, MAX_DIFFICULTY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_difficulty_ordering() {
        let w = Weights::default();
        let d: Vec<f64> = Rating::ALL
            .iter()
            .map(|r| initial_difficulty(&w, *r))
            .collect();
        assert!(d[0] > d[1]);
        assert!(d[1] > d[2]);
        assert!(d[2] > d[3]);
        assert_eq!(d[2], w.initial_difficulty);
    }

    #[test]
    fn test_initial_difficulty_clamped() {
        let w = Weights::from_slice(&[0.4, 1.2, 3.2, 15.7, 9.5, 4.0]);
        assert_eq!(initial_difficulty(&w, Rating::Again), MAX_DIFFICULTY);
        assert_eq!(initial_difficulty(&w, Rating::Easy), 5.5);
        let w = Weights::from_slice(&[0.4, 1.2, 3.2, 15.7, 0.5, 4.0]);
        assert_eq!(initial_difficulty(&w, Rating::Easy), MIN_DIFFICULTY);
    }

    #[test]
    fn test_again_raises_easy_lowers() {
        let w = Weights::default();
        assert!(next_difficulty(&w, 5.0, Rating::Again) > 5.0);
        assert!(next_difficulty(&w, 5.0, Rating::Easy) < 5.0);
    }

    #[test]
    fn test_next_difficulty_bounded() {
        let w = Weights::default();
        let extremes = [-100.0, 0.0, 1.0, 5.0, 10.0, 11.0, 1e9, f64::NAN];
        for d in extremes {
            for rating in Rating::ALL {
                let next = next_difficulty(&w, d, rating);
                assert!(
                    (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&next),
                    "D'({d}, {rating}) = {next}"
                );
            }
        }
    }

    #[test]
    fn test_repeated_easy_floors_at_one() {
        let w = Weights::default();
        let mut d = 5.0;
        for _ in 0..50 {
            d = next_difficulty(&w, d, Rating::Easy);
        }
        assert_eq!(d, MIN_DIFFICULTY);
    }
}
