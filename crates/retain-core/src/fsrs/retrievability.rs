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

use crate::fsrs::MIN_STABILITY;
use crate::fsrs::Retrievability;
use crate::fsrs::Stability;

/// Probability of recall after `elapsed_days` for a memory of the given
/// stability: `R(t, S) = (1 + t / 9S)^-1`.
///
/// Below `MIN_STABILITY` (including NaN) there is no memory to speak of and
/// the result is zero. Negative elapsed time counts as zero.
pub fn retrievability(elapsed_days: f64, stability: Stability) -> Retrievability {
    if stability.is_nan() || stability < MIN_STABILITY {
        return 0.0;
    }
    let t = elapsed_days.max(0.0);
    1.0 / (1.0 + t / (9.0 * stability))
}
