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

use crate::fsrs::DECAY;
use crate::fsrs::DEFAULT_RETENTION;
use crate::fsrs::MAX_STABILITY;
use crate::fsrs::MIN_STABILITY;
use crate::fsrs::Stability;
use crate::numeric::clamp;

/// Whole days until the next review:
/// `clamp(round(S * (retention^(1/DECAY) - 1)), 1, maximum_interval)`.
///
/// Total over its inputs. Stability is clamped into range, a non-finite
/// retention is replaced by the default, and a zero maximum is treated as one
/// day, so the result is always in `[1, max(maximum_interval, 1)]`.
pub fn next_interval(stability: Stability, request_retention: f64, maximum_interval: u32) -> u32 {
    let maximum = maximum_interval.max(1) as f64;
    let stability = clamp(stability, MIN_STABILITY, MAX_STABILITY);
    let retention = if request_retention.is_finite() {
        clamp(request_retention, 0.0, 1.0)
    } else {
        DEFAULT_RETENTION
    };
    let raw = stability * (retention.powf(1.0 / DECAY) - 1.0);
    clamp(raw.round(), 1.0, maximum) as u32
}
