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

//! The FSRS memory model: difficulty, stability and retrievability, and the
//! scheduler built on top of them.

mod card;
mod difficulty;
mod interval;
mod params;
mod rating;
mod retrievability;
mod scheduler;
mod stability;
mod weights;

pub use card::Card;
pub use card::State;
pub use difficulty::initial_difficulty;
pub use difficulty::next_difficulty;
pub use interval::next_interval;
pub use params::Parameters;
pub use rating::Rating;
pub use retrievability::retrievability;
pub use scheduler::Fsrs;
pub use scheduler::Outcomes;
pub use scheduler::SchedulingPreview;
pub use scheduler::review_card;
pub use scheduler::schedule_card;
pub use stability::forget_stability;
pub use stability::initial_stability;
pub use stability::recall_stability;
pub use stability::short_term_stability;
pub use weights::DEFAULT_WEIGHTS;
pub use weights::Weights;

/// Stability in days.
pub type Stability = f64;

/// Difficulty, in `[MIN_DIFFICULTY, MAX_DIFFICULTY]`.
pub type Difficulty = f64;

/// Recall probability, in `[0, 1]`.
pub type Retrievability = f64;

/// Stability never drops below this.
pub const MIN_STABILITY: Stability = 0.01;

/// Upper bound on stability, so values stay finite and serializable.
pub const MAX_STABILITY: Stability = 1_000_000.0;

pub const MIN_DIFFICULTY: Difficulty = 1.0;

pub const MAX_DIFFICULTY: Difficulty = 10.0;

/// Exponent of the forgetting curve used by the interval calculation.
pub const DECAY: f64 = -0.5;

pub const DEFAULT_RETENTION: f64 = 0.9;

pub const DEFAULT_MAXIMUM_INTERVAL: u32 = 36500;

/// The shortest learning or relearning step, in minutes.
pub const MIN_STEP_MINUTES: f64 = 1.0;
