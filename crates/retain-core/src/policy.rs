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

use crate::types::timestamp::Timestamp;

/// A review scheduling policy. Each policy keeps its own card shape and
/// rating scale; callers pick a policy without special-casing either.
pub trait SchedulingPolicy {
    type Card;
    type Rating: Copy + 'static;
    type Outcome;

    /// Every rating the policy accepts, in ascending order.
    fn ratings(&self) -> &'static [Self::Rating];

    /// Applies one rating. Must be pure: the same inputs always give the
    /// same outcome.
    fn apply(&self, card: &Self::Card, rating: Self::Rating, now: Timestamp) -> Self::Outcome;

    /// The outcome of every rating. Built from [`SchedulingPolicy::apply`],
    /// so a preview can never disagree with the review it predicts.
    fn preview(&self, card: &Self::Card, now: Timestamp) -> Vec<(Self::Rating, Self::Outcome)> {
        self.ratings()
            .iter()
            .map(|rating| (*rating, self.apply(card, *rating, now)))
            .collect()
    }
}
