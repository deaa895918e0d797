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

use serde::Serialize;

use crate::fsrs::Card;
use crate::fsrs::Difficulty;
use crate::fsrs::MIN_STEP_MINUTES;
use crate::fsrs::Parameters;
use crate::fsrs::Rating;
use crate::fsrs::Stability;
use crate::fsrs::State;
use crate::fsrs::Weights;
use crate::fsrs::forget_stability;
use crate::fsrs::initial_difficulty;
use crate::fsrs::initial_stability;
use crate::fsrs::next_difficulty;
use crate::fsrs::next_interval;
use crate::fsrs::recall_stability;
use crate::fsrs::retrievability;
use crate::fsrs::short_term_stability;
use crate::numeric::MINUTES_PER_DAY;
use crate::numeric::add_days;
use crate::numeric::clamp;
use crate::numeric::elapsed_days;
use crate::numeric::minutes_to_days;
use crate::policy::SchedulingPolicy;
use crate::types::timestamp::Timestamp;

/// Below this many days since the previous review, a successful review in
/// the learning steps uses the short-term stability formula.
const SAME_DAY: f64 = 1.0;

/// The FSRS scheduler, with its parameters resolved once.
#[derive(Clone, Debug)]
pub struct Fsrs {
    weights: Weights,
    request_retention: f64,
    maximum_interval: u32,
    learning_steps: Vec<f64>,
    relearning_steps: Vec<f64>,
}

/// One value per possible rating.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcomes<T> {
    pub again: T,
    pub hard: T,
    pub good: T,
    pub easy: T,
}

impl<T> Outcomes<T> {
    pub fn from_fn(mut f: impl FnMut(Rating) -> T) -> Self {
        Self {
            again: f(Rating::Again),
            hard: f(Rating::Hard),
            good: f(Rating::Good),
            easy: f(Rating::Easy),
        }
    }

    pub fn get(&self, rating: Rating) -> &T {
        match rating {
            Rating::Again => &self.again,
            Rating::Hard => &self.hard,
            Rating::Good => &self.good,
            Rating::Easy => &self.easy,
        }
    }
}

/// What each rating would do to a card, without committing to any of them.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingPreview {
    /// The card as it was passed in.
    pub card: Card,
    /// Scheduled days per rating.
    pub intervals: Outcomes<f64>,
    pub next_review_dates: Outcomes<Timestamp>,
}

/// The memory-state half of a review, before any dates are attached.
struct Transition {
    stability: Stability,
    difficulty: Difficulty,
    state: State,
    learning_step: u32,
    lapsed: bool,
    scheduled_days: f64,
}

impl Fsrs {
    pub fn new(params: &Parameters) -> Self {
        Self {
            weights: Weights::from_slice(&params.weights),
            request_retention: params.request_retention,
            maximum_interval: params.maximum_interval,
            learning_steps: params.learning_steps.clone(),
            relearning_steps: params.relearning_steps.clone(),
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Applies one rating and returns the resulting card.
    pub fn review(&self, card: &Card, rating: Rating, now: Timestamp) -> Card {
        let elapsed = match card.last_review {
            Some(last) => elapsed_days(last, now),
            None => 0.0,
        };
        let t = match card.state {
            State::New => self.first_review(rating),
            State::Learning | State::Relearning => self.step_review(card, rating, elapsed),
            State::Review => self.long_term_review(card, rating, elapsed),
        };
        let mut next = card.clone();
        next.stability = t.stability;
        next.difficulty = t.difficulty;
        next.state = t.state;
        next.learning_step = t.learning_step;
        next.elapsed_days = elapsed;
        next.scheduled_days = t.scheduled_days;
        next.reps = card.reps.saturating_add(1);
        if t.lapsed {
            next.lapses = card.lapses.saturating_add(1);
        }
        next.last_review = Some(now);
        next.next_review = add_days(now, t.scheduled_days);
        next
    }

    /// Computes the outcome of every rating. Each entry is exactly what
    /// [`Fsrs::review`] returns for that rating.
    pub fn schedule(&self, card: &Card, now: Timestamp) -> SchedulingPreview {
        let cards = Outcomes::from_fn(|rating| self.review(card, rating, now));
        SchedulingPreview {
            card: card.clone(),
            intervals: Outcomes::from_fn(|rating| cards.get(rating).scheduled_days),
            next_review_dates: Outcomes::from_fn(|rating| cards.get(rating).next_review),
        }
    }

    fn first_review(&self, rating: Rating) -> Transition {
        let stability = initial_stability(&self.weights, rating);
        let difficulty = initial_difficulty(&self.weights, rating);
        match rating {
            Rating::Again => Transition {
                stability,
                difficulty,
                state: State::Learning,
                learning_step: 0,
                lapsed: false,
                scheduled_days: self.step_days(&self.learning_steps, 0, stability),
            },
            Rating::Hard | Rating::Good | Rating::Easy => self.graduate(stability, difficulty),
        }
    }

    fn step_review(&self, card: &Card, rating: Rating, elapsed: f64) -> Transition {
        let steps = match card.state {
            State::Relearning => &self.relearning_steps,
            _ => &self.learning_steps,
        };
        let difficulty = next_difficulty(&self.weights, card.difficulty, rating);
        let r = retrievability(elapsed, card.stability);
        match rating {
            Rating::Again => {
                let stability = forget_stability(&self.weights, card.difficulty, card.stability, r);
                Transition {
                    stability,
                    difficulty,
                    state: card.state,
                    learning_step: 0,
                    lapsed: false,
                    scheduled_days: self.step_days(steps, 0, stability),
                }
            }
            Rating::Hard if card.state == State::Learning => {
                let stability = self.step_stability(card, rating, r, elapsed);
                let last = steps.len().saturating_sub(1) as u32;
                let step = card.learning_step.saturating_add(1).min(last);
                Transition {
                    stability,
                    difficulty,
                    state: State::Learning,
                    learning_step: step,
                    lapsed: false,
                    scheduled_days: self.step_days(steps, step, stability),
                }
            }
            Rating::Hard | Rating::Good | Rating::Easy => {
                let stability = self.step_stability(card, rating, r, elapsed);
                self.graduate(stability, difficulty)
            }
        }
    }

    fn long_term_review(&self, card: &Card, rating: Rating, elapsed: f64) -> Transition {
        let difficulty = next_difficulty(&self.weights, card.difficulty, rating);
        let r = retrievability(elapsed, card.stability);
        match rating {
            Rating::Again => {
                let stability = forget_stability(&self.weights, card.difficulty, card.stability, r);
                Transition {
                    stability,
                    difficulty,
                    state: State::Relearning,
                    learning_step: 0,
                    lapsed: true,
                    scheduled_days: self.step_days(&self.relearning_steps, 0, stability),
                }
            }
            Rating::Hard | Rating::Good | Rating::Easy => {
                let stability =
                    recall_stability(&self.weights, card.difficulty, card.stability, r, rating);
                self.graduate(stability, difficulty)
            }
        }
    }

    fn graduate(&self, stability: Stability, difficulty: Difficulty) -> Transition {
        Transition {
            stability,
            difficulty,
            state: State::Review,
            learning_step: 0,
            lapsed: false,
            scheduled_days: self.interval_days(stability),
        }
    }

    fn step_stability(&self, card: &Card, rating: Rating, r: f64, elapsed: f64) -> Stability {
        if elapsed < SAME_DAY {
            short_term_stability(&self.weights, card.stability, rating)
        } else {
            recall_stability(&self.weights, card.difficulty, card.stability, r, rating)
        }
    }

    fn interval_days(&self, stability: Stability) -> f64 {
        next_interval(stability, self.request_retention, self.maximum_interval) as f64
    }

    /// The length of a learning step as a fraction of a day. An empty step
    /// table falls back to the stability-derived interval.
    fn step_days(&self, steps: &[f64], step: u32, stability: Stability) -> f64 {
        let longest = self.maximum_interval.max(1) as f64 * MINUTES_PER_DAY;
        match steps.get(step as usize).or(steps.last()) {
            Some(minutes) => minutes_to_days(clamp(*minutes, MIN_STEP_MINUTES, longest)),
            None => self.interval_days(stability),
        }
    }
}

impl SchedulingPolicy for Fsrs {
    type Card = Card;
    type Rating = Rating;
    type Outcome = Card;

    fn ratings(&self) -> &'static [Rating] {
        &Rating::ALL
    }

    fn apply(&self, card: &Card, rating: Rating, now: Timestamp) -> Card {
        self.review(card, rating, now)
    }
}

/// Computes, without committing, what each of the four ratings would do to
/// the card.
pub fn schedule_card(card: &Card, now: Timestamp, params: &Parameters) -> SchedulingPreview {
    Fsrs::new(params).schedule(card, now)
}

/// Applies a single rating and returns the authoritative new card.
pub fn review_card(card: &Card, rating: Rating, now: Timestamp, params: &Parameters) -> Card {
    Fsrs::new(params).review(card, rating, now)
}
