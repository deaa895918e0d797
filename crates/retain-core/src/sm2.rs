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

//! SM-2: an ease factor that grows or shrinks with each correct answer, and
//! intervals of 1 day, 6 days, then the previous interval times the ease.
//! Structurally separate from FSRS; the two share no card shape.

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;
use crate::policy::SchedulingPolicy;
use crate::types::date::Date;
use crate::types::timestamp::Timestamp;

pub const MIN_EASE_FACTOR: f64 = 1.3;

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Largest ease factor accepted from a stored card.
const MAX_EASE_FACTOR: f64 = 1000.0;

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sm2Card {
    pub ease_factor: f64,
    /// Days between the latest review and the next one.
    pub interval: u32,
    /// Consecutive correct reviews.
    pub repetitions: u32,
}

impl Default for Sm2Card {
    fn default() -> Self {
        Self {
            ease_factor: DEFAULT_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
        }
    }
}

/// Recall quality on SM-2's 0-5 scale. Three and up counts as correct.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Sm2Grade {
    /// No recall at all.
    Blackout = 0,
    /// Wrong, but the answer was recognized.
    Wrong = 1,
    /// Wrong, but the answer seemed easy once shown.
    WrongFamiliar = 2,
    /// Correct, with serious difficulty.
    Hard = 3,
    /// Correct, after hesitation.
    Hesitant = 4,
    /// Correct and immediate.
    Perfect = 5,
}

impl Sm2Grade {
    pub const ALL: [Sm2Grade; 6] = [
        Sm2Grade::Blackout,
        Sm2Grade::Wrong,
        Sm2Grade::WrongFamiliar,
        Sm2Grade::Hard,
        Sm2Grade::Hesitant,
        Sm2Grade::Perfect,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn is_correct(self) -> bool {
        self >= Sm2Grade::Hard
    }
}

impl TryFrom<u8> for Sm2Grade {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match Sm2Grade::ALL.get(value as usize) {
            Some(grade) => Ok(*grade),
            None => fail(format!("invalid SM-2 grade: {value}")),
        }
    }
}

impl From<Sm2Grade> for u8 {
    fn from(grade: Sm2Grade) -> Self {
        grade.value()
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sm2Review {
    pub card: Sm2Card,
    pub due_date: Date,
}

/// Applies one SM-2 review on `review_date`.
///
/// A failed review resets the repetition count and schedules the card for
/// tomorrow, and leaves the ease factor alone. A correct review adjusts the
/// ease factor by `0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)`, floored at
/// 1.3. Growing intervals multiply by the ease factor the card had before
/// this review.
pub fn review(card: &Sm2Card, grade: Sm2Grade, review_date: Date) -> Sm2Review {
    let ease_factor = sanitize_ease(card.ease_factor);
    let next = if grade.is_correct() {
        let interval = match card.repetitions {
            0 => 1,
            1 => 6,
            _ => ((card.interval as f64 * ease_factor).round() as u32).max(1),
        };
        Sm2Card {
            ease_factor: updated_ease(ease_factor, grade),
            interval,
            repetitions: card.repetitions.saturating_add(1),
        }
    } else {
        Sm2Card {
            ease_factor,
            interval: 1,
            repetitions: 0,
        }
    };
    Sm2Review {
        card: next,
        due_date: review_date.add_days(next.interval),
    }
}

fn updated_ease(ease_factor: f64, grade: Sm2Grade) -> f64 {
    let q = 5.0 - grade.value() as f64;
    (ease_factor + (0.1 - q * (0.08 + q * 0.02))).max(MIN_EASE_FACTOR)
}

fn sanitize_ease(ease_factor: f64) -> f64 {
    if ease_factor.is_nan() {
        DEFAULT_EASE_FACTOR
    } else {
        ease_factor.clamp(MIN_EASE_FACTOR, MAX_EASE_FACTOR)
    }
}

/// SM-2 as a [`SchedulingPolicy`]. Reviews are dated by the UTC calendar
/// day of `now`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sm2;

impl SchedulingPolicy for Sm2 {
    type Card = Sm2Card;
    type Rating = Sm2Grade;
    type Outcome = Sm2Review;

    fn ratings(&self) -> &'static [Sm2Grade] {
        &Sm2Grade::ALL
    }

    fn apply(&self, card: &Sm2Card, grade: Sm2Grade, now: Timestamp) -> Sm2Review {
        review(card, grade, now.utc_date())
    }
}
