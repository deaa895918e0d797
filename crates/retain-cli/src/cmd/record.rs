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

use retain_core::Card;
use retain_core::Date;
use retain_core::Fallible;
use retain_core::Parameters;
use retain_core::Rating;
use retain_core::Sm2Card;
use retain_core::Sm2Grade;
use retain_core::Sm2Review;
use retain_core::Timestamp;
use retain_core::fail;
use retain_core::review_card;
use retain_core::sm2;

use crate::cmd::print_json;
use crate::store::Saved;
use crate::store::Store;
use crate::store::StoredSm2;

/// How many times a review is recomputed after losing a write race.
const MAX_ATTEMPTS: usize = 3;

pub fn record_fsrs(
    database_path: &str,
    user_id: &str,
    checkpoint_id: &str,
    rating: Rating,
    now: Timestamp,
    params: &Parameters,
) -> Fallible<()> {
    let store = Store::open(database_path)?;
    let card = record_fsrs_review(&store, user_id, checkpoint_id, rating, now, params)?;
    print_json(&card)
}

pub fn record_sm2(
    database_path: &str,
    user_id: &str,
    checkpoint_id: &str,
    grade: Sm2Grade,
    date: Date,
) -> Fallible<()> {
    let store = Store::open(database_path)?;
    let review = record_sm2_review(&store, user_id, checkpoint_id, grade, date)?;
    print_json(&review)
}

/// Apply a review to the stored FSRS card (or a fresh one) and persist it.
/// Losing a race against another writer re-reads the row and recomputes
/// from the same rating and time.
pub fn record_fsrs_review(
    store: &Store,
    user_id: &str,
    checkpoint_id: &str,
    rating: Rating,
    now: Timestamp,
    params: &Parameters,
) -> Fallible<Card> {
    for attempt in 1..=MAX_ATTEMPTS {
        let (card, version) = match store.load_card(user_id, checkpoint_id)? {
            Some(stored) => (stored.value, Some(stored.version)),
            None => {
                log::debug!("No card for {user_id}/{checkpoint_id}, starting fresh.");
                (Card::new(user_id, checkpoint_id, now), None)
            }
        };
        let next = review_card(&card, rating, now, params);
        match store.save_card(&next, version)? {
            Saved::Written(version) => {
                log::debug!(
                    "{} {} S={:.2}d D={:.2} state={} due={} v{}",
                    &next.id().to_hex()[..8],
                    rating,
                    next.stability,
                    next.difficulty,
                    next.state.as_str(),
                    next.next_review,
                    version
                );
                return Ok(next);
            }
            Saved::Conflict => {
                log::warn!(
                    "Card {user_id}/{checkpoint_id} changed while reviewing (attempt {attempt} of {MAX_ATTEMPTS})."
                );
            }
        }
    }
    fail(format!(
        "could not save the review of {user_id}/{checkpoint_id}: too many concurrent writes."
    ))
}

/// The SM-2 counterpart of [`record_fsrs_review`].
pub fn record_sm2_review(
    store: &Store,
    user_id: &str,
    checkpoint_id: &str,
    grade: Sm2Grade,
    date: Date,
) -> Fallible<Sm2Review> {
    for attempt in 1..=MAX_ATTEMPTS {
        let (card, version) = match store.load_sm2(user_id, checkpoint_id)? {
            Some(stored) => (stored.value.card, Some(stored.version)),
            None => (Sm2Card::default(), None),
        };
        let review = sm2::review(&card, grade, date);
        let stored = StoredSm2 {
            card: review.card,
            next_review: review.due_date,
        };
        match store.save_sm2(user_id, checkpoint_id, &stored, version)? {
            Saved::Written(version) => {
                log::debug!(
                    "{user_id}/{checkpoint_id} q={} EF={:.2} I={}d due={} v{version}",
                    grade.value(),
                    review.card.ease_factor,
                    review.card.interval,
                    review.due_date
                );
                return Ok(review);
            }
            Saved::Conflict => {
                log::warn!(
                    "SM-2 card {user_id}/{checkpoint_id} changed while reviewing (attempt {attempt} of {MAX_ATTEMPTS})."
                );
            }
        }
    }
    fail(format!(
        "could not save the review of {user_id}/{checkpoint_id}: too many concurrent writes."
    ))
}
