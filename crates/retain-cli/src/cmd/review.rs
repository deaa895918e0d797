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

use std::path::Path;

use retain_core::Card;
use retain_core::Fallible;
use retain_core::Parameters;
use retain_core::Rating;
use retain_core::Timestamp;
use retain_core::review_card;

use crate::cmd::print_json;
use crate::cmd::read_json;

pub fn print_review(
    card_path: &Path,
    rating: Rating,
    now: Timestamp,
    params: &Parameters,
) -> Fallible<()> {
    let card: Card = read_json(card_path)?;
    let next = review_card(&card, rating, now, params);
    log::debug!(
        "{} {} S={:.2}d D={:.2} due={}",
        &next.id().to_hex()[..8],
        rating,
        next.stability,
        next.difficulty,
        next.next_review
    );
    print_json(&next)
}
