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

//! retain-core: deterministic spaced-repetition scheduling.
//!
//! Two independent policies:
//! - FSRS, a difficulty/stability/retrievability memory model with learning
//!   steps and a four-valued rating.
//! - SM-2, an ease factor and interval doubling on a 0-5 grade.
//!
//! Every scheduling function is pure: it reads its arguments, including the
//! current time, and returns a new value. Nothing here performs I/O.

pub mod error;
pub mod fsrs;
pub mod numeric;
pub mod policy;
pub mod sm2;
#[cfg(feature = "rusqlite")]
mod sql;
pub mod types;

pub use error::ErrorReport;
pub use error::Fallible;
pub use error::fail;
pub use fsrs::Card;
pub use fsrs::Fsrs;
pub use fsrs::Parameters;
pub use fsrs::Rating;
pub use fsrs::SchedulingPreview;
pub use fsrs::State;
pub use fsrs::review_card;
pub use fsrs::schedule_card;
pub use policy::SchedulingPolicy;
pub use sm2::Sm2;
pub use sm2::Sm2Card;
pub use sm2::Sm2Grade;
pub use sm2::Sm2Review;
pub use types::card_id::CardId;
pub use types::date::Date;
pub use types::timestamp::Timestamp;
