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

use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;
use crate::fsrs::Difficulty;
use crate::fsrs::MAX_DIFFICULTY;
use crate::fsrs::MAX_STABILITY;
use crate::fsrs::MIN_DIFFICULTY;
use crate::fsrs::MIN_STABILITY;
use crate::fsrs::Retrievability;
use crate::fsrs::Stability;
use crate::fsrs::retrievability;
use crate::numeric::clamp;
use crate::numeric::elapsed_days;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

/// Which set of formulas applies to the next review.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// Never reviewed.
    New,
    /// Reviewed, but still working through the learning steps.
    Learning,
    /// Graduated: intervals come from stability.
    Review,
    /// Forgotten after graduating; working through the relearning steps.
    Relearning,
}

impl State {
    pub fn as_str(self) -> &'static str {
        match self {
            State::New => "new",
            State::Learning => "learning",
            State::Review => "review",
            State::Relearning => "relearning",
        }
    }
}

impl FromStr for State {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(State::New),
            "learning" => Ok(State::Learning),
            "review" => Ok(State::Review),
            "relearning" => Ok(State::Relearning),
            _ => fail(format!("invalid card state: {s}")),
        }
    }
}

/// One learner's memory state for one reviewable unit. Scheduling never
/// mutates a card: every review produces a new snapshot.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    id: CardId,
    user_id: String,
    checkpoint_id: String,
    created_at: Timestamp,
    /// Days for retrievability to decay to the reference level.
    #[serde(deserialize_with = "clamped_stability")]
    pub stability: Stability,
    #[serde(deserialize_with = "clamped_difficulty")]
    pub difficulty: Difficulty,
    /// Days between the previous review and the latest one.
    pub elapsed_days: f64,
    /// Days between the latest review and the next one. Fractional while
    /// the card is in its (re)learning steps.
    pub scheduled_days: f64,
    /// Number of reviews applied.
    pub reps: u32,
    /// Number of times the card was forgotten after graduating.
    #[serde(default)]
    pub lapses: u32,
    /// Position in the learning or relearning step table.
    #[serde(default)]
    pub learning_step: u32,
    pub state: State,
    pub last_review: Option<Timestamp>,
    pub next_review: Timestamp,
}

impl Card {
    /// A never-reviewed card, due immediately.
    pub fn new(user_id: &str, checkpoint_id: &str, created_at: Timestamp) -> Self {
        Self {
            id: CardId::derive(user_id, checkpoint_id),
            user_id: user_id.to_string(),
            checkpoint_id: checkpoint_id.to_string(),
            created_at,
            stability: MIN_STABILITY,
            difficulty: MIN_DIFFICULTY,
            elapsed_days: 0.0,
            scheduled_days: 0.0,
            reps: 0,
            lapses: 0,
            learning_step: 0,
            state: State::New,
            last_review: None,
            next_review: created_at,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn checkpoint_id(&self) -> &str {
        &self.checkpoint_id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// The modeled probability of recalling this card at `now`. Zero for a
    /// card that has never been reviewed.
    pub fn retrievability(&self, now: Timestamp) -> Retrievability {
        match (self.state, self.last_review) {
            (State::New, _) | (_, None) => 0.0,
            (_, Some(last)) => retrievability(elapsed_days(last, now), self.stability),
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review <= now
    }
}

fn clamped_stability<'de, D>(deserializer: D) -> Result<Stability, D::Error>
where
    D: Deserializer<'de>,
{
    let stability = f64::deserialize(deserializer)?;
    Ok(clamp(stability, MIN_STABILITY, MAX_STABILITY))
}

fn clamped_difficulty<'de, D>(deserializer: D) -> Result<Difficulty, D::Error>
where
    D: Deserializer<'de>,
{
    let difficulty = f64::deserialize(deserializer)?;
    Ok(clamp(difficulty, MIN_DIFFICULTY, MAX_DIFFICULTY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_new_card() -> Fallible<()> {
        let now = Timestamp::parse_rfc3339("2025-05-01T08:00:00Z")?;
        let card = Card::new("ada", "intro-to-rust", now);
        assert_eq!(card.state, State::New);
        assert_eq!(card.reps, 0);
        assert_eq!(card.stability, MIN_STABILITY);
        assert_eq!(card.difficulty, MIN_DIFFICULTY);
        assert_eq!(card.next_review, now);
        assert_eq!(card.last_review, None);
        assert_eq!(card.id(), CardId::derive("ada", "intro-to-rust"));
        assert!(card.is_due(now));
        assert_eq!(card.retrievability(now), 0.0);
        Ok(())
    }

    #[test]
    fn test_state_strings() -> Fallible<()> {
        for state in [State::New, State::Learning, State::Review, State::Relearning] {
            assert_eq!(state.as_str().parse::<State>()?, state);
        }
        assert!("graduated".parse::<State>().is_err());
        Ok(())
    }

    #[test]
    fn test_retrievability_decays() -> Fallible<()> {
        let start = Timestamp::parse_rfc3339("2025-05-01T08:00:00Z")?;
        let mut card = Card::new("ada", "intro-to-rust", start);
        card.state = State::Review;
        card.stability = 10.0;
        card.last_review = Some(start);
        let later = Timestamp::parse_rfc3339("2025-08-01T08:00:00Z")?;
        assert_eq!(card.retrievability(start), 1.0);
        assert!(card.retrievability(later) < 0.5);
        Ok(())
    }

    #[test]
    fn test_json_shape() -> Fallible<()> {
        let now = Timestamp::parse_rfc3339("2025-05-01T08:00:00Z")?;
        let card = Card::new("ada", "intro-to-rust", now);
        let json = serde_json::to_value(&card)?;
        assert_eq!(json["state"], "new");
        assert_eq!(json["userId"], "ada");
        assert_eq!(json["nextReview"], "2025-05-01T08:00:00+00:00");
        assert!(json["lastReview"].is_null());
        let back: Card = serde_json::from_value(json)?;
        assert_eq!(back, card);
        Ok(())
    }

    #[test]
    fn test_json_without_optional_counters() -> Fallible<()> {
        let json = r#"{
            "id": "0000000000000000000000000000000000000000000000000000000000000000",
            "userId": "u",
            "checkpointId": "c",
            "createdAt": "2025-01-01T00:00:00Z",
            "stability": 3.0,
            "difficulty": 5.0,
            "elapsedDays": 0.0,
            "scheduledDays": 3.0,
            "reps": 1,
            "state": "review",
            "lastReview": "2025-01-01T00:00:00Z",
            "nextReview": "2025-01-04T00:00:00Z"
        }"#;
        let card: Card = serde_json::from_str(json)?;
        assert_eq!(card.lapses, 0);
        assert_eq!(card.learning_step, 0);
        assert_eq!(card.state, State::Review);
        Ok(())
    }

    #[test]
    fn test_json_memory_state_is_clamped() -> Fallible<()> {
        let now = Timestamp::parse_rfc3339("2025-05-01T08:00:00Z")?;
        let mut json = serde_json::to_value(Card::new("ada", "intro-to-rust", now))?;
        json["stability"] = serde_json::json!(0.0);
        json["difficulty"] = serde_json::json!(50.0);
        let card: Card = serde_json::from_value(json.clone())?;
        assert_eq!(card.stability, MIN_STABILITY);
        assert_eq!(card.difficulty, MAX_DIFFICULTY);

        json["stability"] = serde_json::json!(1e9);
        json["difficulty"] = serde_json::json!(-3.0);
        let card: Card = serde_json::from_value(json)?;
        assert_eq!(card.stability, MAX_STABILITY);
        assert_eq!(card.difficulty, MIN_DIFFICULTY);
        Ok(())
    }
}
