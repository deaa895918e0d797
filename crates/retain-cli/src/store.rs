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

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use retain_core::Card;
use retain_core::CardId;
use retain_core::Date;
use retain_core::Fallible;
use retain_core::Sm2Card;
use retain_core::State;
use retain_core::Timestamp;
use retain_core::fail;
use retain_core::fsrs::MAX_DIFFICULTY;
use retain_core::fsrs::MAX_STABILITY;
use retain_core::fsrs::MIN_DIFFICULTY;
use retain_core::fsrs::MIN_STABILITY;
use retain_core::numeric::clamp;

pub type Version = i64;

#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    /// Written; the row is now at this version.
    Written(Version),
    /// Someone else wrote the row since it was read. Nothing was written.
    Conflict,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredSm2 {
    pub card: Sm2Card,
    pub next_review: Date,
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::info!("Creating schema in {database_path}.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Load the FSRS card for a learner and checkpoint, if one was saved.
    pub fn load_card(
        &self,
        user_id: &str,
        checkpoint_id: &str,
    ) -> Fallible<Option<Versioned<Card>>> {
        let sql = "select card_id, stability, difficulty, elapsed_days, scheduled_days, reps, lapses, learning_step, state, last_review, next_review, created_at, version from fsrs_cards where user_id = ? and checkpoint_id = ?;";
        let row: Option<CardRow> = self
            .conn
            .query_row(sql, (user_id, checkpoint_id), |row| {
                Ok(CardRow {
                    card_id: row.get(0)?,
                    stability: row.get(1)?,
                    difficulty: row.get(2)?,
                    elapsed_days: row.get(3)?,
                    scheduled_days: row.get(4)?,
                    reps: row.get(5)?,
                    lapses: row.get(6)?,
                    learning_step: row.get(7)?,
                    state: row.get(8)?,
                    last_review: row.get(9)?,
                    next_review: row.get(10)?,
                    created_at: row.get(11)?,
                    version: row.get(12)?,
                })
            })
            .optional()?;
        match row {
            Some(row) => Ok(Some(row.into_card(user_id, checkpoint_id)?)),
            None => Ok(None),
        }
    }

    /// Save an FSRS card, provided the stored row is still at
    /// `read_version` (`None`: no row existed when the card was read).
    pub fn save_card(&self, card: &Card, read_version: Option<Version>) -> Fallible<Saved> {
        let changed = match read_version {
            None => {
                let sql = "insert or ignore into fsrs_cards (card_id, user_id, checkpoint_id, stability, difficulty, elapsed_days, scheduled_days, reps, lapses, learning_step, state, last_review, next_review, created_at, version) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1);";
                self.conn.execute(
                    sql,
                    rusqlite::params![
                        card.id(),
                        card.user_id(),
                        card.checkpoint_id(),
                        card.stability,
                        card.difficulty,
                        card.elapsed_days,
                        card.scheduled_days,
                        card.reps,
                        card.lapses,
                        card.learning_step,
                        card.state,
                        card.last_review,
                        card.next_review,
                        card.created_at(),
                    ],
                )?
            }
            Some(version) => {
                let sql = "update fsrs_cards set stability = ?, difficulty = ?, elapsed_days = ?, scheduled_days = ?, reps = ?, lapses = ?, learning_step = ?, state = ?, last_review = ?, next_review = ?, version = version + 1 where user_id = ? and checkpoint_id = ? and version = ?;";
                self.conn.execute(
                    sql,
                    rusqlite::params![
                        card.stability,
                        card.difficulty,
                        card.elapsed_days,
                        card.scheduled_days,
                        card.reps,
                        card.lapses,
                        card.learning_step,
                        card.state,
                        card.last_review,
                        card.next_review,
                        card.user_id(),
                        card.checkpoint_id(),
                        version,
                    ],
                )?
            }
        };
        Ok(saved(changed, read_version))
    }

    /// Load the SM-2 card for a learner and checkpoint, if one was saved.
    pub fn load_sm2(
        &self,
        user_id: &str,
        checkpoint_id: &str,
    ) -> Fallible<Option<Versioned<StoredSm2>>> {
        let sql = "select ease_factor, interval_days, repetitions, next_review, version from sm2_cards where user_id = ? and checkpoint_id = ?;";
        let row = self
            .conn
            .query_row(sql, (user_id, checkpoint_id), |row| {
                Ok(Versioned {
                    value: StoredSm2 {
                        card: Sm2Card {
                            ease_factor: row.get(0)?,
                            interval: row.get(1)?,
                            repetitions: row.get(2)?,
                        },
                        next_review: row.get(3)?,
                    },
                    version: row.get(4)?,
                })
            })
            .optional()?;
        Ok(row)
    }

    /// Save an SM-2 card under the same versioning rules as
    /// [`Store::save_card`].
    pub fn save_sm2(
        &self,
        user_id: &str,
        checkpoint_id: &str,
        stored: &StoredSm2,
        read_version: Option<Version>,
    ) -> Fallible<Saved> {
        let card = stored.card;
        let changed = match read_version {
            None => {
                let sql = "insert or ignore into sm2_cards (user_id, checkpoint_id, ease_factor, interval_days, repetitions, next_review, version) values (?, ?, ?, ?, ?, ?, 1);";
                self.conn.execute(
                    sql,
                    (
                        user_id,
                        checkpoint_id,
                        card.ease_factor,
                        card.interval,
                        card.repetitions,
                        stored.next_review,
                    ),
                )?
            }
            Some(version) => {
                let sql = "update sm2_cards set ease_factor = ?, interval_days = ?, repetitions = ?, next_review = ?, version = version + 1 where user_id = ? and checkpoint_id = ? and version = ?;";
                self.conn.execute(
                    sql,
                    (
                        card.ease_factor,
                        card.interval,
                        card.repetitions,
                        stored.next_review,
                        user_id,
                        checkpoint_id,
                        version,
                    ),
                )?
            }
        };
        Ok(saved(changed, read_version))
    }
}

struct CardRow {
    card_id: CardId,
    stability: f64,
    difficulty: f64,
    elapsed_days: f64,
    scheduled_days: f64,
    reps: u32,
    lapses: u32,
    learning_step: u32,
    state: State,
    last_review: Option<Timestamp>,
    next_review: Timestamp,
    created_at: Timestamp,
    version: Version,
}

impl CardRow {
    fn into_card(self, user_id: &str, checkpoint_id: &str) -> Fallible<Versioned<Card>> {
        let mut card = Card::new(user_id, checkpoint_id, self.created_at);
        if card.id() != self.card_id {
            return fail(format!(
                "stored card id {} does not match {user_id}/{checkpoint_id}",
                self.card_id
            ));
        }
        // Rows written outside the scheduler may be out of range.
        card.stability = clamp(self.stability, MIN_STABILITY, MAX_STABILITY);
        card.difficulty = clamp(self.difficulty, MIN_DIFFICULTY, MAX_DIFFICULTY);
        card.elapsed_days = self.elapsed_days;
        card.scheduled_days = self.scheduled_days;
        card.reps = self.reps;
        card.lapses = self.lapses;
        card.learning_step = self.learning_step;
        card.state = self.state;
        card.last_review = self.last_review;
        card.next_review = self.next_review;
        Ok(Versioned {
            value: card,
            version: self.version,
        })
    }
}

fn saved(changed: usize, read_version: Option<Version>) -> Saved {
    if changed == 0 {
        Saved::Conflict
    } else {
        Saved::Written(read_version.map_or(1, |v| v + 1))
    }
}

fn probe_schema_exists(tx: &Transaction) -> rusqlite::Result<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["fsrs_cards"], |row| row.get(0))?;
    Ok(count > 0)
}
