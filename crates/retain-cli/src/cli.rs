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
use std::path::PathBuf;

use clap::Parser;

use retain_core::Fallible;
use retain_core::Rating;
use retain_core::Sm2Grade;
use retain_core::fail;

use crate::cmd::load_parameters;
use crate::cmd::new::print_new_card;
use crate::cmd::parse_date;
use crate::cmd::parse_now;
use crate::cmd::preview::print_preview;
use crate::cmd::record::record_fsrs;
use crate::cmd::record::record_sm2;
use crate::cmd::review::print_review;
use crate::cmd::sm2::print_sm2_review;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Print a never-reviewed FSRS card.
    New {
        user: String,
        checkpoint: String,
        /// RFC 3339 creation time. Defaults to the current time.
        #[arg(long)]
        now: Option<String>,
    },
    /// Show the interval and due date each rating would give a card.
    Preview {
        /// Path to the card, as JSON.
        card: PathBuf,
        /// RFC 3339 review time. Defaults to the current time.
        #[arg(long)]
        now: Option<String>,
        /// Path to a TOML parameter file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Apply a rating to a card and print the new card.
    Review {
        /// Path to the card, as JSON.
        card: PathBuf,
        /// One of again, hard, good, easy (or 1-4).
        rating: Rating,
        /// RFC 3339 review time. Defaults to the current time.
        #[arg(long)]
        now: Option<String>,
        /// Path to a TOML parameter file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Apply an SM-2 grade to an SM-2 card.
    Sm2 {
        /// Path to the SM-2 card, as JSON.
        card: PathBuf,
        /// Recall quality, 0-5.
        grade: u8,
        /// Review day (YYYY-MM-DD). Defaults to today, in UTC.
        #[arg(long)]
        date: Option<String>,
    },
    /// Review a stored FSRS card and save the result.
    Record {
        /// Path to the SQLite database.
        #[arg(long)]
        db: PathBuf,
        user: String,
        checkpoint: String,
        /// One of again, hard, good, easy (or 1-4).
        rating: Rating,
        /// RFC 3339 review time. Defaults to the current time.
        #[arg(long)]
        now: Option<String>,
        /// Path to a TOML parameter file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Review a stored SM-2 card and save the result.
    RecordSm2 {
        /// Path to the SQLite database.
        #[arg(long)]
        db: PathBuf,
        user: String,
        checkpoint: String,
        /// Recall quality, 0-5.
        grade: u8,
        /// Review day (YYYY-MM-DD). Defaults to today, in UTC.
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::New {
            user,
            checkpoint,
            now,
        } => print_new_card(&user, &checkpoint, parse_now(now)?),
        Command::Preview { card, now, config } => {
            let params = load_parameters(config.as_deref())?;
            print_preview(&card, parse_now(now)?, &params)
        }
        Command::Review {
            card,
            rating,
            now,
            config,
        } => {
            let params = load_parameters(config.as_deref())?;
            print_review(&card, rating, parse_now(now)?, &params)
        }
        Command::Sm2 { card, grade, date } => {
            let grade = Sm2Grade::try_from(grade)?;
            print_sm2_review(&card, grade, parse_date(date)?)
        }
        Command::Record {
            db,
            user,
            checkpoint,
            rating,
            now,
            config,
        } => {
            let params = load_parameters(config.as_deref())?;
            let now = parse_now(now)?;
            record_fsrs(&db_path(&db)?, &user, &checkpoint, rating, now, &params)
        }
        Command::RecordSm2 {
            db,
            user,
            checkpoint,
            grade,
            date,
        } => {
            let grade = Sm2Grade::try_from(grade)?;
            record_sm2(&db_path(&db)?, &user, &checkpoint, grade, parse_date(date)?)
        }
    }
}

fn db_path(db: &Path) -> Fallible<String> {
    match db.to_str() {
        Some(path) => Ok(path.to_string()),
        None => fail("invalid database path."),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_review() {
        let cli = Command::try_parse_from(["retain", "review", "card.json", "easy"]);
        match cli {
            Ok(Command::Review { rating, .. }) => assert_eq!(rating, Rating::Easy),
            _ => panic!("expected a review command"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_rating() {
        let cli = Command::try_parse_from(["retain", "review", "card.json", "sorta"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_parse_record_sm2() {
        let cli = Command::try_parse_from([
            "retain",
            "record-sm2",
            "--db",
            "cards.sqlite3",
            "ada",
            "closures",
            "4",
        ]);
        match cli {
            Ok(Command::RecordSm2 { grade, user, .. }) => {
                assert_eq!(grade, 4);
                assert_eq!(user, "ada");
            }
            _ => panic!("expected a record-sm2 command"),
        }
    }
}
