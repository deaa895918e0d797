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

use retain_core::Date;
use retain_core::Fallible;
use retain_core::Sm2Card;
use retain_core::Sm2Grade;
use retain_core::sm2::review;

use crate::cmd::print_json;
use crate::cmd::read_json;

pub fn print_sm2_review(card_path: &Path, grade: Sm2Grade, date: Date) -> Fallible<()> {
    let card: Sm2Card = read_json(card_path)?;
    let result = review(&card, grade, date);
    print_json(&result)
}
