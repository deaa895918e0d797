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

pub mod new;
pub mod preview;
pub mod record;
pub mod review;
pub mod sm2;

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use retain_core::Date;
use retain_core::Fallible;
use retain_core::Parameters;
use retain_core::Timestamp;
use retain_core::fail;

/// The `--now` flag, or the system clock if it was not given.
pub fn parse_now(now: Option<String>) -> Fallible<Timestamp> {
    match now {
        Some(s) => Timestamp::parse_rfc3339(&s),
        None => Ok(Timestamp::now()),
    }
}

/// The `--date` flag, or today's UTC date if it was not given.
pub fn parse_date(date: Option<String>) -> Fallible<Date> {
    match date {
        Some(s) => Date::parse(&s),
        None => Ok(Timestamp::now().utc_date()),
    }
}

pub fn load_parameters(config: Option<&Path>) -> Fallible<Parameters> {
    match config {
        Some(path) => {
            if !path.exists() {
                return fail(format!("config file {} does not exist.", path.display()));
            }
            log::debug!("Loading parameters from {}.", path.display());
            let source = std::fs::read_to_string(path)?;
            Parameters::from_toml(&source)
        }
        None => Ok(Parameters::default()),
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Fallible<T> {
    if !path.exists() {
        return fail(format!("{} does not exist.", path.display()));
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn print_json<T: Serialize>(value: &T) -> Fallible<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_parse_now() -> Fallible<()> {
        let now = parse_now(Some("2025-01-01T00:00:00Z".to_string()))?;
        assert_eq!(now.to_rfc3339(), "2025-01-01T00:00:00+00:00");
        assert!(parse_now(Some("noon".to_string())).is_err());
        Ok(())
    }

    #[test]
    fn test_missing_config() {
        assert!(load_parameters(Some(Path::new("./no-such-config.toml"))).is_err());
    }

    #[test]
    fn test_load_config() -> Fallible<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "maximum_interval = 180")?;
        let params = load_parameters(Some(file.path()))?;
        assert_eq!(params.maximum_interval, 180);
        assert_eq!(params.request_retention, Parameters::default().request_retention);
        Ok(())
    }

    #[test]
    fn test_default_config() -> Fallible<()> {
        assert_eq!(load_parameters(None)?, Parameters::default());
        Ok(())
    }
}
