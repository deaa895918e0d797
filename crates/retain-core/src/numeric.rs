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

use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;

use crate::types::timestamp::Timestamp;

pub const MINUTES_PER_DAY: f64 = 1440.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Like `f64::clamp`, but NaN maps to `min` instead of propagating.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

pub fn minutes_to_days(minutes: f64) -> f64 {
    minutes / MINUTES_PER_DAY
}

/// Fractional days from `from` to `to`. Never negative: a clock that runs
/// backwards counts as zero elapsed time.
pub fn elapsed_days(from: Timestamp, to: Timestamp) -> f64 {
    let delta = to.into_inner().signed_duration_since(from.into_inner());
    (delta.num_milliseconds() as f64 / MILLIS_PER_DAY).max(0.0)
}

/// Shifts a timestamp forward by a fractional number of days, to
/// millisecond precision. Saturates at the end of representable time.
pub fn add_days(ts: Timestamp, days: f64) -> Timestamp {
    let millis = (days.max(0.0) * MILLIS_PER_DAY).round() as i64;
    let shifted = TimeDelta::try_milliseconds(millis)
        .and_then(|delta| ts.into_inner().checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    Timestamp::new(shifted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(11.0, 1.0, 10.0), 10.0);
        assert_eq!(clamp(-3.0, 1.0, 10.0), 1.0);
        assert_eq!(clamp(5.5, 1.0, 10.0), 5.5);
        assert_eq!(clamp(f64::NAN, 1.0, 10.0), 1.0);
        assert_eq!(clamp(f64::INFINITY, 1.0, 10.0), 10.0);
    }

    #[test]
    fn test_elapsed_days() -> Fallible<()> {
        let a = Timestamp::parse_rfc3339("2025-01-01T00:00:00Z")?;
        let b = Timestamp::parse_rfc3339("2025-01-03T12:00:00Z")?;
        assert_eq!(elapsed_days(a, b), 2.5);
        assert_eq!(elapsed_days(b, a), 0.0);
        Ok(())
    }

    #[test]
    fn test_add_days() -> Fallible<()> {
        let a = Timestamp::parse_rfc3339("2025-01-01T00:00:00Z")?;
        let b = add_days(a, minutes_to_days(10.0));
        assert_eq!(b.to_rfc3339(), "2025-01-01T00:10:00+00:00");
        assert_eq!(add_days(a, -4.0), a);
        Ok(())
    }

    #[test]
    fn test_add_days_saturates() -> Fallible<()> {
        let a = Timestamp::parse_rfc3339("2025-01-01T00:00:00Z")?;
        assert_eq!(add_days(a, f64::MAX).into_inner(), DateTime::<Utc>::MAX_UTC);
        Ok(())
    }
}
