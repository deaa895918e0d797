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

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::fsrs::DEFAULT_MAXIMUM_INTERVAL;
use crate::fsrs::DEFAULT_RETENTION;
use crate::fsrs::MIN_STEP_MINUTES;
use crate::fsrs::weights::DEFAULT_WEIGHTS;

/// Scheduler configuration. A value object passed into every call, never
/// stored globally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// The recall probability the schedule aims for.
    pub request_retention: f64,
    /// The longest interval, in days, the scheduler will ever produce.
    pub maximum_interval: u32,
    /// Raw model coefficients. May be shorter than the default list.
    pub weights: Vec<f64>,
    /// Step table for the Learning state, in minutes.
    pub learning_steps: Vec<f64>,
    /// Step table for the Relearning state, in minutes.
    pub relearning_steps: Vec<f64>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            request_retention: DEFAULT_RETENTION,
            maximum_interval: DEFAULT_MAXIMUM_INTERVAL,
            weights: DEFAULT_WEIGHTS.to_vec(),
            learning_steps: vec![1.0, 10.0],
            relearning_steps: vec![10.0],
        }
    }
}

impl Parameters {
    /// Parses and validates a TOML configuration. Missing keys take their
    /// defaults.
    pub fn from_toml(source: &str) -> Fallible<Self> {
        let params: Parameters = toml::from_str(source)?;
        params.validate()?;
        Ok(params)
    }

    /// Rejects out-of-range settings. The scheduler clamps them anyway.
    pub fn validate(&self) -> Fallible<()> {
        let retention = self.request_retention;
        if retention.is_nan() || retention <= 0.0 || retention >= 1.0 {
            return fail(format!(
                "request_retention must be strictly between 0 and 1, got {retention}"
            ));
        }
        if self.maximum_interval < 1 {
            return fail("maximum_interval must be at least one day.");
        }
        for (name, steps) in [
            ("learning_steps", &self.learning_steps),
            ("relearning_steps", &self.relearning_steps),
        ] {
            if let Some(step) = steps
                .iter()
                .find(|s| !(s.is_finite() && **s >= MIN_STEP_MINUTES))
            {
                return fail(format!("{name} must be at least one minute, got {step}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() -> Fallible<()> {
        assert_eq!(Parameters::from_toml("")?, Parameters::default());
        Ok(())
    }

    #[test]
    fn test_partial_config() -> Fallible<()> {
        let params = Parameters::from_toml(
            "request_retention = 0.85\nweights = [0.5, 1.0]\nlearning_steps = [5.0]\n",
        )?;
        assert_eq!(params.request_retention, 0.85);
        assert_eq!(params.maximum_interval, DEFAULT_MAXIMUM_INTERVAL);
        assert_eq!(params.weights, vec![0.5, 1.0]);
        assert_eq!(params.learning_steps, vec![5.0]);
        assert_eq!(params.relearning_steps, vec![10.0]);
        Ok(())
    }

    #[test]
    fn test_rejects_bad_retention() {
        assert!(Parameters::from_toml("request_retention = 1.0").is_err());
        assert!(Parameters::from_toml("request_retention = 0.0").is_err());
    }

    #[test]
    fn test_rejects_zero_maximum_interval() {
        assert!(Parameters::from_toml("maximum_interval = 0").is_err());
    }

    #[test]
    fn test_rejects_bad_steps() {
        assert!(Parameters::from_toml("learning_steps = [1.0, -2.0]").is_err());
        assert!(Parameters::from_toml("relearning_steps = [0.0]").is_err());
    }

    #[test]
    fn test_rejects_sub_minute_steps() -> Fallible<()> {
        assert!(Parameters::from_toml("learning_steps = [0.25, 10.0]").is_err());
        assert!(Parameters::from_toml("relearning_steps = [0.5]").is_err());
        let params = Parameters::from_toml("learning_steps = [1.0, 10.0]")?;
        assert_eq!(params.learning_steps, vec![1.0, 10.0]);
        Ok(())
    }

    #[test]
    fn test_rejects_unknown_types() {
        assert!(Parameters::from_toml("maximum_interval = \"forever\"").is_err());
    }
}
