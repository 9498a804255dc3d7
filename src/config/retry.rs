//! Retry configuration for throttled CloudFormation calls.
//!
//! Both fields are required: a missing value is a configuration error rather
//! than a silent fallback.

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Retry configuration (YAML format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfigYaml {
    /// Maximum number of retries after the initial call
    pub max_retries: u32,
    /// Seconds of pause before the first retry, doubled for each further retry
    pub pause_time_multiplier: f64,
}

impl RetryConfigYaml {
    pub fn validate(&self) -> Result<(), String> {
        if !self.pause_time_multiplier.is_finite() || self.pause_time_multiplier < 0.0 {
            return Err(format!(
                "retry.pause_time_multiplier must be a non-negative number, got {}",
                self.pause_time_multiplier
            ));
        }
        Ok(())
    }

    /// Convert to RetryPolicy from retry module
    pub fn to_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.pause_time_multiplier)
    }
}
