//! Retry Logic for Throttled Cloud API Calls
//!
//! Wraps a call to the CloudFormation API and re-invokes it when the API
//! rejects the request with a `Throttling` error.
//!
//! ## Retriable vs Non-Retriable Errors
//!
//! **Retriable Errors** (will be retried):
//! - Remote API errors with code `Throttling`
//!
//! **Non-Retriable Errors** (fail immediately, no retry consumed):
//! - Remote API errors with any other code (`ValidationError`, `AccessDenied`, ...)
//! - Every non-remote error (I/O, parsing, ...)
//!
//! The error that ends the invocation is returned exactly as the wrapped call
//! produced it.
//!
//! ## Exponential Backoff
//!
//! Pauses grow exponentially with the retry number, scaled by
//! `pause_time_multiplier` (seconds):
//! - Attempt 1: No delay (immediate)
//! - Retry 1: 1 × multiplier
//! - Retry 2: 2 × multiplier
//! - Retry 3: 4 × multiplier
//! - Capped at `MAX_PAUSE_SECS`
//!
//! A multiplier of 0 disables pausing entirely.
//!
//! ## Example
//!
//! ```
//! use cfn_sphere::remote::RemoteError;
//! use cfn_sphere::retry::RetryPolicy;
//!
//! let policy = RetryPolicy::new(3, 0.0);
//! let mut calls = 0;
//! let result: Result<&str, RemoteError> = policy
//!     .wrap(|| {
//!         calls += 1;
//!         if calls < 3 {
//!             Err(RemoteError::new(400, "Throttling", "Rate exceeded"))
//!         } else {
//!             Ok("CREATE_COMPLETE")
//!         }
//!     })
//!     .invoke();
//!
//! assert_eq!(result.unwrap(), "CREATE_COMPLETE");
//! ```

use std::time::Duration;

use aws_sdk_cloudformation::error::{ProvideErrorMetadata, SdkError};

use crate::constants::{MAX_PAUSE_SECS, THROTTLING_ERROR_CODE};
use crate::error::CfnSphereError;
use crate::remote::RemoteError;

/// Classifies an error as a remote throttling signal
pub trait Throttling {
    /// True only for remote API errors carrying the throttling code
    fn is_throttling(&self) -> bool;
}

impl Throttling for RemoteError {
    fn is_throttling(&self) -> bool {
        RemoteError::is_throttling(self)
    }
}

impl Throttling for CfnSphereError {
    fn is_throttling(&self) -> bool {
        match self {
            CfnSphereError::Remote(err) => err.is_throttling(),
            _ => false,
        }
    }
}

impl Throttling for anyhow::Error {
    fn is_throttling(&self) -> bool {
        if let Some(err) = self.downcast_ref::<RemoteError>() {
            return err.is_throttling();
        }
        self.downcast_ref::<CfnSphereError>()
            .map_or(false, Throttling::is_throttling)
    }
}

impl<E, R> Throttling for SdkError<E, R>
where
    E: ProvideErrorMetadata,
{
    fn is_throttling(&self) -> bool {
        self.code() == Some(THROTTLING_ERROR_CODE)
    }
}

/// Retry policy configuration
///
/// Both parameters are required; there is no default policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial call
    pub max_retries: u32,
    /// Seconds of pause for the first retry, doubled for each further retry
    pub pause_time_multiplier: f64,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(max_retries: u32, pause_time_multiplier: f64) -> Self {
        Self {
            max_retries,
            pause_time_multiplier,
        }
    }

    /// Calculate the pause before the given retry (1 = first retry)
    ///
    /// Returns zero for `retry == 0` and for a zero, negative or non-finite
    /// multiplier.
    pub fn pause_duration(&self, retry: u32) -> Duration {
        if retry == 0
            || !self.pause_time_multiplier.is_finite()
            || self.pause_time_multiplier <= 0.0
        {
            return Duration::ZERO;
        }

        // multiplier * 2^(retry-1), exponent clamped so the float stays finite
        let exponent = (retry - 1).min(63) as i32;
        let secs = (self.pause_time_multiplier * 2f64.powi(exponent)).min(MAX_PAUSE_SECS);

        Duration::from_secs_f64(secs)
    }

    /// Check if we should retry given the retries made so far and the error
    pub fn should_retry<E>(&self, retries: u32, error: &E) -> bool
    where
        E: Throttling + ?Sized,
    {
        // Don't retry if we've exhausted retries
        if retries >= self.max_retries {
            return false;
        }

        error.is_throttling()
    }

    /// Wrap a call so that throttling errors are retried under this policy
    pub fn wrap<F>(self, call: F) -> Retrying<F> {
        Retrying {
            policy: self,
            call,
            sleep: Box::new(std::thread::sleep),
        }
    }
}

/// A call wrapped with a [`RetryPolicy`]
///
/// Each [`invoke`](Retrying::invoke) starts from zero retries; nothing is
/// carried over between invocations.
pub struct Retrying<F> {
    policy: RetryPolicy,
    call: F,
    sleep: Box<dyn FnMut(Duration) + Send>,
}

impl<F> Retrying<F> {
    /// Replace the blocking thread sleep used between attempts
    pub fn with_sleep(mut self, sleep: impl FnMut(Duration) + Send + 'static) -> Self {
        self.sleep = Box::new(sleep);
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run the wrapped call, retrying while it fails with a throttling error
    pub fn invoke<T, E>(&mut self) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        E: Throttling,
    {
        let mut retries = 0;
        loop {
            match (self.call)() {
                Ok(value) => return Ok(value),
                Err(err) if self.policy.should_retry(retries, &err) => {
                    retries += 1;
                    let pause = self.policy.pause_duration(retries);
                    tracing::debug!(
                        retry = retries,
                        max_retries = self.policy.max_retries,
                        pause_ms = pause.as_millis() as u64,
                        "Remote call throttled, retrying"
                    );
                    (self.sleep)(pause);
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Run `call` once under `policy`, retrying throttling errors
pub fn with_retry<T, E, F>(policy: &RetryPolicy, call: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: Throttling,
{
    policy.wrap(call).invoke()
}
