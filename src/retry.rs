/*!
 * Bounded retry with linear backoff.
 *
 * One generic policy is applied to every unreliable external call instead of
 * hand-rolled loops per call site. The delay between attempts grows linearly
 * with the attempt number; with attempts capped at [`MAX_ATTEMPTS`] the total
 * wait stays bounded without needing a delay ceiling.
 */

use std::future::Future;
use std::time::Duration;

use log::warn;

use crate::errors::{ProviderError, RetryError};

/// Hard ceiling on attempts per retried call.
pub const MAX_ATTEMPTS: u32 = 3;

/// Default delay unit between attempts.
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(1);

/// How often an operation may run and how long to wait between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_unit: Duration,
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` outside [1, [`MAX_ATTEMPTS`]] is
    /// clamped into range with a warning.
    pub fn new(max_attempts: u32, backoff_unit: Duration) -> Self {
        let clamped = max_attempts.clamp(1, MAX_ATTEMPTS);
        if clamped != max_attempts {
            warn!(
                "max_attempts {} is outside [1, {}], clamping to {}",
                max_attempts, MAX_ATTEMPTS, clamped
            );
        }
        Self {
            max_attempts: clamped,
            backoff_unit,
        }
    }

    /// A policy that allows exactly one attempt and never sleeps.
    pub fn single() -> Self {
        Self {
            max_attempts: 1,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
        }
    }

    /// Maximum number of attempts this policy allows
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay unit the backoff grows from
    pub fn backoff_unit(&self) -> Duration {
        self.backoff_unit
    }

    /// Delay inserted after failed attempt number `attempt` (1-based):
    /// one unit after the first failure, two after the second.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_unit * attempt
    }

    /// Upper bound on total time spent sleeping across one retried call.
    pub fn total_backoff(&self) -> Duration {
        (1..self.max_attempts).map(|a| self.delay_after(a)).sum()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
        }
    }
}

/// Run `operation` until it succeeds or the policy is exhausted.
///
/// The closure receives the 1-based attempt number and performs exactly one
/// provider call. The first success stops the loop immediately; no further
/// attempts are made. On exhaustion the returned error carries the number of
/// attempts made and the failure from the last one.
///
/// Returns the success value together with the number of attempts it took.
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    policy: RetryPolicy,
    mut operation: F,
) -> Result<(T, u32), RetryError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempts = 0u32;
    let mut last_error: Option<ProviderError> = None;

    while attempts < policy.max_attempts() {
        let attempt = attempts + 1;
        match operation(attempt).await {
            Ok(value) => return Ok((value, attempt)),
            Err(e) => {
                warn!(
                    "{} attempt {}/{} failed: {}",
                    operation_name,
                    attempt,
                    policy.max_attempts(),
                    e
                );
                attempts = attempt;
                last_error = Some(e);

                // Only wait when another attempt is coming
                if attempts < policy.max_attempts() {
                    tokio::time::sleep(policy.delay_after(attempts)).await;
                }
            }
        }
    }

    Err(RetryError::Exhausted {
        operation: operation_name.to_string(),
        attempts,
        last_error: last_error
            .unwrap_or_else(|| ProviderError::RequestFailed("no attempts were made".to_string())),
    })
}
