//! Completion gateway — bounded exponential-backoff retry around a
//! `CompletionBackend`.
//!
//! This is the only place provider-failure semantics live. The retry loop is
//! an explicit state machine: `Attempting → Backoff → Attempting → …` until
//! it exits with `Succeeded` (text) or `Exhausted`/`Fatal` (error).

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use tokio::time::Instant;
use tracing::warn;

use crate::llm_client::{is_retryable, CompletionBackend, GenerationOptions, ProviderError};

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);
/// Upper bound of the random jitter added to each backoff delay.
const JITTER_CEILING_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// All permitted attempts failed with retryable errors; carries the last.
    #[error("provider retries exhausted after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: ProviderError,
    },

    /// Non-retryable failure, propagated from the first attempt that hit it.
    #[error(transparent)]
    Fatal(ProviderError),

    /// The caller-supplied deadline would elapse before the next attempt.
    #[error("deadline elapsed before retry attempt {attempt}: {source}")]
    DeadlineElapsed {
        attempt: u32,
        #[source]
        source: ProviderError,
    },
}

/// Retry loop states. `Succeeded` and the error exits are function returns.
enum RetryState {
    Attempting { attempt: u32 },
    Backoff { attempt: u32, error: ProviderError },
}

/// Wraps a `CompletionBackend` with bounded retry.
///
/// Retryable failures back off `base_delay * 2^attempt + jitter(0..1s)`
/// before the next attempt; the jitter desynchronizes concurrent callers
/// against a rate-limited provider. Non-retryable failures propagate
/// immediately.
#[derive(Clone)]
pub struct CompletionGateway {
    backend: Arc<dyn CompletionBackend>,
    max_retries: u32,
    base_delay: Duration,
}

impl CompletionGateway {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    #[cfg(test)]
    pub fn with_policy(
        backend: Arc<dyn CompletionBackend>,
        max_retries: u32,
        base_delay: Duration,
    ) -> Self {
        Self {
            backend,
            max_retries,
            base_delay,
        }
    }

    pub async fn complete(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GatewayError> {
        self.complete_with_deadline(prompt, options, None).await
    }

    /// Like `complete`, but aborts before scheduling a retry that the
    /// deadline could not accommodate. The in-flight request itself is not
    /// interrupted; only further attempts are.
    pub async fn complete_with_deadline(
        &self,
        prompt: &str,
        options: &GenerationOptions,
        deadline: Option<Instant>,
    ) -> Result<String, GatewayError> {
        let mut state = RetryState::Attempting { attempt: 0 };

        loop {
            state = match state {
                RetryState::Attempting { attempt } => {
                    match self.backend.complete(prompt, options).await {
                        Ok(text) => return Ok(text),
                        Err(error) if !is_retryable(&error) => {
                            return Err(GatewayError::Fatal(error));
                        }
                        Err(error) if attempt + 1 >= self.max_retries => {
                            return Err(GatewayError::Exhausted {
                                attempts: self.max_retries,
                                source: error,
                            });
                        }
                        Err(error) => RetryState::Backoff { attempt, error },
                    }
                }
                RetryState::Backoff { attempt, error } => {
                    let delay = self.backoff_delay(attempt);
                    if let Some(deadline) = deadline {
                        if Instant::now() + delay >= deadline {
                            return Err(GatewayError::DeadlineElapsed {
                                attempt: attempt + 1,
                                source: error,
                            });
                        }
                    }
                    warn!(
                        "LLM call attempt {} failed ({error}), retrying in {}ms...",
                        attempt + 1,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    RetryState::Attempting {
                        attempt: attempt + 1,
                    }
                }
            };
        }
    }

    /// Exponential backoff with jitter: base * 2^attempt + uniform(0..1s).
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let jitter = rand::thread_rng().gen_range(0..JITTER_CEILING_MS);
        self.base_delay * 2u32.pow(attempt) + Duration::from_millis(jitter)
    }
}
