//! Retry state machine for the remote call.
//!
//! ```text
//!                  Answered            Success(text)
//!  Attempting(n) ──────────────────▶
//!        │         Invalid             Malformed
//!        ├─────────────────────────▶
//!        │         Transient, n < max
//!        ├─────────────────────────▶  Attempting(n + 1)
//!        │         Transient, n ≥ max
//!        └─────────────────────────▶  Exhausted
//! ```
//!
//! [`AttemptState::transition`] is pure; the resolver owns the sleeping and
//! the network.

use carcare_core::error::ProviderError;
use carcare_core::provider::GenerateResponse;
use std::time::Duration;

/// How hard to try the remote endpoint before falling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero behaves like one.
    pub max_retries: u32,

    /// Fixed pause between attempts (no backoff)
    pub retry_delay: Duration,

    /// Upper bound for a single attempt
    pub request_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&carcare_config::ResolverConfig> for RetryPolicy {
    fn from(config: &carcare_config::ResolverConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            retry_delay: config.retry_delay(),
            request_timeout: config.request_timeout(),
        }
    }
}

/// What one attempt produced, reduced to what the state machine cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Well-formed success; carries the answer text
    Answered(String),
    /// Transport failure, timeout or non-success status
    Transient(ProviderError),
    /// A failure another attempt cannot fix (malformed body, no credentials)
    Invalid(ProviderError),
}

impl From<Result<GenerateResponse, ProviderError>> for AttemptOutcome {
    fn from(result: Result<GenerateResponse, ProviderError>) -> Self {
        match result {
            Ok(response) => Self::Answered(response.text),
            Err(e) if e.is_retryable() => Self::Transient(e),
            Err(e) => Self::Invalid(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptState {
    /// About to make attempt `n` (1-based)
    Attempting(u32),
    Success(String),
    Malformed,
    Exhausted,
}

impl AttemptState {
    pub fn start() -> Self {
        Self::Attempting(1)
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Attempting(_))
    }

    /// Next state after an attempt. Terminal states absorb every outcome.
    #[must_use]
    pub fn transition(self, outcome: &AttemptOutcome, max_retries: u32) -> Self {
        let n = match self {
            Self::Attempting(n) => n,
            terminal => return terminal,
        };

        match outcome {
            AttemptOutcome::Answered(text) => Self::Success(text.clone()),
            AttemptOutcome::Invalid(_) => Self::Malformed,
            AttemptOutcome::Transient(_) if n < max_retries => Self::Attempting(n + 1),
            AttemptOutcome::Transient(_) => Self::Exhausted,
        }
    }
}
