//! The remote answer client: question in, answer out, never an error.

use crate::prompt;
use crate::retry::{AttemptOutcome, AttemptState, RetryPolicy};
use carcare_config::AppConfig;
use carcare_core::error::ProviderError;
use carcare_core::provider::{GenerateRequest, GenerationConfig, Provider};
use carcare_knowledge::{FallbackMatcher, Topic};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Why the offline matcher answered instead of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// A success status without usable candidate text
    Malformed,
    /// No request was sent because the provider has no credentials
    NotConfigured,
    /// Every attempt hit a transient failure
    Exhausted,
    /// The caller asked for an offline answer
    Offline,
}

/// Where an answer came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSource {
    Remote {
        attempts: u32,
    },
    Fallback {
        reason: FallbackReason,
        attempts: u32,
        topic: Topic,
    },
}

/// An answer plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub answer: String,
    pub source: AnswerSource,
}

impl Resolution {
    pub fn is_remote(&self) -> bool {
        matches!(self.source, AnswerSource::Remote { .. })
    }

    /// Remote attempts made while producing this answer.
    pub fn attempts(&self) -> u32 {
        match self.source {
            AnswerSource::Remote { attempts } | AnswerSource::Fallback { attempts, .. } => attempts,
        }
    }
}

/// Turns a question into an answer using the remote model, falling back to
/// the keyword matcher when the model cannot help.
///
/// Stateless: every call is independent, and the only shared data (the
/// knowledge table and the prompt template) is read-only.
pub struct RemoteAnswerClient {
    provider: Arc<dyn Provider>,
    fallback: FallbackMatcher,
    policy: RetryPolicy,
    generation: GenerationConfig,
}

impl RemoteAnswerClient {
    /// Create a client with the default retry policy and sampling settings.
    pub fn new(provider: Arc<dyn Provider>, fallback: FallbackMatcher) -> Self {
        Self {
            provider,
            fallback,
            policy: RetryPolicy::default(),
            generation: GenerationConfig::default(),
        }
    }

    /// Create a client with policy, sampling and knowledge from configuration.
    pub fn from_config(config: &AppConfig, provider: Arc<dyn Provider>) -> Self {
        let fallback = FallbackMatcher::new(Arc::new(config.knowledge.clone()));
        Self::new(provider, fallback)
            .with_policy(RetryPolicy::from(&config.resolver))
            .with_generation_config(config.generation.clone())
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_generation_config(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Answer a question. Always returns non-empty text.
    pub async fn resolve(&self, question: &str) -> String {
        self.resolve_detailed(question).await.answer
    }

    /// Answer a question and report where the answer came from.
    pub async fn resolve_detailed(&self, question: &str) -> Resolution {
        let request = prompt::build_request(question, &self.generation);
        let max_retries = self.policy.max_retries;

        let mut state = AttemptState::start();
        let mut attempts = 0;
        let mut unusable = None;

        while let AttemptState::Attempting(n) = state {
            if n > 1 {
                tokio::time::sleep(self.policy.retry_delay).await;
            }
            attempts = n;
            let outcome = self.attempt(n, &request).await;
            state = state.transition(&outcome, max_retries);
            if let AttemptOutcome::Invalid(e) = outcome {
                unusable = Some(e);
            }

            if let AttemptState::Attempting(next) = state {
                warn!(
                    attempt = n,
                    next_attempt = next,
                    delay_secs = self.policy.retry_delay.as_secs_f32(),
                    "Retrying remote answer"
                );
            }
        }

        match state {
            AttemptState::Success(answer) => {
                info!(attempts, "Answered by remote model");
                Resolution {
                    answer,
                    source: AnswerSource::Remote { attempts },
                }
            }
            AttemptState::Malformed => match unusable {
                Some(ProviderError::NotConfigured(reason)) => {
                    warn!(%reason, "Remote model not configured");
                    self.fall_back(question, FallbackReason::NotConfigured, attempts)
                }
                other => {
                    warn!(error = ?other, "No valid response in API result");
                    self.fall_back(question, FallbackReason::Malformed, attempts)
                }
            },
            AttemptState::Exhausted | AttemptState::Attempting(_) => {
                error!(attempts, "Remote attempts exhausted");
                self.fall_back(question, FallbackReason::Exhausted, attempts)
            }
        }
    }

    /// Answer from the knowledge table without touching the network.
    pub fn resolve_offline(&self, question: &str) -> Resolution {
        self.fall_back(question, FallbackReason::Offline, 0)
    }

    async fn attempt(&self, n: u32, request: &GenerateRequest) -> AttemptOutcome {
        info!(
            provider = %self.provider.name(),
            attempt = n,
            max_retries = self.policy.max_retries,
            "Requesting remote answer"
        );

        let result = match tokio::time::timeout(
            self.policy.request_timeout,
            self.provider.generate(request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(format!(
                "no response within {}s",
                self.policy.request_timeout.as_secs()
            ))),
        };

        if let Err(e) = &result {
            if e.is_retryable() {
                error!(attempt = n, error = %e, "Remote attempt failed");
            } else {
                warn!(attempt = n, error = %e, "Remote response unusable");
            }
        }

        AttemptOutcome::from(result)
    }

    fn fall_back(&self, question: &str, reason: FallbackReason, attempts: u32) -> Resolution {
        let (topic, answer) = self.fallback.answer(question);
        info!(?reason, topic = topic.as_str(), "Answering from knowledge table");
        Resolution {
            answer,
            source: AnswerSource::Fallback {
                reason,
                attempts,
                topic,
            },
        }
    }
}
