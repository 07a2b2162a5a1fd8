//! The query resolution pipeline.
//!
//! 1. **Build** the seed prompt around the question ([`prompt`])
//! 2. **Ask** the remote model, retrying transient failures with a fixed
//!    delay ([`retry`])
//! 3. **Fall back** to the keyword matcher when the model gives nothing
//!    usable ([`resolver`])
//!
//! The pipeline never surfaces an error: [`RemoteAnswerClient::resolve`]
//! always returns non-empty text.

pub mod prompt;
pub mod resolver;
pub mod retry;

pub use resolver::{AnswerSource, FallbackReason, RemoteAnswerClient, Resolution};
pub use retry::{AttemptOutcome, AttemptState, RetryPolicy};
