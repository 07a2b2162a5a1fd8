//! Offline knowledge for the car-care assistant.
//!
//! When the remote model cannot produce an answer, the [`FallbackMatcher`]
//! answers from a small static [`KnowledgeTable`] using keyword rules. The
//! matcher is a total function: every question gets a non-empty answer.

pub mod matcher;
pub mod table;

pub use matcher::{FallbackMatcher, Topic};
pub use table::{ContactInfo, KnowledgeTable};
