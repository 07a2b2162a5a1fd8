//! # Car-care assistant core
//!
//! Domain types, traits, and error definitions for the car-care support
//! assistant. This crate has **no HTTP or runtime dependencies**; it defines
//! the model that the provider, knowledge and agent crates implement against.
//!
//! ## Layout
//!
//! - [`message`]: wire-level conversation turns and the chat session value
//!   owned by the presentation layer
//! - [`provider`]: the `Provider` trait over remote generative endpoints
//! - [`error`]: error taxonomy, including retry classification

pub mod error;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result};
pub use message::{ChatMessage, ChatSession, Part, Role, SessionId, Speaker, Turn};
pub use provider::{GenerateRequest, GenerateResponse, GenerationConfig, Provider, Usage};
