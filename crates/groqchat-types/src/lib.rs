//! Shared domain types for groqchat.
//!
//! This crate contains the types used across the groqchat workspace:
//! chat turns, model selection, LLM request/stream shapes, and secret
//! redaction.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod llm;
pub mod secret;
