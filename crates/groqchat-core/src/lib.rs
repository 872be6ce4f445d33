//! Business logic for groqchat.
//!
//! Holds the provider abstraction and the conversation machinery:
//! the append-only transcript, prompt assembly, the turn-submission
//! engine, and the memoized provider cache. This crate never depends
//! on groqchat-infra; provider implementations are injected behind
//! the [`llm::provider::ChatProvider`] trait.

pub mod chat;
pub mod llm;
