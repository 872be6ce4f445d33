//! ChatProvider trait definition.
//!
//! The one abstraction the chat engine needs: the ability to stream a
//! completion for a request. The trait is object-safe (the stream is
//! already boxed), so callers hold `Arc<dyn ChatProvider>` directly.
//!
//! Implementations live in groqchat-infra (e.g., `GroqProvider`).

use std::pin::Pin;

use futures_util::Stream;

use groqchat_types::llm::{ChatRequest, LlmError, StreamEvent};

/// A stream of completion events from a provider.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for streamed completion backends.
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name (e.g., "groq").
    fn name(&self) -> &str;

    /// Model identifier this provider was constructed for.
    fn model(&self) -> &str;

    /// Send a streaming completion request. Returns a stream of events.
    fn stream(&self, request: ChatRequest) -> EventStream;
}
