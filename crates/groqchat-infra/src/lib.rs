//! Infrastructure implementations for groqchat.
//!
//! Currently one backend: the Groq hosted inference API, reached over
//! the OpenAI chat-completions protocol.

pub mod llm;
