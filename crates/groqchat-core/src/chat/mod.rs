//! Conversation machinery: transcript, prompt assembly, turn engine.

pub mod engine;
pub mod prompt;
pub mod transcript;
