//! LLM provider backends.

pub mod groq;
