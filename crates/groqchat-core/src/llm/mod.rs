//! LLM provider abstraction and memoized construction.

pub mod cache;
pub mod provider;
