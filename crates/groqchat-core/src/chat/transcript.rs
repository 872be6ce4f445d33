//! Append-only session transcript.
//!
//! The transcript is the session's only mutable state: an ordered
//! sequence of turns, appended in strict chronological order and never
//! reordered or rewritten. It is cleared wholesale on reset and
//! discarded when the session ends; nothing is persisted.

use groqchat_types::chat::{Turn, TurnRole};

/// Ordered sequence of conversation turns for one session.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript holds no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Append one user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::now(TurnRole::User, content));
    }

    /// Append one assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::now(TurnRole::Assistant, content));
    }

    /// Empty the transcript wholesale. Partial clears do not exist.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
