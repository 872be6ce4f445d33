//! Chat turn types for groqchat.
//!
//! A session's transcript is an ordered sequence of turns. The
//! append-only container itself lives in groqchat-core; these are the
//! data shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Role of a transcript turn. Unlike [`crate::llm::MessageRole`] there
/// is no system variant: the system instruction is fixed configuration,
/// not part of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// One entry in a session transcript: who said what, and when.
///
/// Turns are immutable after construction; the transcript never
/// rewrites history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Create a turn stamped with the current time.
    pub fn now(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_roundtrip() {
        for role in [TurnRole::User, TurnRole::Assistant] {
            let s = role.to_string();
            let parsed: TurnRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_turn_role_serde() {
        let json = serde_json::to_string(&TurnRole::User).unwrap();
        assert_eq!(json, "\"user\"");
        let parsed: TurnRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TurnRole::User);
    }

    #[test]
    fn test_turn_role_rejects_system() {
        assert!("system".parse::<TurnRole>().is_err());
    }

    #[test]
    fn test_turn_now() {
        let turn = Turn::now(TurnRole::User, "Hello");
        assert_eq!(turn.role, TurnRole::User);
        assert_eq!(turn.content, "Hello");
        assert!(turn.created_at <= Utc::now());
    }

    #[test]
    fn test_turn_serialize() {
        let turn = Turn::now(TurnRole::Assistant, "Hi there");
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"role\":\"assistant\""));
        assert!(json.contains("Hi there"));
    }
}
