//! Secret redaction for display.
//!
//! The live credential is carried as `secrecy::SecretString` elsewhere;
//! `Redacted` exists for the one place a key is shown back to the user
//! (masked, trailing characters only).

use serde::{Deserialize, Serialize};

use std::fmt;

/// Trailing characters left visible by [`Redacted::masked`].
const VISIBLE_TAIL: usize = 4;

/// A wrapper that redacts secret values in Debug and Display output.
///
/// The actual value is accessible via `.expose()`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Redacted(String);

impl Redacted {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the underlying secret value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form: `****` plus the last four characters.
    ///
    /// Counted in characters, not bytes, so multibyte values never
    /// split a char boundary. Values of four characters or fewer are
    /// masked entirely.
    pub fn masked(&self) -> String {
        let total = self.0.chars().count();
        if total <= VISIBLE_TAIL {
            return "****".to_string();
        }
        let tail: String = self.0.chars().skip(total - VISIBLE_TAIL).collect();
        format!("****{tail}")
    }
}

impl fmt::Debug for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Redacted").field(&"<hidden>").finish()
    }
}

impl fmt::Display for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<hidden>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_debug_hides_value() {
        let secret = Redacted::new("gsk_abc123xyz");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("abc123xyz"));
        assert!(debug.contains("hidden"));
    }

    #[test]
    fn test_redacted_display_hides_value() {
        let secret = Redacted::new("gsk_abc123xyz");
        assert_eq!(format!("{}", secret), "<hidden>");
    }

    #[test]
    fn test_redacted_expose() {
        let secret = Redacted::new("gsk_abc123xyz");
        assert_eq!(secret.expose(), "gsk_abc123xyz");
    }

    #[test]
    fn test_redacted_masked() {
        let secret = Redacted::new("gsk_abc123xyz");
        assert_eq!(secret.masked(), "****3xyz");
    }

    #[test]
    fn test_redacted_masked_short() {
        let secret = Redacted::new("ab");
        assert_eq!(secret.masked(), "****");
    }

    #[test]
    fn test_redacted_masked_multibyte_tail() {
        // Four trailing characters, not four trailing bytes
        let secret = Redacted::new("abc\u{20ac}\u{20ac}");
        assert_eq!(secret.masked(), "****bc\u{20ac}\u{20ac}");
    }

    #[test]
    fn test_redacted_masked_short_multibyte() {
        let secret = Redacted::new("\u{20ac}\u{20ac}\u{20ac}");
        assert_eq!(secret.masked(), "****");
    }
}
