use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a participant in an expense-sharing group.
///
/// Identity is exact string equality: no trimming, no case folding.
/// `"Ana"` and `"ana"` are two different participants.
///
/// # Examples
///
/// ```
/// use expense_settlement::core::participant::ParticipantName;
///
/// let ana = ParticipantName::new("Ana");
/// let bo = ParticipantName::new("Bo");
/// assert_ne!(ana, bo);
/// assert_ne!(ana, ParticipantName::new("ana"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantName(String);

impl ParticipantName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name exactly as it was entered.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the name is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_equality() {
        assert_eq!(ParticipantName::new("Ana"), ParticipantName::new("Ana"));
        assert_ne!(ParticipantName::new("Ana"), ParticipantName::new("Ana "));
        assert_ne!(ParticipantName::new("Ana"), ParticipantName::new("ANA"));
    }

    #[test]
    fn test_blank_names() {
        assert!(ParticipantName::new("").is_blank());
        assert!(ParticipantName::new("   ").is_blank());
        assert!(!ParticipantName::new(" Bo ").is_blank());
    }

    #[test]
    fn test_transparent_serde() {
        let json = serde_json::to_string(&ParticipantName::new("Chen")).unwrap();
        assert_eq!(json, "\"Chen\"");
        let back: ParticipantName = serde_json::from_str("\"Chen\"").unwrap();
        assert_eq!(back.as_str(), "Chen");
    }
}
