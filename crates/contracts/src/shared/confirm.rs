//! Typed confirmation for destructive actions.

/// Phrase the user types to confirm a bulk delete.
pub const BULK_DELETE_PHRASE: &str = "DELETE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmTarget {
    /// Retype the record's identifying text (usually its name).
    Exact(String),
    /// Retype [`BULK_DELETE_PHRASE`].
    Bulk,
}

impl ConfirmTarget {
    pub fn phrase(&self) -> &str {
        match self {
            ConfirmTarget::Exact(text) => text,
            ConfirmTarget::Bulk => BULK_DELETE_PHRASE,
        }
    }

    /// Exact, case-sensitive match. An empty phrase can never be confirmed.
    pub fn is_satisfied(&self, typed: &str) -> bool {
        let phrase = self.phrase();
        !phrase.is_empty() && typed == phrase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_required() {
        let target = ConfirmTarget::Exact("Shoes".to_string());
        assert!(target.is_satisfied("Shoes"));
        assert!(!target.is_satisfied("shoes"));
        assert!(!target.is_satisfied("Shoes "));
        assert!(!target.is_satisfied(""));
    }

    #[test]
    fn test_empty_phrase_never_confirms() {
        assert!(!ConfirmTarget::Exact(String::new()).is_satisfied(""));
    }

    #[test]
    fn test_bulk_phrase() {
        assert!(ConfirmTarget::Bulk.is_satisfied("DELETE"));
        assert!(!ConfirmTarget::Bulk.is_satisfied("delete"));
    }
}
