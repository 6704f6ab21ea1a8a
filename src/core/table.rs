//! Macro table - the ordered token → replacement mapping
//!
//! The table is the source of truth for one substitution run: tokens are
//! scanned in table order, and matches at the same offset are applied in
//! table order. Both depend on iteration order being insertion order,
//! which `IndexMap` guarantees.

use indexmap::IndexMap;

use crate::utils::error::{MacroError, MacroResult};

/// Ordered mapping from macro token to replacement text.
///
/// Tokens are opaque literal strings - no syntax, no wildcards. The table
/// is read-only input for the duration of a run.
///
/// # Example
///
/// ```rust
/// use mdmacros::MacroTable;
///
/// let mut table = MacroTable::new();
/// table.insert("[WORLD]", "Earth");
/// assert_eq!(table.get("[WORLD]"), Some("Earth"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroTable {
    entries: IndexMap<String, String>,
}

impl MacroTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from (token, replacement) pairs, preserving order
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Insert a token → replacement entry.
    ///
    /// Returns the previous replacement if the token was already present.
    /// Re-inserting an existing token keeps its original position.
    pub fn insert(
        &mut self,
        token: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(token.into(), replacement.into())
    }

    /// Look up the replacement for a token
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Check whether a token is configured
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Number of configured macros
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no macros are configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (token, replacement) pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Validate the table as configuration.
    ///
    /// An empty token would match at every position of any document, so it
    /// is rejected as a configuration error.
    pub fn validate(&self) -> MacroResult<()> {
        if self.entries.keys().any(|token| token.is_empty()) {
            return Err(MacroError::EmptyToken);
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MacroTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for MacroTable {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut table = MacroTable::new();
        assert!(table.is_empty());

        table.insert("[A]", "alpha");
        assert_eq!(table.get("[A]"), Some("alpha"));
        assert_eq!(table.get("[B]"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let table = MacroTable::from_pairs([("[C]", "3"), ("[A]", "1"), ("[B]", "2")]);
        let tokens: Vec<&str> = table.iter().map(|(t, _)| t).collect();
        assert_eq!(tokens, vec!["[C]", "[A]", "[B]"]);
    }

    #[test]
    fn test_reinsert_replaces_value_keeps_position() {
        let mut table = MacroTable::from_pairs([("[A]", "old"), ("[B]", "2")]);
        let previous = table.insert("[A]", "new");
        assert_eq!(previous.as_deref(), Some("old"));

        let pairs: Vec<(&str, &str)> = table.iter().collect();
        assert_eq!(pairs, vec![("[A]", "new"), ("[B]", "2")]);
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let table = MacroTable::from_pairs([("[A]", "1"), ("", "oops")]);
        assert!(table.validate().is_err());

        let ok = MacroTable::from_pairs([("[A]", "1")]);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_empty_replacement_is_allowed() {
        let table = MacroTable::from_pairs([("[GONE]", "")]);
        assert!(table.validate().is_ok());
        assert_eq!(table.get("[GONE]"), Some(""));
    }
}
