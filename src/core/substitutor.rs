//! Substitutor - apply located matches to the document
//!
//! Replacements happen in place, highest offset first. Everything before a
//! match is untouched by the replacements already applied, so pending
//! offsets stay valid without any bookkeeping.

use crate::core::locator::Match;
use crate::core::table::MacroTable;
use crate::utils::error::SubstitutionWarning;

/// Apply a match list to `document`.
///
/// `matches` must already be sorted by descending offset, as produced by
/// [`locate`](crate::core::locator::locate); this function does not
/// re-sort.
///
/// Two situations are handled fail-soft, skipping the single substitution
/// and recording a warning instead of giving up on the run:
///
/// - the matched token is no longer in the table (cannot happen when the
///   match list came from `locate` with the same table, but substituting
///   garbage would be worse than skipping);
/// - the match span no longer fits the buffer because an overlapping
///   higher-offset replacement shrank it, or no longer falls on `char`
///   boundaries. Overlapping spans that still fit are replaced normally,
///   swallowing whatever the earlier replacement wrote there.
///
/// A run that records warnings leaves the document partially substituted;
/// the text is never left in a torn state mid-replacement.
pub fn apply(
    document: &mut String,
    table: &MacroTable,
    matches: &[Match<'_>],
) -> Vec<SubstitutionWarning> {
    let mut warnings = Vec::new();

    for m in matches {
        let Some(replacement) = table.get(m.token) else {
            warnings.push(SubstitutionWarning::dangling(m.token, m.offset));
            continue;
        };

        let end = m.offset + m.token.len();
        if end > document.len()
            || !document.is_char_boundary(m.offset)
            || !document.is_char_boundary(end)
        {
            warnings.push(SubstitutionWarning::clipped(m.token, m.offset));
            continue;
        }

        document.replace_range(m.offset..end, replacement);
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locator::locate;

    fn table(pairs: &[(&str, &str)]) -> MacroTable {
        MacroTable::from_pairs(pairs.iter().copied())
    }

    fn run(input: &str, table: &MacroTable) -> (String, Vec<SubstitutionWarning>) {
        let mut document = input.to_string();
        let matches = locate(&document, table);
        let warnings = apply(&mut document, table, &matches);
        (document, warnings)
    }

    #[test]
    fn test_single_substitution() {
        let table = table(&[("[WORLD]", "Earth")]);
        let (result, warnings) = run("Hello [WORLD]", &table);
        assert_eq!(result, "Hello Earth");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_replacement_longer_than_token() {
        let table = table(&[("[X]", "a much longer piece of text")]);
        let (result, _) = run("[X] and [X]", &table);
        assert_eq!(
            result,
            "a much longer piece of text and a much longer piece of text"
        );
    }

    #[test]
    fn test_replacement_shorter_than_token() {
        let table = table(&[("[LONG-TOKEN]", ".")]);
        let (result, _) = run("a [LONG-TOKEN] b [LONG-TOKEN] c", &table);
        assert_eq!(result, "a . b . c");
    }

    #[test]
    fn test_empty_replacement_deletes_token() {
        let table = table(&[("[GONE]", "")]);
        let (result, _) = run("a[GONE]b", &table);
        assert_eq!(result, "ab");
    }

    #[test]
    fn test_dangling_token_is_skipped() {
        let full = table(&[("[A]", "1"), ("[B]", "2")]);
        let mut document = "[A] [B]".to_string();
        let matches = locate(&document, &full);

        // Substitute against a table that lost [B]: its match is skipped,
        // the rest of the run continues.
        let partial = table(&[("[A]", "1")]);
        let warnings = apply(&mut document, &partial, &matches);

        assert_eq!(document, "1 [B]");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].token, "[B]");
    }

    #[test]
    fn test_clipped_span_is_skipped() {
        // "B" at offset 1 is replaced first (higher offset) and deletes a
        // byte, leaving the "AB" span at offset 0 hanging past the end.
        let table = table(&[("AB", "x"), ("B", "")]);
        let (result, warnings) = run("AB", &table);
        assert_eq!(result, "A");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].token, "AB");
        assert_eq!(warnings[0].offset, Some(0));
    }

    #[test]
    fn test_in_bounds_overlap_swallows_previous_replacement() {
        // Pinned overlap outcome: "BC" at 1 is applied first, then "AB"
        // at 0 replaces the span that now holds the start of "BC"'s
        // replacement.
        let table = table(&[("AB", "X"), ("BC", "Y")]);
        let (result, warnings) = run("ABC", &table);
        assert_eq!(result, "X");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_does_not_resort_matches() {
        // Contract: the given order is applied as-is. Ascending order
        // demonstrates why the locator's descending order matters.
        let table = table(&[("[X]", "longer-text")]);
        let mut document = "[X][X]".to_string();
        let mut matches = locate(&document, &table);
        matches.reverse(); // ascending offsets

        let warnings = apply(&mut document, &table, &matches);
        // The first replacement shifted the second span off its token, so
        // the second replacement mangles text. With descending order this
        // comes out as "longer-textlonger-text".
        assert_ne!(document, "longer-textlonger-text");
        assert!(warnings.is_empty());
    }
}
