//! Locator - find every macro occurrence in a document
//!
//! Scans the document once per configured token and produces the match
//! list the substitutor consumes. Plain substring search only; tokens
//! carry no wildcard or regex semantics.

use crate::core::table::MacroTable;

/// One located occurrence of a macro token.
///
/// `offset` is a byte offset into the document. It always falls on a
/// `char` boundary because a match starts where the token's literal bytes
/// start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// The matched token, borrowed from the table
    pub token: &'a str,
    /// Byte position of the match in the document
    pub offset: usize,
}

/// Find every occurrence of every table token in `document`.
///
/// For each token, in table order, the document is scanned left to right
/// with a cursor that restarts at 0. After each hit the cursor advances
/// one character past the match *start*, not past the whole token, so
/// overlapping tokens are all reported ("AB" and "BC" both match inside
/// "ABC"). Tables are small and documents page-sized; the extra rescans
/// are cheap.
///
/// The result is sorted by descending offset. The sort is stable, so two
/// tokens matching at the same offset stay in table order.
///
/// An empty table yields an empty list (nothing configured is a valid
/// no-op). Empty tokens are skipped here; rejecting them is the config
/// layer's job ([`MacroTable::validate`]).
pub fn locate<'a>(document: &str, table: &'a MacroTable) -> Vec<Match<'a>> {
    let mut matches = Vec::new();

    for (token, _) in table.iter() {
        if token.is_empty() {
            continue;
        }

        let mut cursor = 0;
        while cursor < document.len() {
            let Some(found) = document[cursor..].find(token) else {
                break;
            };
            let offset = cursor + found;
            matches.push(Match { token, offset });

            // One character, not one token: the first token char starts at
            // `offset`, so its UTF-8 width is the single-position step.
            let step = token.chars().next().map_or(1, char::len_utf8);
            cursor = offset + step;
        }
    }

    matches.sort_by(|a, b| b.offset.cmp(&a.offset));
    matches
}
