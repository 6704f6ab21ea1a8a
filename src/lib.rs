//! # mdmacros
//!
//! Literal macro substitution for markdown rendering pipelines.
//!
//! Markdown works well for simple pages but gives authors no way to
//! attach classes or ids to arbitrary elements - two tables on one page
//! cannot be justified left and right. Macro substitution solves this:
//! just before a page is rendered, every configured macro token in the
//! text is replaced with its user-defined replacement text.
//!
//! ## Features
//!
//! - **Literal tokens**: macros are opaque strings, no grammar, no
//!   escaping, found by plain substring search
//! - **Shift-safe**: replacements apply in descending-offset order, so
//!   earlier replacements never invalidate pending match positions
//! - **Overlap-aware**: the scan advances one position at a time, so
//!   overlapping tokens are all detected
//! - **Fail-soft**: a bad match is skipped with a warning; the pipeline
//!   never aborts over a substitution
//! - **Host adapter**: a content-filter trait plus configuration lookup
//!   for embedding in a rendering pipeline
//! - **WASM support**: compiles to WebAssembly for browser-hosted
//!   pipelines
//!
//! ## Usage Examples
//!
//! ### Basic substitution
//!
//! ```rust
//! use mdmacros::{expand, MacroTable};
//!
//! let table = MacroTable::from_pairs([
//!     ("[LEFT-TABLE]", r#"<div class="left">"#),
//!     ("[END-TABLE]", "</div>"),
//! ]);
//!
//! let page = expand("[LEFT-TABLE]\n| a | b |\n[END-TABLE]", &table);
//! assert!(page.starts_with(r#"<div class="left">"#));
//! ```
//!
//! ### In a rendering pipeline
//!
//! ```rust
//! use mdmacros::host::{ContentFilter, HostConfig, MacroFilter};
//!
//! let mut config = HostConfig::new();
//! config.set_text("custom_macros", "site_macros");
//! config.set_table(
//!     "site_macros",
//!     [("[SITE]".to_string(), "example.org".to_string())],
//! );
//!
//! let filter = MacroFilter::from_config(&config).unwrap();
//! let mut markdown = "Welcome to [SITE]!".to_string();
//! filter.on_content_prepared(&mut markdown);
//! assert_eq!(markdown, "Welcome to example.org!");
//! ```

/// Core substitution modules
pub mod core;

/// Host pipeline adapter - content filter and configuration lookup
pub mod host;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export the core types
pub use core::locator::{locate, Match};
pub use core::substitutor::apply;
pub use core::table::MacroTable;

// Re-export the host adapter surface
pub use host::{ContentFilter, HostConfig, MacroFilter, API_VERSION, MACROS_KEY};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{MacroError, MacroResult, SubstitutionOutput, SubstitutionWarning};

/// Substitute every configured macro in `input`, returning the new text.
///
/// # Arguments
/// * `input` - the source text
/// * `table` - the macro table for this run
///
/// # Returns
/// The substituted text; warnings about skipped matches are discarded
pub fn expand(input: &str, table: &MacroTable) -> String {
    let mut document = input.to_string();
    expand_in_place(&mut document, table);
    document
}

/// Substitute every configured macro in `document`, in place.
///
/// This is the host-facing contract: the buffer is borrowed for the
/// duration of the call, mutated, and handed back. An empty table leaves
/// the document untouched.
pub fn expand_in_place(document: &mut String, table: &MacroTable) {
    let matches = locate(document, table);
    let _ = apply(document, table, &matches);
}

/// Substitute every configured macro in `input`, collecting warnings.
///
/// Skipped substitutions (dangling tokens, clipped overlap spans) are
/// reported in [`SubstitutionOutput::warnings`] instead of being silently
/// dropped.
pub fn expand_with_warnings(input: &str, table: &MacroTable) -> SubstitutionOutput {
    let mut document = input.to_string();
    let matches = locate(&document, table);
    let warnings = apply(&mut document, table, &matches);
    SubstitutionOutput::with_warnings(document, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_basic() {
        let table = MacroTable::from_pairs([("[WORLD]", "Earth")]);
        assert_eq!(expand("Hello [WORLD]", &table), "Hello Earth");
    }

    #[test]
    fn test_expand_empty_table_is_identity() {
        let input = "nothing [HERE] changes";
        assert_eq!(expand(input, &MacroTable::new()), input);
    }

    #[test]
    fn test_expand_in_place_reuses_buffer() {
        let table = MacroTable::from_pairs([("[X]", "Y")]);
        let mut document = "[X]".to_string();
        expand_in_place(&mut document, &table);
        assert_eq!(document, "Y");
    }

    #[test]
    fn test_expand_with_warnings_clean_run() {
        let table = MacroTable::from_pairs([("[A]", "1")]);
        let output = expand_with_warnings("[A] [A]", &table);
        assert_eq!(output.content, "1 1");
        assert!(!output.has_warnings());
    }

    #[test]
    fn test_expand_with_warnings_reports_clipped_span() {
        // "B" is deleted first, leaving the "AB" span past the end.
        let table = MacroTable::from_pairs([("AB", "x"), ("B", "")]);
        let output = expand_with_warnings("AB", &table);
        assert_eq!(output.content, "A");
        assert_eq!(output.warnings.len(), 1);
    }
}
