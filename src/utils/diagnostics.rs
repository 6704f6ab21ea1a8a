//! Macro table and document diagnostics
//!
//! This module provides checking and reporting for macro configurations
//! before a substitution run. It can identify:
//!
//! - Empty macro tokens (a configuration error)
//! - Replacements that contain their own token (expansion is one-pass,
//!   but re-running it would keep substituting)
//! - Replacements that contain another configured token (never expanded)
//! - Token pairs that can overlap, and overlaps actually present in a
//!   document
//! - Configured macros that never occur in a document
//!
//! ## Example
//!
//! ```rust
//! use mdmacros::diagnostics::check_table;
//! use mdmacros::MacroTable;
//!
//! let table = MacroTable::from_pairs([("", "broken")]);
//! let result = check_table(&table);
//! assert!(result.has_errors());
//! ```

use std::fmt;

use crate::core::locator::locate;
use crate::core::table::MacroTable;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - substitution might not do what the author expects
    Warning,
    /// Error - the configuration will corrupt output or be rejected
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// The macro token the diagnostic is about
    pub token: Option<String>,
    /// Byte offset in the document, when the diagnostic points at one
    pub offset: Option<usize>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            token: None,
            offset: None,
            suggestion: None,
        }
    }

    /// Add the token the diagnostic refers to
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add a document offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        match (&self.token, self.offset) {
            (Some(token), Some(offset)) => {
                write!(f, "\n  --> token '{}' at offset {}", token, offset)?
            }
            (Some(token), None) => write!(f, "\n  --> token '{}'", token)?,
            (None, Some(offset)) => write!(f, "\n  --> offset {}", offset)?,
            (None, None) => {}
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: CheckResult) {
        for diag in other.diagnostics {
            self.add(diag);
        }
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check a macro table for configuration issues
pub fn check_table(table: &MacroTable) -> CheckResult {
    let mut result = CheckResult::new();

    for (token, replacement) in table.iter() {
        if token.is_empty() {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Error,
                    "empty macro token matches at every position",
                )
                .with_suggestion("remove the entry or give it a non-empty token"),
            );
            continue;
        }

        if replacement.contains(token) {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!("replacement for '{}' contains the token itself", token),
                )
                .with_token(token)
                .with_suggestion(
                    "expansion is one-pass, but re-running it on the output keeps substituting",
                ),
            );
        }

        for (other, _) in table.iter() {
            if other != token && !other.is_empty() && replacement.contains(other) {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Info,
                        format!(
                            "replacement for '{}' contains token '{}', which will not be expanded",
                            token, other
                        ),
                    )
                    .with_token(token),
                );
            }
        }
    }

    // Overlap-capable pairs: each unordered pair reported once
    let tokens: Vec<&str> = table.iter().map(|(t, _)| t).collect();
    for (i, a) in tokens.iter().enumerate() {
        for b in tokens.iter().skip(i + 1) {
            if !a.is_empty() && !b.is_empty() && tokens_can_overlap(a, b) {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Info,
                        format!("tokens '{}' and '{}' can overlap in a document", a, b),
                    )
                    .with_suggestion(
                        "overlapping occurrences are substituted in descending-offset order",
                    ),
                );
            }
        }
    }

    result
}

/// Check how a macro table interacts with a concrete document
pub fn check_document(document: &str, table: &MacroTable) -> CheckResult {
    let mut result = CheckResult::new();

    for (token, _) in table.iter() {
        if !token.is_empty() && !document.contains(token) {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Info,
                    format!("macro '{}' is configured but never occurs", token),
                )
                .with_token(token),
            );
        }
    }

    // Overlaps actually present: walk the matches in ascending offset
    // order and flag spans that start before the previous one ended.
    let mut matches = locate(document, table);
    matches.reverse();

    let mut prev: Option<(usize, usize, &str)> = None;
    for m in &matches {
        let end = m.offset + m.token.len();
        if let Some((prev_offset, prev_end, prev_token)) = prev {
            if m.offset < prev_end {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Warning,
                        format!(
                            "match of '{}' at offset {} overlaps match of '{}' at offset {}",
                            m.token, m.offset, prev_token, prev_offset
                        ),
                    )
                    .with_token(m.token)
                    .with_offset(m.offset),
                );
            }
        }
        // Track the furthest-reaching span seen so far
        if prev.map_or(true, |(_, prev_end, _)| end > prev_end) {
            prev = Some((m.offset, end, m.token));
        }
    }

    result
}

/// Whether occurrences of two distinct tokens can share text.
///
/// True when one contains the other, or when a non-empty suffix of one
/// equals a prefix of the other.
fn tokens_can_overlap(a: &str, b: &str) -> bool {
    if a.contains(b) || b.contains(a) {
        return true;
    }
    suffix_matches_prefix(a, b) || suffix_matches_prefix(b, a)
}

fn suffix_matches_prefix(a: &str, b: &str) -> bool {
    (1..a.len())
        .filter(|&i| a.is_char_boundary(i))
        .any(|i| b.starts_with(&a[i..]))
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}
