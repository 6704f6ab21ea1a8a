//! Error handling for macro substitution
//!
//! This module provides the error type for configuration problems and the
//! warning types for fail-soft substitution issues. A substitution run
//! itself never fails: the worst case is text returned unmodified or
//! partially modified, with warnings describing what was skipped.

use std::fmt;

/// Configuration and I/O error type
#[derive(Debug, Clone)]
pub enum MacroError {
    /// A configured macro token is the empty string
    EmptyToken,
    /// Host configuration has the wrong shape
    ConfigError { message: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for MacroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacroError::EmptyToken => {
                write!(
                    f,
                    "Empty macro token: an empty token would match at every position"
                )
            }
            MacroError::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            MacroError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for MacroError {}

impl From<std::io::Error> for MacroError {
    fn from(err: std::io::Error) -> Self {
        MacroError::IoError {
            message: err.to_string(),
        }
    }
}

// Convenience constructors
impl MacroError {
    pub fn config(message: impl Into<String>) -> Self {
        MacroError::ConfigError {
            message: message.into(),
        }
    }
}

/// Result type for configuration operations
pub type MacroResult<T> = Result<T, MacroError>;

/// A substitution that was skipped (non-fatal)
#[derive(Debug, Clone)]
pub struct SubstitutionWarning {
    pub message: String,
    /// The token whose substitution was skipped
    pub token: String,
    /// Byte offset of the skipped match, if known
    pub offset: Option<usize>,
}

impl SubstitutionWarning {
    /// A match whose token is no longer present in the table
    pub fn dangling(token: &str, offset: usize) -> Self {
        Self {
            message: format!("token '{}' is not in the macro table", token),
            token: token.to_string(),
            offset: Some(offset),
        }
    }

    /// A match whose span was invalidated by an overlapping replacement
    pub fn clipped(token: &str, offset: usize) -> Self {
        Self {
            message: format!(
                "span of token '{}' was clipped by an overlapping replacement",
                token
            ),
            token: token.to_string(),
            offset: Some(offset),
        }
    }
}

impl fmt::Display for SubstitutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(offset) = self.offset {
            write!(f, "Warning at offset {}: {}", offset, self.message)
        } else {
            write!(f, "Warning: {}", self.message)
        }
    }
}

/// Substitution output with any warnings collected along the way
#[derive(Debug, Clone)]
pub struct SubstitutionOutput {
    /// The substituted text
    pub content: String,
    /// Substitutions that were skipped
    pub warnings: Vec<SubstitutionWarning>,
}

impl SubstitutionOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<SubstitutionWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
