//! Host pipeline integration
//!
//! The core is invoked by a document-rendering host at one hook point:
//! just before markdown is converted to the final output format, the host
//! hands the raw text over for rewriting. This module models that seam as
//! a small trait plus the macro-expanding implementation of it; pipeline
//! registration and configuration loading stay on the host side.

pub mod config;

pub use config::{ConfigValue, HostConfig, MACROS_KEY};

use crate::core::table::MacroTable;
use crate::utils::error::MacroResult;

/// Revision of the host content-filter API this crate targets.
pub const API_VERSION: u32 = 2;

/// A filter the host calls with page content before rendering.
///
/// Implementors receive the raw markdown buffer by mutable reference and
/// rewrite it in place; the host continues its pipeline with whatever is
/// left in the buffer.
pub trait ContentFilter {
    /// Called once per page, after the host has prepared the raw markdown
    /// and before it is rendered.
    fn on_content_prepared(&self, markdown: &mut String);
}

/// The macro-expanding content filter.
///
/// Owns the macro table for its lifetime; each hook invocation is one
/// independent substitution run over the buffer it is handed.
///
/// # Example
///
/// ```rust
/// use mdmacros::host::{ContentFilter, MacroFilter};
/// use mdmacros::MacroTable;
///
/// let filter = MacroFilter::new(MacroTable::from_pairs([("[WORLD]", "Earth")]));
/// let mut page = "Hello [WORLD]".to_string();
/// filter.on_content_prepared(&mut page);
/// assert_eq!(page, "Hello Earth");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MacroFilter {
    table: MacroTable,
}

impl MacroFilter {
    /// Create a filter from a ready-made table
    pub fn new(table: MacroTable) -> Self {
        Self { table }
    }

    /// Resolve the macro table from host configuration.
    ///
    /// A configuration with no macro table produces a filter with an
    /// empty table, i.e. the identity transform - pages without macros
    /// configured are a valid setup, not an error.
    pub fn from_config(config: &HostConfig) -> MacroResult<Self> {
        let table = config.macro_table()?.unwrap_or_default();
        table.validate()?;
        Ok(Self { table })
    }

    /// The table this filter substitutes from
    pub fn table(&self) -> &MacroTable {
        &self.table
    }
}

impl ContentFilter for MacroFilter {
    fn on_content_prepared(&self, markdown: &mut String) {
        if self.table.is_empty() {
            return;
        }
        crate::expand_in_place(markdown, &self.table);
    }
}
