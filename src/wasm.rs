//! WASM bindings for mdmacros
//!
//! This module provides JavaScript-accessible functions for macro
//! substitution in browser-hosted rendering pipelines.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use indexmap::IndexMap;

#[cfg(feature = "wasm")]
use crate::MacroTable;

/// Substitution result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ExpandResult {
    /// The substituted output
    pub output: String,
    /// Whether the substitution ran
    pub success: bool,
    /// Error message if the table could not be read
    pub error: Option<String>,
    /// Substitutions that were skipped
    pub warnings: Vec<String>,
}

/// Summary of table check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Substitute macros in `input`.
///
/// # Arguments
/// * `input` - the source text
/// * `table` - a plain JS object mapping macro tokens to replacement
///   text; property order is the table order
///
/// # Returns
/// An `ExpandResult` object
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "expandMacros")]
pub fn expand_macros_wasm(input: &str, table: JsValue) -> JsValue {
    let entries: IndexMap<String, String> = match serde_wasm_bindgen::from_value(table) {
        Ok(entries) => entries,
        Err(e) => {
            let result = ExpandResult {
                output: input.to_string(),
                success: false,
                error: Some(format!("macro table could not be read: {}", e)),
                warnings: vec![],
            };
            return serde_wasm_bindgen::to_value(&result).unwrap();
        }
    };

    let table = MacroTable::from_pairs(entries);
    let output = crate::expand_with_warnings(input, &table);

    let result = ExpandResult {
        output: output.content,
        success: true,
        error: None,
        warnings: output.warnings.iter().map(|w| w.to_string()).collect(),
    };
    serde_wasm_bindgen::to_value(&result).unwrap()
}

/// Check a macro table for configuration issues
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkTable")]
pub fn check_table_wasm(table: JsValue) -> JsValue {
    use crate::diagnostics::DiagnosticLevel;

    let entries: IndexMap<String, String> =
        serde_wasm_bindgen::from_value(table).unwrap_or_default();
    let table = MacroTable::from_pairs(entries);

    let result = crate::diagnostics::check_table(&table);

    // Group diagnostics by level
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        match d.level {
            DiagnosticLevel::Error => errors.push(d.message.clone()),
            DiagnosticLevel::Warning => warnings.push(d.message.clone()),
            DiagnosticLevel::Info => infos.push(d.message.clone()),
        }
    }

    let summary = CheckSummary {
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    };
    serde_wasm_bindgen::to_value(&summary).unwrap()
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
