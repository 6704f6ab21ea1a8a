//! Configuration lookup for the host adapter
//!
//! The host's configuration names the macro table indirectly: the entry
//! under [`MACROS_KEY`] holds the *name* of the entry that holds the
//! table. That lets site authors keep several tables in one config file
//! and switch between them with a one-line change.
//!
//! The table itself is an ordered string → string mapping; entry order in
//! the config file is the table order, which drives scan order and the
//! equal-offset tie-break.

use indexmap::IndexMap;

use crate::core::table::MacroTable;
use crate::utils::error::{MacroError, MacroResult};

/// Default configuration key naming the macro table entry
pub const MACROS_KEY: &str = "custom_macros";

/// One host configuration entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// A scalar text entry
    Text(String),
    /// An ordered string → string mapping
    Table(IndexMap<String, String>),
}

/// The slice of host configuration the macro filter reads.
///
/// Host configs carry plenty of unrelated entries (site title, theme,
/// plugin settings); this type only keeps the shapes the filter can use
/// and resolves the two-step macros-key lookup.
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    entries: IndexMap<String, ConfigValue>,
}

impl HostConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar text entry
    pub fn set_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(key.into(), ConfigValue::Text(value.into()));
    }

    /// Set a table entry, preserving pair order
    pub fn set_table<I>(&mut self, key: impl Into<String>, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.entries
            .insert(key.into(), ConfigValue::Table(pairs.into_iter().collect()));
    }

    /// Look up a raw entry
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Resolve the macro table via the default macros key.
    ///
    /// `Ok(None)` means no table is configured - the caller should treat
    /// the run as an identity transform, not as a failure.
    pub fn macro_table(&self) -> MacroResult<Option<MacroTable>> {
        self.macro_table_at(MACROS_KEY)
    }

    /// Resolve the macro table via a custom macros key.
    ///
    /// The entry under `key` names the entry that holds the table. A
    /// missing key or missing named entry resolves to `Ok(None)`; an
    /// entry of the wrong shape is a configuration error.
    pub fn macro_table_at(&self, key: &str) -> MacroResult<Option<MacroTable>> {
        let Some(value) = self.entries.get(key) else {
            return Ok(None);
        };

        let name = match value {
            ConfigValue::Text(name) => name,
            ConfigValue::Table(_) => {
                return Err(MacroError::config(format!(
                    "entry '{}' should name the macro table entry, not hold a table",
                    key
                )));
            }
        };

        let Some(entry) = self.entries.get(name.as_str()) else {
            return Ok(None);
        };

        match entry {
            ConfigValue::Table(map) => Ok(Some(MacroTable::from_pairs(
                map.iter().map(|(k, v)| (k.clone(), v.clone())),
            ))),
            ConfigValue::Text(_) => Err(MacroError::config(format!(
                "entry '{}' is not a macro table",
                name
            ))),
        }
    }
}

// ============================================================================
// Config file loading (feature `config`)
// ============================================================================

#[cfg(feature = "config")]
impl HostConfig {
    /// Load a configuration file, dispatching on its extension
    /// (`.yaml`/`.yml`, `.toml`, `.json`).
    pub fn load(path: impl AsRef<std::path::Path>) -> MacroResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(MacroError::config(format!(
                "unsupported config format '{}' (expected yaml, toml or json)",
                other.unwrap_or("")
            ))),
        }
    }

    /// Parse a YAML configuration document
    pub fn from_yaml_str(input: &str) -> MacroResult<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(input)
            .map_err(|e| MacroError::config(format!("invalid YAML: {}", e)))?;

        let serde_yaml::Value::Mapping(mapping) = value else {
            return Err(MacroError::config("top level of the config must be a mapping"));
        };

        let mut config = Self::new();
        for (key, value) in &mapping {
            let Some(key) = key.as_str() else {
                continue;
            };
            match value {
                serde_yaml::Value::Mapping(table) => {
                    let pairs = table.iter().filter_map(|(k, v)| {
                        Some((k.as_str()?.to_string(), yaml_scalar_to_string(v)?))
                    });
                    config.set_table(key, pairs);
                }
                scalar => {
                    if let Some(text) = yaml_scalar_to_string(scalar) {
                        config.set_text(key, text);
                    }
                }
            }
        }
        Ok(config)
    }

    /// Parse a TOML configuration document
    pub fn from_toml_str(input: &str) -> MacroResult<Self> {
        let table: toml::Table = input
            .parse()
            .map_err(|e| MacroError::config(format!("invalid TOML: {}", e)))?;

        let mut config = Self::new();
        for (key, value) in &table {
            match value {
                toml::Value::Table(entries) => {
                    let pairs = entries
                        .iter()
                        .filter_map(|(k, v)| Some((k.clone(), toml_scalar_to_string(v)?)));
                    config.set_table(key.as_str(), pairs);
                }
                scalar => {
                    if let Some(text) = toml_scalar_to_string(scalar) {
                        config.set_text(key.as_str(), text);
                    }
                }
            }
        }
        Ok(config)
    }

    /// Parse a JSON configuration document
    pub fn from_json_str(input: &str) -> MacroResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| MacroError::config(format!("invalid JSON: {}", e)))?;

        let serde_json::Value::Object(object) = value else {
            return Err(MacroError::config("top level of the config must be an object"));
        };

        let mut config = Self::new();
        for (key, value) in &object {
            match value {
                serde_json::Value::Object(entries) => {
                    let pairs = entries
                        .iter()
                        .filter_map(|(k, v)| Some((k.clone(), json_scalar_to_string(v)?)));
                    config.set_table(key.as_str(), pairs);
                }
                scalar => {
                    if let Some(text) = json_scalar_to_string(scalar) {
                        config.set_text(key.as_str(), text);
                    }
                }
            }
        }
        Ok(config)
    }
}

// Hosts write replacement text as whatever YAML/TOML/JSON scalar is
// convenient; numbers and booleans are rendered to their literal form.
// Nested collections are not replacement text and are dropped.

#[cfg(feature = "config")]
fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(feature = "config")]
fn toml_scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(n) => Some(n.to_string()),
        toml::Value::Float(n) => Some(n.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        _ => None,
    }
}

#[cfg(feature = "config")]
fn json_scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> HostConfig {
        let mut config = HostConfig::new();
        config.set_text(MACROS_KEY, "site_macros");
        config.set_table(
            "site_macros",
            [
                ("[VERSION]".to_string(), "2.0".to_string()),
                ("[SITE]".to_string(), "example.org".to_string()),
            ],
        );
        config
    }

    #[test]
    fn test_two_step_resolution() {
        let table = sample_config().macro_table().unwrap().unwrap();
        assert_eq!(table.get("[VERSION]"), Some("2.0"));
        assert_eq!(table.get("[SITE]"), Some("example.org"));
    }

    #[test]
    fn test_table_order_follows_config_order() {
        let table = sample_config().macro_table().unwrap().unwrap();
        let tokens: Vec<&str> = table.iter().map(|(t, _)| t).collect();
        assert_eq!(tokens, vec!["[VERSION]", "[SITE]"]);
    }

    #[test]
    fn test_absent_macros_key_is_none() {
        let config = HostConfig::new();
        assert!(config.macro_table().unwrap().is_none());
    }

    #[test]
    fn test_absent_named_entry_is_none() {
        let mut config = HostConfig::new();
        config.set_text(MACROS_KEY, "nowhere");
        assert!(config.macro_table().unwrap().is_none());
    }

    #[test]
    fn test_macros_key_holding_table_is_error() {
        let mut config = HostConfig::new();
        config.set_table(MACROS_KEY, [("[A]".to_string(), "1".to_string())]);
        assert!(config.macro_table().is_err());
    }

    #[test]
    fn test_named_entry_of_wrong_shape_is_error() {
        let mut config = HostConfig::new();
        config.set_text(MACROS_KEY, "site_macros");
        config.set_text("site_macros", "not a table");
        assert!(config.macro_table().is_err());
    }

    #[test]
    fn test_custom_macros_key() {
        let mut config = HostConfig::new();
        config.set_text("my_key", "macros");
        config.set_table("macros", [("[A]".to_string(), "1".to_string())]);

        let table = config.macro_table_at("my_key").unwrap().unwrap();
        assert_eq!(table.get("[A]"), Some("1"));
        assert!(config.macro_table().unwrap().is_none());
    }

    #[cfg(feature = "config")]
    mod loading {
        use super::*;

        #[test]
        fn test_yaml_round_trip() {
            let yaml = r#"
site_title: Example
custom_macros: site_macros
site_macros:
  "[SITE]": example.org
  "[VERSION]": 2.0
"#;
            let config = HostConfig::from_yaml_str(yaml).unwrap();
            let table = config.macro_table().unwrap().unwrap();
            assert_eq!(table.get("[SITE]"), Some("example.org"));
            // Scalar numbers are rendered to their literal text
            assert_eq!(table.get("[VERSION]"), Some("2.0"));
        }

        #[test]
        fn test_yaml_preserves_table_order() {
            let yaml = r#"
custom_macros: m
m:
  "[C]": 3
  "[A]": 1
  "[B]": 2
"#;
            let table = HostConfig::from_yaml_str(yaml)
                .unwrap()
                .macro_table()
                .unwrap()
                .unwrap();
            let tokens: Vec<&str> = table.iter().map(|(t, _)| t).collect();
            assert_eq!(tokens, vec!["[C]", "[A]", "[B]"]);
        }

        #[test]
        fn test_yaml_without_macros_is_none() {
            let config = HostConfig::from_yaml_str("site_title: Example\n").unwrap();
            assert!(config.macro_table().unwrap().is_none());
        }

        #[test]
        fn test_toml_config() {
            let toml = r#"
custom_macros = "macros"

[macros]
"[LEFT]" = '<div class="left">'
"[END]" = "</div>"
"#;
            let table = HostConfig::from_toml_str(toml)
                .unwrap()
                .macro_table()
                .unwrap()
                .unwrap();
            assert_eq!(table.get("[LEFT]"), Some(r#"<div class="left">"#));
            assert_eq!(table.get("[END]"), Some("</div>"));
        }

        #[test]
        fn test_json_config() {
            let json = r#"{
                "custom_macros": "macros",
                "macros": { "[A]": "alpha", "[N]": 7 }
            }"#;
            let table = HostConfig::from_json_str(json)
                .unwrap()
                .macro_table()
                .unwrap()
                .unwrap();
            assert_eq!(table.get("[A]"), Some("alpha"));
            assert_eq!(table.get("[N]"), Some("7"));
        }

        #[test]
        fn test_invalid_yaml_is_config_error() {
            assert!(HostConfig::from_yaml_str(": not yaml: [").is_err());
        }

        #[test]
        fn test_nested_collections_are_dropped() {
            let yaml = r#"
custom_macros: m
m:
  "[OK]": fine
  "[BAD]":
    - a list is not replacement text
"#;
            let table = HostConfig::from_yaml_str(yaml)
                .unwrap()
                .macro_table()
                .unwrap()
                .unwrap();
            assert_eq!(table.get("[OK]"), Some("fine"));
            assert_eq!(table.get("[BAD]"), None);
        }
    }
}
