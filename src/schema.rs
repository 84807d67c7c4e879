//! Key schema support for checking templates
//!
//! A schema is a TOML file declaring which annotation keys a template may
//! use, with a short description per key. The CLI loads one and registers a
//! processor per declared key, so templates can be validated without the host
//! application's real processors.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing key schemas
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse schema TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A set of annotation keys a template is allowed to use
#[derive(Debug, Clone, Default)]
pub struct KeySchema {
    /// Optional name for the schema
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Key mappings: annotation key -> human-readable description
    pub keys: HashMap<String, String>,
}

/// TOML structure for deserializing schemas
#[derive(Deserialize)]
struct TomlSchema {
    metadata: Option<TomlMetadata>,
    keys: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

impl KeySchema {
    /// Load a schema from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a schema from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, SchemaError> {
        let parsed: TomlSchema = toml::from_str(content)?;

        Ok(KeySchema {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            keys: parsed.keys,
        })
    }

    /// Check if a key is declared
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Add a key declared outside the schema file (e.g. from the CLI)
    pub fn add_key(&mut self, key: &str) {
        self.keys
            .entry(key.to_string())
            .or_insert_with(|| "declared on the command line".to_string());
    }

    /// All declared keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema_with_metadata() {
        let toml = r#"
            [metadata]
            name = "gradle-notifications"
            description = "Keys used by the project-structure banner"

            [keys]
            link = "clickable hyperlink"
            bold = "bold text run"
        "#;

        let schema = KeySchema::from_toml_str(toml).expect("Should parse");
        assert_eq!(schema.name.as_deref(), Some("gradle-notifications"));
        assert!(schema.contains("link"));
        assert!(schema.contains("bold"));
        assert!(!schema.contains("italic"));
    }

    #[test]
    fn test_parse_schema_without_metadata() {
        let toml = r#"
            [keys]
            link = "clickable hyperlink"
        "#;

        let schema = KeySchema::from_toml_str(toml).expect("Should parse");
        assert_eq!(schema.name, None);
        assert_eq!(schema.keys.len(), 1);
    }

    #[test]
    fn test_missing_keys_table_is_error() {
        let toml = r#"
            [metadata]
            name = "empty"
        "#;

        assert!(KeySchema::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_add_key_keeps_existing_description() {
        let toml = r#"
            [keys]
            link = "clickable hyperlink"
        "#;

        let mut schema = KeySchema::from_toml_str(toml).expect("Should parse");
        schema.add_key("link");
        schema.add_key("extra");
        assert_eq!(schema.keys["link"], "clickable hyperlink");
        assert!(schema.contains("extra"));
    }
}
