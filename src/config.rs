//! Configuración del motor: etiquetas a recorrer, origen de la clave y reglas de poda.
//!
//! Todos los campos tienen valor por defecto, de modo que un archivo TOML
//! solo necesita declarar lo que cambia:
//!
//! ```toml
//! container_tag = "wp:postmeta"
//! scan_all_containers = true
//! key = { child = "wp:meta_key" }
//!
//! [[rules]]
//! kind = "prefix"
//! pattern = "_oembed"
//! case_sensitive = false
//!
//! [output]
//! indent = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cleaner::constants::{
    DEFAULT_CONTAINER_TAG, DEFAULT_ITEM_TAG, DEFAULT_KEY_CHILD, DEFAULT_PRUNE_PATTERN,
};
use crate::document::SerializeOptions;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    pub item_tag: String,
    pub container_tag: String,
    pub key: KeySource,
    /// `false` limita la revisión al primer contenedor de metadata de cada elemento.
    pub scan_all_containers: bool,
    pub rules: Vec<RuleSpec>,
    pub output: SerializeOptions,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            item_tag: DEFAULT_ITEM_TAG.to_string(),
            container_tag: DEFAULT_CONTAINER_TAG.to_string(),
            key: KeySource::default(),
            scan_all_containers: true,
            rules: vec![RuleSpec::contains(DEFAULT_PRUNE_PATTERN)],
            output: SerializeOptions::default(),
        }
    }
}

impl CleanerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sustituye las reglas por literales `contains` sensibles a mayúsculas.
    pub fn with_literal_rules<I, S>(mut self, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules = literals.into_iter().map(RuleSpec::contains).collect();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_tag.trim().is_empty() {
            return Err(ConfigError::EmptyTag("item_tag"));
        }
        if self.container_tag.trim().is_empty() {
            return Err(ConfigError::EmptyTag("container_tag"));
        }
        let key_empty = match &self.key {
            KeySource::Child(tag) | KeySource::Attribute(tag) => tag.trim().is_empty(),
        };
        if key_empty {
            return Err(ConfigError::EmptyTag("key"));
        }
        if let Some(position) = self.rules.iter().position(|rule| rule.pattern.is_empty()) {
            return Err(ConfigError::EmptyPattern(position + 1));
        }
        Ok(())
    }
}

/// Lugar del que se extrae la clave de cada entrada de metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    Child(String),
    Attribute(String),
}

impl Default for KeySource {
    fn default() -> Self {
        KeySource::Child(DEFAULT_KEY_CHILD.to_string())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    #[default]
    Contains,
    Exact,
    Prefix,
    Suffix,
    Regex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(default)]
    pub kind: RuleKind,
    pub pattern: String,
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
}

impl RuleSpec {
    pub fn contains(pattern: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Contains,
            pattern: pattern.into(),
            case_sensitive: true,
        }
    }
}

fn default_case_sensitive() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_wordpress_postmeta() {
        let config = CleanerConfig::default();

        assert_eq!(config.item_tag, "item");
        assert_eq!(config.container_tag, "postmeta");
        assert_eq!(config.key, KeySource::Child("meta_key".to_string()));
        assert!(config.scan_all_containers);
        assert_eq!(config.rules, vec![RuleSpec::contains("_fss_relevance")]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_only_declared_fields() {
        let config = CleanerConfig::from_toml_str(
            r#"
            container_tag = "wp:postmeta"
            scan_all_containers = false
            key = { attribute = "name" }

            [[rules]]
            kind = "regex"
            pattern = "^_oembed_[0-9a-f]+$"

            [[rules]]
            pattern = "_edit_lock"
            case_sensitive = false

            [output]
            indent = true
            "#,
        )
        .expect("configuración válida");

        assert_eq!(config.item_tag, "item");
        assert_eq!(config.container_tag, "wp:postmeta");
        assert!(!config.scan_all_containers);
        assert_eq!(config.key, KeySource::Attribute("name".to_string()));
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[0].kind, RuleKind::Regex);
        assert!(config.rules[0].case_sensitive);
        assert_eq!(config.rules[1].kind, RuleKind::Contains);
        assert!(!config.rules[1].case_sensitive);
        assert!(config.output.indent);
        assert!(config.output.declaration);
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let result = CleanerConfig::from_toml_str(
            r#"
            [[rules]]
            pattern = ""
            "#,
        );
        assert_eq!(result, Err(ConfigError::EmptyPattern(1)));
    }

    #[test]
    fn empty_tag_is_rejected() {
        let result = CleanerConfig::from_toml_str(r#"item_tag = " ""#);
        assert_eq!(result, Err(ConfigError::EmptyTag("item_tag")));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let result = CleanerConfig::from_toml_str("rules = 3");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn literal_rules_replace_defaults() {
        let config = CleanerConfig::default().with_literal_rules(["_edit_last", "_wp_old_slug"]);
        assert_eq!(
            config.rules,
            vec![RuleSpec::contains("_edit_last"), RuleSpec::contains("_wp_old_slug")]
        );
    }
}
