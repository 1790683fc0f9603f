//! Reglas que deciden si la clave de una entrada de metadata debe eliminarse.

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::config::{RuleKind, RuleSpec};
use crate::error::ConfigError;

/// Predicado sobre la clave de una entrada de metadata.
///
/// Implementarlo permite añadir criterios nuevos sin tocar la poda ni la serialización.
pub trait KeyMatcher: fmt::Debug {
    fn matches(&self, key: &str) -> bool;

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralMode {
    Contains,
    Exact,
    Prefix,
    Suffix,
}

/// Comparación contra un literal fijo, sensible o no a mayúsculas.
#[derive(Clone, Debug)]
pub struct LiteralRule {
    mode: LiteralMode,
    literal: String,
    case_sensitive: bool,
}

impl LiteralRule {
    pub fn new(mode: LiteralMode, literal: impl Into<String>, case_sensitive: bool) -> Self {
        let literal = literal.into();
        let literal = if case_sensitive {
            literal
        } else {
            literal.to_lowercase()
        };
        Self {
            mode,
            literal,
            case_sensitive,
        }
    }

    pub fn contains(literal: impl Into<String>) -> Self {
        Self::new(LiteralMode::Contains, literal, true)
    }
}

impl KeyMatcher for LiteralRule {
    fn matches(&self, key: &str) -> bool {
        let folded;
        let key = if self.case_sensitive {
            key
        } else {
            folded = key.to_lowercase();
            folded.as_str()
        };

        match self.mode {
            LiteralMode::Contains => key.contains(&self.literal),
            LiteralMode::Exact => key == self.literal,
            LiteralMode::Prefix => key.starts_with(&self.literal),
            LiteralMode::Suffix => key.ends_with(&self.literal),
        }
    }

    fn describe(&self) -> String {
        let mode = match self.mode {
            LiteralMode::Contains => "contiene",
            LiteralMode::Exact => "es",
            LiteralMode::Prefix => "empieza por",
            LiteralMode::Suffix => "termina en",
        };
        format!("{mode} \"{}\"", self.literal)
    }
}

#[derive(Clone, Debug)]
pub struct RegexRule {
    regex: Regex,
}

impl RegexRule {
    pub fn new(pattern: &str, case_sensitive: bool) -> Result<Self, ConfigError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| ConfigError::InvalidRegex {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { regex })
    }
}

impl KeyMatcher for RegexRule {
    fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    fn describe(&self) -> String {
        format!("coincide con /{}/", self.regex.as_str())
    }
}

/// Conjunto ordenado de reglas evaluadas con semántica OR.
#[derive(Debug, Default)]
pub struct RuleSet {
    matchers: Vec<Box<dyn KeyMatcher>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compila las reglas declaradas en la configuración, en el mismo orden.
    pub fn compile(specs: &[RuleSpec]) -> Result<Self, ConfigError> {
        let mut rules = Self::new();
        for (position, spec) in specs.iter().enumerate() {
            if spec.pattern.is_empty() {
                return Err(ConfigError::EmptyPattern(position + 1));
            }

            let mode = match spec.kind {
                RuleKind::Contains => LiteralMode::Contains,
                RuleKind::Exact => LiteralMode::Exact,
                RuleKind::Prefix => LiteralMode::Prefix,
                RuleKind::Suffix => LiteralMode::Suffix,
                RuleKind::Regex => {
                    rules.push(RegexRule::new(&spec.pattern, spec.case_sensitive)?);
                    continue;
                }
            };
            rules.push(LiteralRule::new(mode, spec.pattern.as_str(), spec.case_sensitive));
        }
        Ok(rules)
    }

    pub fn push<M: KeyMatcher + 'static>(&mut self, matcher: M) {
        self.matchers.push(Box::new(matcher));
    }

    pub fn with<M: KeyMatcher + 'static>(mut self, matcher: M) -> Self {
        self.push(matcher);
        self
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Primera regla que acepta la clave, si alguna lo hace.
    pub fn first_match(&self, key: &str) -> Option<&dyn KeyMatcher> {
        self.matchers
            .iter()
            .map(|matcher| matcher.as_ref())
            .find(|matcher| matcher.matches(key))
    }

    pub fn matches(&self, key: &str) -> bool {
        self.first_match(key).is_some()
    }
}
