//! Motor que poda entradas de metadata de los elementos de una exportación.

pub mod constants;
mod error_log;
mod matcher;
mod prune;
mod rules;
mod run;

pub use error_log::ErrorLog;
pub use matcher::{EntryDecision, EntryScope, KeySelector, evaluate_item, item_title};
pub use prune::{PrunePlan, apply_plan};
pub use rules::{KeyMatcher, LiteralMode, LiteralRule, RegexRule, RuleSet};
pub use run::{RunOutcome, RunResult, RunState, RunStats, RunSummary};

use crate::config::CleanerConfig;
use crate::document::{SerializeOptions, TagSpec};
use crate::error::ConfigError;
use constants::{
    DEFAULT_CONTAINER_TAG, DEFAULT_ITEM_TAG, DEFAULT_KEY_CHILD, DEFAULT_PRUNE_PATTERN, TITLE_TAG,
};

/// Configuración compilada, reutilizable para limpiar varios documentos.
///
/// No guarda estado entre ejecuciones: cada documento recibe su propio
/// registro de errores y sus propias estadísticas.
#[derive(Debug)]
pub struct Cleaner {
    item_tag: TagSpec,
    title_tag: TagSpec,
    scope: EntryScope,
    rules: RuleSet,
    output: SerializeOptions,
}

impl Cleaner {
    pub fn new(config: &CleanerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            item_tag: TagSpec::new(&config.item_tag),
            title_tag: TagSpec::new(TITLE_TAG),
            scope: EntryScope {
                container: TagSpec::new(&config.container_tag),
                key: KeySelector::from(&config.key),
                scan_all: config.scan_all_containers,
            },
            rules: RuleSet::compile(&config.rules)?,
            output: config.output,
        })
    }

    /// Sustituye las reglas compiladas, por ejemplo para usar predicados propios.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self {
            item_tag: TagSpec::new(DEFAULT_ITEM_TAG),
            title_tag: TagSpec::new(TITLE_TAG),
            scope: EntryScope {
                container: TagSpec::new(DEFAULT_CONTAINER_TAG),
                key: KeySelector::Child(TagSpec::new(DEFAULT_KEY_CHILD)),
                scan_all: true,
            },
            rules: RuleSet::new().with(LiteralRule::contains(DEFAULT_PRUNE_PATTERN)),
            output: SerializeOptions::default(),
        }
    }
}
