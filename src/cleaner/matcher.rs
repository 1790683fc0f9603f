//! Evaluación de las entradas de metadata de un elemento contra las reglas.

use xmltree::Element;

use super::rules::RuleSet;
use crate::config::KeySource;
use crate::document::{TagSpec, child_elements, element_text_content, has_child_elements};
use crate::error::ItemProcessingError;

/// Origen ya compilado de la clave de una entrada.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeySelector {
    Child(TagSpec),
    Attribute(String),
}

impl From<&KeySource> for KeySelector {
    fn from(source: &KeySource) -> Self {
        match source {
            KeySource::Child(tag) => KeySelector::Child(TagSpec::new(tag)),
            KeySource::Attribute(name) => KeySelector::Attribute(name.clone()),
        }
    }
}

impl KeySelector {
    /// Extrae la clave de `entry`; `ordinal` solo se usa para el mensaje de error.
    pub fn extract(&self, entry: &Element, ordinal: usize) -> Result<String, ItemProcessingError> {
        match self {
            KeySelector::Attribute(name) => entry
                .attributes
                .get(name)
                .map(|value| value.trim().to_string())
                .ok_or_else(|| ItemProcessingError::MissingKey {
                    entry: ordinal,
                    key: format!("@{name}"),
                }),
            KeySelector::Child(tag) => {
                let mut keys = child_elements(entry).filter(|(_, child)| tag.matches(child));
                let Some((_, key)) = keys.next() else {
                    return Err(ItemProcessingError::MissingKey {
                        entry: ordinal,
                        key: tag.to_string(),
                    });
                };

                let extra = keys.count();
                if extra > 0 {
                    return Err(ItemProcessingError::AmbiguousKey {
                        entry: ordinal,
                        key: tag.to_string(),
                        count: extra + 1,
                    });
                }
                if has_child_elements(key) {
                    return Err(ItemProcessingError::NestedKey { entry: ordinal });
                }

                Ok(element_text_content(key))
            }
        }
    }
}

/// Qué hijos de un elemento se consideran entradas de metadata y cómo leer su clave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryScope {
    pub container: TagSpec,
    pub key: KeySelector,
    pub scan_all: bool,
}

/// Decisión tomada para una entrada de metadata concreta.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryDecision {
    /// Posición de la entrada dentro de `children` del elemento.
    pub index: usize,
    pub key: String,
    pub prune: bool,
}

/// Decide qué entradas de `item` deben podarse. No modifica el árbol.
///
/// Si alguna entrada no tiene una clave legible el elemento completo falla,
/// para que la poda posterior sea todo o nada.
pub fn evaluate_item(
    item: &Element,
    scope: &EntryScope,
    rules: &RuleSet,
) -> Result<Vec<EntryDecision>, ItemProcessingError> {
    let entries = child_elements(item).filter(|(_, child)| scope.container.matches(child));
    let limit = if scope.scan_all { usize::MAX } else { 1 };

    entries
        .take(limit)
        .enumerate()
        .map(|(position, (index, entry))| {
            let key = scope.key.extract(entry, position + 1)?;
            let prune = rules.matches(&key);
            Ok(EntryDecision { index, key, prune })
        })
        .collect()
}

/// Texto del hijo `title` del elemento, si existe y no está vacío.
pub fn item_title(item: &Element, title: &TagSpec) -> Option<String> {
    child_elements(item)
        .find(|(_, child)| title.matches(child))
        .map(|(_, child)| element_text_content(child))
        .filter(|text| !text.is_empty())
}
