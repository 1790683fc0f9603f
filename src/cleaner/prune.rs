use tracing::debug;
use xmltree::XMLNode;

use crate::document::{Document, NodePath, TagSpec};
use crate::error::ItemProcessingError;

/// Entradas que deben retirarse de un elemento concreto.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrunePlan {
    pub item: NodePath,
    /// Índices dentro de `children` del elemento, en orden ascendente.
    pub removals: Vec<usize>,
}

/// Retira del elemento las entradas del plan y devuelve cuántas se eliminaron.
///
/// El plan se valida completo antes de modificar nada: si el elemento ya no
/// existe o algún índice dejó de apuntar a una entrada de metadata, el
/// elemento queda intacto. El elemento en sí nunca se elimina.
pub fn apply_plan(
    document: &mut Document,
    plan: &PrunePlan,
    container: &TagSpec,
) -> Result<usize, ItemProcessingError> {
    let Some(item) = document.element_at_mut(&plan.item) else {
        return Err(ItemProcessingError::Detached {
            path: plan.item.to_string(),
        });
    };

    for &index in &plan.removals {
        match item.children.get(index) {
            Some(XMLNode::Element(entry)) if container.matches(entry) => {}
            _ => {
                return Err(ItemProcessingError::StalePlan {
                    path: plan.item.to_string(),
                    index,
                });
            }
        }
    }

    let mut removals = plan.removals.clone();
    removals.sort_unstable();
    removals.dedup();

    // De atrás hacia delante para que los índices pendientes sigan siendo válidos
    for &index in removals.iter().rev() {
        item.children.remove(index);
    }

    debug!(item = %plan.item, removed = removals.len(), "Entradas podadas");
    Ok(removals.len())
}
