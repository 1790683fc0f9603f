use tracing::instrument;

use super::{Document, NodePath, TagSpec, child_elements};

/// Localiza en orden de documento todos los elementos que coinciden con `tag`.
///
/// Incluye elementos anidados a cualquier profundidad; la raíz cuenta si coincide.
#[instrument(level = "debug", skip(document))]
pub fn locate_items(document: &Document, tag: &TagSpec) -> Vec<NodePath> {
    let mut found = Vec::new();
    let mut stack = vec![NodePath::root()];

    while let Some(path) = stack.pop() {
        let Some(element) = document.element_at(&path) else {
            continue;
        };

        if tag.matches(element) {
            found.push(path.clone());
        }

        // Hijos en orden inverso para recorrer de izquierda a derecha
        let children: Vec<usize> = child_elements(element).map(|(index, _)| index).collect();
        for index in children.into_iter().rev() {
            stack.push(path.child(index));
        }
    }

    found
}
