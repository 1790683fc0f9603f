//! Carga, navegación y serialización de exportaciones XML.

mod load;
mod locate;
mod path;
mod save;
mod serialize;
mod tag;

use std::path::{Path, PathBuf};

use xmltree::{Element, XMLNode};

pub use locate::locate_items;
pub use path::NodePath;
pub use save::write_atomically;
pub use serialize::SerializeOptions;
pub use tag::{TagSpec, child_elements, element_text_content, has_child_elements};

/// Árbol completo de una exportación junto con la ruta de la que se leyó.
///
/// Los atributos se guardan con su nombre cualificado (`xml:lang`, `a:x`).
/// Comentarios e instrucciones de procesamiento fuera de la raíz se
/// conservan en `prolog` y `epilog`. El documento es dueño exclusivo del
/// árbol durante toda la ejecución.
#[derive(Clone, Debug)]
pub struct Document {
    prolog: Vec<XMLNode>,
    root: Element,
    epilog: Vec<XMLNode>,
    source: Option<PathBuf>,
}

impl Document {
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Nodos anteriores al elemento raíz, como el comentario `generator` de WordPress.
    pub fn prolog(&self) -> &[XMLNode] {
        &self.prolog
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn element_at(&self, path: &NodePath) -> Option<&Element> {
        path.resolve(&self.root)
    }

    pub(crate) fn element_at_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
        path.resolve_mut(&mut self.root)
    }
}
