use std::fmt;

use xmltree::{Element, XMLNode};

/// Dirección de un elemento: índices de hijo desde la raíz.
///
/// El prefijo de la ruta identifica al padre, por lo que el árbol no
/// necesita referencias cruzadas hijo → padre.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn resolve<'a>(&self, root: &'a Element) -> Option<&'a Element> {
        let mut current = root;
        for &index in &self.0 {
            current = match current.children.get(index)? {
                XMLNode::Element(child) => child,
                _ => return None,
            };
        }
        Some(current)
    }

    pub(crate) fn resolve_mut<'a>(&self, root: &'a mut Element) -> Option<&'a mut Element> {
        let mut current = root;
        for &index in &self.0 {
            current = match current.children.get_mut(index)? {
                XMLNode::Element(child) => child,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}
