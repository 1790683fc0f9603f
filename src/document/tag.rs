use std::fmt;

use xmltree::{Element, XMLNode};

/// Describe la información necesaria para reconocer una etiqueta en el XML exportado.
///
/// `wp:postmeta` exige el prefijo `wp`; `postmeta` acepta cualquier prefijo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagSpec {
    pub prefix: Option<String>,
    pub local_name: String,
}

impl TagSpec {
    pub fn new(tag: &str) -> Self {
        match tag.split_once(':') {
            Some((prefix, local_name)) if !prefix.is_empty() => Self {
                prefix: Some(prefix.to_string()),
                local_name: local_name.to_string(),
            },
            _ => Self {
                prefix: None,
                local_name: tag.trim_start_matches(':').to_string(),
            },
        }
    }

    /// Comprueba si un elemento coincide con la especificación de búsqueda.
    pub fn matches(&self, element: &Element) -> bool {
        if element.name != self.local_name {
            return false;
        }

        match (self.prefix.as_deref(), element.prefix.as_deref()) {
            (Some(expected), Some(actual)) => expected == actual,
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}

impl fmt::Display for TagSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

/// Devuelve el texto plano (incluido CDATA) contenido dentro de un elemento.
pub fn element_text_content(element: &Element) -> String {
    let mut content = String::new();
    for node in &element.children {
        match node {
            XMLNode::Text(text) | XMLNode::CData(text) => content.push_str(text),
            _ => {}
        }
    }
    content.trim().to_string()
}

/// Itera los hijos de tipo elemento junto con su posición real en `children`.
pub fn child_elements(element: &Element) -> impl Iterator<Item = (usize, &Element)> {
    element
        .children
        .iter()
        .enumerate()
        .filter_map(|(index, node)| match node {
            XMLNode::Element(child) => Some((index, child)),
            _ => None,
        })
}

pub fn has_child_elements(element: &Element) -> bool {
    element
        .children
        .iter()
        .any(|node| matches!(node, XMLNode::Element(_)))
}
