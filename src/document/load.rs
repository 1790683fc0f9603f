use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use tracing::{debug, instrument};
use xml::reader::{EventReader, ParserConfig, XmlEvent};
use xmltree::{Element, XMLNode};

use super::Document;
use crate::error::CleanError;

impl Document {
    /// Construye el árbol a partir de cualquier fuente legible.
    pub fn parse<R: Read>(reader: R) -> Result<Self, CleanError> {
        let config = ParserConfig::new()
            .ignore_comments(false)
            .cdata_to_characters(false)
            .coalesce_characters(true);
        let mut events = EventReader::new_with_config(reader, config);

        let mut open: Vec<Element> = Vec::new();
        let mut root = None;
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();

        loop {
            let event = events.next().map_err(|e| CleanError::Parse {
                message: e.to_string(),
            })?;

            let node = match event {
                XmlEvent::StartElement {
                    name,
                    attributes,
                    namespace,
                } => {
                    let mut element = Element::new(&name.local_name);
                    element.prefix = name.prefix;
                    element.namespace = name.namespace;
                    if !namespace.is_essentially_empty() {
                        element.namespaces = Some(namespace);
                    }
                    // Nombre cualificado: `xml:lang` y `a:x`/`b:x` no deben colapsar
                    for attribute in attributes {
                        element
                            .attributes
                            .insert(attribute.name.borrow().to_repr(), attribute.value);
                    }
                    open.push(element);
                    continue;
                }
                XmlEvent::EndElement { .. } => {
                    let element = open.pop().ok_or_else(|| CleanError::Parse {
                        message: "cierre de elemento sin apertura".to_string(),
                    })?;
                    match open.last_mut() {
                        Some(parent) => parent.children.push(XMLNode::Element(element)),
                        None => root = Some(element),
                    }
                    continue;
                }
                XmlEvent::Characters(text) => XMLNode::Text(text),
                XmlEvent::CData(text) => XMLNode::CData(text),
                XmlEvent::Comment(text) => XMLNode::Comment(text),
                XmlEvent::ProcessingInstruction { name, data } => {
                    XMLNode::ProcessingInstruction(name, data)
                }
                XmlEvent::Whitespace(_) | XmlEvent::StartDocument { .. } => continue,
                XmlEvent::EndDocument => break,
            };

            match open.last_mut() {
                Some(parent) => parent.children.push(node),
                None if root.is_none() => prolog.push(node),
                None => epilog.push(node),
            }
        }

        let root = root.ok_or_else(|| CleanError::Parse {
            message: "el documento no tiene elemento raíz".to_string(),
        })?;

        debug!(root = %root.name, "Documento cargado");
        Ok(Self {
            prolog,
            root,
            epilog,
            source: None,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CleanError> {
        Self::parse(Cursor::new(bytes))
    }

    /// Lee y analiza el archivo indicado, recordando su ruta de origen.
    #[instrument(level = "debug")]
    pub fn open(path: &Path) -> Result<Self, CleanError> {
        let contents = fs::read(path).map_err(|source| CleanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(bytes = contents.len(), "Archivo leído");

        let mut document = Self::from_bytes(&contents)?;
        document.source = Some(path.to_path_buf());
        Ok(document)
    }
}
