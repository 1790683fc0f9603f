use std::borrow::Cow;
use std::io::Write;

use serde::{Deserialize, Serialize};
use xml::attribute::Attribute;
use xml::common::XmlVersion;
use xml::name::Name;
use xml::namespace::Namespace;
use xml::writer::{EmitterConfig, EventWriter, XmlEvent};
use xmltree::{Element, XMLNode};

use super::Document;
use crate::error::CleanError;

/// Opciones de escritura del documento depurado.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializeOptions {
    pub indent: bool,
    pub declaration: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            indent: false,
            declaration: true,
        }
    }
}

impl Document {
    /// Reescribe el árbol (posiblemente modificado) como bytes XML.
    ///
    /// Los comentarios previos y posteriores a la raíz se emiten en su sitio.
    pub fn to_bytes(&self, options: SerializeOptions) -> Result<Vec<u8>, CleanError> {
        let mut config = EmitterConfig::new();
        config.perform_indent = options.indent;
        config.write_document_declaration = false;
        config.autopad_comments = false;
        let mut writer = EventWriter::new_with_config(Vec::new(), config);

        self.write_events(&mut writer, options)
            .map_err(|e| CleanError::Serialize {
                message: e.to_string(),
            })?;

        Ok(writer.into_inner())
    }

    fn write_events<W: Write>(
        &self,
        writer: &mut EventWriter<W>,
        options: SerializeOptions,
    ) -> xml::writer::Result<()> {
        if options.declaration {
            writer.write(XmlEvent::StartDocument {
                version: XmlVersion::Version10,
                encoding: Some("UTF-8"),
                standalone: None,
            })?;
        }
        for node in &self.prolog {
            write_node(writer, node)?;
        }
        write_element(writer, &self.root)?;
        for node in &self.epilog {
            write_node(writer, node)?;
        }
        Ok(())
    }
}

fn write_element<W: Write>(
    writer: &mut EventWriter<W>,
    element: &Element,
) -> xml::writer::Result<()> {
    let mut name = Name::local(&element.name);
    name.namespace = element.namespace.as_deref();
    name.prefix = element.prefix.as_deref();

    // Orden estable: `attributes` es un HashMap
    let mut keys: Vec<&String> = element.attributes.keys().collect();
    keys.sort();
    let attributes: Vec<Attribute<'_>> = keys
        .into_iter()
        .map(|key| Attribute {
            name: Name::from(key.as_str()),
            value: &element.attributes[key],
        })
        .collect();

    let empty = Namespace::empty();
    let namespace = element.namespaces.as_ref().unwrap_or(&empty);

    writer.write(XmlEvent::StartElement {
        name,
        attributes: Cow::Owned(attributes),
        namespace: Cow::Borrowed(namespace),
    })?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer.write(XmlEvent::EndElement { name: Some(name) })
}

fn write_node<W: Write>(writer: &mut EventWriter<W>, node: &XMLNode) -> xml::writer::Result<()> {
    match node {
        XMLNode::Element(element) => write_element(writer, element),
        XMLNode::Text(text) => writer.write(XmlEvent::Characters(text)),
        XMLNode::CData(text) => writer.write(XmlEvent::CData(text)),
        XMLNode::Comment(text) => writer.write(XmlEvent::Comment(text)),
        XMLNode::ProcessingInstruction(name, data) => {
            writer.write(XmlEvent::ProcessingInstruction {
                name,
                data: data.as_deref(),
            })
        }
    }
}
