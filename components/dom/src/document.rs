use std::fmt;

use xmlcraft_writer::escape::Escape;
use xmlcraft_writer::{DefaultEscaper, XmlWriter};

use crate::doctype::DocumentTypeDeclaration;
use crate::node::{Element, MiscNode, NodeType, WriteXml};

/// A complete document: optional XML declaration and DOCTYPE, the root
/// element and the comments and processing instructions around it.
///
/// A document whose root element has no name is written as the empty string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub omit_declaration: bool,
    pub doctype: Option<DocumentTypeDeclaration>,
    pub before_element: Vec<MiscNode>,
    pub element: Element,
    pub after_element: Vec<MiscNode>,
}

/// A top-level node of a [`Document`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DocumentNode<'a> {
    Misc(&'a MiscNode),
    Element(&'a Element),
}

impl<'a> DocumentNode<'a> {
    pub fn node_type(&self) -> NodeType {
        match self {
            DocumentNode::Misc(node) => node.node_type(),
            DocumentNode::Element(_) => NodeType::Element,
        }
    }
}

impl Document {
    pub fn new(element: Element) -> Self {
        Self {
            omit_declaration: false,
            doctype: None,
            before_element: vec![],
            element,
            after_element: vec![],
        }
    }

    pub fn with_doctype(mut self, doctype: DocumentTypeDeclaration) -> Self {
        self.doctype = Some(doctype);
        self
    }

    pub fn with_before_element(mut self, node: impl Into<MiscNode>) -> Self {
        self.before_element.push(node.into());
        self
    }

    pub fn with_after_element(mut self, node: impl Into<MiscNode>) -> Self {
        self.after_element.push(node.into());
        self
    }

    pub fn without_declaration(mut self) -> Self {
        self.omit_declaration = true;
        self
    }

    /// Number of top-level nodes, the root element included.
    pub fn node_count(&self) -> usize {
        self.before_element.len() + 1 + self.after_element.len()
    }

    /// Top-level nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = DocumentNode<'_>> {
        self.before_element
            .iter()
            .map(DocumentNode::Misc)
            .chain(std::iter::once(DocumentNode::Element(&self.element)))
            .chain(self.after_element.iter().map(DocumentNode::Misc))
    }

    pub fn write_xml<'a, W: fmt::Write, E: Escape>(
        &'a self,
        encoding: Option<&str>,
        writer: &mut XmlWriter<'a, W, E>,
    ) -> fmt::Result {
        let name = match self.element.name() {
            Some(name) => name,
            None => {
                log::debug!("skipping document with unnamed root element");
                return Ok(());
            }
        };

        if !self.omit_declaration {
            writer.declaration(encoding)?;
        }
        if let Some(doctype) = &self.doctype {
            doctype.write_xml(name, writer)?;
        }
        for node in &self.before_element {
            node.write_xml(writer)?;
        }
        self.element.write_xml(writer)?;
        for node in &self.after_element {
            node.write_xml(writer)?;
        }
        Ok(())
    }

    /// Renders the document, declaring `encoding` in the XML declaration.
    pub fn render(&self, encoding: Option<&str>) -> String {
        self.render_with(encoding, DefaultEscaper)
    }

    pub fn render_with<E: Escape>(&self, encoding: Option<&str>, escaper: E) -> String {
        let mut output = String::new();
        {
            let mut writer = XmlWriter::for_writer(&mut output, escaper);
            // writing into a `String` cannot fail
            let _ = self.write_xml(encoding, &mut writer);
        }
        output
    }

    /// Renders the document and encodes it.
    ///
    /// The declaration names the encoding actually produced. Encodings that
    /// cannot be written, like UTF-16, fall back to UTF-8, as do documents
    /// whose names, comments or processing instructions contain characters
    /// the encoding cannot represent. For encodings other than UTF-8
    /// non-ASCII text and attribute values are written as character
    /// references.
    #[cfg(feature = "encoding")]
    pub fn render_encoded(&self, encoding: &'static encoding_rs::Encoding) -> Vec<u8> {
        let encoding = encoding.output_encoding();
        if encoding != encoding_rs::UTF_8 {
            let markup = self.render_with(Some(encoding.name()), xmlcraft_writer::AsciiEscaper);
            let (bytes, _, had_errors) = encoding.encode(&markup);
            if !had_errors {
                return bytes.into_owned();
            }
            log::warn!(
                "markup not representable in {}, writing UTF-8 instead",
                encoding.name()
            );
        }
        self.render_with(Some(encoding_rs::UTF_8.name()), DefaultEscaper)
            .into_bytes()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = XmlWriter::for_writer(f, DefaultEscaper);
        self.write_xml(None, &mut writer)?;
        writer.finish().map(|_| ())
    }
}
