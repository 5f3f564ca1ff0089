use std::fmt;

use xmlcraft_writer::escape::Escape;
use xmlcraft_writer::{DefaultEscaper, XmlWriter};

use crate::field::{PublicId, SystemId};

/// `<!DOCTYPE …>` without an internal subset. The name is taken from the
/// root element of the owning document.
///
/// A public identifier is only written when a system identifier is present
/// as well.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentTypeDeclaration {
    public_id: Option<PublicId>,
    system_id: Option<SystemId>,
}

impl DocumentTypeDeclaration {
    pub fn new(public_id: Option<&str>, system_id: Option<&str>) -> Self {
        Self {
            public_id: public_id.map(PublicId::new),
            system_id: system_id.map(SystemId::new),
        }
    }

    pub fn public_id(&self) -> Option<&str> {
        self.public_id.as_deref()
    }

    pub fn set_public_id(&mut self, public_id: Option<&str>) {
        self.public_id = public_id.map(PublicId::new);
    }

    pub fn system_id(&self) -> Option<&str> {
        self.system_id.as_ref().map(SystemId::as_str)
    }

    pub fn set_system_id(&mut self, system_id: Option<&str>) {
        self.system_id = system_id.map(SystemId::new);
    }

    /// Whether the system identifier is delimited by `"` (otherwise `'`).
    pub fn use_quot_for_system_id(&self) -> bool {
        self.system_id.as_ref().map_or(true, SystemId::use_quot)
    }

    pub fn write_xml<W: fmt::Write, E: Escape>(
        &self,
        name: &str,
        writer: &mut XmlWriter<'_, W, E>,
    ) -> fmt::Result {
        writer.doctype(
            name,
            self.public_id(),
            self.system_id(),
            self.use_quot_for_system_id(),
        )
    }

    /// Renders the declaration for a root element called `name`.
    pub fn to_string_for(&self, name: &str) -> String {
        let mut output = String::new();
        {
            let mut writer = XmlWriter::for_writer(&mut output, DefaultEscaper);
            // writing into a `String` cannot fail
            let _ = self.write_xml(name, &mut writer);
        }
        output
    }
}
