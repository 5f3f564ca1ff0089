//! Low-level markup emission.
//!
//! [`XmlWriter`] writes exactly what it is told. Names, comment contents,
//! processing-instruction data and DOCTYPE identifiers must already be valid;
//! only character data and attribute values are escaped here.

use std::fmt;

use crate::escape::Escape;

pub mod escape;

pub use crate::escape::{escape, AsciiEscaper, DefaultEscaper, EscapeMode};

pub struct XmlWriter<'w, W: fmt::Write, E: Escape> {
    stack: Vec<&'w str>,
    writer: W,
    escaper: E,
}

impl<'w, W: fmt::Write, E: Escape> XmlWriter<'w, W, E> {
    pub fn for_writer(writer: W, escaper: E) -> Self {
        Self {
            stack: vec![],
            writer,
            escaper,
        }
    }

    /// `<?xml version="1.0"[ encoding="…"]?>`
    pub fn declaration(&mut self, encoding: Option<&str>) -> fmt::Result {
        self.writer.write_str("<?xml version=\"1.0\"")?;
        if let Some(encoding) = encoding {
            self.writer.write_str(" encoding=\"")?;
            self.escaper.escape_attr_value_quot(encoding, &mut self.writer)?;
            self.writer.write_str("\"")?;
        }
        self.writer.write_str("?>")
    }

    /// Writes a DOCTYPE declaration. The public identifier is only written
    /// together with a system identifier.
    pub fn doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        use_quot_for_system_id: bool,
    ) -> fmt::Result {
        write!(self.writer, "<!DOCTYPE {}", name)?;
        if let Some(system_id) = system_id {
            match public_id {
                Some(public_id) => write!(self.writer, " PUBLIC \"{}\" ", public_id)?,
                None => self.writer.write_str(" SYSTEM ")?,
            }
            if use_quot_for_system_id {
                write!(self.writer, "\"{}\"", system_id)?;
            } else {
                write!(self.writer, "'{}'", system_id)?;
            }
        }
        self.writer.write_str(">")
    }

    pub fn element<'a>(
        &'a mut self,
        name: &'w str,
    ) -> Result<XmlElementWriter<'a, 'w, W, E>, fmt::Error> {
        write!(self.writer, "<{}", name)?;
        Ok(XmlElementWriter { name, ser: self })
    }

    pub fn end_element(&mut self) -> fmt::Result {
        if let Some(name) = self.stack.pop() {
            write!(self.writer, "</{}>", name)
        } else {
            log::error!("end_element called without an open element");
            Err(fmt::Error)
        }
    }

    pub fn characters(&mut self, characters: &str) -> fmt::Result {
        self.escaper.escape_content(characters, &mut self.writer)
    }

    pub fn comment(&mut self, comment: &str) -> fmt::Result {
        write!(self.writer, "<!--{}-->", comment)
    }

    pub fn pi(&mut self, target: &str, data: Option<&str>) -> fmt::Result {
        if let Some(data) = data {
            write!(self.writer, "<?{} {}?>", target, data)
        } else {
            write!(self.writer, "<?{}?>", target)
        }
    }

    pub fn finish(self) -> Result<W, fmt::Error> {
        if !self.stack.is_empty() {
            log::error!("missing end_element call(s): {}", self.stack.join(", "));
            return Err(fmt::Error);
        }
        Ok(self.writer)
    }
}

pub struct XmlElementWriter<'ser, 'w, W: fmt::Write, E: Escape> {
    name: &'w str,
    ser: &'ser mut XmlWriter<'w, W, E>,
}

impl<'ser, 'w, W: fmt::Write, E: Escape> XmlElementWriter<'ser, 'w, W, E> {
    pub fn attribute(self, key: &str, value: &str) -> Result<Self, fmt::Error> {
        self.ser.writer.write_str(" ")?;
        self.ser.writer.write_str(key)?;
        self.ser.writer.write_str("=\"")?;
        self.ser
            .escaper
            .escape_attr_value_quot(value, &mut self.ser.writer)?;
        self.ser.writer.write_str("\"")?;
        Ok(self)
    }

    pub fn finish(self) -> fmt::Result {
        self.ser.stack.push(self.name);
        self.ser.writer.write_str(">")
    }

    pub fn finish_empty(self) -> fmt::Result {
        self.ser.writer.write_str("/>")
    }
}
