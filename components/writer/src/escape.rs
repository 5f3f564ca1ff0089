use std::fmt;

/// Where escaped text ends up.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EscapeMode {
    /// Character data between tags.
    Content,
    /// Attribute value delimited by `"`.
    AttributeQuot,
    /// Attribute value delimited by `'`.
    AttributeApos,
}

impl EscapeMode {
    #[inline]
    fn needs_escape(self, c: char) -> bool {
        match c {
            '<' | '>' | '&' => true,
            '"' => self == EscapeMode::AttributeQuot,
            '\'' => self == EscapeMode::AttributeApos,
            _ => false,
        }
    }
}

fn entity(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&apos;"),
        _ => None,
    }
}

/// Strategy to escape character data
///
/// see https://www.w3.org/TR/REC-xml/#dt-chardata
pub trait Escape {
    fn escape_content<W: fmt::Write>(&self, input: &str, write: &mut W) -> fmt::Result;
    fn escape_attr_value_apos<W: fmt::Write>(&self, input: &str, write: &mut W) -> fmt::Result;
    fn escape_attr_value_quot<W: fmt::Write>(&self, input: &str, write: &mut W) -> fmt::Result;

    fn escape_with<W: fmt::Write>(
        &self,
        input: &str,
        mode: EscapeMode,
        write: &mut W,
    ) -> fmt::Result {
        match mode {
            EscapeMode::Content => self.escape_content(input, write),
            EscapeMode::AttributeQuot => self.escape_attr_value_quot(input, write),
            EscapeMode::AttributeApos => self.escape_attr_value_apos(input, write),
        }
    }
}

/// Replaces `<`, `>` and `&` everywhere and the delimiting quote inside
/// attribute values. Everything else is written unchanged.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultEscaper;

impl DefaultEscaper {
    fn escape<W: fmt::Write>(input: &str, mode: EscapeMode, write: &mut W) -> fmt::Result {
        let mut p = 0;
        for (i, r) in input.match_indices(|c: char| mode.needs_escape(c)) {
            write.write_str(&input[p..i])?;
            match r.chars().next().and_then(entity) {
                Some(replacement) => write.write_str(replacement)?,
                None => write.write_str(r)?,
            }
            p = i + r.len();
        }
        write.write_str(if p == 0 { input } else { &input[p..] })
    }
}

impl Escape for DefaultEscaper {
    fn escape_content<W: fmt::Write>(&self, input: &str, write: &mut W) -> fmt::Result {
        Self::escape(input, EscapeMode::Content, write)
    }

    fn escape_attr_value_apos<W: fmt::Write>(&self, input: &str, write: &mut W) -> fmt::Result {
        Self::escape(input, EscapeMode::AttributeApos, write)
    }

    fn escape_attr_value_quot<W: fmt::Write>(&self, input: &str, write: &mut W) -> fmt::Result {
        Self::escape(input, EscapeMode::AttributeQuot, write)
    }
}

/// Same table as [`DefaultEscaper`], and additionally writes every non-ASCII
/// character as a decimal character reference.
#[derive(Copy, Clone, Debug, Default)]
pub struct AsciiEscaper;

impl AsciiEscaper {
    fn escape<W: fmt::Write>(input: &str, mode: EscapeMode, write: &mut W) -> fmt::Result {
        let mut p = 0;
        for (i, r) in input.match_indices(|c: char| mode.needs_escape(c) || !c.is_ascii()) {
            write.write_str(&input[p..i])?;
            for c in r.chars() {
                match entity(c) {
                    Some(replacement) => write.write_str(replacement)?,
                    None => write!(write, "&#{};", c as u32)?,
                }
            }
            p = i + r.len();
        }
        write.write_str(if p == 0 { input } else { &input[p..] })
    }
}

impl Escape for AsciiEscaper {
    fn escape_content<W: fmt::Write>(&self, input: &str, write: &mut W) -> fmt::Result {
        Self::escape(input, EscapeMode::Content, write)
    }

    fn escape_attr_value_apos<W: fmt::Write>(&self, input: &str, write: &mut W) -> fmt::Result {
        Self::escape(input, EscapeMode::AttributeApos, write)
    }

    fn escape_attr_value_quot<W: fmt::Write>(&self, input: &str, write: &mut W) -> fmt::Result {
        Self::escape(input, EscapeMode::AttributeQuot, write)
    }
}

/// Escapes `input` for the given position in a document.
pub fn escape(input: &str, mode: EscapeMode) -> String {
    let mut output = String::with_capacity(input.len());
    // writing into a `String` cannot fail
    let _ = DefaultEscaper.escape_with(input, mode, &mut output);
    output
}
