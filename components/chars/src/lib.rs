//! Character classes of the XML 1.0 grammar used when building documents.

use crate::Class::{Name, NameStart, PubId};

fn search_table(c: char, table: &[(char, char)]) -> bool {
    table.iter().any(|rng| c >= rng.0 && c <= rng.1)
}

/// Non-ASCII part of `NameStartChar`.
const NAME_START_CHAR_TABLE: &[(char, char)] = &[
    ('\u{c0}', '\u{d6}'),
    ('\u{d8}', '\u{f6}'),
    ('\u{f8}', '\u{2ff}'),
    ('\u{370}', '\u{37d}'),
    ('\u{37f}', '\u{1fff}'),
    ('\u{200c}', '\u{200d}'),
    ('\u{2070}', '\u{218f}'),
    ('\u{2c00}', '\u{2fef}'),
    ('\u{3001}', '\u{d7ff}'),
    ('\u{f900}', '\u{fdcf}'),
    ('\u{fdf0}', '\u{fffd}'),
    ('\u{10000}', '\u{effff}'),
];

/// Non-ASCII additions of `NameChar` on top of `NameStartChar`.
const NAME_CHAR_EXTRA_TABLE: &[(char, char)] = &[
    ('\u{b7}', '\u{b7}'),
    ('\u{300}', '\u{36f}'),
    ('\u{203f}', '\u{2040}'),
];

#[repr(u8)]
enum Class {
    NameStart = 0,
    Name = 1,
    PubId = 2,
}

#[inline]
const fn mask(class: Class) -> u8 {
    1 << (class as u8)
}

const fn mask_if(class: Class, pred: bool) -> u8 {
    if pred {
        mask(class)
    } else {
        0
    }
}

const fn ascii_class_mask(c: u8) -> u8 {
    mask_if(
        NameStart,
        c == b':' || c == b'_' || c.is_ascii_alphabetic(),
    ) | mask_if(
        Name,
        c == b':' || c == b'_' || c == b'-' || c == b'.' || c.is_ascii_alphanumeric(),
    ) | mask_if(
        PubId,
        matches!(
            c,
            b' ' | b'\r' | b'\n'
            | b'!' | b':' | b'=' | b'?' | b';' | b'@' | b'_'
            | b'\''..=b'/'
            | b'#'..=b'%'
            | b'0'..=b'9'
            | b'A'..=b'Z'
            | b'a'..=b'z'),
    )
}

const fn build_ascii_class_map() -> [u8; 128] {
    let mut map = [0u8; 128];
    let mut i = 0;
    while i < 128 {
        map[i] = ascii_class_mask(i as u8);
        i += 1;
    }
    map
}

const ASCII_CLASS_MAP: [u8; 128] = build_ascii_class_map();

#[inline]
fn check_ascii(c: u8, class: Class) -> bool {
    match ASCII_CLASS_MAP.get(c as usize) {
        Some(classes) => classes & mask(class) != 0,
        None => false,
    }
}

pub trait XmlChar {
    /// https://www.w3.org/TR/REC-xml/#NT-NameStartChar
    fn is_xml_name_start_char(&self) -> bool;

    /// https://www.w3.org/TR/REC-xml/#NT-NameChar
    fn is_xml_name_char(&self) -> bool;

    /// `PubidChar ::= #x20 | #xD | #xA | [a-zA-Z0-9] | [-'()+,./:=?;!*#@$_%]`
    fn is_xml_pubid_char(&self) -> bool;
}

impl XmlChar for char {
    #[inline]
    fn is_xml_name_start_char(&self) -> bool {
        if self.is_ascii() {
            check_ascii(*self as u8, NameStart)
        } else {
            search_table(*self, NAME_START_CHAR_TABLE)
        }
    }

    #[inline]
    fn is_xml_name_char(&self) -> bool {
        if self.is_ascii() {
            check_ascii(*self as u8, Name)
        } else {
            search_table(*self, NAME_START_CHAR_TABLE)
                || search_table(*self, NAME_CHAR_EXTRA_TABLE)
        }
    }

    #[inline]
    fn is_xml_pubid_char(&self) -> bool {
        self.is_ascii() && check_ascii(*self as u8, PubId)
    }
}

/// Whether `c` may start an XML name.
#[inline]
pub fn is_name_start_char(c: char) -> bool {
    c.is_xml_name_start_char()
}

/// Whether `c` may appear after the first character of an XML name.
#[inline]
pub fn is_name_char(c: char) -> bool {
    c.is_xml_name_char()
}

/// Whether `c` may appear in a DOCTYPE public identifier.
#[inline]
pub fn is_pubid_char(c: char) -> bool {
    c.is_xml_pubid_char()
}
