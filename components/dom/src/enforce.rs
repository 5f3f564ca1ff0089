//! Sanitizers applied whenever a value is assigned to a node.
//!
//! Every function here either returns a value that can be written to a
//! document verbatim, or `None` when nothing legal remains.

use xmlcraft_chars::{is_name_char, is_name_start_char, is_pubid_char};

fn log_altered(what: &str, raw: &str, result: Option<&str>) {
    match result {
        Some(value) if value != raw => log::trace!("{} {:?} enforced to {:?}", what, raw, value),
        Some(_) => {}
        None => log::trace!("{} {:?} rejected", what, raw),
    }
}

/// Drops every character that does not fit the XML `Name` production.
///
/// The first kept character must be a name start character, all following
/// kept characters name characters. `"1Foo/Bar?"` becomes `"FooBar"`.
pub fn enforce_name(raw: &str) -> Option<String> {
    let mut result = String::with_capacity(raw.len());
    for c in raw.chars() {
        let accepted = if result.is_empty() {
            is_name_start_char(c)
        } else {
            is_name_char(c)
        };
        if accepted {
            result.push(c);
        }
    }

    let result = if result.is_empty() { None } else { Some(result) };
    log_altered("name", raw, result.as_deref());
    result
}

/// Collapses dash runs so that the content can sit between `<!--` and `-->`.
///
/// A run of `-` is replaced by a single `-` if it is preceded and followed
/// by other characters; leading and trailing runs are removed.
pub fn enforce_comment_content(raw: &str) -> Option<String> {
    let mut result = String::with_capacity(raw.len());
    let mut pending_minus = false;
    for c in raw.chars() {
        if c == '-' {
            pending_minus = !result.is_empty();
        } else {
            if pending_minus {
                result.push('-');
                pending_minus = false;
            }
            result.push(c);
        }
    }

    let result = if result.is_empty() { None } else { Some(result) };
    log_altered("comment", raw, result.as_deref());
    result
}

fn is_reserved_target(name: &str) -> bool {
    name.len() == 3 && name.eq_ignore_ascii_case("xml")
}

/// A name that is not `xml` in any letter case.
pub fn enforce_pi_target(raw: &str) -> Option<String> {
    match enforce_name(raw) {
        Some(name) if is_reserved_target(&name) => {
            log::trace!("processing instruction target {:?} is reserved", raw);
            None
        }
        name => name,
    }
}

/// Removes every `>` that directly follows a `?`, so `?>` never occurs.
pub fn enforce_pi_value(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut last_was_question_mark = false;
    for c in raw.chars() {
        if c == '>' && last_was_question_mark {
            continue;
        }
        result.push(c);
        last_was_question_mark = c == '?';
    }

    log_altered("processing instruction value", raw, Some(&result));
    result
}

/// Chooses the delimiter of a system literal and removes the characters
/// that would collide with it.
///
/// The first quote character decides: after a leading `'` the literal is
/// delimited by `"` and every `"` is removed; after a leading `"` it is
/// delimited by `'` and every `'` is removed. Returns whether `"` is the
/// delimiter together with the sanitized literal.
pub fn enforce_doctype_system_id(raw: &str) -> (bool, String) {
    let mut use_quot: Option<bool> = None;
    let mut result = String::with_capacity(raw.len());
    for c in raw.chars() {
        match (c, use_quot) {
            ('\'', None) => {
                use_quot = Some(true);
                result.push(c);
            }
            ('"', None) => {
                use_quot = Some(false);
                result.push(c);
            }
            ('\'', Some(false)) | ('"', Some(true)) => {}
            _ => result.push(c),
        }
    }

    log_altered("system identifier", raw, Some(&result));
    (use_quot.unwrap_or(true), result)
}

/// Keeps only `PubidChar`s.
pub fn enforce_doctype_public_id(raw: &str) -> String {
    let result: String = raw.chars().filter(|&c| is_pubid_char(c)).collect();
    log_altered("public identifier", raw, Some(&result));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_empty_and_digits_only() {
        assert_eq!(None, enforce_name(""));
        assert_eq!(None, enforce_name("123"));
        assert_eq!(None, enforce_name("<?-"));
    }

    #[test]
    fn name_drops_and_concatenates() {
        assert_eq!(Some("FooBar".to_string()), enforce_name("1Foo/Bar?"));
        assert_eq!(Some("test".to_string()), enforce_name("<test/>"));
        assert_eq!(Some("foo".to_string()), enforce_name("-fo o <"));
        assert_eq!(Some("bar".to_string()), enforce_name("<bar/>"));
    }

    #[test]
    fn name_keeps_valid() {
        for name in ["a", "a-b.c", "ns:el", "_x1", "élan", "名前"] {
            assert_eq!(Some(name.to_string()), enforce_name(name));
        }
    }

    #[test]
    fn name_start_rule_applies_after_drops() {
        assert_eq!(Some("a1".to_string()), enforce_name("-.1a1"));
        assert_eq!(Some("a\u{b7}".to_string()), enforce_name("\u{b7}a\u{b7}"));
    }

    #[test]
    fn comment_collapses_dashes() {
        assert_eq!(
            Some("Foo-Bar".to_string()),
            enforce_comment_content("--Foo----Bar--")
        );
        assert_eq!(
            Some("foo-bar".to_string()),
            enforce_comment_content("--foo--bar--")
        );
        assert_eq!(Some("a-b".to_string()), enforce_comment_content("a-b"));
        assert_eq!(
            Some("This is a comment, multiple - are collapsed!".to_string()),
            enforce_comment_content("This is a comment, multiple --- are collapsed!--")
        );
    }

    #[test]
    fn comment_only_dashes() {
        assert_eq!(None, enforce_comment_content("----"));
        assert_eq!(None, enforce_comment_content("-"));
        assert_eq!(None, enforce_comment_content(""));
    }

    #[test]
    fn comment_keeps_valid() {
        assert_eq!(Some(" a b ".to_string()), enforce_comment_content(" a b "));
    }

    #[test]
    fn pi_target_reserved() {
        assert_eq!(None, enforce_pi_target("XML"));
        assert_eq!(None, enforce_pi_target("xMl"));
        assert_eq!(None, enforce_pi_target("xml"));
        assert_eq!(None, enforce_pi_target("<x m l>"));
    }

    #[test]
    fn pi_target_allowed() {
        assert_eq!(Some("xyz".to_string()), enforce_pi_target("xyz"));
        assert_eq!(Some("xmm".to_string()), enforce_pi_target("xmm"));
        assert_eq!(Some("xml-stylesheet".to_string()), enforce_pi_target("xml-stylesheet"));
        assert_eq!(Some("foo".to_string()), enforce_pi_target("-fo o <"));
        assert_eq!(None, enforce_pi_target("<?-"));
    }

    #[test]
    fn pi_value_splits_terminator() {
        assert_eq!("bar?", enforce_pi_value("bar?>"));
        assert_eq!("PI? content", enforce_pi_value("PI?> content"));
        assert_eq!("a?", enforce_pi_value("a?>>"));
        assert_eq!("a>b", enforce_pi_value("a>b"));
        assert_eq!("??", enforce_pi_value("??>"));
    }

    #[test]
    fn system_id_first_quot() {
        assert_eq!(
            (false, "\"foo\"bar".to_string()),
            enforce_doctype_system_id("\"foo'\"bar")
        );
    }

    #[test]
    fn system_id_first_apos() {
        assert_eq!(
            (true, "foo'bar".to_string()),
            enforce_doctype_system_id("foo'bar\"")
        );
    }

    #[test]
    fn system_id_without_quotes() {
        assert_eq!(
            (true, "http://example.org/a.dtd".to_string()),
            enforce_doctype_system_id("http://example.org/a.dtd")
        );
        assert_eq!((true, String::new()), enforce_doctype_system_id(""));
    }

    #[test]
    fn public_id_filters() {
        assert_eq!("Foo Bar", enforce_doctype_public_id("<Foo Bar>"));
        assert_eq!(
            "-//W3C//DTD XHTML 1.0 Strict//EN",
            enforce_doctype_public_id("-//W3C//DTD XHTML 1.0 Strict//EN")
        );
        assert_eq!("ab", enforce_doctype_public_id("a\"\tä&b"));
    }
}
