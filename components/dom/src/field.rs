//! Self-sanitizing field values.
//!
//! Each type can only be obtained through its enforcer, so holding one means
//! holding a value that is safe to write into a document as is.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use crate::enforce::{
    enforce_comment_content, enforce_doctype_public_id, enforce_doctype_system_id,
    enforce_name, enforce_pi_target, enforce_pi_value,
};

macro_rules! str_field {
    ($ty:ident) => {
        impl $ty {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl Deref for $ty {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl PartialEq<str> for $ty {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $ty {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

/// A string matching the XML `Name` production.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    pub fn new(raw: &str) -> Option<Self> {
        enforce_name(raw).map(Self)
    }

    /// Whether `raw` is already a valid name.
    pub fn is_valid(raw: &str) -> bool {
        Self::new(raw).map_or(false, |name| name.0 == raw)
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

str_field!(Name);

/// Comment content without `--` and without leading or trailing `-`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommentText(String);

impl CommentText {
    pub fn new(raw: &str) -> Option<Self> {
        enforce_comment_content(raw).map(Self)
    }
}

str_field!(CommentText);

/// A processing instruction target: a name other than `xml`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PiTarget(String);

impl PiTarget {
    pub fn new(raw: &str) -> Option<Self> {
        enforce_pi_target(raw).map(Self)
    }
}

str_field!(PiTarget);

/// Processing instruction data that never contains `?>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PiData(String);

impl PiData {
    pub fn new(raw: &str) -> Self {
        Self(enforce_pi_value(raw))
    }
}

str_field!(PiData);

/// A DOCTYPE public identifier made of `PubidChar`s only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PublicId(String);

impl PublicId {
    pub fn new(raw: &str) -> Self {
        Self(enforce_doctype_public_id(raw))
    }
}

str_field!(PublicId);

/// A DOCTYPE system literal together with its delimiter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SystemId {
    value: String,
    use_quot: bool,
}

impl SystemId {
    pub fn new(raw: &str) -> Self {
        let (use_quot, value) = enforce_doctype_system_id(raw);
        Self { value, use_quot }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// `true` if the literal is delimited by `"`, `false` for `'`.
    pub fn use_quot(&self) -> bool {
        self.use_quot
    }
}

impl Deref for SystemId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = if self.use_quot { '"' } else { '\'' };
        write!(f, "{}{}{}", quote, self.value, quote)
    }
}
