use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use xmlcraft_writer::escape::Escape;
use xmlcraft_writer::XmlElementWriter;

use crate::field::Name;

/// Outcome of assigning an attribute by name.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NameSetting {
    /// No valid name could be derived, nothing was changed.
    Invalid,
    /// The name had to be sanitized; the sanitized name was used.
    Modified,
    /// The name was used as given.
    Valid,
}

/// Attributes of an element, keyed by enforced names.
///
/// Iteration is in ascending name order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    map: BTreeMap<Name, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, or removes it if `value` is `None`.
    pub fn set(&mut self, name: &str, value: Option<&str>) -> NameSetting {
        let enforced = match Name::new(name) {
            Some(enforced) => enforced,
            None => {
                log::debug!("ignoring attribute with invalid name {:?}", name);
                return NameSetting::Invalid;
            }
        };

        let setting = if enforced == name {
            NameSetting::Valid
        } else {
            NameSetting::Modified
        };

        match value {
            Some(value) => {
                self.map.insert(enforced, value.to_string());
            }
            None => {
                self.map.remove(enforced.as_str());
            }
        }
        setting
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> NameSetting {
        let value = value.into();
        self.set(name, Some(&value))
    }

    pub fn remove(&mut self, name: &str) -> NameSetting {
        self.set(name, None)
    }

    pub fn update<'a>(&mut self, attributes: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (name, value) in attributes {
            self.set(name, Some(value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.map.iter(),
        }
    }

    pub(crate) fn write_xml<'ser, 'w, W: fmt::Write, E: Escape>(
        &self,
        mut element: XmlElementWriter<'ser, 'w, W, E>,
    ) -> Result<XmlElementWriter<'ser, 'w, W, E>, fmt::Error> {
        for (name, value) in self.iter() {
            element = element.attribute(name, value)?;
        }
        Ok(element)
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            write!(f, " {}=\"", name)?;
            xmlcraft_writer::DefaultEscaper.escape_attr_value_quot(value, f)?;
            f.write_str("\"")?;
        }
        Ok(())
    }
}

pub struct Iter<'a> {
    inner: btree_map::Iter<'a, Name, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<'a> Extend<(&'a str, &'a str)> for Attributes {
    fn extend<T: IntoIterator<Item = (&'a str, &'a str)>>(&mut self, iter: T) {
        self.update(iter)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut attributes = Attributes::new();
        attributes.update(iter);
        attributes
    }
}
