//! The aggregated content document.

use crate::section::Section;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One slot per [`Section`]; `None` means the section failed to load.
///
/// Serializes as a JSON object carrying every section key, with `null` for
/// missing sections. Deserializing is lenient: absent keys become `None`
/// and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBundle {
    sections: BTreeMap<Section, Option<Value>>,
}

impl ContentBundle {
    /// A bundle with every section missing.
    pub fn empty() -> Self {
        Self {
            sections: Section::ALL.into_iter().map(|s| (s, None)).collect(),
        }
    }

    pub fn get(&self, section: Section) -> Option<&Value> {
        self.sections.get(&section).and_then(Option::as_ref)
    }

    pub fn set(&mut self, section: Section, value: Option<Value>) {
        self.sections.insert(section, value);
    }

    /// Look up a value inside a section by JSON pointer, e.g. `/title`.
    pub fn value_at(&self, section: Section, pointer: &str) -> Option<&Value> {
        self.get(section)?.pointer(pointer)
    }

    /// Like [`value_at`](Self::value_at) but only for string values.
    pub fn text_at(&self, section: Section, pointer: &str) -> Option<&str> {
        self.value_at(section, pointer)?.as_str()
    }

    /// Sections that loaded.
    pub fn available(&self) -> impl Iterator<Item = Section> + '_ {
        self.sections
            .iter()
            .filter(|(_, v)| v.is_some())
            .map(|(s, _)| *s)
    }

    /// Sections that did not load.
    pub fn missing(&self) -> Vec<Section> {
        self.sections
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(s, _)| *s)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.sections.values().all(Option::is_some)
    }
}

impl Default for ContentBundle {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<(Section, Option<Value>)> for ContentBundle {
    fn from_iter<I: IntoIterator<Item = (Section, Option<Value>)>>(iter: I) -> Self {
        let mut bundle = Self::empty();
        for (section, value) in iter {
            bundle.set(section, value);
        }
        bundle
    }
}

impl Serialize for ContentBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Section::ALL.len()))?;
        for section in Section::ALL {
            map.serialize_entry(section.key(), &self.get(section))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ContentBundle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut raw = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Section::ALL
            .into_iter()
            .map(|section| {
                let value = raw.remove(section.key()).filter(|v| !v.is_null());
                (section, value)
            })
            .collect())
    }
}
