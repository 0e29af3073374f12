//! Compiled lookup table: flat legacy keys to translations.
//!
//! This is what a runtime consumer sees. A message that is present but
//! untranslated maps to `None`, which `get` reports exactly like a missing
//! message; only `contains_key` can tell the two apart.

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::Catalog;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageTable {
    messages: IndexMap<String, Option<String>>,
}

impl MessageTable {
    /// Active entries of `catalog`, header included, in catalog order.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let messages = catalog
            .iter()
            .filter(|entry| !entry.obsolete)
            .map(|entry| (entry.key().to_legacy_string(), entry.translation()))
            .collect();
        Self { messages }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).and_then(|value| value.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages, the header excluded.
    pub fn message_count(&self) -> usize {
        self.messages.keys().filter(|key| !key.is_empty()).count()
    }

    /// Number of messages with a translation, the header excluded.
    pub fn translated_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|(key, value)| !key.is_empty() && value.is_some())
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.messages
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }
}
