//! Ordered, key-unique collection of catalog entries.

use indexmap::IndexMap;
use indexmap::map::Entry as MapEntry;

use crate::core::error::{PoError, Result};
use crate::core::{Entry, MessageKey};

/// Active and obsolete entries live in separate key spaces so a revived
/// message can sit next to its `#~` ghost.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Slot {
    obsolete: bool,
    key: MessageKey,
}

impl Slot {
    fn of(entry: &Entry) -> Self {
        Self {
            obsolete: entry.obsolete,
            key: entry.key(),
        }
    }

    fn active(key: MessageKey) -> Self {
        Self {
            obsolete: false,
            key,
        }
    }
}

/// Entries in first-seen order.
///
/// Iteration order is insertion order, which is what makes written output
/// byte-stable across runs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: IndexMap<Slot, Entry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Strict insertion.
    ///
    /// A byte-identical duplicate is accepted as a no-op; any other active
    /// entry under an existing key fails with [`PoError::DuplicateKey`].
    /// Repeated obsolete entries are not checked: the first one is kept.
    pub fn insert(&mut self, entry: Entry) -> Result<()> {
        match self.entries.entry(Slot::of(&entry)) {
            MapEntry::Occupied(existing) => {
                if entry.obsolete || *existing.get() == entry {
                    Ok(())
                } else {
                    Err(PoError::DuplicateKey { key: entry.key() })
                }
            }
            MapEntry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    /// Extraction-time insertion: a repeated key keeps its original position
    /// and only gains the new references, comments and flags.
    pub fn insert_or_merge_references(&mut self, entry: Entry) {
        match self.entries.entry(Slot::of(&entry)) {
            MapEntry::Occupied(mut existing) => {
                let existing = existing.get_mut();
                for reference in entry.references {
                    if !existing.references.contains(&reference) {
                        existing.references.push(reference);
                    }
                }
                if let Some(comment) = entry.extracted_comment {
                    for line in comment.lines() {
                        existing.add_extracted_comment(line);
                    }
                }
                existing.flags.extend(entry.flags);
            }
            MapEntry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }

    /// Put `header` first, replacing any existing header entry.
    pub fn set_header(&mut self, header: Entry) {
        let slot = Slot::of(&header);
        self.entries.shift_remove(&slot);
        self.entries.shift_insert(0, slot, header);
    }

    pub fn header(&self) -> Option<&Entry> {
        self.entries.get(&Slot::active(MessageKey::new("")))
    }

    /// Active (non-obsolete) entry lookup by key parts.
    pub fn lookup(
        &self,
        msgctxt: Option<&str>,
        msgid: &str,
        msgid_plural: Option<&str>,
    ) -> Option<&Entry> {
        let key = MessageKey {
            msgctxt: msgctxt.map(str::to_string),
            msgid: msgid.to_string(),
            msgid_plural: msgid_plural.map(str::to_string),
        };
        self.get(&key)
    }

    pub fn get(&self, key: &MessageKey) -> Option<&Entry> {
        self.entries.get(&Slot::active(key.clone()))
    }

    pub fn get_obsolete(&self, key: &MessageKey) -> Option<&Entry> {
        self.entries.get(&Slot {
            obsolete: true,
            key: key.clone(),
        })
    }

    pub fn contains_key(&self, key: &MessageKey) -> bool {
        self.get(key).is_some()
    }

    /// Translation for `key`; missing and untranslated entries both give
    /// `None`.
    pub fn get_translation(&self, key: &MessageKey) -> Option<String> {
        self.get(key).and_then(Entry::translation)
    }

    /// Every entry, obsolete ones included, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Entries that take part in lookup: not obsolete, not the header.
    pub fn messages(&self) -> impl Iterator<Item = &Entry> {
        self.entries
            .values()
            .filter(|entry| !entry.obsolete && !entry.is_header())
    }

    pub fn obsolete_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values().filter(|entry| entry.obsolete)
    }
}
