//! Catalog records and their composite keys.

use std::fmt;

use indexmap::IndexSet;

/// Separator between `msgctxt` and `msgid` in the legacy flat key.
pub const CONTEXT_SEPARATOR: char = '\u{4}';

/// Separator between `msgid` and `msgid_plural` in the legacy flat key, and
/// between plural translations in a compiled value.
pub const PLURAL_SEPARATOR: char = '\0';

pub const FUZZY_FLAG: &str = "fuzzy";

/// Identity of a message inside a catalog.
///
/// Two entries that differ only by context, or only by the presence of a
/// plural form, have different keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageKey {
    pub msgctxt: Option<String>,
    pub msgid: String,
    pub msgid_plural: Option<String>,
}

impl MessageKey {
    pub fn new(msgid: impl Into<String>) -> Self {
        Self {
            msgctxt: None,
            msgid: msgid.into(),
            msgid_plural: None,
        }
    }

    pub fn with_context(mut self, msgctxt: impl Into<String>) -> Self {
        self.msgctxt = Some(msgctxt.into());
        self
    }

    pub fn with_plural(mut self, msgid_plural: impl Into<String>) -> Self {
        self.msgid_plural = Some(msgid_plural.into());
        self
    }

    /// The header entry is the one with an empty msgid, no context and no
    /// plural.
    pub fn is_header(&self) -> bool {
        self.msgid.is_empty() && self.msgctxt.is_none() && self.msgid_plural.is_none()
    }

    /// Flat key as used by compiled catalogs: `ctxt \x04 msgid \0 plural`.
    pub fn to_legacy_string(&self) -> String {
        let mut key = String::new();
        if let Some(msgctxt) = &self.msgctxt {
            key.push_str(msgctxt);
            key.push(CONTEXT_SEPARATOR);
        }
        key.push_str(&self.msgid);
        if let Some(plural) = &self.msgid_plural {
            key.push(PLURAL_SEPARATOR);
            key.push_str(plural);
        }
        key
    }

    /// Inverse of [`MessageKey::to_legacy_string`].
    pub fn from_legacy_str(key: &str) -> Self {
        let (msgctxt, rest) = match key.split_once(CONTEXT_SEPARATOR) {
            Some((ctxt, rest)) => (Some(ctxt.to_string()), rest),
            None => (None, key),
        };
        let (msgid, msgid_plural) = match rest.split_once(PLURAL_SEPARATOR) {
            Some((msgid, plural)) => (msgid.to_string(), Some(plural.to_string())),
            None => (rest.to_string(), None),
        };
        Self {
            msgctxt,
            msgid,
            msgid_plural,
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(msgctxt) = &self.msgctxt {
            write!(f, "[{}] ", msgctxt)?;
        }
        write!(f, "{:?}", self.msgid)?;
        if let Some(plural) = &self.msgid_plural {
            write!(f, " / {:?}", plural)?;
        }
        Ok(())
    }
}

/// One catalog record.
///
/// `PartialEq` compares every field and is only used to recognise harmless
/// byte-identical duplicates. Merging matches entries by [`Entry::key`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub msgid: String,
    pub msgid_plural: Option<String>,
    pub msgctxt: Option<String>,
    /// One slot for singular entries, one per plural form otherwise. Empty
    /// when the source had no `msgstr` line at all.
    pub msgstr: Vec<String>,
    pub translator_comment: Option<String>,
    pub extracted_comment: Option<String>,
    /// `file:line` locations, in the order they were recorded.
    pub references: Vec<String>,
    pub flags: IndexSet<String>,
    /// Raw `#|` lines joined with `\n`.
    pub previous: Option<String>,
    pub obsolete: bool,
}

impl Entry {
    pub fn new(msgid: impl Into<String>) -> Self {
        Self {
            msgid: msgid.into(),
            ..Default::default()
        }
    }

    /// Build an untranslated entry for `key`, with `nplurals` empty slots
    /// for plural keys and a single empty slot otherwise.
    pub fn untranslated(key: MessageKey, nplurals: usize) -> Self {
        let slots = if key.msgid_plural.is_some() {
            nplurals.max(1)
        } else {
            1
        };
        Self {
            msgid: key.msgid,
            msgid_plural: key.msgid_plural,
            msgctxt: key.msgctxt,
            msgstr: vec![String::new(); slots],
            ..Default::default()
        }
    }

    pub fn with_context(mut self, msgctxt: impl Into<String>) -> Self {
        self.msgctxt = Some(msgctxt.into());
        self
    }

    pub fn with_plural(mut self, msgid_plural: impl Into<String>) -> Self {
        self.msgid_plural = Some(msgid_plural.into());
        self
    }

    pub fn with_msgstr<I, S>(mut self, msgstr: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.msgstr = msgstr.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.push(reference.into());
        self
    }

    pub fn key(&self) -> MessageKey {
        MessageKey {
            msgctxt: self.msgctxt.clone(),
            msgid: self.msgid.clone(),
            msgid_plural: self.msgid_plural.clone(),
        }
    }

    pub fn is_header(&self) -> bool {
        self.msgid.is_empty() && self.msgctxt.is_none() && self.msgid_plural.is_none()
    }

    pub fn is_plural(&self) -> bool {
        self.msgid_plural.is_some()
    }

    pub fn is_fuzzy(&self) -> bool {
        self.flags.contains(FUZZY_FLAG)
    }

    /// True when at least one msgstr slot holds text.
    pub fn is_translated(&self) -> bool {
        self.msgstr.iter().any(|s| !s.is_empty())
    }

    /// Compiled translation value: the single msgstr, or plural forms joined
    /// by NUL. `None` when nothing is translated.
    pub fn translation(&self) -> Option<String> {
        if !self.is_translated() {
            return None;
        }
        if self.is_plural() {
            let joined: Vec<&str> = self.msgstr.iter().map(String::as_str).collect();
            Some(joined.join(&PLURAL_SEPARATOR.to_string()))
        } else {
            self.msgstr.first().cloned()
        }
    }

    /// Drop every translation while keeping the slot layout.
    pub fn clear_translation(&mut self) {
        for slot in &mut self.msgstr {
            slot.clear();
        }
    }

    /// Append a line to the extracted comment unless it is already present.
    pub fn add_extracted_comment(&mut self, comment: &str) {
        match &mut self.extracted_comment {
            Some(existing) => {
                if !existing.lines().any(|line| line == comment) {
                    existing.push('\n');
                    existing.push_str(comment);
                }
            }
            None => self.extracted_comment = Some(comment.to_string()),
        }
    }
}
