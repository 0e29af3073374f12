//! Re-synchronise an existing translation catalog with a fresh template.
//!
//! Matching is by exact [`MessageKey`](crate::core::MessageKey) only. No
//! similarity matching is attempted for changed source strings.

use crate::core::{
    Catalog, Entry,
    po::{HeaderFields, header::DEFAULT_PACKAGE_NAME},
};

/// Plural slot count when the existing header does not say.
const DEFAULT_NPLURALS: usize = 2;

/// What happened to the entries during a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Template keys found in the existing catalog.
    pub matched: usize,
    /// Template keys that came back from an obsolete entry.
    pub revived: usize,
    /// Template keys with no earlier translation.
    pub untranslated: usize,
    /// Existing entries no longer in the template.
    pub obsoleted: usize,
}

/// Build a new catalog from `template`, carrying translations over from
/// `existing`. Neither input is modified.
pub fn merge(existing: &Catalog, template: &Catalog) -> (Catalog, MergeReport) {
    let mut merged = Catalog::new();
    let mut report = MergeReport::default();

    if let Some(header) = merge_header(existing.header(), template.header()) {
        merged.set_header(header);
    }

    let nplurals = existing
        .header()
        .map(HeaderFields::from_entry)
        .and_then(|fields| fields.nplurals())
        .unwrap_or(DEFAULT_NPLURALS);

    for template_entry in template.messages() {
        let key = template_entry.key();
        let entry = if let Some(old) = existing.get(&key) {
            report.matched += 1;
            carry_over(old, template_entry)
        } else if let Some(old) = existing.get_obsolete(&key) {
            report.revived += 1;
            carry_over(old, template_entry)
        } else {
            report.untranslated += 1;
            let mut fresh = Entry::untranslated(key, nplurals);
            fresh.extracted_comment = template_entry.extracted_comment.clone();
            fresh.references = template_entry.references.clone();
            fresh.flags = template_entry.flags.clone();
            fresh
        };
        merged.insert_or_merge_references(entry);
    }

    for old in existing.messages() {
        if template.contains_key(&old.key()) {
            continue;
        }
        report.obsoleted += 1;
        let mut ghost = old.clone();
        ghost.obsolete = true;
        ghost.references.clear();
        ghost.previous = None;
        merged.insert_or_merge_references(ghost);
    }

    for old in existing.obsolete_entries() {
        if template.contains_key(&old.key()) {
            continue;
        }
        merged.insert_or_merge_references(old.clone());
    }

    (merged, report)
}

/// Existing translation and translator data on top of the template's
/// source-side data.
fn carry_over(old: &Entry, template_entry: &Entry) -> Entry {
    let mut flags = template_entry.flags.clone();
    flags.extend(old.flags.iter().cloned());
    Entry {
        msgid: template_entry.msgid.clone(),
        msgid_plural: template_entry.msgid_plural.clone(),
        msgctxt: template_entry.msgctxt.clone(),
        msgstr: old.msgstr.clone(),
        translator_comment: old.translator_comment.clone(),
        extracted_comment: template_entry.extracted_comment.clone(),
        references: template_entry.references.clone(),
        flags,
        previous: None,
        obsolete: false,
    }
}

/// Keep the translator's header but take the template's creation date.
fn merge_header(existing: Option<&Entry>, template: Option<&Entry>) -> Option<Entry> {
    match (existing, template) {
        (Some(existing), Some(template)) => {
            let mut header = existing.clone();
            let template_fields = HeaderFields::from_entry(template);
            if let Some(date) = template_fields.get("POT-Creation-Date") {
                let mut fields = HeaderFields::from_entry(existing);
                fields.set("POT-Creation-Date", date);
                header.msgstr = vec![fields.to_msgstr()];
            }
            Some(header)
        }
        (Some(existing), None) => Some(existing.clone()),
        (None, Some(template)) => Some(template.clone()),
        (None, None) => None,
    }
}

/// Project name recorded in a header, for report lines.
pub fn project_name(catalog: &Catalog) -> String {
    catalog
        .header()
        .map(HeaderFields::from_entry)
        .and_then(|fields| fields.get("Project-Id-Version").map(str::to_string))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_PACKAGE_NAME.to_string())
}
