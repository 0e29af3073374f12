//! Serialise catalogs back to PO/POT text.

use std::path::Path;

use unicode_width::UnicodeWidthStr;

use crate::core::{
    Catalog, Entry,
    encoding::{encode, lookup_encoding},
    error::Result,
    po::escape::escape,
};

/// `#:` lines are wrapped to this many display columns.
const REFERENCE_WIDTH: usize = 79;

const OBSOLETE_PREFIX: &str = "#~ ";

/// Render a whole catalog.
///
/// The header entry, when present, comes first and is followed by a blank
/// line; the remaining entries are separated by blank lines.
pub fn write_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    if let Some(header) = catalog.header() {
        out.push_str(&write_entry(header));
        out.push('\n');
    }
    let blocks: Vec<String> = catalog
        .iter()
        .filter(|entry| entry.obsolete || !entry.is_header())
        .map(write_entry)
        .collect();
    out.push_str(&blocks.join("\n"));
    out
}

/// Render `catalog` and encode it with `to_code`.
pub fn write_catalog_encoded(catalog: &Catalog, to_code: &str, path: &Path) -> Result<Vec<u8>> {
    let text = write_catalog(catalog);
    let encoding = lookup_encoding(to_code)?;
    Ok(encode(&text, encoding, path)?.into_owned())
}

/// Render one entry, comments first.
pub fn write_entry(entry: &Entry) -> String {
    let mut out = String::new();

    if let Some(comment) = &entry.translator_comment {
        write_comment_lines(&mut out, "#", comment);
    }
    if let Some(comment) = &entry.extracted_comment {
        write_comment_lines(&mut out, "#.", comment);
    }
    write_references(&mut out, &entry.references);
    if !entry.flags.is_empty() {
        let flags: Vec<&str> = entry.flags.iter().map(String::as_str).collect();
        out.push_str("#, ");
        out.push_str(&flags.join(", "));
        out.push('\n');
    }
    if let Some(previous) = &entry.previous {
        let marker = if entry.obsolete { "#~|" } else { "#|" };
        write_comment_lines(&mut out, marker, previous);
    }

    let prefix = if entry.obsolete { OBSOLETE_PREFIX } else { "" };
    if let Some(msgctxt) = &entry.msgctxt {
        write_string(&mut out, prefix, "msgctxt", msgctxt);
    }
    write_string(&mut out, prefix, "msgid", &entry.msgid);
    match &entry.msgid_plural {
        Some(plural) => {
            write_string(&mut out, prefix, "msgid_plural", plural);
            if entry.msgstr.is_empty() {
                write_string(&mut out, prefix, "msgstr[0]", "");
                write_string(&mut out, prefix, "msgstr[1]", "");
            }
            for (index, msgstr) in entry.msgstr.iter().enumerate() {
                write_string(&mut out, prefix, &format!("msgstr[{}]", index), msgstr);
            }
        }
        None => {
            let msgstr = entry.msgstr.first().map(String::as_str).unwrap_or_default();
            write_string(&mut out, prefix, "msgstr", msgstr);
        }
    }
    out
}

fn write_comment_lines(out: &mut String, marker: &str, text: &str) {
    for line in text.split('\n') {
        out.push_str(marker);
        if !line.is_empty() {
            out.push(' ');
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn write_references(out: &mut String, references: &[String]) {
    let mut line = String::new();
    for reference in references {
        if !line.is_empty() && line.width() + 1 + reference.width() > REFERENCE_WIDTH {
            out.push_str(&line);
            out.push('\n');
            line.clear();
        }
        if line.is_empty() {
            line.push_str("#:");
        }
        line.push(' ');
        line.push_str(reference);
    }
    if !line.is_empty() {
        out.push_str(&line);
        out.push('\n');
    }
}

/// A value with an embedded newline is split after every `\n`, gettext
/// style, behind an empty first string.
fn write_string(out: &mut String, prefix: &str, keyword: &str, value: &str) {
    let segments: Vec<&str> = value.split_inclusive('\n').collect();
    if segments.len() > 1 {
        out.push_str(&format!("{}{} \"\"\n", prefix, keyword));
        for segment in segments {
            out.push_str(&format!("{}\"{}\"\n", prefix, escape(segment)));
        }
    } else {
        out.push_str(&format!("{}{} \"{}\"\n", prefix, keyword, escape(value)));
    }
}
