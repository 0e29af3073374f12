//! Metadata header entry: generation for new templates and field access
//! for existing catalogs.

use chrono::{DateTime, FixedOffset, Local};

use crate::core::{Entry, entry::FUZZY_FLAG};

pub const DEFAULT_PACKAGE_NAME: &str = "PACKAGE";
pub const DEFAULT_PACKAGE_VERSION: &str = "VERSION";
pub const DEFAULT_COPYRIGHT_HOLDER: &str = "THE PACKAGE'S COPYRIGHT HOLDER";
pub const DEFAULT_OUTPUT_ENCODING: &str = "UTF-8";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M%z";

/// Inputs to the generated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderOptions {
    pub package_name: String,
    pub package_version: String,
    pub msgid_bugs_address: String,
    pub copyright_holder: String,
    /// Output charset written into `Content-Type`.
    pub to_code: String,
    /// Used for both `POT-Creation-Date` and `PO-Revision-Date`.
    pub created_at: DateTime<FixedOffset>,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            package_version: DEFAULT_PACKAGE_VERSION.to_string(),
            msgid_bugs_address: String::new(),
            copyright_holder: DEFAULT_COPYRIGHT_HOLDER.to_string(),
            to_code: DEFAULT_OUTPUT_ENCODING.to_string(),
            created_at: Local::now().fixed_offset(),
        }
    }
}

impl HeaderOptions {
    pub fn timestamp(&self) -> String {
        format_timestamp(&self.created_at)
    }

    /// Build the fuzzy header entry, boilerplate comment block included.
    pub fn build_entry(&self) -> Entry {
        let comment = [
            "SOME DESCRIPTIVE TITLE.".to_string(),
            format!("Copyright (C) YEAR {}", self.copyright_holder),
            format!(
                "This file is distributed under the same license as the {} package.",
                self.package_name
            ),
            "FIRST AUTHOR <EMAIL@ADDRESS>, YEAR.".to_string(),
            String::new(),
        ]
        .join("\n");

        let time = self.timestamp();
        let mut fields = HeaderFields::default();
        fields.set(
            "Project-Id-Version",
            format!("{} {}", self.package_name, self.package_version),
        );
        fields.set("Report-Msgid-Bugs-To", &self.msgid_bugs_address);
        fields.set("POT-Creation-Date", &time);
        fields.set("PO-Revision-Date", &time);
        fields.set("Last-Translator", "FULL NAME <EMAIL@ADDRESS>");
        fields.set("Language-Team", "LANGUAGE <LL@li.org>");
        fields.set("Language", "");
        fields.set("MIME-Version", "1.0");
        fields.set("Content-Type", format!("text/plain; charset={}", self.to_code));
        fields.set("Content-Transfer-Encoding", "8bit");
        fields.set("Plural-Forms", "nplurals=INTEGER; plural=EXPRESSION;");

        let mut entry = Entry::new("")
            .with_msgstr([fields.to_msgstr()])
            .with_flag(FUZZY_FLAG);
        entry.translator_comment = Some(comment);
        entry
    }
}

pub fn format_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Ordered `Key: Value` fields of a header msgstr.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    fields: Vec<(String, String)>,
}

impl HeaderFields {
    /// Parse a header msgstr. Lines without a colon are skipped.
    pub fn parse(msgstr: &str) -> Self {
        let fields = msgstr
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect();
        Self { fields }
    }

    pub fn from_entry(entry: &Entry) -> Self {
        Self::parse(entry.msgstr.first().map(String::as_str).unwrap_or_default())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Replace the value of `key` in place, or append it.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    /// `charset=` parameter of `Content-Type`.
    pub fn charset(&self) -> Option<&str> {
        self.get("Content-Type")?
            .split(';')
            .find_map(|part| part.trim().strip_prefix("charset="))
            .map(str::trim)
            .filter(|charset| !charset.is_empty() && *charset != "CHARSET")
    }

    /// `nplurals=` of `Plural-Forms`, when it is a number.
    pub fn nplurals(&self) -> Option<usize> {
        self.get("Plural-Forms")?
            .split(';')
            .find_map(|part| part.trim().strip_prefix("nplurals="))
            .and_then(|n| n.trim().parse().ok())
    }

    pub fn to_msgstr(&self) -> String {
        self.fields
            .iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    format!("{}: \n", key)
                } else {
                    format!("{}: {}\n", key, value)
                }
            })
            .collect()
    }
}
