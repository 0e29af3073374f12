//! Line-oriented PO/POT parser.
//!
//! The parser is a small state machine over keyword lines (`msgctxt`,
//! `msgid`, `msgid_plural`, `msgstr`, `msgstr[N]`), string continuation
//! lines and `#` comments. It never recovers: the first malformed line
//! fails the whole document with its 1-based line number.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use encoding_rs::UTF_8;

use crate::core::{
    Catalog, Entry,
    diagnostics::{FuzzyAction, FuzzyWarning, StderrSink, WarningSink},
    encoding::{decode, detect_header_charset, lookup_encoding},
    error::{PoError, Result},
    po::escape::parse_quoted,
};

/// Fuzzy-entry policy applied to every finished record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Treat the translation of a `#, fuzzy` entry as absent.
    pub ignore_fuzzy: bool,
    /// Emit a warning for every fuzzy entry, whichever way it was handled.
    pub report_warning: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            ignore_fuzzy: true,
            report_warning: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between records; only comments and opening keywords are legal.
    Idle,
    /// `msgctxt` seen, `msgid` must follow.
    ExpectMsgid,
    /// `msgid` seen; `msgid_plural`, `msgstr` or continuation may follow.
    ExpectMsgidOrPlural,
    /// `msgid_plural` seen; only `msgstr[N]` or continuation may follow.
    ExpectPluralMsgstr,
    /// Inside a singular `msgstr`.
    Msgstr,
    /// Inside `msgstr[N]`, N being the last slot filled.
    PluralMsgstr,
}

pub struct PoParser {
    options: ParserOptions,
    sink: Arc<dyn WarningSink>,
}

impl Default for PoParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl PoParser {
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            sink: Arc::new(StderrSink),
        }
    }

    /// Replace the destination of fuzzy warnings (stderr by default).
    pub fn with_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Read and parse a PO file.
    ///
    /// UTF-8 input is used as is; anything else is decoded with the charset
    /// named in the file's header.
    pub fn parse_file(&self, path: &Path) -> Result<Catalog> {
        let bytes = fs::read(path).map_err(|e| PoError::io(path, e))?;
        let text = match std::str::from_utf8(&bytes) {
            Ok(text) => text.trim_start_matches('\u{feff}').to_string(),
            Err(_) => {
                let encoding = match detect_header_charset(&bytes) {
                    Some(charset) => lookup_encoding(&charset)?,
                    None => UTF_8,
                };
                decode(&bytes, encoding, path)?.into_owned()
            }
        };
        self.parse_str(&text, path)
    }

    /// Parse already-decoded text. `path` is only used in diagnostics.
    pub fn parse_str(&self, text: &str, path: &Path) -> Result<Catalog> {
        let mut catalog = Catalog::new();
        self.parse_into(text, path, &mut catalog)?;
        Ok(catalog)
    }

    /// Parse `text` and add its entries to `catalog`.
    pub fn parse_into(&self, text: &str, path: &Path, catalog: &mut Catalog) -> Result<()> {
        let mut machine = Machine {
            parser: self,
            path: path.to_path_buf(),
            catalog,
            state: State::Idle,
            pending: Pending::default(),
            line: 0,
        };
        for (index, line) in text.lines().enumerate() {
            machine.line = index + 1;
            machine.feed(line)?;
        }
        machine.finish_record()
    }

    /// Fuzzy policy. Runs after the record is fully parsed and never
    /// affects what was recognised.
    fn apply_fuzzy_policy(&self, entry: &mut Entry, path: &Path) {
        if entry.is_header() || entry.obsolete || !entry.is_fuzzy() {
            return;
        }
        let action = if self.options.ignore_fuzzy {
            entry.clear_translation();
            FuzzyAction::Ignored
        } else {
            FuzzyAction::Used
        };
        if self.options.report_warning {
            self.sink.warn(&FuzzyWarning {
                action,
                path: path.to_path_buf(),
                msgid: entry.msgid.clone(),
            });
        }
    }
}

/// Record under construction.
#[derive(Debug, Default)]
struct Pending {
    entry: Entry,
    translator: Vec<String>,
    extracted: Vec<String>,
    previous: Vec<String>,
    /// Line of the first keyword, reported for duplicate keys.
    start_line: usize,
}

impl Pending {
    fn into_entry(self) -> Entry {
        let mut entry = self.entry;
        entry.translator_comment = join_lines(self.translator);
        entry.extracted_comment = join_lines(self.extracted);
        entry.previous = join_lines(self.previous);
        entry
    }
}

fn join_lines(lines: Vec<String>) -> Option<String> {
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

struct Machine<'a> {
    parser: &'a PoParser,
    path: PathBuf,
    catalog: &'a mut Catalog,
    state: State,
    pending: Pending,
    line: usize,
}

impl Machine<'_> {
    fn error(&self, message: impl Into<String>) -> PoError {
        PoError::parse(&self.path, self.line, message)
    }

    fn feed(&mut self, raw: &str) -> Result<()> {
        let line = raw.trim();
        if line.is_empty() {
            return self.finish_record();
        }

        if let Some(rest) = line.strip_prefix("#~") {
            return self.feed_obsolete(rest.trim_start());
        }
        if let Some(rest) = line.strip_prefix('#') {
            return self.feed_comment(rest);
        }
        if line.starts_with('"') {
            return self.feed_continuation(line);
        }
        self.feed_keyword(line)
    }

    fn feed_obsolete(&mut self, rest: &str) -> Result<()> {
        if let Some(previous) = rest.strip_prefix('|') {
            if self.in_msgstr() {
                self.finish_record()?;
            }
            self.pending.entry.obsolete = true;
            self.pending.previous.push(strip_marker_space(previous).to_string());
            return Ok(());
        }
        if rest.is_empty() {
            return Ok(());
        }
        if rest.starts_with('"') {
            return self.feed_continuation(rest);
        }
        let opens_record = rest.starts_with("msgctxt")
            || (rest.starts_with("msgid") && !rest.starts_with("msgid_plural"));
        if opens_record && !matches!(self.state, State::Idle | State::ExpectMsgid) {
            self.finish_record()?;
        }
        self.pending.entry.obsolete = true;
        self.feed_keyword(rest)
    }

    fn feed_comment(&mut self, rest: &str) -> Result<()> {
        match self.state {
            State::Idle => {}
            State::Msgstr | State::PluralMsgstr => self.finish_record()?,
            State::ExpectMsgid | State::ExpectMsgidOrPlural | State::ExpectPluralMsgstr => {
                return Err(self.error("comment inside an entry"));
            }
        }

        let pending = &mut self.pending;
        if let Some(text) = rest.strip_prefix(':') {
            pending
                .entry
                .references
                .extend(text.split_whitespace().map(str::to_string));
        } else if let Some(text) = rest.strip_prefix('.') {
            pending.extracted.push(strip_marker_space(text).to_string());
        } else if let Some(text) = rest.strip_prefix(',') {
            pending.entry.flags.extend(
                text.split(',')
                    .map(str::trim)
                    .filter(|flag| !flag.is_empty())
                    .map(str::to_string),
            );
        } else if let Some(text) = rest.strip_prefix('|') {
            pending.previous.push(strip_marker_space(text).to_string());
        } else {
            pending.translator.push(strip_marker_space(rest).to_string());
        }
        Ok(())
    }

    fn feed_continuation(&mut self, line: &str) -> Result<()> {
        if self.state == State::Idle {
            return Err(self.error("string without a keyword"));
        }
        let value = self.quoted(line)?;
        let entry = &mut self.pending.entry;
        match self.state {
            State::Idle => {}
            State::ExpectMsgid => {
                if let Some(msgctxt) = entry.msgctxt.as_mut() {
                    msgctxt.push_str(&value);
                }
            }
            State::ExpectMsgidOrPlural => entry.msgid.push_str(&value),
            State::ExpectPluralMsgstr => {
                if let Some(plural) = entry.msgid_plural.as_mut() {
                    plural.push_str(&value);
                }
            }
            State::Msgstr | State::PluralMsgstr => {
                if let Some(slot) = entry.msgstr.last_mut() {
                    slot.push_str(&value);
                }
            }
        }
        Ok(())
    }

    fn feed_keyword(&mut self, line: &str) -> Result<()> {
        let split = line
            .find(|c: char| c.is_whitespace() || c == '"')
            .unwrap_or(line.len());
        let (keyword, rest) = line.split_at(split);

        match keyword {
            "msgctxt" => {
                match self.state {
                    State::Idle => {}
                    State::ExpectMsgid => return Err(self.error("msgctxt without msgid")),
                    _ => self.finish_record()?,
                }
                let value = self.quoted(rest)?;
                self.begin_record();
                self.pending.entry.msgctxt = Some(value);
                self.state = State::ExpectMsgid;
            }
            "msgid" => {
                match self.state {
                    State::Idle => self.begin_record(),
                    State::ExpectMsgid => {}
                    _ => {
                        // A record may legitimately end without any msgstr.
                        self.finish_record()?;
                        self.begin_record();
                    }
                }
                self.pending.entry.msgid = self.quoted(rest)?;
                self.state = State::ExpectMsgidOrPlural;
            }
            "msgid_plural" => {
                if self.state != State::ExpectMsgidOrPlural {
                    return Err(self.error("msgid_plural without msgid"));
                }
                self.pending.entry.msgid_plural = Some(self.quoted(rest)?);
                self.state = State::ExpectPluralMsgstr;
            }
            "msgstr" => {
                match self.state {
                    State::ExpectMsgidOrPlural => {}
                    State::ExpectPluralMsgstr => {
                        return Err(self.error("plural entry needs msgstr[N] lines"));
                    }
                    _ => return Err(self.error("msgstr without msgid")),
                }
                self.pending.entry.msgstr = vec![self.quoted(rest)?];
                self.state = State::Msgstr;
            }
            _ if keyword.starts_with("msgstr[") => {
                let index = keyword
                    .strip_prefix("msgstr[")
                    .and_then(|s| s.strip_suffix(']'))
                    .and_then(|s| s.parse::<usize>().ok())
                    .ok_or_else(|| self.error(format!("invalid plural index in `{}`", keyword)))?;
                match self.state {
                    State::ExpectPluralMsgstr | State::PluralMsgstr => {}
                    State::ExpectMsgidOrPlural => {
                        return Err(self.error("msgstr[N] without msgid_plural"));
                    }
                    _ => return Err(self.error("msgstr without msgid")),
                }
                let expected = self.pending.entry.msgstr.len();
                if index != expected {
                    return Err(self.error(format!(
                        "expected msgstr[{}], found msgstr[{}]",
                        expected, index
                    )));
                }
                let value = self.quoted(rest)?;
                self.pending.entry.msgstr.push(value);
                self.state = State::PluralMsgstr;
            }
            _ => return Err(self.error(format!("unexpected token `{}`", keyword))),
        }
        Ok(())
    }

    fn quoted(&self, input: &str) -> Result<String> {
        let (value, rest) = parse_quoted(input).map_err(|message| self.error(message))?;
        if !rest.trim().is_empty() {
            return Err(self.error(format!("unexpected text after string: `{}`", rest.trim())));
        }
        Ok(value)
    }

    fn in_msgstr(&self) -> bool {
        matches!(self.state, State::Msgstr | State::PluralMsgstr)
    }

    fn begin_record(&mut self) {
        if self.pending.start_line == 0 {
            self.pending.start_line = self.line;
        }
    }

    /// Commit the pending record, if there is one, and return to Idle.
    fn finish_record(&mut self) -> Result<()> {
        if self.state == State::Idle {
            // Comments seen so far belong to the next record.
            return Ok(());
        }
        if self.state == State::ExpectMsgid {
            return Err(self.error("msgctxt without msgid"));
        }

        let pending = std::mem::take(&mut self.pending);
        let start_line = pending.start_line;
        let mut entry = pending.into_entry();
        if entry.msgid.is_empty() && !entry.obsolete && !entry.is_header() {
            return Err(PoError::parse(
                &self.path,
                start_line,
                "empty msgid is reserved for the header entry",
            ));
        }
        self.parser.apply_fuzzy_policy(&mut entry, &self.path);
        self.state = State::Idle;

        self.catalog.insert(entry).map_err(|err| match err {
            PoError::DuplicateKey { key } => PoError::parse(
                &self.path,
                start_line,
                format!("duplicate message definition: {}", key),
            ),
            other => other,
        })
    }
}

/// Comment text after its marker, minus the single separating space.
fn strip_marker_space(text: &str) -> &str {
    text.strip_prefix(' ').unwrap_or(text)
}
