//! ERB template scanner.
//!
//! Template text is blanked out and the Ruby code inside `<% %>` tags is kept
//! in place, so the Ruby scanner sees the original line numbers.

use std::path::Path;

use super::{RawMessage, RubyScanner, Scanner, has_extension};
use crate::core::error::Result;

const EXTENSIONS: &[&str] = &["erb", "rhtml"];

#[derive(Debug, Default, Clone, Copy)]
pub struct ErbScanner;

impl Scanner for ErbScanner {
    fn name(&self) -> &str {
        "erb"
    }

    fn target(&self, path: &Path) -> bool {
        has_extension(path, EXTENSIONS)
    }

    fn parse(&self, path: &Path, source: &str) -> Result<Vec<RawMessage>> {
        RubyScanner::scan(path, &to_ruby(source))
    }
}

/// Replace everything except newlines with spaces.
fn blank(text: &str, out: &mut String) {
    out.extend(text.chars().map(|c| if c == '\n' { '\n' } else { ' ' }));
}

/// Ruby code of an ERB template, with template text, comment tags and tag
/// delimiters blanked.
fn to_ruby(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(open) = rest.find("<%") {
        blank(&rest[..open], &mut out);
        let tag = &rest[open..];

        // `<%%` is an escaped delimiter in template text.
        if tag.starts_with("<%%") {
            blank(&tag[..3], &mut out);
            rest = &tag[3..];
            continue;
        }

        let comment = tag.starts_with("<%#");
        let body_start = if tag[2..].starts_with(['#', '=', '-']) { 3 } else { 2 };
        blank(&tag[..body_start], &mut out);

        let body = &tag[body_start..];
        let (code, close, after) = match body.find("%>") {
            Some(end) => (&body[..end], &body[end..end + 2], &body[end + 2..]),
            None => (body, "", ""),
        };
        let (code, trim) = match code.strip_suffix('-') {
            Some(code) => (code, "-"),
            None => (code, ""),
        };

        if comment {
            blank(code, &mut out);
        } else {
            out.push_str(code);
        }
        blank(trim, &mut out);
        blank(close, &mut out);
        rest = after;
    }
    blank(rest, &mut out);
    out
}
