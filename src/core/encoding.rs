//! Charset lookup and conversion between raw bytes and internal UTF-8 text.

use std::{borrow::Cow, path::Path, sync::LazyLock};

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;

use crate::core::error::{PoError, Result};

/// Labels used by Ruby and gettext tooling that the WHATWG registry in
/// `encoding_rs` does not know under that name.
const ALIASES: &[(&str, &str)] = &[
    ("cp932", "windows-31j"),
    ("ms932", "windows-31j"),
    ("sjis", "shift_jis"),
    ("shift-jis", "shift_jis"),
    ("eucjp", "euc-jp"),
    ("eucjp-ms", "euc-jp"),
    ("euc-jp-ms", "euc-jp"),
    ("cp51932", "euc-jp"),
    ("utf8", "utf-8"),
    ("ascii", "windows-1252"),
    ("us-ascii", "windows-1252"),
    ("ascii-8bit", "windows-1252"),
    ("binary", "windows-1252"),
    ("cp936", "gbk"),
    ("cp949", "euc-kr"),
    ("cp950", "big5"),
];

/// `coding: xxx` / `coding=xxx` as written in Emacs/Vim mode lines and
/// Ruby magic comments.
static MAGIC_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"coding[:=][ \t]*([\w.-]+)").expect("valid regex"));

/// `charset=xxx` inside a PO header `Content-Type` field.
static HEADER_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"charset=([\w.:-]+)").expect("valid regex"));

/// Resolve an encoding label, case-insensitively, through the alias table
/// and then the WHATWG label registry.
pub fn lookup_encoding(label: &str) -> Result<&'static Encoding> {
    let lowered = label.trim().to_ascii_lowercase();
    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, name)| *name)
        .unwrap_or(lowered.as_str());
    Encoding::for_label(canonical.as_bytes()).ok_or_else(|| PoError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// Encoding declared by a magic comment in the first two lines, if any.
pub fn detect_magic_comment(bytes: &[u8]) -> Option<String> {
    bytes
        .split(|b| *b == b'\n')
        .take(2)
        .find_map(|line| MAGIC_COMMENT.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
}

/// Charset named in a PO header, read straight from the undecoded bytes.
pub fn detect_header_charset(bytes: &[u8]) -> Option<String> {
    HEADER_CHARSET
        .captures(bytes)
        .and_then(|caps| caps.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
        .filter(|charset| charset != "CHARSET")
}

/// Decode `bytes` strictly; malformed input is an error rather than
/// replacement characters.
pub fn decode<'a>(bytes: &'a [u8], encoding: &'static Encoding, path: &Path) -> Result<Cow<'a, str>> {
    let bytes = if encoding == UTF_8 {
        bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
    } else {
        bytes
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| PoError::Encoding {
            path: path.to_path_buf(),
            encoding: encoding.name().to_string(),
            message: "malformed byte sequence".to_string(),
        })
}

/// Encode UTF-8 text for output; characters the target cannot represent
/// are an error.
pub fn encode<'a>(text: &'a str, encoding: &'static Encoding, path: &Path) -> Result<Cow<'a, [u8]>> {
    let (bytes, used, unmappable) = encoding.encode(text);
    if unmappable || used != encoding.output_encoding() {
        return Err(PoError::Encoding {
            path: path.to_path_buf(),
            encoding: encoding.name().to_string(),
            message: "text contains characters the output encoding cannot represent"
                .to_string(),
        });
    }
    Ok(bytes)
}
