//! Source scanners: the per-language collaborators of the extraction
//! pipeline.
//!
//! A scanner claims files (usually by extension) and turns decoded source
//! text into [`RawMessage`]s in source order. The built-in ones cover the
//! gettext call family in Ruby, ERB templates and JavaScript/TypeScript.

use std::path::Path;

use crate::core::error::Result;

pub mod erb;
pub mod js;
pub mod ruby;

pub use erb::ErbScanner;
pub use js::JsScanner;
pub use ruby::RubyScanner;

/// One translatable literal found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub msgid: String,
    pub msgid_plural: Option<String>,
    pub msgctxt: Option<String>,
    /// 1-based line of the call.
    pub line: usize,
    pub extracted_comment: Option<String>,
}

impl RawMessage {
    pub fn new(msgid: impl Into<String>, line: usize) -> Self {
        Self {
            msgid: msgid.into(),
            msgid_plural: None,
            msgctxt: None,
            line,
            extracted_comment: None,
        }
    }
}

pub trait Scanner: Send + Sync {
    /// Short name used in verbose output.
    fn name(&self) -> &str;

    /// Whether this scanner handles `path`.
    fn target(&self, path: &Path) -> bool;

    /// Extract messages from the already-decoded contents of `path`.
    fn parse(&self, path: &Path, source: &str) -> Result<Vec<RawMessage>>;
}

/// Case-insensitive extension check shared by the built-in scanners.
pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// How the arguments of a gettext-family call map onto a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallShape {
    /// `(msgid)`
    Singular,
    /// `(msgid, msgid_plural, n)`
    Plural,
    /// `(msgctxt, msgid)`
    Context,
    /// `(msgctxt, msgid, msgid_plural, n)`
    ContextPlural,
}

impl CallShape {
    /// Build a message from the leading string arguments of a call. Returns
    /// `None` when the call has too few literal arguments to be extracted.
    pub(crate) fn build(self, args: &[String], line: usize) -> Option<RawMessage> {
        let message = match (self, args) {
            (CallShape::Singular, [msgid, ..]) => RawMessage::new(msgid.clone(), line),
            (CallShape::Plural, [msgid, plural, ..]) => RawMessage {
                msgid_plural: Some(plural.clone()),
                ..RawMessage::new(msgid.clone(), line)
            },
            (CallShape::Context, [ctxt, msgid, ..]) => RawMessage {
                msgctxt: Some(ctxt.clone()),
                ..RawMessage::new(msgid.clone(), line)
            },
            (CallShape::ContextPlural, [ctxt, msgid, plural, ..]) => RawMessage {
                msgctxt: Some(ctxt.clone()),
                msgid_plural: Some(plural.clone()),
                ..RawMessage::new(msgid.clone(), line)
            },
            _ => return None,
        };
        Some(message)
    }
}
