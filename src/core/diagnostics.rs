//! Non-fatal diagnostics raised while reading catalogs.
//!
//! Warnings are handed to a [`WarningSink`] supplied by the caller, so the
//! CLI can print them and tests can capture them.

use std::{
    fmt,
    io::{self, Write},
    path::PathBuf,
    sync::{Arc, Mutex},
};

/// What the parser did with a fuzzy entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyAction {
    Ignored,
    Used,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyWarning {
    pub action: FuzzyAction,
    pub path: PathBuf,
    pub msgid: String,
}

impl fmt::Display for FuzzyWarning {
    /// Same two-line text gettext prints, trailing newline included.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.action {
            FuzzyAction::Ignored => "ignored",
            FuzzyAction::Used => "used",
        };
        writeln!(f, "Warning: fuzzy message was {}.", verb)?;
        writeln!(f, "  {}: msgid '{}'", self.path.display(), self.msgid)
    }
}

pub trait WarningSink: Send + Sync {
    fn warn(&self, warning: &FuzzyWarning);
}

/// Prints warnings to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl WarningSink for StderrSink {
    fn warn(&self, warning: &FuzzyWarning) {
        let _ = write!(io::stderr().lock(), "{}", warning);
    }
}

/// Collects warnings in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    warnings: Mutex<Vec<FuzzyWarning>>,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn warnings(&self) -> Vec<FuzzyWarning> {
        self.warnings
            .lock()
            .map(|warnings| warnings.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.warnings.lock().map(|w| w.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WarningSink for MemorySink {
    fn warn(&self, warning: &FuzzyWarning) {
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.push(warning.clone());
        }
    }
}

/// Forwards to two sinks, e.g. stderr plus a counter for the summary line.
pub struct TeeSink<A, B>(pub A, pub B);

impl<A: WarningSink, B: WarningSink> WarningSink for TeeSink<A, B> {
    fn warn(&self, warning: &FuzzyWarning) {
        self.0.warn(warning);
        self.1.warn(warning);
    }
}

impl<T: WarningSink + ?Sized> WarningSink for Arc<T> {
    fn warn(&self, warning: &FuzzyWarning) {
        (**self).warn(warning);
    }
}
