//! Extraction pipeline: source files in, POT catalog out.
//!
//! ## Stages
//!
//! 1. **Lookup**: each file is routed to the first scanner that targets it
//!    (instance-level scanners first, then the registry); unclaimed files
//!    are skipped.
//! 2. **Decode + scan** (parallel): the file's bytes are decoded using its
//!    magic coding comment, UTF-8 otherwise, and handed to the scanner.
//! 3. **Consolidate** (sequential): raw messages are inserted in file order,
//!    then source order, so the first occurrence of a key fixes its position
//!    and later ones only add references.
//!
//! Any error aborts the run; nothing is written by this module.

pub mod files;
pub mod reference;
pub mod registry;
pub mod scanners;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use encoding_rs::UTF_8;
use rayon::prelude::*;

use crate::core::{
    Catalog, Entry, MessageKey,
    encoding::{decode, detect_magic_comment, lookup_encoding},
    error::{PoError, Result},
    po::{HeaderOptions, write_catalog_encoded},
};

pub use files::{IgnoreSet, InputFiles, collect_input_files};
pub use registry::ScannerRegistry;
pub use scanners::{RawMessage, Scanner};

/// Plural entries in a template always get two empty msgstr slots.
const TEMPLATE_NPLURALS: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub header: HeaderOptions,
    /// Destination of the template. References are written relative to its
    /// directory; without one they are relative to the current directory.
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

pub struct Extractor {
    registry: ScannerRegistry,
    local: Vec<Arc<dyn Scanner>>,
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(registry: ScannerRegistry, options: ExtractOptions) -> Self {
        Self {
            registry,
            local: Vec::new(),
            options,
        }
    }

    /// Register a scanner for this extractor only. It is consulted before
    /// the registry, and the newest one wins.
    pub fn add_scanner(&mut self, scanner: Arc<dyn Scanner>) {
        self.local.insert(0, scanner);
    }

    fn scanner_for(&self, path: &Path) -> Option<&Arc<dyn Scanner>> {
        self.local
            .iter()
            .find(|scanner| scanner.target(path))
            .or_else(|| self.registry.find(path))
    }

    /// Directory that `#:` references are relative to.
    pub fn reference_base(&self) -> PathBuf {
        self.options
            .output
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Decode and scan one file. A file no scanner claims yields nothing.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<RawMessage>> {
        let Some(scanner) = self.scanner_for(path) else {
            if self.options.verbose {
                eprintln!("{} {}", "skip".dimmed(), path.display());
            }
            return Ok(Vec::new());
        };

        let bytes = fs::read(path).map_err(|e| PoError::io(path, e))?;
        let source = decode_source(path, &bytes)?;
        let messages = scanner.parse(path, &source)?;

        if self.options.verbose {
            eprintln!(
                "{} {} ({}, {} messages)",
                "scan".cyan(),
                path.display(),
                scanner.name(),
                messages.len()
            );
        }
        Ok(messages)
    }

    /// Scan `files` and consolidate their messages into a catalog without a
    /// header.
    pub fn parse(&self, files: &[PathBuf]) -> Result<Catalog> {
        let scanned = files
            .par_iter()
            .map(|path| self.scan_file(path).map(|messages| (path, messages)))
            .collect::<Result<Vec<_>>>()?;

        let base = self.reference_base();
        let mut catalog = Catalog::new();
        for (path, messages) in scanned {
            for message in messages {
                if message.msgid.is_empty() {
                    continue;
                }
                let reference = reference::format_reference(path, &base, message.line);
                catalog.insert_or_merge_references(to_entry(message, reference));
            }
        }
        Ok(catalog)
    }

    /// Scan `files` and return the full template, generated header first.
    pub fn extract(&self, files: &[PathBuf]) -> Result<Catalog> {
        let mut catalog = self.parse(files)?;
        catalog.set_header(self.options.header.build_entry());
        Ok(catalog)
    }

    /// Serialise a template in the configured output encoding.
    pub fn render(&self, catalog: &Catalog) -> Result<Vec<u8>> {
        let target = self
            .options
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from("<stdout>"));
        write_catalog_encoded(catalog, &self.options.header.to_code, &target)
    }
}

/// Decode a source file using its magic coding comment, UTF-8 otherwise.
fn decode_source(path: &Path, bytes: &[u8]) -> Result<String> {
    let encoding = match detect_magic_comment(bytes) {
        Some(label) => lookup_encoding(&label).map_err(|_| PoError::Encoding {
            path: path.to_path_buf(),
            encoding: label,
            message: "unknown source encoding".to_string(),
        })?,
        None => UTF_8,
    };
    Ok(decode(bytes, encoding, path)?.into_owned())
}

fn to_entry(message: RawMessage, reference: String) -> Entry {
    let key = MessageKey {
        msgctxt: message.msgctxt,
        msgid: message.msgid,
        msgid_plural: message.msgid_plural,
    };
    let mut entry = Entry::untranslated(key, TEMPLATE_NPLURALS).with_reference(reference);
    entry.extracted_comment = message.extracted_comment;
    entry
}
