//! potkit - gettext catalog tooling
//!
//! potkit is a CLI tool and library for working with gettext PO/POT
//! catalogs: extracting translatable strings from Ruby, ERB and
//! JavaScript/TypeScript sources, merging templates into existing
//! translations, and compiling catalogs into lookup tables.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Catalog model, PO reader/writer, extraction and merge engines

pub mod cli;
pub mod config;
pub mod core;
