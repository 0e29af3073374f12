//! Catalog engine: data model, PO format, extraction and merging.
//!
//! ## Module Structure
//!
//! - `entry` / `catalog`: the in-memory catalog model
//! - `po`: PO/POT parsing, writing and header generation
//! - `extract`: source scanning pipeline producing templates
//! - `merge`: template/translation re-synchronisation
//! - `table`: compiled key -> translation map
//! - `locale_path`: lookup of installed catalogs
//! - `encoding`, `diagnostics`, `error`: shared plumbing

pub mod catalog;
pub mod diagnostics;
pub mod encoding;
pub mod entry;
pub mod error;
pub mod extract;
pub mod locale_path;
pub mod merge;
pub mod po;
pub mod table;

pub use catalog::Catalog;
pub use entry::{Entry, MessageKey};
pub use error::{PoError, Result};
pub use table::MessageTable;
