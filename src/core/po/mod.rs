//! PO/POT text format: parsing, writing and the metadata header.
//!
//! - `escape`: quoted-string escaping
//! - `parser`: text -> [`Catalog`](crate::core::Catalog)
//! - `writer`: [`Catalog`](crate::core::Catalog) -> text
//! - `header`: generated header entry and header field access

pub mod escape;
pub mod header;
pub mod parser;
pub mod writer;

pub use header::{HeaderFields, HeaderOptions};
pub use parser::{ParserOptions, PoParser};
pub use writer::{write_catalog, write_catalog_encoded, write_entry};
