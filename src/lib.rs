//! # bibshelf
//!
//! Data layer of a personal bibliography site: a citation file and a
//! per-site metadata file go in, redacted JSON for one site comes out.
//!
//! ## Features
//!
//! - Best-effort citation parser that skips what it cannot read
//! - Metadata validation that drops malformed blocks instead of failing
//! - Private `memo` notes that cannot reach the frontend types
//! - Static JSON export and a small query server (`server` feature)
//!
//! ## Example
//!
//! ```
//! use bibshelf::{Bibliography, SiteId};
//!
//! let citations = r#"
//!     @book{kono-2004,
//!         title = {Omote no Taiiku},
//!         author = {Kono, Yoshinori},
//!         year = {2004}
//!     }
//! "#;
//! let metadata = r#"
//! kono-2004:
//!   my_site:
//!     tags: [sports]
//!     memo: [not for publication]
//! "#;
//!
//! let bibliography = Bibliography::parse(citations, metadata);
//! let site = SiteId::parse("my_site")?;
//! let view = bibliography.for_site(&site);
//!
//! assert_eq!(view.len(), 1);
//! assert_eq!(view[0].record.year, 2004);
//! assert!(!serde_json::to_string(&view)?.contains("memo"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs,
    missing_debug_implementations
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod error;
pub mod format;
pub mod merge;
pub mod metadata;
pub mod model;
pub mod parser;
pub mod query;
pub mod site;
pub mod writer;

mod bibliography;

#[cfg(feature = "server")]
pub mod server;

#[cfg(test)]
mod fixtures;

pub use bibliography::{Bibliography, ParseOptions};
pub use config::Config;
pub use error::{Error, Location, Result};
pub use model::{BibliographyItem, EntryType, FrontendItem, FrontendMetadata, InternalMetadata, Record, Review};
pub use parser::DuplicateKeys;
pub use query::{QueryError, QueryResponse};
pub use site::SiteId;
pub use writer::{export, from_file, to_file, to_string, Writer, WriterConfig};

/// Re-export of the common types
pub mod prelude {
    pub use crate::{
        Bibliography, BibliographyItem, DuplicateKeys, Error, FrontendItem, ParseOptions, Record, Result, SiteId,
    };
}

/// Parse a citation file and a metadata file held in memory
#[must_use]
pub fn parse(citations: &str, metadata: &str) -> Bibliography {
    Bibliography::parse(citations, metadata)
}

/// Read and parse a citation file and a metadata file
pub fn parse_files(citations: impl AsRef<std::path::Path>, metadata: impl AsRef<std::path::Path>) -> Result<Bibliography> {
    ParseOptions::new().parse_files(citations, metadata)
}
