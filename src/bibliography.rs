//! The merged bibliography and the options used to build it

use crate::error::Location;
use crate::model::{BibliographyItem, FrontendItem};
use crate::parser::{self, DuplicateKeys};
use crate::query::{self, QueryError, QueryResponse};
use crate::site::SiteId;
use crate::{merge, metadata, Result};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

/// Parser configuration with builder pattern
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    duplicates: DuplicateKeys,
    sites: Option<Vec<SiteId>>,
}

impl ParseOptions {
    /// Create new parse options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How repeated citation keys are resolved
    #[must_use]
    pub fn duplicates(mut self, policy: DuplicateKeys) -> Self {
        self.duplicates = policy;
        self
    }

    /// Keep metadata of these sites only (default: every site)
    #[must_use]
    pub fn sites(mut self, sites: impl IntoIterator<Item = SiteId>) -> Self {
        self.sites = Some(sites.into_iter().collect());
        self
    }

    /// Parse a citation file and a metadata file held in memory
    #[must_use]
    pub fn parse(&self, citations: &str, metadata_text: &str) -> Bibliography {
        let scanned = parser::scan(citations);
        let records = parser::to_records(&scanned.entries, self.duplicates);

        let index = match &self.sites {
            Some(sites) => metadata::parse_sites(metadata_text, sites),
            None => metadata::parse(metadata_text),
        };

        Bibliography {
            items: merge::merge(records, &index),
            skipped: scanned.skipped,
        }
    }

    /// Read and parse both files
    pub fn parse_files(&self, citations: impl AsRef<Path>, metadata_path: impl AsRef<Path>) -> Result<Bibliography> {
        let citations_text = std::fs::read_to_string(citations.as_ref())?;
        let metadata_text = std::fs::read_to_string(metadata_path.as_ref())?;
        let bibliography = self.parse(&citations_text, &metadata_text);

        info!(
            citations = %citations.as_ref().display(),
            metadata = %metadata_path.as_ref().display(),
            items = bibliography.len(),
            annotated = bibliography.annotated(),
            skipped = bibliography.skipped.len(),
            "loaded bibliography"
        );

        Ok(bibliography)
    }
}

/// Records merged with their metadata, in citation-file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bibliography {
    items: Vec<BibliographyItem>,
    skipped: Vec<Location>,
}

impl Bibliography {
    /// Parse with default options
    #[must_use]
    pub fn parse(citations: &str, metadata_text: &str) -> Self {
        ParseOptions::new().parse(citations, metadata_text)
    }

    /// Create a parser with options
    #[must_use]
    pub fn parser() -> ParseOptions {
        ParseOptions::new()
    }

    /// Wrap items that were merged elsewhere, e.g. loaded from an export
    #[must_use]
    pub fn from_items(items: Vec<BibliographyItem>) -> Self {
        Self {
            items,
            skipped: Vec::new(),
        }
    }

    /// Get all items
    #[must_use]
    pub fn items(&self) -> &[BibliographyItem] {
        &self.items
    }

    /// Take the items
    #[must_use]
    pub fn into_items(self) -> Vec<BibliographyItem> {
        self.items
    }

    /// Locations of citation entries that could not be parsed
    #[must_use]
    pub fn skipped(&self) -> &[Location] {
        &self.skipped
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items carrying metadata for at least one site
    #[must_use]
    pub fn annotated(&self) -> usize {
        self.items.iter().filter(|item| item.custom_info.is_some()).count()
    }

    /// Find an item by citation key
    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<&BibliographyItem> {
        self.items.iter().find(|item| item.record.key == key)
    }

    /// Find items by entry type (case-insensitive)
    #[must_use]
    pub fn find_by_type(&self, ty: &str) -> Vec<&BibliographyItem> {
        self.items
            .iter()
            .filter(|item| item.record.ty.as_str().eq_ignore_ascii_case(ty))
            .collect()
    }

    /// Every site identifier some item has metadata for
    #[must_use]
    pub fn sites(&self) -> BTreeSet<&str> {
        self.items
            .iter()
            .filter_map(|item| item.custom_info.as_ref())
            .flat_map(|sites| sites.keys().map(String::as_str))
            .collect()
    }

    /// Items annotated for `site`, redacted to its frontend view
    #[must_use]
    pub fn for_site(&self, site: &SiteId) -> Vec<FrontendItem<'_>> {
        merge::site_view(&self.items, site)
    }

    /// All items, each with `site`'s frontend metadata if it has any
    #[must_use]
    pub fn page(&self, site: &SiteId) -> Vec<FrontendItem<'_>> {
        merge::page_view(&self.items, site)
    }

    /// Answer an API query
    pub fn query(&self, site_id: Option<&str>) -> std::result::Result<QueryResponse, QueryError> {
        query::bibliography(&self.items, site_id)
    }
}
