//! Merging records with metadata, and site-scoped redaction
//!
//! Merged items keep the full internal metadata of every site. Redaction
//! happens only in [`project`], when a single site's view is serialized.

use crate::model::{BibliographyItem, FrontendItem, FrontendMetadata, InternalMetadata, MetadataIndex, Record};
use crate::site::SiteId;
use std::borrow::Cow;

/// Join records with their metadata by key, preserving record order
#[must_use]
pub fn merge(records: Vec<Record>, metadata: &MetadataIndex) -> Vec<BibliographyItem> {
    records
        .into_iter()
        .map(|record| {
            let custom_info = metadata.get(record.key.as_str()).cloned();
            BibliographyItem { record, custom_info }
        })
        .collect()
}

/// Project internal metadata to the frontend shape; see [`InternalMetadata::to_frontend`]
#[must_use]
pub fn to_frontend(internal: &InternalMetadata) -> Option<FrontendMetadata> {
    internal.to_frontend()
}

/// Items that carry metadata for exactly `site`, in input order
#[must_use]
pub fn filter_by_site<'a>(items: &'a [BibliographyItem], site: &SiteId) -> Vec<&'a BibliographyItem> {
    items.iter().filter(|item| item.has_site(site.as_str())).collect()
}

/// The externally visible view of `item` for one site: that site's frontend
/// metadata only, without the site-id wrapper
#[must_use]
pub fn project<'a>(item: &'a BibliographyItem, site: &SiteId) -> FrontendItem<'a> {
    FrontendItem {
        record: Cow::Borrowed(&item.record),
        custom_info: item.site(site.as_str()).and_then(InternalMetadata::to_frontend),
    }
}

/// Filter then project: everything one site may see
#[must_use]
pub fn site_view<'a>(items: &'a [BibliographyItem], site: &SiteId) -> Vec<FrontendItem<'a>> {
    filter_by_site(items, site)
        .into_iter()
        .map(|item| project(item, site))
        .collect()
}

/// Project every item for one site, keeping items without metadata for it.
/// This is the page-data view, where unannotated records are still listed.
#[must_use]
pub fn page_view<'a>(items: &'a [BibliographyItem], site: &SiteId) -> Vec<FrontendItem<'a>> {
    items.iter().map(|item| project(item, site)).collect()
}
