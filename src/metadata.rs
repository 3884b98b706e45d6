//! Metadata-file parser
//!
//! The metadata file is YAML shaped `record key -> site id -> fields`. Each
//! site block is validated as a whole: one field of the wrong shape drops the
//! block, leaving the record's other sites and every other record untouched.
//! A document that is not YAML, or not a mapping, yields an empty index.

use crate::model::{InternalMetadata, MetadataIndex, Review, SiteMap};
use crate::site::SiteId;
use chrono::NaiveDate;
use serde_yaml::{Mapping, Value};
use tracing::{debug, error, warn};

/// Parse every site block in the document
#[must_use]
pub fn parse(input: &str) -> MetadataIndex {
    parse_filtered(input, |_| true)
}

/// Parse only the blocks of the given sites
#[must_use]
pub fn parse_sites(input: &str, sites: &[SiteId]) -> MetadataIndex {
    parse_filtered(input, |site| sites.iter().any(|s| s.as_str() == site))
}

fn parse_filtered(input: &str, wanted: impl Fn(&str) -> bool) -> MetadataIndex {
    let mut index = MetadataIndex::new();

    let document: Value = match serde_yaml::from_str(input) {
        Ok(document) => document,
        Err(err) => {
            error!(%err, "failed to parse metadata document, ignoring it");
            return index;
        }
    };

    let entries = match document {
        Value::Mapping(entries) => entries,
        Value::Null => return index,
        _ => {
            warn!("metadata document is not a mapping, ignoring it");
            return index;
        }
    };

    for (entry_key, sites) in &entries {
        let Some(key) = key_string(entry_key) else {
            debug!(?entry_key, "skipping metadata entry with a non-scalar key");
            continue;
        };
        let Value::Mapping(sites) = sites else {
            debug!(key = %key, "skipping metadata entry that is not a mapping");
            continue;
        };

        let site_map = parse_sites_of(&key, sites, &wanted);
        if !site_map.is_empty() {
            index.insert(key, site_map);
        }
    }

    index
}

fn parse_sites_of(key: &str, sites: &Mapping, wanted: &impl Fn(&str) -> bool) -> SiteMap {
    let mut site_map = SiteMap::new();

    for (site_key, block) in sites {
        let Some(site) = key_string(site_key) else {
            continue;
        };
        if !wanted(&site) {
            continue;
        }

        match validate_block(block) {
            Ok(metadata) if metadata.is_empty() => {}
            Ok(metadata) => {
                if let Some(date) = &metadata.read_date {
                    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                        warn!(key, site = %site, date = %date, "readDate is not a YYYY-MM-DD date");
                    }
                }
                site_map.insert(site, metadata);
            }
            Err(reason) => warn!(key, site = %site, reason, "dropping invalid metadata block"),
        }
    }

    site_map
}

/// Validate one site block. Any field of the wrong shape rejects the block.
fn validate_block(block: &Value) -> Result<InternalMetadata, &'static str> {
    let Value::Mapping(fields) = block else {
        return Err("block is not a mapping");
    };

    let tags = match fields.get("tags") {
        None => None,
        Some(value) => Some(string_list(value).ok_or("tags must be a list of strings")?),
    };

    let review = match fields.get("review") {
        None => None,
        Some(Value::String(text)) => Some(Review::Text(text.clone())),
        Some(value) => Some(Review::Paragraphs(
            string_list(value).ok_or("review must be a string or a list of strings")?,
        )),
    };

    let memo = match fields.get("memo") {
        None => None,
        Some(value) => Some(string_list(value).ok_or("memo must be a list of strings")?),
    };

    let read_date = match fields.get("readDate") {
        None => None,
        Some(Value::String(date)) => Some(date.clone()),
        Some(_) => return Err("readDate must be a string"),
    };

    Ok(InternalMetadata {
        tags,
        review,
        memo,
        read_date,
    })
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    let Value::Sequence(items) = value else {
        return None;
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Some(s.clone()),
            _ => None,
        })
        .collect()
}

/// Mapping keys are strings; numeric keys are accepted in their text form
fn key_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
