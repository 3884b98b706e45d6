//! The logic behind `GET /api/bibliography?siteId=<id>`
//!
//! Everything here is transport-independent: the HTTP layer only maps a
//! [`QueryResponse`] or [`QueryError`] onto a response.

use crate::merge;
use crate::model::BibliographyItem;
use crate::site::SiteId;
use serde_json::json;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// `Cache-Control` value for successful answers
pub const CACHE_CONTROL: &str = "public, max-age=3600, stale-while-revalidate=86400";

/// Caller errors, each with the HTTP status it maps to
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// No `siteId`, or an empty one
    #[error("Missing required parameter: siteId")]
    MissingSiteId,

    /// `siteId` outside `[a-zA-Z0-9_.]+`
    #[error("Invalid siteId format")]
    InvalidSiteId(String),

    /// Well-formed `siteId` that no item has metadata for
    #[error("siteId not found: {0}")]
    SiteNotFound(SiteId),

    /// The query string itself could not be decoded
    #[error("Invalid query string")]
    MalformedQuery(String),

    /// The answer could not be encoded
    #[error("Failed to encode response: {0}")]
    Encoding(String),
}

impl QueryError {
    /// HTTP status code
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::MissingSiteId | Self::InvalidSiteId(_) | Self::MalformedQuery(_) => 400,
            Self::SiteNotFound(_) => 404,
            Self::Encoding(_) => 500,
        }
    }

    /// `{"error": "..."}` body
    #[must_use]
    pub fn body(&self) -> serde_json::Value {
        json!({ "error": self.to_string() })
    }
}

/// A successful answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    /// JSON array of frontend items
    pub body: String,
    /// Quoted content hash of `body`
    pub etag: String,
    /// Number of items in `body`
    pub count: usize,
}

impl QueryResponse {
    /// `Cache-Control` header value
    #[must_use]
    pub const fn cache_control(&self) -> &'static str {
        CACHE_CONTROL
    }

    /// True if an `If-None-Match` header value matches this answer
    #[must_use]
    pub fn matches(&self, if_none_match: &str) -> bool {
        if_none_match
            .split(',')
            .map(str::trim)
            .any(|tag| tag == "*" || tag == self.etag || tag.strip_prefix("W/") == Some(self.etag.as_str()))
    }
}

/// Answer a bibliography query for `site_id`
pub fn bibliography(items: &[BibliographyItem], site_id: Option<&str>) -> Result<QueryResponse, QueryError> {
    let raw = match site_id {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(QueryError::MissingSiteId),
    };
    let site = SiteId::parse(raw).map_err(|_| QueryError::InvalidSiteId(raw.to_owned()))?;

    let view = merge::site_view(items, &site);
    if view.is_empty() {
        return Err(QueryError::SiteNotFound(site));
    }

    let body = serde_json::to_string(&view).map_err(|e| QueryError::Encoding(e.to_string()))?;
    let etag = etag(body.as_bytes());

    Ok(QueryResponse {
        body,
        etag,
        count: view.len(),
    })
}

/// Strong ETag: the first 16 hex digits of the SHA-256 of `body`, quoted
#[must_use]
pub fn etag(body: &[u8]) -> String {
    let digest = Sha256::digest(body);
    let hex = format!("{digest:x}");
    format!("\"{}\"", &hex[..16])
}
