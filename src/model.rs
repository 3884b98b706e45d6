//! Data models for citation records and per-site metadata
//!
//! Metadata exists in two shapes. [`InternalMetadata`] is what the metadata
//! file holds, including the private `memo` notes. [`FrontendMetadata`] is the
//! only shape that may leave the process; it has no memo field at all, and the
//! single way to get one from internal metadata is [`InternalMetadata::to_frontend`].

use ahash::AHashMap;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Per-site metadata of one record, keyed by site identifier, in metadata-file order
pub type SiteMap = IndexMap<String, InternalMetadata>;

/// Parsed metadata file: record key to per-site metadata
pub type MetadataIndex = AHashMap<String, SiteMap>;

/// Citation entry type, always lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Article from a journal
    Article,
    /// Book with publisher
    Book,
    /// Part of a book
    InBook,
    /// Article in conference proceedings
    InProceedings,
    /// Conference proceedings
    Proceedings,
    /// Master's thesis
    MastersThesis,
    /// `PhD` thesis
    PhdThesis,
    /// Technical report
    TechReport,
    /// Unpublished work
    Unpublished,
    /// Miscellaneous
    Misc,
    /// Any other tag, stored lowercased
    Custom(String),
}

impl EntryType {
    /// Parse from string (case-insensitive)
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "article" => Self::Article,
            "book" => Self::Book,
            "inbook" => Self::InBook,
            "inproceedings" => Self::InProceedings,
            "proceedings" => Self::Proceedings,
            "mastersthesis" => Self::MastersThesis,
            "phdthesis" => Self::PhdThesis,
            "techreport" => Self::TechReport,
            "unpublished" => Self::Unpublished,
            "misc" => Self::Misc,
            _ => Self::Custom(lower),
        }
    }

    /// The lowercase tag as written in the citation file
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::InBook => "inbook",
            Self::InProceedings => "inproceedings",
            Self::Proceedings => "proceedings",
            Self::MastersThesis => "mastersthesis",
            Self::PhdThesis => "phdthesis",
            Self::TechReport => "techreport",
            Self::Unpublished => "unpublished",
            Self::Misc => "misc",
            Self::Custom(s) => s,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntryType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = Cow::<'de, str>::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// One parsed citation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Citation key, the join key against the metadata file
    #[serde(rename = "id")]
    pub key: String,
    /// Entry type
    #[serde(rename = "type")]
    pub ty: EntryType,
    /// Title, empty when the entry has none
    pub title: String,
    /// Author in "Family, Given" form, empty when the entry has none
    pub author: String,
    /// Publication year, 0 when absent or unparseable
    pub year: i32,
    /// Publisher name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Book series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    /// ISBN as written, not validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    /// Link to the work
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Record {
    /// Create a record with every optional field empty
    #[must_use]
    pub fn new(key: impl Into<String>, ty: EntryType) -> Self {
        Self {
            key: key.into(),
            ty,
            title: String::new(),
            author: String::new(),
            year: 0,
            publisher: None,
            series: None,
            isbn: None,
            url: None,
        }
    }

    /// Get the citation key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the entry type
    #[must_use]
    pub const fn entry_type(&self) -> &EntryType {
        &self.ty
    }
}

/// A review: one paragraph or several
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Review {
    /// A single string
    Text(String),
    /// Ordered paragraphs
    Paragraphs(Vec<String>),
}

/// Per-site metadata exactly as the metadata file states it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalMetadata {
    /// Tags in file order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Review text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,
    /// Private notes; never part of any external representation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<Vec<String>>,
    /// ISO-8601 date the work was read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_date: Option<String>,
}

impl InternalMetadata {
    /// True when no field is present
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tags.is_none() && self.review.is_none() && self.memo.is_none() && self.read_date.is_none()
    }

    /// Project to the externally visible shape.
    ///
    /// `memo` is always dropped. Returns `None` when nothing visible remains,
    /// so an "empty" frontend object is never produced.
    #[must_use]
    pub fn to_frontend(&self) -> Option<FrontendMetadata> {
        if self.tags.is_none() && self.review.is_none() && self.read_date.is_none() {
            return None;
        }

        Some(FrontendMetadata {
            tags: self.tags.clone(),
            review: self.review.clone(),
            read_date: self.read_date.clone(),
        })
    }
}

/// Per-site metadata safe for external consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendMetadata {
    /// Tags in file order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Review text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,
    /// Date the work was read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_date: Option<String>,
}

/// A record joined with all of its per-site metadata (internal form)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibliographyItem {
    /// The citation
    #[serde(flatten)]
    pub record: Record,
    /// Metadata per site identifier. Absent when the metadata file says
    /// nothing about this record
    #[serde(rename = "customInfo", default, skip_serializing_if = "Option::is_none")]
    pub custom_info: Option<SiteMap>,
}

impl BibliographyItem {
    /// Metadata for one site, if any
    #[must_use]
    pub fn site(&self, site: &str) -> Option<&InternalMetadata> {
        self.custom_info.as_ref().and_then(|sites| sites.get(site))
    }

    /// True if the item carries metadata for `site`
    #[must_use]
    pub fn has_site(&self, site: &str) -> bool {
        self.site(site).is_some()
    }
}

/// A record with at most one site's frontend metadata, ready for exposure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendItem<'a> {
    /// The citation, usually borrowed from a [`BibliographyItem`]
    #[serde(flatten)]
    pub record: Cow<'a, Record>,
    /// The selected site's metadata, redacted
    #[serde(rename = "customInfo", default, skip_serializing_if = "Option::is_none")]
    pub custom_info: Option<FrontendMetadata>,
}

impl FrontendItem<'_> {
    /// Convert to owned version
    #[must_use]
    pub fn into_owned(self) -> FrontendItem<'static> {
        FrontendItem {
            record: Cow::Owned(self.record.into_owned()),
            custom_info: self.custom_info,
        }
    }
}
