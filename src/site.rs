//! Site identifiers

use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref SITE_ID: Regex = Regex::new(r"^[a-zA-Z0-9_.]+$").unwrap();
}

/// A validated site identifier: ASCII letters, digits, `_` and `.` only
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SiteId(String);

impl SiteId {
    /// Validate and wrap a site identifier
    pub fn parse(s: &str) -> Result<Self> {
        if is_valid(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(Error::InvalidSiteId(s.to_owned()))
        }
    }

    /// Borrow the identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Check a candidate identifier without allocating
#[must_use]
pub fn is_valid(s: &str) -> bool {
    SITE_ID.is_match(s)
}

impl FromStr for SiteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SiteId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        if is_valid(&s) {
            Ok(Self(s))
        } else {
            Err(Error::InvalidSiteId(s))
        }
    }
}

impl From<SiteId> for String {
    fn from(id: SiteId) -> Self {
        id.0
    }
}

impl AsRef<str> for SiteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
