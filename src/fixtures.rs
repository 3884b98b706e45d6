// Shared test fixtures: a small citation file and its metadata companion

use crate::model::BibliographyItem;
use crate::{merge, metadata, parser};

/// Three entries: two annotated for `foobar_com`, one for `other_site` too
pub static CITATIONS: &str = r#"
@book{entry1,
    title = {Test Book 1},
    author = {Author, A},
    year = {2020}
}

@BOOK{entry2,
    title = "Test Book 2",
    author = {Author, B},
    year = 2021,
    publisher = {Some {Press}},
    isbn = {9780000000002}
}

@article{entry3,
    title = {Test Article},
    author = {Author, C},
    year = {2022},
    journal = {Ignored Journal}
}
"#;

/// Metadata with a memo that must never be exposed
pub static METADATA: &str = r#"
entry1:
  foobar_com:
    tags: [test, documentation]
    review: A great book
    readDate: "2020-01-01"
entry2:
  foobar_com:
    tags: [advanced]
    review:
      - Multi-line
      - review
    readDate: "2021-06-15"
    memo:
      - Internal note - should not be exposed
  other_site:
    tags: [shared]
    review: Another perspective
"#;

/// The fixture files parsed and merged
pub fn items() -> Vec<BibliographyItem> {
    merge::merge(parser::parse(CITATIONS), &metadata::parse(METADATA))
}
