use bibshelf::{merge, metadata, parser, query, Bibliography, EntryType, Location, Review, SiteId};
use pretty_assertions::assert_eq;
use serde_json::json;

const CITATIONS: &str = include_str!("fixtures/references.bib");
const METADATA: &str = include_str!("fixtures/custom_info.yaml");

fn site(id: &str) -> SiteId {
    SiteId::parse(id).unwrap()
}

#[test]
fn test_parse_fixture_files() {
    let bibliography = Bibliography::parse(CITATIONS, METADATA);

    let keys: Vec<_> = bibliography.items().iter().map(|item| item.record.key.as_str()).collect();
    assert_eq!(keys, vec!["kono-2004", "suwa-2016", "knuth-1984", "orphan-2020"]);
    assert_eq!(bibliography.skipped(), &[Location { line: 28, column: 1 }]);

    let kono = &bibliography.find_by_key("kono-2004").unwrap().record;
    assert_eq!(kono.ty, EntryType::Book);
    assert_eq!(kono.series.as_deref(), Some("PHP Bunko"));
    assert_eq!(kono.isbn.as_deref(), Some("9784569661490"));

    let suwa = &bibliography.find_by_key("suwa-2016").unwrap().record;
    assert_eq!(suwa.ty, EntryType::Book);
    assert_eq!(suwa.title, "Ichininsho Kenkyu no Susume");
    assert_eq!(suwa.year, 2016);
    assert_eq!(suwa.url, None);

    let knuth = &bibliography.find_by_key("knuth-1984").unwrap().record;
    assert_eq!(knuth.title, "Literate {Programming}");

    let orphan = bibliography.find_by_key("orphan-2020").unwrap();
    assert_eq!(orphan.record.ty, EntryType::InProceedings);
    assert_eq!(orphan.record.year, 0);
    assert_eq!(orphan.custom_info, None);
}

#[test]
fn test_metadata_blocks_validated_independently() {
    let index = metadata::parse(METADATA);

    let kono = &index["kono-2004"];
    assert_eq!(kono.len(), 2);
    assert_eq!(
        kono["foobar_com"].review,
        Some(Review::Paragraphs(vec!["First paragraph.".into(), "Second paragraph.".into()]))
    );

    let knuth = &index["knuth-1984"];
    assert!(!knuth.contains_key("foobar_com"));
    assert_eq!(knuth["other_site"].read_date.as_deref(), Some("someday"));

    assert!(index.contains_key("missing-record"));
}

#[test]
fn test_site_filter_order_and_redaction() {
    let bibliography = Bibliography::parse(CITATIONS, METADATA);

    let foobar = bibliography.for_site(&site("foobar_com"));
    let keys: Vec<_> = foobar.iter().map(|item| item.record.key.as_str()).collect();
    assert_eq!(keys, vec!["kono-2004", "suwa-2016"]);

    let other = bibliography.for_site(&site("other_site"));
    let keys: Vec<_> = other.iter().map(|item| item.record.key.as_str()).collect();
    assert_eq!(keys, vec!["kono-2004", "knuth-1984"]);

    let json = serde_json::to_string(&foobar).unwrap();
    assert!(!json.contains("memo"));
    assert!(!json.contains("borrowed from the library"));
    assert!(!json.contains("only a memo here"));
}

#[test]
fn test_end_to_end_frontend_item() {
    let records = parser::parse("@book{k1, title={T}, author={A, B}, year={2020}}");
    let index = metadata::parse("k1: {s1: {tags: [x], review: r}}");
    let items = merge::merge(records, &index);

    let view = merge::site_view(&items, &site("s1"));
    assert_eq!(
        serde_json::to_value(&view).unwrap(),
        json!([{
            "id": "k1",
            "type": "book",
            "title": "T",
            "author": "A, B",
            "year": 2020,
            "customInfo": { "tags": ["x"], "review": "r" }
        }])
    );
}

#[test]
fn test_query_unknown_site_is_not_found() {
    let bibliography = Bibliography::parse(CITATIONS, METADATA);
    let err = bibliography.query(Some("unknown_site")).unwrap_err();

    assert_eq!(err.status(), 404);
    assert!(err.body()["error"].as_str().unwrap().contains("not found"));
}

#[test]
fn test_query_missing_site_is_bad_request() {
    let bibliography = Bibliography::parse(CITATIONS, METADATA);

    for site_id in [None, Some("")] {
        let err = bibliography.query(site_id).unwrap_err();
        assert_eq!(err.status(), 400);
        assert_eq!(err.body(), json!({ "error": "Missing required parameter: siteId" }));
    }

    let err = bibliography.query(Some("site-name")).unwrap_err();
    assert_eq!(err.status(), 400);
    assert_eq!(err.body(), json!({ "error": "Invalid siteId format" }));
}

#[test]
fn test_query_success_matches_site_view() {
    let bibliography = Bibliography::parse(CITATIONS, METADATA);
    let answer = bibliography.query(Some("other_site")).unwrap();

    let expected = serde_json::to_string(&bibliography.for_site(&site("other_site"))).unwrap();
    assert_eq!(answer.body, expected);
    assert_eq!(answer.count, 2);
    assert_eq!(answer.etag, query::etag(expected.as_bytes()));
    assert_eq!(answer.cache_control(), "public, max-age=3600, stale-while-revalidate=86400");
}

#[test]
fn test_parse_files_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let citations = dir.path().join("references.bib");
    let metadata = dir.path().join("custom_info.yaml");
    std::fs::write(&citations, CITATIONS).unwrap();
    std::fs::write(&metadata, METADATA).unwrap();

    let bibliography = bibshelf::parse_files(&citations, &metadata).unwrap();
    assert_eq!(bibliography.len(), 4);

    let out = dir.path().join("static/data");
    let written = bibshelf::export(&bibliography, &out, Some(&site("foobar_com")), &Default::default()).unwrap();
    assert_eq!(written.len(), 2);

    let reloaded = bibshelf::from_file(&written[0]).unwrap();
    assert_eq!(reloaded.items(), bibliography.items());

    let page: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&written[1]).unwrap()).unwrap();
    let page = page.as_array().unwrap();
    assert_eq!(page.len(), 4);
    assert_eq!(page[3]["id"], "orphan-2020");
    assert!(page[3].get("customInfo").is_none());
}

#[test]
fn test_missing_files_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let result = bibshelf::parse_files(dir.path().join("nope.bib"), dir.path().join("nope.yaml"));
    assert!(matches!(result, Err(bibshelf::Error::IoError(_))));
}
