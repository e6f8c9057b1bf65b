use cool_asserts::assert_matches;

use super::*;

const PATTERN: &str = r"https://mcusercontent.com/.+\.xlsx";

fn extract(raw: &[u8]) -> Result<TargetUrl, RecordError> {
    let policy = UrlPolicy::from_pattern(PATTERN).unwrap();
    policy.extract(&ParsedMessage::parse(raw).unwrap())
}

#[test]
fn it_should_extract_the_single_url() {
    let url = extract(include_bytes!("../../../fixtures/good.eml")).unwrap();
    assert_eq!(
        url.as_str(),
        "https://mcusercontent.com/123456/files/file-01.xlsx"
    );
}

#[test]
fn it_should_fail_without_matches() {
    assert_matches!(
        extract(include_bytes!("../../../fixtures/missing.eml")),
        Err(RecordError::NoMatchesFound)
    );
}

#[test]
fn it_should_refuse_to_pick_between_matches() {
    assert_matches!(
        extract(include_bytes!("../../../fixtures/multiple.eml")),
        Err(RecordError::MultipleFound { count: 2 })
    );
}

#[test]
fn it_should_count_a_repeated_url_once() {
    let url = extract(include_bytes!("../../../fixtures/duplicate.eml")).unwrap();
    assert_eq!(
        url.as_str(),
        "https://mcusercontent.com/123456/files/file-01.xlsx"
    );
}

#[test]
fn it_should_require_a_plaintext_part() {
    assert_matches!(
        extract(include_bytes!("../../../fixtures/no-plaintext.eml")),
        Err(RecordError::NoPlaintextPart)
    );
}

#[test]
fn it_should_reject_an_invalid_pattern() {
    assert!(UrlPolicy::from_pattern("https://(unclosed").is_err());
}
