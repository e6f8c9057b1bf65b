use cool_asserts::assert_matches;

use super::*;

const DIGEST: &[u8] = include_bytes!("../../../fixtures/digest.eml");
const GOOD: &[u8] = include_bytes!("../../../fixtures/good.eml");
const NO_PLAINTEXT: &[u8] = include_bytes!("../../../fixtures/no-plaintext.eml");

#[test]
fn it_should_look_up_headers_ignoring_case() {
    let message = ParsedMessage::parse(DIGEST).unwrap();

    assert_eq!(message.headers().get("from"), Some("FFIS <fake@ffis.org>"));
    assert_eq!(message.headers().get("FROM"), Some("FFIS <fake@ffis.org>"));
    assert_eq!(
        message.headers().get("Date"),
        Some("Mon, 24 Apr 2023 17:42:13 -0500")
    );
    assert_eq!(message.headers().get("Cc"), None);
    assert_eq!(message.headers().len(), 4);
}

#[test]
fn it_should_return_the_first_repeated_header() {
    let raw = b"Received: first\r\nreceived: second\r\nSubject: hi\r\n\r\nbody\r\n";
    let message = ParsedMessage::parse(raw).unwrap();

    assert_eq!(message.headers().get("Received"), Some("first"));
}

#[test]
fn it_should_keep_a_single_part_body_as_plaintext() {
    let message = ParsedMessage::parse(DIGEST).unwrap();

    assert_eq!(message.parts().len(), 1);
    assert_eq!(message.plaintext().map(str::trim), Some("This is a test"));
}

#[test]
fn it_should_decode_the_plaintext_alternative() {
    let message = ParsedMessage::parse(GOOD).unwrap();

    let mimetypes: Vec<&str> = message.parts().iter().map(|p| p.mimetype.as_str()).collect();
    assert_eq!(mimetypes, ["text/plain", "text/html"]);
    let plaintext = message.plaintext().unwrap();
    assert!(plaintext.contains("https://mcusercontent.com/123456/files/file-01.xlsx"));
    assert!(!plaintext.contains("other.xlsx"));
}

#[test]
fn it_should_not_find_plaintext_in_html_only_message() {
    let message = ParsedMessage::parse(NO_PLAINTEXT).unwrap();

    assert_eq!(message.parts().len(), 1);
    assert_eq!(message.plaintext(), None);
}

#[test]
fn it_should_decode_encoded_word_headers() {
    let raw = b"Subject: =?utf-8?q?Grant_Update_=E2=9C=93?=\n\nbody\n";
    let message = ParsedMessage::parse(raw).unwrap();

    assert_eq!(message.headers().get("subject"), Some("Grant Update \u{2713}"));
}

#[test]
fn it_should_unfold_continuation_lines() {
    let raw = b"Subject: a long\n subject line\nFrom: a@b.c\n\nbody\n";
    let message = ParsedMessage::parse(raw).unwrap();

    assert_eq!(message.headers().get("from"), Some("a@b.c"));
    assert!(message.headers().get("subject").unwrap().contains("subject line"));
}

#[test]
fn it_should_accept_a_message_without_headers() {
    let message = ParsedMessage::parse(b"\r\njust a body").unwrap();

    assert!(message.headers().is_empty());
}

#[test]
fn it_should_reject_missing_separator() {
    assert_matches!(
        ParsedMessage::parse(b"From: a@b.c\r\nSubject: no body"),
        Err(ParseError::MissingSeparator)
    );
    assert_matches!(
        ParsedMessage::parse(b"From: a@b.c\n"),
        Err(ParseError::MissingSeparator)
    );
    assert_matches!(ParsedMessage::parse(b""), Err(ParseError::MissingSeparator));
}

#[test]
fn it_should_reject_malformed_headers() {
    assert_matches!(
        ParsedMessage::parse(b"From: a@b.c\nthis is not a header\n\nbody"),
        Err(ParseError::MalformedHeader { line: 2 })
    );
    assert_matches!(
        ParsedMessage::parse(b" leading continuation\nFrom: a@b.c\n\nbody"),
        Err(ParseError::MalformedHeader { line: 1 })
    );
    assert_matches!(
        ParsedMessage::parse(b": no name\n\nbody"),
        Err(ParseError::MalformedHeader { line: 1 })
    );
    assert_matches!(
        ParsedMessage::parse(b"Bad Name: value\n\nbody"),
        Err(ParseError::MalformedHeader { line: 1 })
    );
}
