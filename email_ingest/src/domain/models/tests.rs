use super::*;

fn notification(key: &str) -> Notification {
    Notification::new(ObjectRef::new("email-bucket", key), None)
}

#[test]
fn destination_key_is_not_zero_padded() {
    let key = DestinationKey::for_date(NaiveDate::from_ymd_opt(2023, 4, 24).unwrap());
    assert_eq!(key.as_str(), "sources/2023/4/24/ffis/raw.eml");

    let key = DestinationKey::for_date(NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
    assert_eq!(key.as_str(), "sources/2024/1/4/ffis/raw.eml");

    let key = DestinationKey::for_date(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());
    assert_eq!(key.to_string(), "sources/2022/12/31/ffis/raw.eml");
}

#[test]
fn empty_outcome_is_success() {
    let outcome = InvocationOutcome::from_results(Vec::new());
    assert!(outcome.is_success());
    assert_eq!(outcome.total(), 0);
    assert!(outcome.into_result().is_ok());
}

#[test]
fn outcome_orders_failures_by_record_index() {
    let outcome = InvocationOutcome::from_results(vec![
        (2, notification("c"), Err(RecordError::NoMatchesFound)),
        (1, notification("b"), Ok(())),
        (0, notification("a"), Err(RecordError::Cancelled)),
    ]);

    assert_eq!(outcome.total(), 3);
    assert_eq!(outcome.failed(), 2);
    assert_eq!(outcome.succeeded(), 1);
    let keys: Vec<&str> = outcome
        .failures()
        .iter()
        .map(|f| f.notification.object.key.as_str())
        .collect();
    assert_eq!(keys, ["a", "c"]);
}

#[test]
fn invocation_error_lists_every_failure() {
    let err = InvocationOutcome::from_results(vec![
        (0, notification("ses/one.eml"), Err(RecordError::Fetch(FetchError::NotFound))),
        (1, notification("ses/two.eml"), Ok(())),
        (
            2,
            notification("ses/three.eml"),
            Err(RecordError::Validation {
                address: "someone@example.com".to_string(),
            }),
        ),
    ])
    .into_result()
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "2 of 3 records failed:\n\
         \t* s3://email-bucket/ses/one.eml: [fetch_not_found] failed to fetch source object: object does not exist\n\
         \t* s3://email-bucket/ses/three.eml: [validation] origin address does not match expected sender"
    );
    assert_eq!(err.failures().len(), 2);
}

#[test]
fn cancellation_is_distinguishable() {
    assert!(RecordError::Cancelled.is_cancelled());
    assert!(!RecordError::NoPlaintextPart.is_cancelled());
    assert_eq!(RecordError::Cancelled.kind(), "cancelled");
}
