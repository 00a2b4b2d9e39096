//! Link Validator Integration Tests
//!
//! Runs the full pipeline against a fake share-info source and the
//! in-memory catalogue:
//! - Accepted share links
//! - Every rejection path collapses to (false, None, None)
//! - Rejections are logged at the right level

use crate::common::*;
use puzzle_checker::{LinkValidator, Rejection, TokenLookup};
use std::sync::Arc;

fn validator_with(source: Arc<FakeShareSource>) -> LinkValidator {
    let store = sample_store();
    let lookup = Arc::new(TokenLookup::with_default_capacity(store.clone()));
    LinkValidator::new(source, store, lookup)
}

#[tokio::test]
async fn test_valid_link() {
    let source = Arc::new(FakeShareSource::body(share_body(1, &future_end_time(), ICON_SEVEN)));
    let validator = validator_with(source.clone());

    let outcome = validator.validate(LINK).await;

    assert_eq!(
        outcome.into_parts(),
        (true, Some("tok-eth".to_string()), Some(7))
    );
    assert_eq!(source.last_share_id().as_deref(), Some("Zx81Lq"));
}

#[tokio::test]
async fn test_missing_share_id_logs_error_without_fetching() {
    let logs = LogCapture::default();
    let _guard = logs.install();

    let source = Arc::new(FakeShareSource::body(share_body(1, &future_end_time(), ICON_ONE)));
    let validator = validator_with(source.clone());

    let outcome = validator.validate("https://www.bybit.com/en/promo/puzzle-hunt").await;

    assert_eq!(outcome.into_parts(), (false, None, None));
    assert_eq!(source.calls(), 0);

    let output = logs.contents();
    assert!(output.contains("ERROR"), "logs: {}", output);
    assert!(output.contains("shareId not found"), "logs: {}", output);
}

#[tokio::test]
async fn test_expired_link() {
    let source = Arc::new(FakeShareSource::body(share_body(1, &past_end_time(), ICON_SEVEN)));
    let validator = validator_with(source);

    assert_eq!(validator.validate(LINK).await.into_parts(), (false, None, None));
    assert!(matches!(
        validator.check(LINK).await,
        Err(Rejection::Expired { .. })
    ));
}

#[tokio::test]
async fn test_inactive_status_logs_status_value() {
    let logs = LogCapture::default();
    let _guard = logs.install();

    let source = Arc::new(FakeShareSource::body(share_body(0, &future_end_time(), ICON_SEVEN)));
    let validator = validator_with(source);

    assert_eq!(validator.validate(LINK).await.into_parts(), (false, None, None));

    let output = logs.contents();
    assert!(output.contains("WARN"), "logs: {}", output);
    assert!(output.contains("status: 0"), "logs: {}", output);
}

#[tokio::test]
async fn test_network_failure_is_contained() {
    let logs = LogCapture::default();
    let _guard = logs.install();

    let source = Arc::new(FakeShareSource::failing("operation timed out"));
    let validator = validator_with(source.clone());

    assert_eq!(validator.validate(LINK).await.into_parts(), (false, None, None));
    assert_eq!(source.calls(), 1);

    let output = logs.contents();
    assert!(output.contains("ERROR"), "logs: {}", output);
    assert!(output.contains("Request to API failed"), "logs: {}", output);
}

#[tokio::test]
async fn test_unknown_icon() {
    let source = Arc::new(FakeShareSource::body(share_body(1, &future_end_time(), ICON_UNKNOWN)));
    let validator = validator_with(source);

    assert_eq!(validator.validate(LINK).await.into_parts(), (false, None, None));
    assert_eq!(
        validator.check(LINK).await,
        Err(Rejection::NoMatchingPiece {
            icon_url: ICON_UNKNOWN.to_string()
        })
    );
}

#[tokio::test]
async fn test_piece_without_puzzle() {
    let source = Arc::new(FakeShareSource::body(share_body(
        1,
        &future_end_time(),
        "https://fh-static.bycsi.com/puzzle/ghost.png",
    )));
    let validator = validator_with(source);

    assert_eq!(
        validator.check(LINK).await,
        Err(Rejection::NoToken {
            unique_code: "GHOST".to_string()
        })
    );
}

#[tokio::test]
async fn test_catalogue_failure_is_contained() {
    let store = sample_store();
    let lookup = Arc::new(TokenLookup::with_default_capacity(store.clone()));
    let source = Arc::new(FakeShareSource::body(share_body(1, &future_end_time(), ICON_ONE)));
    let validator = LinkValidator::new(source, store.clone(), lookup);

    store.set_failing(true);

    assert_eq!(validator.validate(LINK).await.into_parts(), (false, None, None));
    assert!(matches!(
        validator.check(LINK).await,
        Err(Rejection::CatalogueUnavailable(_))
    ));
}

#[tokio::test]
async fn test_catalogue_rescanned_per_call_token_memoized() {
    let store = sample_store();
    let lookup = Arc::new(TokenLookup::with_default_capacity(store.clone()));
    let source = Arc::new(FakeShareSource::body(share_body(1, &future_end_time(), ICON_ONE)));
    let validator = LinkValidator::new(source, store.clone(), lookup);

    for _ in 0..3 {
        assert!(validator.validate(LINK).await.is_valid());
    }

    assert_eq!(store.piece_scans(), 3);
    assert_eq!(store.puzzle_scans(), 1);
    assert_eq!(validator.lookup().stats().hits, 2);
}

#[tokio::test]
async fn test_total_over_arbitrary_input() {
    let source = Arc::new(FakeShareSource::body("{\"result\": []}"));
    let validator = validator_with(source);

    for link in ["", "&&&", "shareId=", "shareId=\u{1F9E9}", "\n\nshareId=x", "?shareId=x"] {
        assert!(!validator.validate(link).await.is_valid(), "link: {:?}", link);
    }
}
