//! Token Lookup Unit Tests
//!
//! Tests unique code -> token resolution:
//! - Found / not found
//! - Memoization (no re-scan)
//! - LRU eviction at capacity
//! - Store faults are logged and not memoized

use crate::common::{sample_store, LogCapture};
use puzzle_checker::TokenLookup;

#[tokio::test]
async fn test_lookup_known_code() {
    let lookup = TokenLookup::with_default_capacity(sample_store());
    assert_eq!(lookup.lookup("ETH-2025").await.as_deref(), Some("tok-eth"));
}

#[tokio::test]
async fn test_lookup_unknown_code() {
    let lookup = TokenLookup::with_default_capacity(sample_store());
    for code in ["", "eth-2025", "SOL-2025"] {
        assert_eq!(lookup.lookup(code).await, None, "code: {:?}", code);
    }
}

#[tokio::test]
async fn test_repeated_lookup_does_not_rescan() {
    let store = sample_store();
    let lookup = TokenLookup::with_default_capacity(store.clone());

    let first = lookup.lookup("BTC-2025").await;
    let second = lookup.lookup("BTC-2025").await;

    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("tok-btc"));
    assert_eq!(store.puzzle_scans(), 1, "second lookup must come from the memo");
}

#[tokio::test]
async fn test_not_found_is_memoized() {
    let store = sample_store();
    let lookup = TokenLookup::with_default_capacity(store.clone());

    assert_eq!(lookup.lookup("MISSING").await, None);
    assert_eq!(lookup.lookup("MISSING").await, None);

    assert_eq!(store.puzzle_scans(), 1);
    assert!(lookup.is_cached("MISSING"));
}

#[tokio::test]
async fn test_lru_eviction() {
    let store = sample_store();
    let lookup = TokenLookup::new(store.clone(), 2);

    lookup.lookup("BTC-2025").await;
    lookup.lookup("ETH-2025").await;
    // Touch BTC so ETH becomes least recently used
    lookup.lookup("BTC-2025").await;
    lookup.lookup("MISSING").await;

    assert_eq!(lookup.len(), 2);
    assert!(lookup.is_cached("BTC-2025"));
    assert!(lookup.is_cached("MISSING"));
    assert!(!lookup.is_cached("ETH-2025"));

    let scans_before = store.puzzle_scans();
    lookup.lookup("ETH-2025").await;
    assert_eq!(store.puzzle_scans(), scans_before + 1);
}

#[tokio::test]
async fn test_stats() {
    let lookup = TokenLookup::new(sample_store(), 4);

    lookup.lookup("BTC-2025").await;
    lookup.lookup("BTC-2025").await;
    lookup.lookup("ETH-2025").await;

    let stats = lookup.stats();
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.capacity, 4);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
}

#[tokio::test]
async fn test_store_fault_is_logged_and_not_memoized() {
    let logs = LogCapture::default();
    let _guard = logs.install();

    let store = sample_store();
    let lookup = TokenLookup::with_default_capacity(store.clone());

    store.set_failing(true);
    assert_eq!(lookup.lookup("BTC-2025").await, None);
    assert!(!lookup.is_cached("BTC-2025"));

    let output = logs.contents();
    assert!(output.contains("ERROR"), "logs: {}", output);
    assert!(output.contains("Error fetching puzzle data"), "logs: {}", output);

    store.set_failing(false);
    assert_eq!(lookup.lookup("BTC-2025").await.as_deref(), Some("tok-btc"));
}
