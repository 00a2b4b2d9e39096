//! Token lookup with a bounded LRU memo
//!
//! Resolves a puzzle's unique code to its token by scanning the puzzle
//! collection. Answers (including "not found") are memoized per unique
//! code; a failed scan is logged, reported as "not found" and not memoized.

use crate::store::PuzzleStore;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default number of memoized unique codes
pub const DEFAULT_LOOKUP_CAPACITY: usize = 128;

/// Unique code -> token resolver
pub struct TokenLookup {
    store: Arc<dyn PuzzleStore>,
    /// Memoized answers; `None` means "no such puzzle"
    cache: Mutex<LruCache<String, Option<String>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TokenLookup {
    /// Create a lookup over `store` memoizing up to `capacity` codes
    pub fn new(store: Arc<dyn PuzzleStore>, capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity)
            .or(NonZeroUsize::new(DEFAULT_LOOKUP_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            store,
            cache: Mutex::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Create a lookup with the default capacity (128)
    pub fn with_default_capacity(store: Arc<dyn PuzzleStore>) -> Self {
        Self::new(store, DEFAULT_LOOKUP_CAPACITY)
    }

    /// Token of the first puzzle whose unique code equals `unique_code`
    pub async fn lookup(&self, unique_code: &str) -> Option<String> {
        if let Some(cached) = self.cache.lock().get(unique_code) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(unique_code = unique_code, "Token lookup cache hit");
            return cached.clone();
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let puzzles = match self.store.puzzles().await {
            Ok(puzzles) => puzzles,
            Err(e) => {
                tracing::error!(
                    unique_code = unique_code,
                    error = %e,
                    "Error fetching puzzle data"
                );
                return None;
            }
        };

        let token = puzzles
            .into_iter()
            .find(|p| p.unique_code == unique_code)
            .map(|p| p.token);

        self.cache.lock().put(unique_code.to_string(), token.clone());
        token
    }

    /// Drop every memoized answer
    pub fn clear(&self) {
        self.cache.lock().clear();
        tracing::debug!("Token lookup cache cleared");
    }

    /// Whether `unique_code` currently has a memoized answer
    pub fn is_cached(&self, unique_code: &str) -> bool {
        self.cache.lock().contains(unique_code)
    }

    /// Number of memoized unique codes
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let cache = self.cache.lock();
        CacheStats {
            entries: cache.len(),
            capacity: cache.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of entries
    pub entries: usize,
    /// Maximum capacity
    pub capacity: usize,
    /// Lookups answered from the memo
    pub hits: u64,
    /// Lookups that scanned the store
    pub misses: u64,
}
