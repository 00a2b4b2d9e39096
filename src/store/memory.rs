//! In-memory store, used for static catalogues and tests

use super::{PieceCatalogue, PuzzleStore};
use crate::error::{AppError, AppResult};
use crate::models::{Puzzle, PuzzlePiece};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Puzzles and pieces held in memory
///
/// Counts collection scans so callers can check memoization, and can be
/// switched into a failing mode to exercise fault handling.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    puzzles: Vec<Puzzle>,
    pieces: Vec<PuzzlePiece>,
    puzzle_scans: AtomicUsize,
    piece_scans: AtomicUsize,
    failing: AtomicBool,
}

/// On-disk layout accepted by `InMemoryStore::from_json_file`
#[derive(Debug, Deserialize)]
struct CatalogueFile {
    #[serde(default)]
    puzzles: Vec<Puzzle>,
    #[serde(default)]
    pieces: Vec<PuzzlePiece>,
}

impl InMemoryStore {
    pub fn new(puzzles: Vec<Puzzle>, pieces: Vec<PuzzlePiece>) -> Self {
        Self {
            puzzles,
            pieces,
            ..Default::default()
        }
    }

    /// Load `{"puzzles": [...], "pieces": [...]}` from a JSON file
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Internal(format!("Failed to read catalogue {}: {}", path.display(), e))
        })?;
        let file: CatalogueFile = serde_json::from_str(&raw).map_err(|e| {
            AppError::Internal(format!("Failed to parse catalogue {}: {}", path.display(), e))
        })?;

        tracing::info!(
            puzzles = file.puzzles.len(),
            pieces = file.pieces.len(),
            "Loaded catalogue from {}",
            path.display()
        );

        Ok(Self::new(file.puzzles, file.pieces))
    }

    /// Number of times the puzzle collection has been enumerated
    pub fn puzzle_scans(&self) -> usize {
        self.puzzle_scans.load(Ordering::SeqCst)
    }

    /// Number of times the piece catalogue has been enumerated
    pub fn piece_scans(&self) -> usize {
        self.piece_scans.load(Ordering::SeqCst)
    }

    /// Make every subsequent read fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Internal("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PuzzleStore for InMemoryStore {
    async fn puzzles(&self) -> AppResult<Vec<Puzzle>> {
        self.puzzle_scans.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.puzzles.clone())
    }
}

#[async_trait]
impl PieceCatalogue for InMemoryStore {
    async fn pieces(&self) -> AppResult<Vec<PuzzlePiece>> {
        self.piece_scans.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.pieces.clone())
    }
}
