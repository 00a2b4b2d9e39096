//! SQLite-backed store over the `puzzles` and `puzzle_pieces` tables

use super::{PieceCatalogue, PuzzleStore};
use crate::db::{self, DbPool};
use crate::error::AppResult;
use crate::models::{Puzzle, PuzzlePiece};
use async_trait::async_trait;

/// Reads puzzles and pieces from a SQLite pool
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl PuzzleStore for SqliteStore {
    async fn puzzles(&self) -> AppResult<Vec<Puzzle>> {
        db::list_puzzles(&self.pool).await
    }
}

#[async_trait]
impl PieceCatalogue for SqliteStore {
    async fn pieces(&self) -> AppResult<Vec<PuzzlePiece>> {
        db::list_pieces(&self.pool).await
    }
}
