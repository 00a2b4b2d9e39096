//! Read-only access to puzzle reference data
//!
//! The puzzle collection and the piece catalogue belong to an external
//! persistence layer. The checker only needs to enumerate them:
//! - `PuzzleStore`: puzzles with their tokens
//! - `PieceCatalogue`: pieces keyed remotely by icon URL

mod memory;
mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

use crate::error::AppResult;
use crate::models::{Puzzle, PuzzlePiece};
use async_trait::async_trait;

/// Puzzle collection
#[async_trait]
pub trait PuzzleStore: Send + Sync {
    /// All puzzles, in storage order
    async fn puzzles(&self) -> AppResult<Vec<Puzzle>>;
}

/// Puzzle piece catalogue
#[async_trait]
pub trait PieceCatalogue: Send + Sync {
    /// All catalogued pieces, in storage order
    async fn pieces(&self) -> AppResult<Vec<PuzzlePiece>>;
}
