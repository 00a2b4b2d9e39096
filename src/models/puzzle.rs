//! Puzzle reference data - read-only records owned by the persistence layer

use serde::{Deserialize, Serialize};

/// A puzzle and the token handed out for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Code shared with the puzzle's pieces
    pub unique_code: String,
    /// Opaque token returned on successful validation
    pub token: String,
}

impl Puzzle {
    pub fn new(unique_code: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            unique_code: unique_code.into(),
            token: token.into(),
        }
    }
}

/// A catalogued puzzle piece, identified remotely by its icon URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzlePiece {
    /// Icon URL as reported in `piecesIcon` by the share API
    pub icon_url: String,
    /// Unique code of the puzzle this piece belongs to
    pub unique_code: String,
    /// Piece number within the puzzle
    pub piece_num: i64,
}

impl PuzzlePiece {
    pub fn new(icon_url: impl Into<String>, unique_code: impl Into<String>, piece_num: i64) -> Self {
        Self {
            icon_url: icon_url.into(),
            unique_code: unique_code.into(),
            piece_num,
        }
    }
}
