//! Puzzle Checker Library
//!
//! Validates puzzle share links against the share-info API and the local
//! puzzle catalogue.

pub mod config;
pub mod db;
pub mod error;
pub mod lookup;
pub mod models;
pub mod share;
pub mod store;
pub mod validator;

pub use config::AppConfig;
pub use error::{AppError, AppResult, Rejection};
pub use lookup::{CacheStats, TokenLookup};
pub use models::{Puzzle, PuzzlePiece, ValidationOutcome};
pub use share::{HttpShareInfoClient, ShareInfoSource};
pub use store::{InMemoryStore, PieceCatalogue, PuzzleStore, SqliteStore};
pub use validator::{AcceptedShare, LinkValidator};
