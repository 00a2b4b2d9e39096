//! Database module for the puzzle checker
//!
//! Manages the SQLite connection pool (WAL mode) holding the puzzle
//! collection and the piece catalogue.

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Puzzle, PuzzlePiece};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;

/// Type alias for the SQLite connection pool
pub type DbPool = Pool<Sqlite>;

const SCHEMA: &str = include_str!("../database/schema.sql");

/// Initialize the database connection pool
pub async fn init_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    // Ensure data directory exists
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Internal(format!("Failed to create database directory: {}", e))
            })?;
            info!("Created database directory: {:?}", parent);
        }
    }

    let db_url = format!("sqlite:{}?mode=rwc", config.path.display());

    let connect_options = SqliteConnectOptions::from_str(&db_url)?
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(5))
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect_with(connect_options)
        .await?;

    info!(
        "Database pool initialized: {:?} (max {} connections)",
        config.path, config.max_connections
    );

    Ok(pool)
}

/// Apply the embedded schema (idempotent)
pub async fn run_migrations(pool: &DbPool) -> AppResult<()> {
    // SQLite doesn't support multiple statements in one query
    for statement in SCHEMA.split(';') {
        let stmt = strip_comments(statement);
        if stmt.is_empty() {
            continue;
        }

        sqlx::query(&stmt).execute(pool).await?;
    }

    info!("Database schema applied successfully");
    Ok(())
}

fn strip_comments(statement: &str) -> String {
    statement
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Insert a puzzle row
pub async fn insert_puzzle(pool: &DbPool, puzzle: &Puzzle) -> AppResult<()> {
    sqlx::query("INSERT INTO puzzles (unique_code, token) VALUES (?, ?)")
        .bind(&puzzle.unique_code)
        .bind(&puzzle.token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Insert a puzzle piece row
pub async fn insert_piece(pool: &DbPool, piece: &PuzzlePiece) -> AppResult<()> {
    sqlx::query("INSERT INTO puzzle_pieces (icon_url, unique_code, piece_num) VALUES (?, ?, ?)")
        .bind(&piece.icon_url)
        .bind(&piece.unique_code)
        .bind(piece.piece_num)
        .execute(pool)
        .await?;
    Ok(())
}

/// All puzzles in insertion order
pub async fn list_puzzles(pool: &DbPool) -> AppResult<Vec<Puzzle>> {
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT unique_code, token FROM puzzles ORDER BY id")
            .fetch_all(pool)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(unique_code, token)| Puzzle { unique_code, token })
        .collect())
}

/// All puzzle pieces in insertion order
pub async fn list_pieces(pool: &DbPool) -> AppResult<Vec<PuzzlePiece>> {
    let rows: Vec<(String, String, i64)> = sqlx::query_as(
        "SELECT icon_url, unique_code, piece_num FROM puzzle_pieces ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(icon_url, unique_code, piece_num)| PuzzlePiece {
            icon_url,
            unique_code,
            piece_num,
        })
        .collect())
}
