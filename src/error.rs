//! Error types for the puzzle checker
//!
//! `AppError` covers infrastructure failures (configuration, database, HTTP).
//! `Rejection` is the reason a share link was judged invalid; it only ever
//! reaches the log, callers see a collapsed `ValidationOutcome`.

use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Why a share link was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No `shareId=` component in the link
    #[error("Invalid link format: shareId not found")]
    MalformedLink,

    /// Connection error, timeout or non-2xx status from the share API
    #[error("Request to API failed: {0}")]
    NetworkFailure(String),

    /// Body was not the expected JSON shape
    #[error("Error in API response: {0}")]
    MalformedResponse(String),

    /// `result` missing/empty or `result.status != 1`
    #[error("Link is invalid (status: {})", display_status(.status))]
    InvalidStatus {
        status: Option<i64>,
        message: Option<String>,
    },

    /// `result.endTime` is in the past
    #[error("Puzzle has expired (end time: {end_time})")]
    Expired { end_time: String },

    /// `result.piecesIcon` absent or empty
    #[error("No pieces icon in response")]
    NoIconData,

    /// No catalogue piece carries the returned icon
    #[error("No matching puzzle piece found in database")]
    NoMatchingPiece { icon_url: String },

    /// The piece catalogue could not be read
    #[error("Puzzle piece catalogue unavailable: {0}")]
    CatalogueUnavailable(String),

    /// No puzzle (or an empty token) for the piece's unique code
    #[error("No matching puzzle found in database")]
    NoToken { unique_code: String },

    /// Token or piece number is falsy (piece number 0)
    #[error("Puzzle piece is incomplete (piece_num: {piece_num})")]
    Incomplete { piece_num: i64 },
}

fn display_status(status: &Option<i64>) -> String {
    match status {
        Some(s) => s.to_string(),
        None => "none".to_string(),
    }
}

impl Rejection {
    /// Short machine-readable name for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::MalformedLink => "malformed_link",
            Rejection::NetworkFailure(_) => "network_failure",
            Rejection::MalformedResponse(_) => "malformed_response",
            Rejection::InvalidStatus { .. } => "invalid_status",
            Rejection::Expired { .. } => "expired",
            Rejection::NoIconData => "no_icon_data",
            Rejection::NoMatchingPiece { .. } => "no_matching_piece",
            Rejection::CatalogueUnavailable(_) => "catalogue_unavailable",
            Rejection::NoToken { .. } => "no_token",
            Rejection::Incomplete { .. } => "incomplete",
        }
    }

    /// Faults outside the remote's verdict are logged at error level,
    /// the remote saying "no" is a warning.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            Rejection::MalformedLink
                | Rejection::NetworkFailure(_)
                | Rejection::MalformedResponse(_)
                | Rejection::CatalogueUnavailable(_)
        )
    }
}
