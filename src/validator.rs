//! Share-link validation pipeline
//!
//! A link is accepted when, in order:
//! 1. it carries a `shareId`
//! 2. the share-info API answers (2xx, within the timeout)
//! 3. the body parses
//! 4. `result.status == 1`
//! 5. `result.endTime` is not in the past
//! 6. `result.piecesIcon` is present
//! 7. a catalogued piece has that icon URL
//! 8. the piece's puzzle has a token
//! 9. token and piece number are both truthy (piece number 0 is rejected)
//!
//! The first failing step ends the pipeline. Every rejection is logged and
//! collapses to `ValidationOutcome::invalid()`; `validate` never fails.

use crate::error::Rejection;
use crate::lookup::TokenLookup;
use crate::models::{PuzzlePiece, ValidationOutcome};
use crate::share::{extract_share_id, parse_end_time, ShareInfoResponse, ShareInfoSource};
use crate::store::PieceCatalogue;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// A share link that passed every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedShare {
    pub share_id: String,
    pub token: String,
    pub piece_num: i64,
}

/// Validates share links against the remote API and the local catalogue
pub struct LinkValidator {
    source: Arc<dyn ShareInfoSource>,
    catalogue: Arc<dyn PieceCatalogue>,
    lookup: Arc<TokenLookup>,
}

impl LinkValidator {
    pub fn new(
        source: Arc<dyn ShareInfoSource>,
        catalogue: Arc<dyn PieceCatalogue>,
        lookup: Arc<TokenLookup>,
    ) -> Self {
        Self {
            source,
            catalogue,
            lookup,
        }
    }

    /// The token lookup used for step 8
    pub fn lookup(&self) -> &TokenLookup {
        &self.lookup
    }

    /// Validate a share link against the current time
    pub async fn validate(&self, link: &str) -> ValidationOutcome {
        self.validate_at(link, Utc::now()).await
    }

    /// Validate a share link, judging expiry against `now`
    pub async fn validate_at(&self, link: &str, now: DateTime<Utc>) -> ValidationOutcome {
        match self.check_at(link, now).await {
            Ok(accepted) => ValidationOutcome::valid(accepted.token, accepted.piece_num),
            Err(rejection) => {
                log_rejection(link, &rejection);
                ValidationOutcome::invalid()
            }
        }
    }

    /// Run the pipeline against the current time, keeping the rejection reason
    pub async fn check(&self, link: &str) -> Result<AcceptedShare, Rejection> {
        self.check_at(link, Utc::now()).await
    }

    /// Run the pipeline, keeping the rejection reason
    pub async fn check_at(
        &self,
        link: &str,
        now: DateTime<Utc>,
    ) -> Result<AcceptedShare, Rejection> {
        let share_id = extract_share_id(link).ok_or(Rejection::MalformedLink)?;

        let body = self
            .source
            .fetch(share_id)
            .await
            .map_err(|e| Rejection::NetworkFailure(e.to_string()))?;

        let response = ShareInfoResponse::parse(&body)
            .map_err(|e| Rejection::MalformedResponse(e.to_string()))?;

        let result = match response.result {
            Some(result) if !result.is_empty() => result,
            _ => {
                return Err(Rejection::InvalidStatus {
                    status: None,
                    message: response.ret_msg,
                })
            }
        };

        if result.status != Some(1) {
            return Err(Rejection::InvalidStatus {
                status: result.status,
                message: response.ret_msg,
            });
        }

        let raw_end_time = result
            .end_time
            .as_deref()
            .ok_or_else(|| Rejection::MalformedResponse("missing endTime".to_string()))?;
        let end_time = parse_end_time(raw_end_time).ok_or_else(|| {
            Rejection::MalformedResponse(format!("unparsable endTime: {}", raw_end_time))
        })?;
        if end_time < now {
            return Err(Rejection::Expired {
                end_time: raw_end_time.to_string(),
            });
        }

        let icon_url = result
            .pieces_icon
            .filter(|icon| !icon.is_empty())
            .ok_or(Rejection::NoIconData)?;

        let piece = self.match_piece(&icon_url).await?;

        let token = self
            .lookup
            .lookup(&piece.unique_code)
            .await
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Rejection::NoToken {
                unique_code: piece.unique_code.clone(),
            })?;

        if piece.piece_num == 0 {
            return Err(Rejection::Incomplete {
                piece_num: piece.piece_num,
            });
        }

        Ok(AcceptedShare {
            share_id: share_id.to_string(),
            token,
            piece_num: piece.piece_num,
        })
    }

    /// Catalogue piece carrying `icon_url`
    ///
    /// The icon index is rebuilt from the full catalogue on every call;
    /// for duplicate icon URLs the last catalogued piece wins.
    async fn match_piece(&self, icon_url: &str) -> Result<PuzzlePiece, Rejection> {
        let pieces = self
            .catalogue
            .pieces()
            .await
            .map_err(|e| Rejection::CatalogueUnavailable(e.to_string()))?;

        let mut by_icon: HashMap<String, PuzzlePiece> = pieces
            .into_iter()
            .map(|piece| (piece.icon_url.clone(), piece))
            .collect();

        by_icon
            .remove(icon_url)
            .ok_or_else(|| Rejection::NoMatchingPiece {
                icon_url: icon_url.to_string(),
            })
    }
}

fn log_rejection(link: &str, rejection: &Rejection) {
    if rejection.is_fault() {
        tracing::error!(link = link, kind = rejection.kind(), "{}", rejection);
        return;
    }

    match rejection {
        Rejection::InvalidStatus { status, message } => tracing::warn!(
            link = link,
            kind = rejection.kind(),
            status = ?status,
            message = ?message,
            "{}",
            rejection
        ),
        _ => tracing::warn!(link = link, kind = rejection.kind(), "{}", rejection),
    }
}
