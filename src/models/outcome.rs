//! Validation outcome - the only thing callers of the validator see

use serde::Serialize;

/// Verdict for a share link
///
/// `token` and `piece_num` are either both set (valid) or both empty;
/// the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    valid: bool,
    token: Option<String>,
    piece_num: Option<i64>,
}

impl ValidationOutcome {
    /// A rejected link
    pub fn invalid() -> Self {
        Self {
            valid: false,
            token: None,
            piece_num: None,
        }
    }

    /// An accepted link carrying its puzzle token and piece number
    pub fn valid(token: String, piece_num: i64) -> Self {
        Self {
            valid: true,
            token: Some(token),
            piece_num: Some(piece_num),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn piece_num(&self) -> Option<i64> {
        self.piece_num
    }

    /// Flatten into the `(valid, token, piece_num)` triple
    pub fn into_parts(self) -> (bool, Option<String>, Option<i64>) {
        (self.valid, self.token, self.piece_num)
    }
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self::invalid()
    }
}
