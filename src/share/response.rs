//! Share-info response body
//!
//! Expected shape:
//! `{"retCode": 0, "retMsg": "OK", "result": {"status": 1, "endTime": "...", "piecesIcon": "..."}}`
//! Only `result` matters; the envelope fields are kept for diagnostics.

use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Outer response envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareInfoResponse {
    #[serde(rename = "retCode", default)]
    pub ret_code: Option<i64>,
    #[serde(rename = "retMsg", default)]
    pub ret_msg: Option<String>,
    #[serde(default)]
    pub result: Option<ShareQueryResult>,
}

impl ShareInfoResponse {
    /// Parse a response body
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// The `result` object of a share-info response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShareQueryResult {
    /// 1 when the share is live
    #[serde(default)]
    pub status: Option<i64>,
    /// ISO-8601 expiry instant
    #[serde(rename = "endTime", default)]
    pub end_time: Option<String>,
    /// Icon URL of the shared piece
    #[serde(rename = "piecesIcon", default)]
    pub pieces_icon: Option<String>,
}

impl ShareQueryResult {
    /// No known field present (`"result": {}`)
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.end_time.is_none() && self.pieces_icon.is_none()
    }
}

/// Extended-format layouts tried after RFC 3339; `%#z` allows `+08`, `+0800` and `+08:00`
const END_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

fn basic_format_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4})(\d{2})(\d{2})T(\d{2})(\d{2})(\d{2})?(\.\d+)?([+\-Zz].*)$")
            .expect("basic-format timestamp regex must compile")
    })
}

/// Rewrite `20300101T000000Z` as `2030-01-01T00:00:00Z`; other input is untouched
fn to_extended_format(raw: &str) -> Cow<'_, str> {
    let Some(caps) = basic_format_re().captures(raw) else {
        return Cow::Borrowed(raw);
    };
    let part = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    let mut extended = format!("{}-{}-{}T{}:{}", part(1), part(2), part(3), part(4), part(5));
    if let Some(seconds) = caps.get(6) {
        extended.push(':');
        extended.push_str(seconds.as_str());
    }
    extended.push_str(part(7));
    extended.push_str(part(8));
    Cow::Owned(extended)
}

/// Parse a timezone-aware ISO-8601 timestamp into UTC
///
/// Accepts RFC 3339 (`2025-01-01T00:00:00Z`, `...+08:00`, space separator),
/// minute precision (`2025-01-01T00:00Z`), hour-only or colon-less offsets
/// (`+08`, `+0800`) and the basic format (`20250101T000000Z`). Timestamps
/// without an offset are rejected: their instant is ambiguous.
pub fn parse_end_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let mut normalized = to_extended_format(raw).into_owned();
    if normalized.ends_with(['Z', 'z']) {
        normalized.pop();
        normalized.push_str("+00:00");
    }

    END_TIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::<FixedOffset>::parse_from_str(&normalized, fmt).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
