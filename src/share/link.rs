//! Share id extraction

use regex::Regex;
use std::sync::OnceLock;

fn share_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Anchored and greedy: the last `shareId=` on the first line wins
        Regex::new(r"^.*shareId=([^&]+)").expect("share id regex must compile")
    })
}

/// Extract the `shareId` value from a share link
///
/// The value runs until the next `&` or the end of the string. Returns
/// `None` when there is no non-empty `shareId=` component.
pub fn extract_share_id(link: &str) -> Option<&str> {
    share_id_re()
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
