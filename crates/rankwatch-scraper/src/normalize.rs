//! Canonicalisation of text pulled out of leaderboard markup.

use std::sync::LazyLock;

use regex::Regex;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));

/// Removes `<!--...-->` spans, collapses whitespace runs to one space and trims.
///
/// Comment removal runs to a fixpoint: removing the inner comment of
/// `"<!-<!-- x -->- y -->"` forms `"<!-- y -->"`, which a second pass removes.
/// This keeps the function idempotent.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    let stripped = strip_comments(raw);
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_comments(raw: &str) -> String {
    let mut current = raw.to_owned();
    // Each pass removes at least four bytes, so this terminates.
    while COMMENT_RE.is_match(&current) {
        current = COMMENT_RE.replace_all(&current, "").into_owned();
    }
    current
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
