//! Splitting of the combined `"<rank>. <name>"` leaderboard label.
//!
//! Leaderboard markup puts rank and name in a single text node. Keeping the
//! split here means a markup change only touches this function.

use crate::error::{MalformedReason, ParseError};

/// Parses `"12. Coinbase: Buy Bitcoin & Ether"` into `(12, "Coinbase: Buy Bitcoin & Ether")`.
///
/// Splits on the first `.` only, so names containing periods survive intact.
/// Both halves are trimmed.
///
/// # Errors
///
/// Returns [`ParseError::MalformedEntry`] when the text is empty, has no
/// period, the prefix is not a non-negative integer, or nothing follows the
/// period.
pub fn parse_rank_name(text: &str) -> Result<(u32, String), ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::malformed(text, MalformedReason::Empty));
    }

    let Some((rank_part, name_part)) = trimmed.split_once('.') else {
        return Err(ParseError::malformed(text, MalformedReason::NoPeriod));
    };

    let rank = rank_part
        .trim()
        .parse::<u32>()
        .map_err(|_| ParseError::malformed(text, MalformedReason::InvalidRank))?;

    let name = name_part.trim();
    if name.is_empty() {
        return Err(ParseError::malformed(text, MalformedReason::EmptyName));
    }

    Ok((rank, name.to_owned()))
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
