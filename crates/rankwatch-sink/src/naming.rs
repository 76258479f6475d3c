//! Output file names.

use chrono::{DateTime, TimeZone};

/// Growing file for the wide tracked-apps report.
pub const TRACKED_RANKS_FILE: &str = "apps_ranks.csv";
/// Growing file for single app-page captures.
pub const APP_PAGE_FILE: &str = "appleappcoinbase.csv";

/// One-file-per-run name: `<prefix>_<part>..._<YYYY-mm-dd_HH-MM-SS>.csv`.
#[must_use]
pub fn timestamped_file_name<Tz>(prefix: &str, parts: &[&str], at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut name = String::from(prefix);
    for part in parts.iter().filter(|p| !p.is_empty()) {
        name.push('_');
        name.push_str(part);
    }
    name.push('_');
    name.push_str(&at.format("%Y-%m-%d_%H-%M-%S").to_string());
    name.push_str(".csv");
    name
}
