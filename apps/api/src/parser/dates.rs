//! Date token normalization — turns the date spellings found in resumes
//! ("Apr 2021", "04/2021", "2021", "Present") into a single comparable
//! integer scale.
//!
//! The month key encodes `year * 100 + month`. "Present"/"Current" maps to
//! the sentinel `PRESENT_KEY`, which sorts after every concrete month.
//! Unparseable tokens return `None`; callers must never treat a missing
//! boundary as zero.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel month key for "Present"/"Current". Always sorts as latest.
pub const PRESENT_KEY: u32 = 999_999;

/// Three-letter month abbreviations, index 0 = January.
/// Longer spellings ("Sept", "September") match on their first three letters.
const MONTH_ABBREVS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

static PRESENT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(present|current)$").expect("valid regex"));

static NUMERIC_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{4})$").expect("valid regex"));

static NAMED_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\s+(\d{4})$")
        .expect("valid regex")
});

static BARE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})$").expect("valid regex"));

/// Looks up a month name by its first three letters, case-insensitive.
fn month_number(name: &str) -> Option<u32> {
    let lowered = name.to_lowercase();
    let prefix = lowered.get(..3)?;
    MONTH_ABBREVS
        .iter()
        .position(|&abbr| abbr == prefix)
        .map(|i| i as u32 + 1)
}

fn match_present(token: &str) -> Option<u32> {
    PRESENT_TOKEN.is_match(token).then_some(PRESENT_KEY)
}

fn match_numeric(token: &str) -> Option<u32> {
    let caps = NUMERIC_MONTH_YEAR.captures(token)?;
    let month: u32 = caps[1].parse().ok()?;
    let year: u32 = caps[2].parse().ok()?;
    Some(year * 100 + month.clamp(1, 12))
}

fn match_named(token: &str) -> Option<u32> {
    let caps = NAMED_MONTH_YEAR.captures(token)?;
    let month = month_number(&caps[1])?;
    let year: u32 = caps[2].parse().ok()?;
    Some(year * 100 + month)
}

fn match_bare_year(token: &str) -> Option<u32> {
    let caps = BARE_YEAR.captures(token)?;
    let year: u32 = caps[1].parse().ok()?;
    // Bare years bias toward January so they sort at the start of the year.
    Some(year * 100 + 1)
}

/// Parses one date token into a month key. Matchers are tried in order;
/// first success wins.
pub fn month_key(token: &str) -> Option<u32> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    let matchers: [fn(&str) -> Option<u32>; 4] =
        [match_present, match_numeric, match_named, match_bare_year];
    matchers.iter().find_map(|m| m(token))
}

/// Renders a month key back into a human-readable token.
/// The sentinel renders as "Present".
pub fn render_month_key(key: u32) -> String {
    if key == PRESENT_KEY {
        return "Present".to_string();
    }
    let year = key / 100;
    let month = (key % 100).clamp(1, 12);
    format!("{} {}", MONTH_NAMES[(month - 1) as usize], year)
}

/// Converts a concrete month key to a linear month count.
/// Callers must resolve the sentinel to a concrete month first.
pub fn month_ordinal(key: u32) -> i64 {
    let year = (key / 100) as i64;
    let month = (key % 100) as i64;
    year * 12 + (month - 1)
}

/// Inclusive month count between two concrete keys: identical start and end
/// counts as one month, not zero.
pub fn months_diff_inclusive(start: u32, end: u32) -> i64 {
    month_ordinal(end) - month_ordinal(start) + 1
}

/// Minimum of two optional keys; a missing boundary does not contribute.
pub fn min_month(a: Option<u32>, b: Option<u32>) -> Option<u32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

/// Maximum of two optional keys; a missing boundary does not contribute.
pub fn max_month(a: Option<u32>, b: Option<u32>) -> Option<u32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}
