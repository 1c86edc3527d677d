//! Years-of-experience estimation via interval union.
//!
//! Summing individual role durations double-counts calendar time whenever
//! positions overlap, so spans are first merged into disjoint covering
//! intervals and only then counted. Items with an unparseable boundary are
//! excluded entirely; partial information must not silently bias the
//! aggregate.

use chrono::{Datelike, Utc};

use crate::parser::dates::{month_key, month_ordinal, months_diff_inclusive, PRESENT_KEY};
use crate::parser::models::ExperienceItem;

/// Month key for the current calendar month; "Present" resolves to this.
pub fn now_month_key() -> u32 {
    let now = Utc::now();
    now.year() as u32 * 100 + now.month()
}

/// Resolves a rendered date token to a concrete month key, mapping the
/// Present sentinel to `now_key`. `None` means unknown, never zero.
fn concrete_key(token: &str, now_key: u32) -> Option<u32> {
    match month_key(token) {
        Some(PRESENT_KEY) => Some(now_key),
        other => other,
    }
}

/// Interval-union estimate with an explicit "now" so tests are
/// deterministic. Returns total unioned months / 12, one decimal place.
pub fn estimate_years_at(items: &[ExperienceItem], now_key: u32) -> Option<f64> {
    let mut spans: Vec<(u32, u32)> = Vec::new();
    for item in items {
        let (Some(start), Some(end)) = (
            concrete_key(&item.start, now_key),
            concrete_key(&item.end, now_key),
        ) else {
            continue;
        };
        spans.push((start.min(end), start.max(end)));
    }
    if spans.is_empty() {
        return None;
    }

    spans.sort_by_key(|&(start, _)| start);

    let mut total_months: i64 = 0;
    let (mut cur_start, mut cur_end) = spans[0];
    for &(start, end) in &spans[1..] {
        // Overlapping or contiguous (start within one month of the running
        // end) extends the running span; otherwise commit and restart.
        if month_ordinal(start) <= month_ordinal(cur_end) + 1 {
            if month_ordinal(end) > month_ordinal(cur_end) {
                cur_end = end;
            }
        } else {
            total_months += months_diff_inclusive(cur_start, cur_end);
            cur_start = start;
            cur_end = end;
        }
    }
    total_months += months_diff_inclusive(cur_start, cur_end);

    let years = total_months as f64 / 12.0;
    Some(((years * 10.0).round() / 10.0).max(0.0))
}

/// Estimates total years of experience across the given items.
pub fn estimate_years(items: &[ExperienceItem]) -> Option<f64> {
    estimate_years_at(items, now_month_key())
}
