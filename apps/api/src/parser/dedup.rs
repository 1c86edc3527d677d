//! Duplicate removal and role classification.
//!
//! Two dedup passes: an adjacent merge over resume print order (back-to-back
//! stints at the same employer without separating headers) and a hard dedupe
//! keyed by company + date range, where the entry with the larger richness
//! score (bullet count + raw length) survives. Classification moves
//! intern-titled roles out of the experience bucket and drops education
//! entries that leaked into it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::aggregate::normalize_company;
use crate::parser::dates::{max_month, min_month, month_key, render_month_key};
use crate::parser::models::{ExperienceItem, RawRole};

static INTERN_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)\b(
            intern(ship)?
          | summer\s+intern
          | winter\s+intern
          | trainee
          | apprentice
          | co[-\s]?op
          | industrial\s+trainee
          | graduate\s+trainee
        )\b",
    )
    .expect("valid regex")
});

static EDUCATION_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)\b(
            b\.?tech
          | b\.e\.?
          | m\.e\.?
          | bachelor
          | master
          | ph\.?d
          | mba
          | university
          | college
          | institute
          | diploma
          | academy
        )\b",
    )
    .expect("valid regex")
});

/// Title-based internship detection. Takes precedence over section
/// placement: resumes file internships under "Experience" all the time.
pub fn is_intern_title(title: &str) -> bool {
    INTERN_TITLE.is_match(title)
}

/// Degree/institution keywords in title+company mark an education entry that
/// leaked into the experience section. Accepts some false negatives rather
/// than risking legitimate employers with those words.
pub fn looks_like_education(role: &RawRole) -> bool {
    let haystack = format!("{} {}", role.title, role.company).to_lowercase();
    EDUCATION_KEYWORDS.is_match(&haystack)
}

/// Splits roles into (kept experience, internships) by title.
pub fn partition_interns(roles: Vec<RawRole>) -> (Vec<RawRole>, Vec<RawRole>) {
    roles.into_iter().partition(|r| !is_intern_title(&r.title))
}

fn same_company(a: &RawRole, b: &RawRole) -> bool {
    let ka = normalize_company(&a.company);
    let kb = normalize_company(&b.company);
    !ka.is_empty() && ka == kb
}

/// True when `role` ends later than `prev` (ties broken by later start).
/// Missing dates compare as earliest so dated stints always win.
fn is_more_recent(role: &RawRole, prev: &RawRole) -> bool {
    let role_end = month_key(&role.end).map_or(-1, i64::from);
    let prev_end = month_key(&prev.end).map_or(-1, i64::from);
    if role_end != prev_end {
        return role_end > prev_end;
    }
    let role_start = month_key(&role.start).map_or(-1, i64::from);
    let prev_start = month_key(&prev.start).map_or(-1, i64::from);
    role_start > prev_start
}

/// Merges consecutive same-company entries in resume print order: widens the
/// date span, keeps the most recent stint's title/location, unions bullets,
/// concatenates raw traces.
pub fn merge_adjacent_same_company(roles: Vec<RawRole>) -> Vec<RawRole> {
    let mut out: Vec<RawRole> = Vec::new();

    for role in roles {
        let Some(prev) = out.last_mut() else {
            out.push(role);
            continue;
        };
        if !same_company(prev, &role) {
            out.push(role);
            continue;
        }

        if is_more_recent(&role, prev) {
            if !role.title.is_empty() {
                prev.title = role.title.clone();
            }
            if !role.location.is_empty() {
                prev.location = role.location.clone();
            }
        } else {
            if prev.title.is_empty() && !role.title.is_empty() {
                prev.title = role.title.clone();
            }
            if prev.location.is_empty() && !role.location.is_empty() {
                prev.location = role.location.clone();
            }
        }

        let new_start = min_month(month_key(&prev.start), month_key(&role.start));
        let new_end = max_month(month_key(&prev.end), month_key(&role.end));
        if let Some(start) = new_start {
            prev.start = render_month_key(start);
        }
        if let Some(end) = new_end {
            prev.end = render_month_key(end);
        }

        for bullet in &role.bullets {
            if !bullet.is_empty() && !prev.bullets.iter().any(|b| b == bullet) {
                prev.bullets.push(bullet.clone());
            }
        }
        if !role.raw.is_empty() {
            if !prev.raw.is_empty() {
                prev.raw.push_str("\n\n");
            }
            prev.raw.push_str(&role.raw);
        }
    }

    out
}

fn richness(item: &ExperienceItem) -> usize {
    item.bullets.len() + item.raw.len()
}

/// Collapses entries keyed by (normalized company, start, end). On
/// collision the richer entry survives; this guards against an OCR or
/// re-extraction pass producing a near-identical second copy of a role.
pub fn dedupe_by_company_and_dates(items: Vec<ExperienceItem>) -> Vec<ExperienceItem> {
    let mut order: Vec<String> = Vec::new();
    let mut kept: std::collections::HashMap<String, ExperienceItem> =
        std::collections::HashMap::new();

    for item in items {
        let comp = normalize_company(&item.company);
        let key = format!(
            "{}|{}|{}",
            if comp.is_empty() { "__no_company__" } else { &comp },
            item.start.to_lowercase(),
            item.end.to_lowercase()
        );
        match kept.get_mut(&key) {
            None => {
                order.push(key.clone());
                kept.insert(key, item);
            }
            Some(existing) => {
                if richness(&item) > richness(existing) {
                    *existing = item;
                }
            }
        }
    }

    order.into_iter().filter_map(|key| kept.remove(&key)).collect()
}

/// Sorts by end date descending, then start descending. Unknown dates sort
/// last rather than being coerced to a comparable value.
pub fn sort_by_dates_desc(items: &mut [ExperienceItem]) {
    items.sort_by(|a, b| {
        let ae = month_key(&a.end).map_or(-1, i64::from);
        let be = month_key(&b.end).map_or(-1, i64::from);
        let astart = month_key(&a.start).map_or(-1, i64::from);
        let bstart = month_key(&b.start).map_or(-1, i64::from);
        be.cmp(&ae).then(bstart.cmp(&astart))
    });
}
