//! Company aggregation — groups raw role records by normalized employer
//! identity and merges each group into one canonical experience item.
//!
//! Normalization deliberately strips legal-entity suffixes so "Acme
//! Technologies Pvt Ltd" and "Acme Tech" do not fragment into separate
//! entries. The cost is a known precision tradeoff: two genuinely different
//! companies can collapse after suffix-stripping (see DESIGN.md).

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::dates::{max_month, min_month, month_key, render_month_key};
use crate::parser::models::{ExperienceItem, RawRole};

/// Legal-entity and generic suffixes removed as whole words during
/// company-identity normalization. Multi-word entries come first so they
/// are removed before their single-word components.
const COMPANY_STOPWORDS: &[&str] = &[
    "private limited",
    "pvt ltd",
    "pvt limited",
    "private ltd",
    "limited",
    "ltd",
    "inc",
    "llc",
    "llp",
    "corp",
    "corporation",
    "co",
    "technologies",
    "technology",
    "solutions",
    "systems",
    "software",
    "services",
    "india",
    "pvt",
    "plc",
    "gmbh",
];

static STOPWORD_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    COMPANY_STOPWORDS
        .iter()
        .map(|sw| Regex::new(&format!(r"\b{}\b", regex::escape(sw))).expect("valid regex"))
        .collect()
});

/// Prefix for synthesized grouping keys when the company is blank.
pub const NO_COMPANY_PREFIX: &str = "__no_company__::";

/// Normalizes a company name into a grouping key: lowercase, punctuation
/// stripped, whitespace collapsed, legal-entity suffixes removed.
pub fn normalize_company(name: &str) -> String {
    let mut key = name.trim().to_lowercase();
    key = key.replace(['.', ','], " ");
    for pattern in STOPWORD_PATTERNS.iter() {
        key = pattern.replace_all(&key, " ").into_owned();
    }
    key.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Grouping key for a role: the normalized company, or a synthetic key from
/// title+location+dates so company-less duplicates still collapse without
/// merging unrelated blank-company roles.
pub fn grouping_key(role: &RawRole) -> String {
    let key = normalize_company(&role.company);
    if !key.is_empty() {
        return key;
    }
    let alt = format!(
        "{}|{}|{}|{}",
        role.title.to_lowercase(),
        role.location.to_lowercase(),
        role.start,
        role.end
    );
    let alt = alt.split_whitespace().collect::<Vec<_>>().join(" ");
    if alt == "|||" {
        format!("{NO_COMPANY_PREFIX}unknown")
    } else {
        format!("{NO_COMPANY_PREFIX}{alt}")
    }
}

/// Partitions roles by grouping key, preserving first-seen group order.
pub fn group_by_company(roles: &[RawRole]) -> Vec<(String, Vec<RawRole>)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<RawRole>> = HashMap::new();
    for role in roles {
        let key = grouping_key(role);
        let bucket = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            Vec::new()
        });
        bucket.push(role.clone());
    }
    order
        .into_iter()
        .map(|key| {
            let roles = groups.remove(&key).unwrap_or_default();
            (key, roles)
        })
        .collect()
}

/// Most frequent non-empty value; ties break toward first-seen.
fn most_common_non_empty<'a, I: IntoIterator<Item = &'a str>>(values: I) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut best = "";
    let mut best_count = 0usize;
    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let count = counts.entry(value).or_insert(0);
        *count += 1;
        if *count > best_count {
            best = value;
            best_count = *count;
        }
    }
    best.to_string()
}

/// Merges one company group into a single experience item.
///
/// The date span is the min start / max end across the group, with missing
/// boundaries simply not contributing. Title and location come from the
/// most recent stint (latest end, then latest start), so a merged block
/// reflects current seniority rather than print order. The display company
/// is the most frequent literal spelling among the group's roles.
pub fn aggregate_company(key: &str, roles: &[RawRole]) -> ExperienceItem {
    let mut min_start: Option<u32> = None;
    let mut max_end: Option<u32> = None;
    let mut bullets: Vec<String> = Vec::new();
    let mut raw = String::new();

    for role in roles {
        min_start = min_month(min_start, month_key(&role.start));
        max_end = max_month(max_end, month_key(&role.end));

        for bullet in &role.bullets {
            let bullet = bullet.trim();
            if !bullet.is_empty() && !bullets.iter().any(|b| b == bullet) {
                bullets.push(bullet.to_string());
            }
        }
        if !role.raw.is_empty() {
            if !raw.is_empty() {
                raw.push('\n');
            }
            raw.push_str(&role.raw);
        }
    }

    // Most recent stint wins title/location: latest end key, then latest start.
    let mut best: Option<&RawRole> = None;
    let mut best_end: i64 = -1;
    let mut best_start: i64 = -1;
    for role in roles {
        let end = month_key(&role.end).map_or(-1, i64::from);
        let start = month_key(&role.start).map_or(-1, i64::from);
        if end > best_end || (end == best_end && start > best_start) {
            best = Some(role);
            best_end = end;
            best_start = start;
        }
    }

    let display_company = {
        let mode = most_common_non_empty(roles.iter().map(|r| r.company.as_str()));
        if mode.is_empty() && !key.starts_with(NO_COMPANY_PREFIX) {
            key.to_string()
        } else {
            mode
        }
    };

    ExperienceItem {
        title: best.map(|r| r.title.clone()).unwrap_or_default(),
        company: display_company,
        location: best.map(|r| r.location.clone()).unwrap_or_default(),
        start: min_start.map(render_month_key).unwrap_or_default(),
        end: max_end.map(render_month_key).unwrap_or_default(),
        bullets,
        raw,
    }
}

/// Groups and merges a role list into company-level experience items.
pub fn aggregate_by_company(roles: &[RawRole]) -> Vec<ExperienceItem> {
    group_by_company(roles)
        .iter()
        .map(|(key, group)| aggregate_company(key, group))
        .filter(|item| !item.company.is_empty() || !item.title.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(title: &str, company: &str, start: &str, end: &str) -> RawRole {
        RawRole {
            title: title.to_string(),
            company: company.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_strips_case_punctuation_and_suffixes() {
        assert_eq!(normalize_company("Acme Inc."), "acme");
        assert_eq!(normalize_company("ACME INC"), "acme");
        assert_eq!(normalize_company("Acme Technologies Pvt Ltd"), "acme");
        assert_eq!(normalize_company("  Globex,  Corporation "), "globex");
    }

    #[test]
    fn test_normalize_keeps_distinct_names_distinct() {
        assert_ne!(normalize_company("Initech"), normalize_company("Initrode"));
    }

    #[test]
    fn test_case_variants_collapse_to_one_item() {
        let roles = vec![
            role("Engineer", "Acme Inc.", "Jan 2020", "Dec 2020"),
            role("Senior Engineer", "ACME INC", "Jan 2021", "Present"),
        ];
        let items = aggregate_by_company(&roles);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_blank_company_synthesizes_stable_key() {
        let a = role("Consultant", "", "2019", "2020");
        let b = role("Consultant", "", "2019", "2020");
        let c = role("Analyst", "", "2018", "2019");
        assert_eq!(grouping_key(&a), grouping_key(&b));
        assert_ne!(grouping_key(&a), grouping_key(&c));
        assert!(grouping_key(&a).starts_with(NO_COMPANY_PREFIX));
    }

    #[test]
    fn test_span_widens_to_min_start_max_end() {
        let roles = vec![
            role("Engineer", "Acme", "Jan 2020", "Dec 2020"),
            role("Senior Engineer", "Acme", "Jan 2021", "Present"),
        ];
        let item = aggregate_company("acme", &roles);
        assert_eq!(item.start, "Jan 2020");
        assert_eq!(item.end, "Present");
    }

    #[test]
    fn test_missing_boundary_does_not_contribute() {
        let roles = vec![
            role("Engineer", "Acme", "", "Dec 2020"),
            role("Senior Engineer", "Acme", "Jan 2021", ""),
        ];
        let item = aggregate_company("acme", &roles);
        assert_eq!(item.start, "Jan 2021");
        assert_eq!(item.end, "Dec 2020");
    }

    #[test]
    fn test_title_comes_from_most_recent_stint() {
        // Listed oldest-first: the merged title must still be the newest role's.
        let roles = vec![
            role("Engineer", "Acme", "Jan 2018", "Dec 2019"),
            role("Staff Engineer", "Acme", "Jan 2020", "Present"),
        ];
        let item = aggregate_company("acme", &roles);
        assert_eq!(item.title, "Staff Engineer");

        let reversed: Vec<RawRole> = roles.into_iter().rev().collect();
        let item = aggregate_company("acme", &reversed);
        assert_eq!(item.title, "Staff Engineer");
    }

    #[test]
    fn test_display_company_is_most_frequent_spelling() {
        let roles = vec![
            role("A", "Acme Inc", "2018", "2018"),
            role("B", "ACME", "2019", "2019"),
            role("C", "Acme Inc", "2020", "2020"),
        ];
        let item = aggregate_company("acme", &roles);
        assert_eq!(item.company, "Acme Inc");
    }

    #[test]
    fn test_bullets_unioned_in_first_seen_order() {
        let mut a = role("Engineer", "Acme", "2019", "2019");
        a.bullets = vec!["one".into(), "two".into()];
        let mut b = role("Engineer", "Acme", "2020", "2020");
        b.bullets = vec!["two".into(), "three".into()];
        let item = aggregate_company("acme", &[a, b]);
        assert_eq!(item.bullets, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_group_order_is_first_seen() {
        let roles = vec![
            role("A", "Zeta", "2019", "2019"),
            role("B", "Alpha", "2020", "2020"),
            role("C", "Zeta", "2021", "2021"),
        ];
        let groups = group_by_company(&roles);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "zeta");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "alpha");
    }
}
