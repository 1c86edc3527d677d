//! Role-block parsing — detects per-role header lines inside an
//! experience/internship section and captures the bullet lines that follow.
//!
//! Resumes format role headers inconsistently (pipe-delimited, dash-delimited,
//! prose "Title at Company"), so header detection is a multi-signal OR and
//! header parsing is best-effort: a malformed header degrades to a partial
//! record (often company only) rather than rejecting the block.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::models::RawRole;

static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)\b
        ( (?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\s+\d{4}
        | \d{1,2}/\d{4}
        | \d{4}
        )
        \s*(?:–|—|-|to)\s*
        ( (?:present|current)
        | (?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\s+\d{4}
        | \d{1,2}/\d{4}
        | \d{4}
        )\b",
    )
    .expect("valid regex")
});

static DASH_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[–—-]").expect("valid regex"));

static SPACED_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" at | – | — | - ").expect("valid regex"));

static TITLE_AT_COMPANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.+?)\s+at\s+(.+)$").expect("valid regex"));

static BULLET_GLYPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•\-–—]\s*").expect("valid regex"));

static HAS_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]").expect("valid regex"));

/// A matched date range, with the exact matched text so callers can remove
/// it from the surrounding segment.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
    pub matched: String,
}

/// Extracts the first date range from a line, if any.
pub fn extract_date_range(line: &str) -> Option<DateRange> {
    let caps = DATE_RANGE.captures(line)?;
    Some(DateRange {
        start: caps[1].trim().to_string(),
        end: caps[2].trim().to_string(),
        matched: caps[0].to_string(),
    })
}

/// Decides whether a line likely starts a new role.
/// Any signal wins: pipe-delimited text, a date range next to a separator,
/// or an " at "/spaced-dash separator alongside letters.
pub fn is_role_header(line: &str) -> bool {
    let t = line.trim();
    if t.is_empty() {
        return false;
    }
    let has_pipe = t.contains('|');
    let has_date = extract_date_range(t).is_some();
    let has_dash_like = t.contains('-') || t.contains('–') || t.contains('—');

    if has_date && (has_pipe || has_dash_like) {
        return true;
    }
    if SPACED_SEPARATOR.is_match(t) && HAS_LETTERS.is_match(t) {
        return true;
    }
    has_pipe && HAS_LETTERS.is_match(t)
}

/// Parsed header fields; any of them may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderFields {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start: String,
    pub end: String,
}

/// Splits a segment on dash glyphs, dropping empty fragments.
fn dash_parts(segment: &str) -> Vec<String> {
    DASH_SPLIT
        .split(segment)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Parses a role header line, trying pipe-delimited, then dash-delimited,
/// then prose forms. Never fabricates a title.
pub fn parse_header_line(line: &str) -> HeaderFields {
    let line = line.trim();
    let mut fields = HeaderFields::default();

    let pipe_parts: Vec<&str> = line.split('|').map(str::trim).collect();
    if pipe_parts.len() >= 2 {
        // First segment may embed a date range; pull it out before splitting.
        let mut left = pipe_parts[0].to_string();
        if let Some(range) = extract_date_range(&left) {
            left = left.replacen(&range.matched, "", 1).trim().to_string();
            fields.start = range.start;
            fields.end = range.end;
        }

        let left_parts = dash_parts(&left);
        let mut rest: Vec<&str> = Vec::new();
        for frag in &pipe_parts[1..] {
            if let Some(range) = extract_date_range(frag) {
                if fields.start.is_empty() {
                    fields.start = range.start;
                }
                if fields.end.is_empty() {
                    fields.end = range.end;
                }
            } else if !frag.is_empty() {
                rest.push(frag);
            }
        }

        if left_parts.len() >= 2 {
            fields.title = left_parts[0].clone();
            fields.company = left_parts[1..].join(" - ");
            if let Some(loc) = rest.first() {
                fields.location = loc.to_string();
            }
        } else if !rest.is_empty() {
            // "Title | Company | Location | Dates" — the most common shape.
            fields.title = left;
            fields.company = rest[0].to_string();
            if let Some(loc) = rest.get(1) {
                fields.location = loc.to_string();
            }
        } else {
            // Nothing but dates after the pipe: treat the segment as company.
            fields.company = left;
        }
        return fields;
    }

    // Dash or prose form. Remove the date range first so dash-splitting does
    // not cut the range itself apart.
    let mut remainder = line.to_string();
    if let Some(range) = extract_date_range(&remainder) {
        remainder = remainder.replacen(&range.matched, "", 1);
        fields.start = range.start;
        fields.end = range.end;
    }

    let parts = dash_parts(&remainder);
    match parts.len() {
        0 => {}
        1 => {
            if let Some(caps) = TITLE_AT_COMPANY.captures(&parts[0]) {
                fields.title = caps[1].trim().to_string();
                fields.company = caps[2].trim().to_string();
            } else {
                fields.company = parts[0].clone();
            }
        }
        _ => {
            if let Some(caps) = TITLE_AT_COMPANY.captures(&parts[0]) {
                fields.title = caps[1].trim().to_string();
                fields.company = caps[2].trim().to_string();
                fields.location = parts[1].clone();
            } else {
                fields.title = parts[0].clone();
                fields.company = parts[1].clone();
                if parts.len() >= 3 {
                    fields.location = parts[2].clone();
                }
            }
        }
    }
    fields
}

/// Strips a leading bullet glyph; `None` when the line is not a bullet.
fn strip_bullet(line: &str) -> Option<String> {
    let stripped = BULLET_GLYPH.replace(line, "");
    if stripped == line {
        None
    } else {
        Some(stripped.trim().to_string())
    }
}

/// Deduplicates bullets case/whitespace-insensitively, preserving order.
fn dedupe_bullets(bullets: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for bullet in bullets {
        let trimmed = bullet.trim().to_string();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ");
        if seen.insert(key) {
            out.push(trimmed);
        }
    }
    out
}

/// Parses an experience/internship section into raw per-role records.
pub fn parse_experience_block(block: &str) -> Vec<RawRole> {
    if block.trim().is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = block.lines().map(str::trim).collect();
    let mut items: Vec<RawRole> = Vec::new();
    let mut current: Option<RawRole> = None;
    let mut current_raw: Vec<String> = Vec::new();

    fn flush(current: &mut Option<RawRole>, current_raw: &mut Vec<String>, items: &mut Vec<RawRole>) {
        if let Some(mut role) = current.take() {
            role.raw = current_raw.join("\n").trim().to_string();
            role.bullets = dedupe_bullets(std::mem::take(&mut role.bullets));
            if role.has_identity() {
                items.push(role);
            }
        }
        current_raw.clear();
    }

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if is_role_header(line) {
            let mut header = parse_header_line(line);
            let mut consumed_next: Option<&str> = None;

            // No date on the header line: peek at the next line for a bare
            // date range before falling back to "unknown".
            if (header.start.is_empty() || header.end.is_empty()) && i + 1 < lines.len() {
                if let Some(range) = extract_date_range(lines[i + 1]) {
                    if header.start.is_empty() {
                        header.start = range.start;
                    }
                    if header.end.is_empty() {
                        header.end = range.end;
                    }
                    consumed_next = Some(lines[i + 1]);
                    i += 1;
                }
            }

            flush(&mut current, &mut current_raw, &mut items);
            current = Some(RawRole {
                title: header.title,
                company: header.company,
                location: header.location,
                start: header.start,
                end: header.end,
                bullets: Vec::new(),
                raw: String::new(),
            });
            current_raw.push(line.to_string());
            if let Some(next) = consumed_next {
                current_raw.push(next.to_string());
            }
            i += 1;
            continue;
        }

        // Content line for the current role. Bullets are collected; other
        // narrative lines only land in the raw trace.
        if let Some(role) = current.as_mut() {
            if !line.is_empty() {
                current_raw.push(line.to_string());
            }
            if let Some(bullet) = strip_bullet(line) {
                if !bullet.is_empty() {
                    role.bullets.push(bullet);
                }
            }
        }
        i += 1;
    }
    flush(&mut current, &mut current_raw, &mut items);

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_date_range_named_months() {
        let range = extract_date_range("Engineer | Acme | Jan 2020 - Dec 2021").unwrap();
        assert_eq!(range.start, "Jan 2020");
        assert_eq!(range.end, "Dec 2021");
    }

    #[test]
    fn test_extract_date_range_to_separator_and_present() {
        let range = extract_date_range("06/2021 to Present").unwrap();
        assert_eq!(range.start, "06/2021");
        assert_eq!(range.end, "Present");
    }

    #[test]
    fn test_extract_date_range_bare_years() {
        let range = extract_date_range("2019 - 2021").unwrap();
        assert_eq!(range.start, "2019");
        assert_eq!(range.end, "2021");
    }

    #[test]
    fn test_no_date_range_in_plain_prose() {
        assert!(extract_date_range("Led a team of engineers").is_none());
    }

    #[test]
    fn test_header_detection_signals() {
        assert!(is_role_header("Engineer | Acme | Jan 2020 - Dec 2021"));
        assert!(is_role_header("Engineer at Acme"));
        assert!(is_role_header("Engineer – Acme – Remote"));
        assert!(!is_role_header("Shipped the billing migration"));
        assert!(!is_role_header(""));
    }

    #[test]
    fn test_bullet_lines_are_not_headers() {
        assert!(!is_role_header("- Built a data pipeline"));
        assert!(!is_role_header("• Reduced latency by 40%"));
    }

    #[test]
    fn test_parse_pipe_header_full_shape() {
        let fields = parse_header_line("Software Engineer | Acme Inc | Remote | Jan 2020 - Dec 2021");
        assert_eq!(fields.title, "Software Engineer");
        assert_eq!(fields.company, "Acme Inc");
        assert_eq!(fields.location, "Remote");
        assert_eq!(fields.start, "Jan 2020");
        assert_eq!(fields.end, "Dec 2021");
    }

    #[test]
    fn test_parse_pipe_header_with_embedded_date_on_left() {
        let fields = parse_header_line("Engineer - Acme Jan 2020 - Dec 2021 | Remote");
        assert_eq!(fields.start, "Jan 2020");
        assert_eq!(fields.end, "Dec 2021");
        assert_eq!(fields.title, "Engineer");
        assert_eq!(fields.company, "Acme");
        assert_eq!(fields.location, "Remote");
    }

    #[test]
    fn test_parse_pipe_header_company_and_dates_only() {
        let fields = parse_header_line("Acme Corp | Jan 2020 - Dec 2021");
        assert_eq!(fields.title, "");
        assert_eq!(fields.company, "Acme Corp");
        assert_eq!(fields.start, "Jan 2020");
    }

    #[test]
    fn test_parse_dash_header_with_dates() {
        let fields = parse_header_line("Data Analyst - Globex - Austin, TX - Jun 2019 - May 2020");
        assert_eq!(fields.title, "Data Analyst");
        assert_eq!(fields.company, "Globex");
        assert_eq!(fields.location, "Austin, TX");
        assert_eq!(fields.start, "Jun 2019");
        assert_eq!(fields.end, "May 2020");
    }

    #[test]
    fn test_parse_prose_title_at_company() {
        let fields = parse_header_line("Backend Engineer at Initech");
        assert_eq!(fields.title, "Backend Engineer");
        assert_eq!(fields.company, "Initech");
        assert_eq!(fields.start, "");
    }

    #[test]
    fn test_unrecognized_header_degrades_to_company_only() {
        let fields = parse_header_line("Globex Corporation | 2018 - 2019");
        assert_eq!(fields.company, "Globex Corporation");
        assert_eq!(fields.title, "");
    }

    #[test]
    fn test_block_with_bullets_and_narrative() {
        let block = "Software Engineer | Acme Inc | Remote | Jan 2020 - Dec 2021\n\
                     Worked on the payments platform.\n\
                     - Built X\n\
                     • Shipped Y\n\
                     - Built X";
        let roles = parse_experience_block(block);
        assert_eq!(roles.len(), 1);
        let role = &roles[0];
        assert_eq!(role.bullets, vec!["Built X", "Shipped Y"]);
        assert!(role.raw.contains("Worked on the payments platform."));
    }

    #[test]
    fn test_date_on_following_line_is_picked_up() {
        let block = "Backend Engineer at Initech\nJan 2019 - Mar 2020\n- Did things";
        let roles = parse_experience_block(block);
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].start, "Jan 2019");
        assert_eq!(roles[0].end, "Mar 2020");
    }

    #[test]
    fn test_roles_without_identity_are_dropped() {
        let block = "2019 - 2020 | \n- orphan bullet";
        let roles = parse_experience_block(block);
        assert!(roles.is_empty());
    }

    #[test]
    fn test_multiple_roles_split_on_headers() {
        let block = "Engineer | Acme | Jan 2020 - Dec 2020\n- a\nSenior Engineer | Globex | Jan 2021 - Present\n- b";
        let roles = parse_experience_block(block);
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].company, "Acme");
        assert_eq!(roles[1].company, "Globex");
        assert_eq!(roles[1].end, "Present");
    }

    #[test]
    fn test_empty_block_yields_no_roles() {
        assert!(parse_experience_block("").is_empty());
        assert!(parse_experience_block("\n\n").is_empty());
    }
}
