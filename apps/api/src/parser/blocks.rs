//! Shallow section parsers — projects, education, and simple lists.
//!
//! Unlike experience, these are parsed once per blank-line chunk with no
//! aggregation or merge step.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::models::{EducationItem, ProjectItem};
use crate::parser::role_block::extract_date_range;

static CHUNK_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").expect("valid regex"));

static BULLET_GLYPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•\-–—]\s*").expect("valid regex"));

static DEGREE_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bin\s+(.+)$").expect("valid regex"));

static EN_DASH_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[–—]").expect("valid regex"));

fn strip_bullet(line: &str) -> String {
    BULLET_GLYPH.replace(line, "").trim().to_string()
}

/// Parses the projects section: first line of each chunk is the project
/// name, following lines are bullets, the first bullet doubles as a
/// description.
pub fn parse_projects_block(block: &str) -> Vec<ProjectItem> {
    if block.trim().is_empty() {
        return Vec::new();
    }
    let mut items = Vec::new();
    for chunk in CHUNK_SPLIT.split(block) {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        let lines: Vec<&str> = chunk.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let Some((name, rest)) = lines.split_first() else {
            continue;
        };
        let bullets: Vec<String> = rest
            .iter()
            .map(|l| strip_bullet(l))
            .filter(|l| !l.is_empty())
            .collect();
        items.push(ProjectItem {
            name: name.to_string(),
            description: bullets.first().cloned().unwrap_or_default(),
            bullets,
            raw: chunk.to_string(),
        });
    }
    items
}

/// Parses one education header of the form
/// `School – Degree [in Field] | Location | Dates`.
fn parse_education_header(line: &str) -> EducationItem {
    let mut item = EducationItem::default();

    let parts: Vec<&str> = EN_DASH_SPLIT.splitn(line, 2).collect();
    item.school = parts[0].trim().to_string();

    let Some(right) = parts.get(1) else {
        return item;
    };

    for frag in right.split('|').map(str::trim).filter(|f| !f.is_empty()) {
        if let Some(range) = extract_date_range(frag) {
            if item.start.is_empty() {
                item.start = range.start;
            }
            if item.end.is_empty() {
                item.end = range.end;
            }
            continue;
        }
        if item.location.is_empty() && frag.contains(',') {
            item.location = frag.to_string();
            continue;
        }
        if item.degree.is_empty() {
            match DEGREE_FIELD.captures(frag) {
                Some(caps) => {
                    item.field = caps[1].trim().to_string();
                    let cut = caps.get(0).map_or(frag.len(), |m| m.start());
                    item.degree = frag[..cut].trim().to_string();
                }
                None => item.degree = frag.to_string(),
            }
        }
    }
    item
}

/// Parses the education section, one item per blank-line chunk.
pub fn parse_education_block(block: &str) -> Vec<EducationItem> {
    if block.trim().is_empty() {
        return Vec::new();
    }
    let mut items = Vec::new();
    for chunk in CHUNK_SPLIT.split(block) {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        let Some(first) = chunk.lines().map(str::trim).find(|l| !l.is_empty()) else {
            continue;
        };
        let mut item = parse_education_header(first);
        item.raw = chunk.to_string();
        items.push(item);
    }
    items
}

/// Splits a skills/certifications block into trimmed, deduplicated entries.
pub fn parse_simple_list(block: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for part in block.split(|c| c == '\n' || c == ',') {
        let entry = strip_bullet(part.trim());
        if entry.is_empty() {
            continue;
        }
        if seen.insert(entry.to_lowercase()) {
            out.push(entry);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projects_chunked_on_blank_lines() {
        let block = "Inventory Tracker\n- Built with Rust\n- Cut sync time 40%\n\nChat Bot\n- NLP pipeline";
        let projects = parse_projects_block(block);
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Inventory Tracker");
        assert_eq!(projects[0].bullets.len(), 2);
        assert_eq!(projects[0].description, "Built with Rust");
        assert_eq!(projects[1].name, "Chat Bot");
    }

    #[test]
    fn test_project_without_bullets_has_empty_description() {
        let projects = parse_projects_block("Solo Project");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].description, "");
    }

    #[test]
    fn test_education_header_full_form() {
        let items =
            parse_education_block("State University – BS in Computer Science | Austin, TX | 2015 - 2019");
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.school, "State University");
        assert_eq!(item.degree, "BS");
        assert_eq!(item.field, "Computer Science");
        assert_eq!(item.location, "Austin, TX");
        assert_eq!(item.start, "2015");
        assert_eq!(item.end, "2019");
    }

    #[test]
    fn test_education_school_only() {
        let items = parse_education_block("Community College");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].school, "Community College");
        assert_eq!(items[0].degree, "");
    }

    #[test]
    fn test_simple_list_splits_and_dedupes() {
        let skills = parse_simple_list("Rust, SQL\nPython, rust\n- Docker");
        assert_eq!(skills, vec!["Rust", "SQL", "Python", "Docker"]);
    }

    #[test]
    fn test_simple_list_empty_block() {
        assert!(parse_simple_list("").is_empty());
        assert!(parse_simple_list("\n, ,\n").is_empty());
    }
}
