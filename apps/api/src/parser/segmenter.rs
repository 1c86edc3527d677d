//! Section segmentation — splits normalized resume text into named sections
//! using header-line heuristics.
//!
//! Resumes carry no machine-readable structure, so a line counts as a header
//! only when, after punctuation/case normalization, it matches a closed set
//! of canonical section names. Everything before the first header lands in
//! the "preamble" bucket; repeated headers accumulate rather than overwrite.

use std::collections::BTreeMap;

/// Alias → canonical section key. Matching is exact after normalization.
const HEADER_ALIASES: &[(&str, &str)] = &[
    ("professional summary", "professional summary"),
    ("summary", "summary"),
    ("profile", "profile"),
    ("about", "about"),
    ("professional experience", "professional experience"),
    ("experience", "experience"),
    ("employment history", "employment history"),
    ("work experience", "work experience"),
    ("work history", "work history"),
    ("projects", "projects"),
    ("project", "projects"),
    ("education", "education"),
    ("academic background", "academic background"),
    ("academics", "academics"),
    ("certifications", "certifications"),
    ("licenses", "licenses"),
    ("skills", "skills"),
    ("technical skills", "technical skills"),
    ("core skills", "core skills"),
    ("internships", "internships"),
    ("internship", "internships"),
    ("internship experience", "internships"),
    ("industrial training", "industrial training"),
    ("training", "training"),
];

pub const PREAMBLE_KEY: &str = "preamble";

/// Normalizes line endings and whitespace before any parsing.
pub fn normalize_text(input: &str) -> String {
    let mut text = input.replace("\r\n", "\n").replace('\t', "  ");
    text = text
        .lines()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    text.trim().to_string()
}

/// Lowercases and strips a trailing colon or dash so "Experience:" and
/// "WORK EXPERIENCE —" match their canonical names.
fn normalize_header_candidate(line: &str) -> String {
    let mut t = line.trim().to_lowercase();
    t = t
        .trim_end_matches(|c: char| c == ':' || c == '-' || c == '–' || c == '—' || c == ' ')
        .to_string();
    t.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the canonical section key when the line is a recognized header.
pub fn canonical_header_key(line: &str) -> Option<&'static str> {
    let cleaned = normalize_header_candidate(line);
    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == cleaned)
        .map(|(_, key)| *key)
}

/// Scanner state: either still in the preamble or inside a named section.
enum ScanState {
    Preamble,
    InSection(&'static str),
}

impl ScanState {
    fn key(&self) -> &str {
        match self {
            ScanState::Preamble => PREAMBLE_KEY,
            ScanState::InSection(key) => key,
        }
    }
}

/// Splits text into sections keyed by canonical header name.
/// With no recognizable headers the whole document lands under "preamble"
/// and every section lookup downstream comes back empty.
pub fn split_into_sections(text: &str) -> BTreeMap<String, String> {
    let mut sections: BTreeMap<String, String> = BTreeMap::new();
    let mut state = ScanState::Preamble;
    let mut buffer: Vec<&str> = Vec::new();

    let mut flush = |state: &ScanState, buffer: &mut Vec<&str>, sections: &mut BTreeMap<String, String>| {
        let chunk = buffer.join("\n");
        let chunk = chunk.trim();
        buffer.clear();
        if chunk.is_empty() {
            return;
        }
        let entry = sections.entry(state.key().to_string()).or_default();
        if entry.is_empty() {
            entry.push_str(chunk);
        } else {
            entry.push('\n');
            entry.push_str(chunk);
        }
    };

    for raw_line in text.lines() {
        match canonical_header_key(raw_line.trim()) {
            Some(key) => {
                flush(&state, &mut buffer, &mut sections);
                state = ScanState::InSection(key);
            }
            None => buffer.push(raw_line),
        }
    }
    flush(&state, &mut buffer, &mut sections);

    sections
}

/// Returns the first non-empty section among the given keys, or "".
pub fn pick_section<'a>(sections: &'a BTreeMap<String, String>, keys: &[&str]) -> &'a str {
    for key in keys {
        if let Some(value) = sections.get(*key) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return trimmed;
            }
        }
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_tolerates_case_colon_and_dash() {
        assert_eq!(canonical_header_key("EXPERIENCE"), Some("experience"));
        assert_eq!(canonical_header_key("Experience:"), Some("experience"));
        assert_eq!(
            canonical_header_key("Work Experience —"),
            Some("work experience")
        );
        assert_eq!(canonical_header_key("Skills -"), Some("skills"));
    }

    #[test]
    fn test_non_headers_rejected() {
        assert_eq!(canonical_header_key("Built experience with Rust"), None);
        assert_eq!(canonical_header_key("- Led projects for clients"), None);
        assert_eq!(canonical_header_key(""), None);
    }

    #[test]
    fn test_internship_aliases_collapse_to_one_key() {
        assert_eq!(canonical_header_key("Internship"), Some("internships"));
        assert_eq!(
            canonical_header_key("Internship Experience"),
            Some("internships")
        );
    }

    #[test]
    fn test_split_basic_sections() {
        let text = "John Doe\n\nEXPERIENCE\nEngineer | Acme | Jan 2020 - Dec 2020\n\nSKILLS\nRust, SQL";
        let sections = split_into_sections(text);
        assert!(sections[PREAMBLE_KEY].contains("John Doe"));
        assert!(sections["experience"].contains("Acme"));
        assert_eq!(sections["skills"], "Rust, SQL");
    }

    #[test]
    fn test_repeated_header_accumulates() {
        let text = "SKILLS\nRust\nEXPERIENCE\nfiller at Acme\nSKILLS\nSQL";
        let sections = split_into_sections(text);
        assert!(sections["skills"].contains("Rust"));
        assert!(sections["skills"].contains("SQL"));
    }

    #[test]
    fn test_no_headers_means_all_preamble() {
        let text = "just a paragraph\nabout nothing in particular";
        let sections = split_into_sections(text);
        assert_eq!(sections.len(), 1);
        assert!(sections.contains_key(PREAMBLE_KEY));
        assert_eq!(pick_section(&sections, &["experience"]), "");
    }

    #[test]
    fn test_pick_section_first_non_empty_wins() {
        let text = "PROFESSIONAL EXPERIENCE\nEngineer at Acme\nSUMMARY\nA person.";
        let sections = split_into_sections(text);
        let block = pick_section(
            &sections,
            &["professional experience", "experience", "work history"],
        );
        assert!(block.contains("Acme"));
    }

    #[test]
    fn test_normalize_text_strips_crlf_and_tabs() {
        let normalized = normalize_text("a\tb\r\nline two   \r\n");
        assert_eq!(normalized, "a  b\nline two");
    }
}
