use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One employment stint at one company, after aggregation.
/// Invariant: `company` or `title` is non-empty, bullets contain no
/// empty or duplicate entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Rendered date token, e.g. "Apr 2021". Empty when unknown.
    pub start: String,
    /// Rendered date token, e.g. "Present". Empty when unknown.
    pub end: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    /// Concatenated original source lines, retained for LLM context.
    #[serde(default)]
    pub raw: String,
}

/// One resume-printed role, before any cross-role merging.
/// Same shape as `ExperienceItem` but one record per printed position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRole {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub raw: String,
}

impl From<&ExperienceItem> for RawRole {
    fn from(item: &ExperienceItem) -> Self {
        RawRole {
            title: item.title.trim().to_string(),
            company: item.company.trim().to_string(),
            location: item.location.trim().to_string(),
            start: item.start.trim().to_string(),
            end: item.end.trim().to_string(),
            bullets: item.bullets.iter().map(|b| b.trim().to_string()).collect(),
            raw: item.raw.trim().to_string(),
        }
    }
}

impl RawRole {
    /// A role is worth keeping only when it has some identity.
    pub fn has_identity(&self) -> bool {
        !self.company.is_empty() || !self.title.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub school: String,
    pub degree: String,
    pub field: String,
    pub start: String,
    pub end: String,
    pub location: String,
    #[serde(default)]
    pub raw: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub raw: String,
}

/// Root aggregate produced once per uploaded resume.
/// Pure function of the input text; immutable downstream except for
/// UI-level hand edits, which the builder re-canonicalizes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub experiences: Vec<ExperienceItem>,
    /// Distinct bucket; never overlaps `experiences`.
    pub internships: Vec<ExperienceItem>,
    pub projects: Vec<ProjectItem>,
    pub education: Vec<EducationItem>,
    pub certifications: Vec<String>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<f64>,
    /// Per-section raw text, retained for traceability.
    pub raw_sections: BTreeMap<String, String>,
}
