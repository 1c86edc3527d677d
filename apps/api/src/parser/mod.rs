//! Resume structural parser — turns unstructured resume text into a
//! canonical, deduplicated, chronologically-ordered model of a candidate's
//! work history.
//!
//! The whole pipeline is a pure, synchronous transformation: text in,
//! `ParsedResume` out. There is no fatal error class here; resume formatting
//! is too variable to treat any heuristic miss as exceptional, so the parser
//! always produces a (possibly sparse) model.

pub mod aggregate;
pub mod blocks;
pub mod dates;
pub mod dedup;
pub mod handlers;
pub mod models;
pub mod role_block;
pub mod segmenter;
pub mod years;

pub use models::{EducationItem, ExperienceItem, ParsedResume, ProjectItem, RawRole};

use crate::parser::aggregate::aggregate_by_company;
use crate::parser::blocks::{parse_education_block, parse_projects_block, parse_simple_list};
use crate::parser::dedup::{
    dedupe_by_company_and_dates, looks_like_education, merge_adjacent_same_company,
    partition_interns, sort_by_dates_desc,
};
use crate::parser::role_block::parse_experience_block;
use crate::parser::segmenter::{normalize_text, pick_section, split_into_sections};
use crate::parser::years::estimate_years;

const SUMMARY_KEYS: &[&str] = &["professional summary", "summary", "profile", "about"];
const EXPERIENCE_KEYS: &[&str] = &[
    "professional experience",
    "experience",
    "employment history",
    "work experience",
    "work history",
];
const INTERNSHIP_KEYS: &[&str] = &["internships", "industrial training", "training"];
const PROJECT_KEYS: &[&str] = &["projects"];
const EDUCATION_KEYS: &[&str] = &["education", "academic background", "academics"];
const CERTIFICATION_KEYS: &[&str] = &["certifications", "licenses"];
const SKILL_KEYS: &[&str] = &["skills", "technical skills", "core skills"];

/// Canonicalizes one bucket of raw roles: adjacent merge in print order,
/// company aggregation, hard dedupe, newest-first sort.
pub fn canonicalize_roles(roles: Vec<RawRole>) -> Vec<ExperienceItem> {
    let merged = merge_adjacent_same_company(roles);
    let aggregated = aggregate_by_company(&merged);
    let mut deduped = dedupe_by_company_and_dates(aggregated);
    sort_by_dates_desc(&mut deduped);
    deduped
}

/// Parses raw resume text into the canonical resume model.
///
/// Deterministic: identical input yields structurally identical output.
pub fn parse_resume_text(text: &str) -> ParsedResume {
    let normalized = normalize_text(text);
    let sections = split_into_sections(&normalized);

    let summary = pick_section(&sections, SUMMARY_KEYS);
    let experience_block = pick_section(&sections, EXPERIENCE_KEYS);
    let internship_block = pick_section(&sections, INTERNSHIP_KEYS);

    let experience_roles = parse_experience_block(experience_block);
    let internship_roles = parse_experience_block(internship_block);

    // Title-based reclassification takes precedence over section placement:
    // intern-titled roles move out of the experience bucket even when the
    // resume filed them under "Experience".
    let (experience_roles, moved) = partition_interns(experience_roles);
    let mut internship_roles: Vec<RawRole> =
        moved.into_iter().chain(internship_roles).collect();
    let mut experience_roles = experience_roles;

    // Education entries that leaked into either bucket are dropped outright.
    experience_roles.retain(|r| !looks_like_education(r));
    internship_roles.retain(|r| !looks_like_education(r));

    let experiences = canonicalize_roles(experience_roles);
    let internships = canonicalize_roles(internship_roles);

    let years_experience = estimate_years(&experiences);

    ParsedResume {
        summary: (!summary.is_empty()).then(|| summary.to_string()),
        years_experience,
        experiences,
        internships,
        projects: parse_projects_block(pick_section(&sections, PROJECT_KEYS)),
        education: parse_education_block(pick_section(&sections, EDUCATION_KEYS)),
        certifications: parse_simple_list(pick_section(&sections, CERTIFICATION_KEYS)),
        skills: parse_simple_list(pick_section(&sections, SKILL_KEYS)),
        raw_sections: sections,
    }
}
