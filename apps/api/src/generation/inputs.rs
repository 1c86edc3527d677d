//! Builds per-company generation inputs from a parsed resume.
//!
//! The parsed items may have been hand-edited in between parsing and
//! generation, so classification, aggregation, dedup, and sort are
//! re-applied here rather than trusted from the incoming payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::parser::dedup::{is_intern_title, looks_like_education};
use crate::parser::years::estimate_years;
use crate::parser::{canonicalize_roles, ExperienceItem, ParsedResume, RawRole};

const FALLBACK_EXPERIENCE_TITLE: &str = "Associate";
const FALLBACK_INTERN_TITLE: &str = "Intern";

/// One self-contained generation input: everything a single section call
/// needs, with the shared request context duplicated onto each item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceInput {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start: String,
    pub end: String,
    pub bullets: Vec<String>,
    pub raw: String,
    pub target_role: String,
    pub resume_text: String,
    pub job_description_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceInputs {
    pub exp_inputs: Vec<ExperienceInput>,
    pub int_inputs: Vec<ExperienceInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<f64>,
}

fn to_input(
    item: &ExperienceItem,
    fallback_title: &str,
    target_role: &str,
    resume_text: &str,
    job_description: &str,
) -> ExperienceInput {
    let title = if item.title.trim().is_empty() {
        fallback_title.to_string()
    } else {
        item.title.clone()
    };
    ExperienceInput {
        id: Uuid::new_v4(),
        title,
        company: item.company.clone(),
        location: item.location.clone(),
        start: item.start.clone(),
        end: item.end.clone(),
        bullets: item.bullets.clone(),
        raw: item.raw.clone(),
        target_role: target_role.to_string(),
        resume_text: resume_text.to_string(),
        job_description_text: job_description.to_string(),
    }
}

/// Rebuilds canonical generation inputs from (possibly edited) parsed items.
pub fn build_experience_inputs(
    parsed: &ParsedResume,
    resume_text: &str,
    target_role: &str,
    job_description: &str,
) -> ExperienceInputs {
    let mut experience_roles: Vec<RawRole> = Vec::new();
    let mut internship_roles: Vec<RawRole> = Vec::new();

    for item in &parsed.experiences {
        let role = RawRole::from(item);
        if is_intern_title(&role.title) {
            internship_roles.push(role);
        } else {
            experience_roles.push(role);
        }
    }
    for item in &parsed.internships {
        internship_roles.push(RawRole::from(item));
    }

    experience_roles.retain(|r| !looks_like_education(r));
    internship_roles.retain(|r| !looks_like_education(r));

    let experiences = canonicalize_roles(experience_roles);
    let internships = canonicalize_roles(internship_roles);

    let years = estimate_years(&experiences);

    let exp_inputs = experiences
        .iter()
        .map(|item| {
            to_input(
                item,
                FALLBACK_EXPERIENCE_TITLE,
                target_role,
                resume_text,
                job_description,
            )
        })
        .collect();
    let int_inputs = internships
        .iter()
        .map(|item| {
            to_input(
                item,
                FALLBACK_INTERN_TITLE,
                target_role,
                resume_text,
                job_description,
            )
        })
        .collect();

    ExperienceInputs {
        exp_inputs,
        int_inputs,
        years,
    }
}
