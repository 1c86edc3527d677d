// LinkedIn section generation engine.
// Implements: generation-input building, prompt assembly, model picking,
// output sanitization. All LLM calls go through llm_client — no direct
// provider calls here.

pub mod generator;
pub mod handlers;
pub mod inputs;
pub mod model_picker;
pub mod prompts;
pub mod sanitize;

use serde::{Deserialize, Serialize};

/// LinkedIn profile sections this service can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Headline,
    About,
    Experience,
    Internship,
    Projects,
    Education,
    Skills,
    Certifications,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Headline => "headline",
            Section::About => "about",
            Section::Experience => "experience",
            Section::Internship => "internship",
            Section::Projects => "projects",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Certifications => "certifications",
        }
    }
}
