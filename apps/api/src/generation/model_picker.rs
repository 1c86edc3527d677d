//! Rule-based model selection.
//!
//! Narrative sections get the larger mini model; short structured sections
//! run on nano. The auto picker falls back to prompt length: long inputs
//! (full resume + JD) justify mini, short prompts do not.

use crate::generation::Section;

pub const MODEL_MINI: &str = "gpt-5-mini";
pub const MODEL_NANO: &str = "gpt-5-nano";

/// Auto-picker threshold, in approximate tokens.
const AUTO_TOKEN_THRESHOLD: usize = 3000;

/// Fast local token estimate (~4 chars per token). API usage is
/// authoritative; this only has to be stable for the picker.
pub fn approx_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Manual rule-based picker by section.
pub fn pick_by_section(section: Section) -> &'static str {
    match section {
        Section::About | Section::Experience | Section::Internship | Section::Projects
        | Section::Education => MODEL_MINI,
        Section::Headline | Section::Skills | Section::Certifications => MODEL_NANO,
    }
}

/// Auto picker by combined prompt size.
pub fn pick_auto(system_prompt: &str, user_prompt: &str) -> &'static str {
    let input = approx_tokens(system_prompt) + approx_tokens(user_prompt);
    if input > AUTO_TOKEN_THRESHOLD {
        MODEL_MINI
    } else {
        MODEL_NANO
    }
}

/// Per-section output token budget.
pub fn max_output_tokens(section: Section) -> u32 {
    match section {
        Section::About => 700,
        Section::Experience => 1400,
        Section::Headline => 120,
        _ => 600,
    }
}
