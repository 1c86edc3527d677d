//! Prompt assembly for LinkedIn section generation.
//!
//! Templates use `{slot}` placeholders replaced before sending. The resume
//! text is the only source of truth for facts; the target role and job
//! description steer keyword choice only.

use crate::generation::Section;

/// System prompt shared by every section call.
pub const SYSTEM_PROMPT: &str = "You are a LinkedIn optimization expert with 15+ years \
    in corporate career branding. Write corporate, recruiter-friendly, keyword-rich \
    content with measurable outcomes. Output plain text only unless JSON is explicitly \
    required.";

/// Formatting rules prepended to every user prompt.
const FORMAT_HEADER: &str = r#"Formatting rules (VERY IMPORTANT):
- Plain text only. Do NOT use *, _, #, markdown code fences, or backticks.
- Bullets (if any) must start with "- " (dash+space), no emojis.
- Never invent facts. [Resume_Text] is your ONLY source of truth for achievements, roles, and skills.
- Use [Job_Description_Text] and [Target_Role] ONLY for keyword optimization and tone; never treat JD requirements as things the candidate has done.
- If a requested detail is missing from the resume, OMIT it instead of guessing."#;

fn section_task(section: Section) -> &'static str {
    match section {
        Section::Headline => {
            r#"Task:
Create a LinkedIn HEADLINE.
- Formula: [Professional Identity] | [Years of Experience + 3 Core Skills from Resume] | [High-Value Keywords]
- Extract the professional identity from the resume summary, not the target role.
- Pick the 3 resume skills most relevant to [Job_Description_Text].
- Integrate 2-3 JD keywords ONLY if they appear in [Resume_Text].
- Under 220 characters, Title Case, no dates. Return ONLY the single headline line."#
        }
        Section::About => {
            r#"Task:
Write a LinkedIn ABOUT section as 3 short paragraphs:
1. Intro: total years of experience, specialization, and core value proposition.
2. Body: skills and quantified achievements strictly from [Resume_Text].
3. Closing: career vision and alignment with [Target_Role].
- Narrative prose, no bullet lists. Under 2,000 characters.
- Weave in JD keywords only where they match actual resume skills."#
        }
        Section::Experience => {
            r#"Task:
Write the LinkedIn EXPERIENCE section in reverse-chronological order, one block per company.
For EACH company output:
Title | Company | Location | Dates
A 1-2 sentence introduction summarizing role scope and impact.
- 4-6 achievement bullets starting with strong action verbs, quantified where the resume shows metrics.
Add a "Key Achievements" sub-block under a company ONLY if the resume has 2-3 standout quantified wins for that company.
Leave one blank line between company blocks. Omit missing fields, never guess."#
        }
        Section::Internship => {
            r#"Task:
Write ONE LinkedIn EXPERIENCE entry for an INTERNSHIP using ONLY [Role_Context] if present, otherwise the single internship found in [Resume_Text].
Format:
Title | Company | Location | Dates
- 3-6 bullets focusing on tools used, what was built, and measured impact.
Omit missing fields."#
        }
        Section::Projects => {
            r#"Task:
Write the PROJECTS section using ONLY projects listed in [Resume_Text].
- One entry per project: Project Title - (Tools & Tech Used)
- 2-3 bullets per project starting with action verbs, outcome-driven.
- No "student project" or "coursework" language."#
        }
        Section::Education => {
            r#"Task:
Write the EDUCATION section, degrees only, most recent first.
- Each entry: Degree | School | Location | Dates (only fields present in the resume).
- Add 1-2 lines of relevant coursework or key academic projects when the resume lists them."#
        }
        Section::Skills => {
            r#"Task:
Write the SKILLS section using skills present in [Resume_Text], prioritized by relevance to [Job_Description_Text].
- Group into logical categories implied by the resume.
- Output each category as a comma-separated list.
- Finish with an "Endorsement Priority:" line naming the 10 most critical skills."#
        }
        Section::Certifications => {
            r#"Task:
Write the CERTIFICATIONS section using ONLY items present in [Resume_Text], max 6.
- Format: Name - Issuing Organization (Year if known). Omit issuer or year when absent."#
        }
    }
}

/// Assembles the full user prompt for one section call.
pub fn build_user_prompt(
    section: Section,
    target_role: &str,
    resume_text: &str,
    job_description: &str,
    role_context: Option<&str>,
) -> String {
    let role_block = match role_context {
        Some(ctx) if !ctx.trim().is_empty() => {
            format!("\n### ROLE CONTEXT (WRITE ONLY THIS ITEM)\n{ctx}\n")
        }
        _ => String::new(),
    };

    let or_empty = |s: &str| {
        if s.trim().is_empty() {
            "(empty)".to_string()
        } else {
            s.to_string()
        }
    };

    format!(
        "{header}\n\n{task}\n\n### DATA (SOURCE OF TRUTH)\n\
         [Resume_Text]: {resume}\n\n\
         ### OPTIMIZATION TARGETS\n\
         [Target_Role]: {role}\n\
         [Job_Description_Text]: {jd}\n\
         {role_block}",
        header = FORMAT_HEADER,
        task = section_task(section),
        resume = or_empty(resume_text),
        role = or_empty(target_role),
        jd = or_empty(job_description),
        role_block = role_block,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_all_data_slots() {
        let prompt = build_user_prompt(
            Section::Headline,
            "Backend Engineer",
            "EXPERIENCE\nEngineer | Acme",
            "We need Rust",
            None,
        );
        assert!(prompt.contains("[Target_Role]: Backend Engineer"));
        assert!(prompt.contains("Engineer | Acme"));
        assert!(prompt.contains("[Job_Description_Text]: We need Rust"));
        assert!(prompt.contains("HEADLINE"));
    }

    #[test]
    fn test_empty_fields_marked_explicitly() {
        let prompt = build_user_prompt(Section::About, "", "resume", "", None);
        assert!(prompt.contains("[Target_Role]: (empty)"));
        assert!(prompt.contains("[Job_Description_Text]: (empty)"));
    }

    #[test]
    fn test_role_context_block_only_when_present() {
        let without = build_user_prompt(Section::Experience, "", "r", "", None);
        assert!(!without.contains("ROLE CONTEXT"));
        let with = build_user_prompt(
            Section::Experience,
            "",
            "r",
            "",
            Some("Title: Engineer\nCompany: Acme"),
        );
        assert!(with.contains("ROLE CONTEXT"));
        assert!(with.contains("Company: Acme"));
    }

    #[test]
    fn test_each_section_has_distinct_task() {
        let sections = [
            Section::Headline,
            Section::About,
            Section::Experience,
            Section::Internship,
            Section::Projects,
            Section::Education,
            Section::Skills,
            Section::Certifications,
        ];
        for window in sections.windows(2) {
            assert_ne!(section_task(window[0]), section_task(window[1]));
        }
    }
}
