//! Section generation: prompt assembly, model choice, LLM call, cleanup.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::model_picker::{max_output_tokens, pick_auto, pick_by_section};
use crate::generation::prompts::{build_user_prompt, SYSTEM_PROMPT};
use crate::generation::sanitize::sanitize_llm_text;
use crate::generation::Section;
use crate::llm_client::{GenerateOptions, TextGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    #[default]
    Manual,
    Auto,
}

/// Per-company context for single-item sections, built from one
/// `ExperienceInput`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleContext {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub raw: String,
}

impl RoleContext {
    fn render(&self) -> String {
        let bullets = if self.bullets.is_empty() {
            "(none)".to_string()
        } else {
            self.bullets
                .iter()
                .map(|b| format!("- {b}"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        format!(
            "Title: {}\nCompany: {}\nLocation: {}\nDates: {} - {}\nHints/Bullets:\n{}\nRaw:\n{}",
            self.title,
            self.company,
            self.location,
            self.start,
            self.end,
            bullets,
            if self.raw.is_empty() { "(none)" } else { &self.raw },
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub section: Section,
    #[serde(default)]
    pub target_role: String,
    pub resume_text: String,
    #[serde(default, alias = "job_description_text")]
    pub job_description: String,
    #[serde(default)]
    pub role_context: Option<RoleContext>,
    #[serde(default)]
    pub mode: GenerationMode,
    #[serde(default)]
    pub model_override: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub content: String,
    pub model: String,
}

/// Runs one section generation end to end.
pub async fn generate_section(
    req: &GenerateRequest,
    generator: &dyn TextGenerator,
) -> Result<GenerateResponse, AppError> {
    if req.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text must not be empty".to_string(),
        ));
    }

    let context = req.role_context.as_ref().map(RoleContext::render);
    let prompt = build_user_prompt(
        req.section,
        &req.target_role,
        &req.resume_text,
        &req.job_description,
        context.as_deref(),
    );

    let model = match &req.model_override {
        Some(model) => model.clone(),
        None => match req.mode {
            GenerationMode::Auto => pick_auto(SYSTEM_PROMPT, &prompt).to_string(),
            GenerationMode::Manual => pick_by_section(req.section).to_string(),
        },
    };

    let mut options = GenerateOptions::for_model(model.clone());
    options.max_tokens = max_output_tokens(req.section);

    tracing::info!(section = req.section.as_str(), model = %model, "generating section");

    let raw = generator.generate(SYSTEM_PROMPT, &prompt, &options).await?;
    let content = sanitize_llm_text(&raw);
    if content.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Model returned no usable content".to_string(),
        ));
    }

    Ok(GenerateResponse { content, model })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the last call and returns a canned reply.
    struct StubGenerator {
        reply: String,
        last: Mutex<Option<(String, GenerateOptions)>>,
    }

    impl StubGenerator {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                last: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(
            &self,
            _system: &str,
            prompt: &str,
            options: &GenerateOptions,
        ) -> Result<String, LlmError> {
            *self.last.lock().unwrap() = Some((prompt.to_string(), options.clone()));
            Ok(self.reply.clone())
        }
    }

    fn request(section: Section) -> GenerateRequest {
        GenerateRequest {
            section,
            target_role: "Backend Engineer".to_string(),
            resume_text: "EXPERIENCE\nEngineer | Acme | Jan 2020 - Present".to_string(),
            job_description: String::new(),
            role_context: None,
            mode: GenerationMode::Manual,
            model_override: None,
        }
    }

    #[tokio::test]
    async fn test_generates_and_sanitizes_output() {
        let stub = StubGenerator::new("**Backend Engineer** | 4+ Years");
        let resp = generate_section(&request(Section::Headline), &stub)
            .await
            .unwrap();
        assert_eq!(resp.content, "Backend Engineer | 4+ Years");
        assert_eq!(resp.model, "gpt-5-nano");
    }

    #[tokio::test]
    async fn test_manual_mode_picks_by_section() {
        let stub = StubGenerator::new("text");
        let resp = generate_section(&request(Section::Experience), &stub)
            .await
            .unwrap();
        assert_eq!(resp.model, "gpt-5-mini");
        let (_, options) = stub.last.lock().unwrap().clone().unwrap();
        assert_eq!(options.max_tokens, 1400);
    }

    #[tokio::test]
    async fn test_model_override_wins() {
        let stub = StubGenerator::new("text");
        let mut req = request(Section::Headline);
        req.model_override = Some("gpt-5-mini".to_string());
        let resp = generate_section(&req, &stub).await.unwrap();
        assert_eq!(resp.model, "gpt-5-mini");
    }

    #[tokio::test]
    async fn test_empty_resume_rejected() {
        let stub = StubGenerator::new("text");
        let mut req = request(Section::About);
        req.resume_text = "  ".to_string();
        let err = generate_section(&req, &stub).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_whitespace_reply_rejected() {
        let stub = StubGenerator::new("   \n  ");
        let err = generate_section(&request(Section::About), &stub)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[tokio::test]
    async fn test_role_context_reaches_prompt() {
        let stub = StubGenerator::new("text");
        let mut req = request(Section::Internship);
        req.role_context = Some(RoleContext {
            title: "Data Intern".to_string(),
            company: "Globex".to_string(),
            ..Default::default()
        });
        generate_section(&req, &stub).await.unwrap();
        let (prompt, _) = stub.last.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("ROLE CONTEXT"));
        assert!(prompt.contains("Globex"));
    }
}
