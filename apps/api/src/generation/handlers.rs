//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::generator::{generate_section, GenerateRequest, GenerateResponse};
use crate::generation::inputs::{build_experience_inputs, ExperienceInputs};
use crate::parser::ParsedResume;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InputsRequest {
    pub parsed: ParsedResume,
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub target_role: String,
    #[serde(default, alias = "job_description_text")]
    pub job_description: String,
}

/// POST /api/v1/generation/inputs
pub async fn handle_build_inputs(
    State(_state): State<AppState>,
    Json(req): Json<InputsRequest>,
) -> Result<Json<ExperienceInputs>, AppError> {
    let inputs = build_experience_inputs(
        &req.parsed,
        &req.resume_text,
        &req.target_role,
        &req.job_description,
    );
    Ok(Json(inputs))
}

/// POST /api/v1/generation/section
pub async fn handle_generate_section(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let response = generate_section(&req, state.generator.as_ref()).await?;
    Ok(Json(response))
}
