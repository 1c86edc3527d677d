use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::parser::{parse_resume_text, ParsedResume};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ParseResponse {
    pub text: String,
    pub parsed: ParsedResume,
}

#[derive(Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

/// POST /api/v1/resumes/parse
///
/// Multipart upload; the first field carrying bytes is treated as the
/// resume document.
pub async fn handle_parse_upload(
    State(_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if bytes.is_empty() {
            continue;
        }

        tracing::info!(
            filename = %filename,
            content_type = %content_type,
            size = bytes.len(),
            "parsing uploaded resume"
        );

        let text = extract_text(&filename, &content_type, &bytes)?;
        let parsed = parse_resume_text(&text);
        return Ok(Json(ParseResponse { text, parsed }));
    }

    Err(AppError::Validation(
        "Multipart body contained no file field".to_string(),
    ))
}

/// POST /api/v1/resumes/parse-text
pub async fn handle_parse_text(
    State(_state): State<AppState>,
    Json(req): Json<ParseTextRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }
    let parsed = parse_resume_text(&req.text);
    Ok(Json(ParseResponse {
        text: req.text,
        parsed,
    }))
}
