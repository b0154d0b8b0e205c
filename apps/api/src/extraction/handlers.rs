//! Axum route handlers for the Skill Extraction API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::skills::SkillSet;
use crate::resumes::store::{active_resume_file, persist_extracted_skills};
use crate::resumes::text::resume_text;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub skills: SkillSet,
    pub chunk_count: usize,
    pub failed_chunks: Vec<usize>,
    pub message: String,
}

/// POST /api/v1/skills/extract
///
/// Extracts skills from the candidate's active resume and stores them as the
/// resume's skill set, replacing any earlier extraction.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let file = active_resume_file(&state.db, request.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No active resume found".to_string()))?;

    let resume_id = file.resume_id;

    // PDF parsing is CPU-bound: keep it off the async executor.
    let text = tokio::task::spawn_blocking(move || resume_text(&file.resume_file))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed decoding resume: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    let report = state.extractor.extract(&text).await;

    if !persist_extracted_skills(&state.db, request.user_id, resume_id, &report.skills).await? {
        // The resume was superseded while extraction ran.
        return Err(AppError::Conflict(
            "Active resume changed during extraction; retry".to_string(),
        ));
    }

    Ok(Json(ExtractResponse {
        skills: report.skills,
        chunk_count: report.chunk_count,
        failed_chunks: report.failed_chunks,
        message: "Skills extracted successfully".to_string(),
    }))
}
