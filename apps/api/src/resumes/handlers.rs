//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::skills::SkillSet;
use crate::models::resume::ResumeRow;
use crate::resumes::store::{
    active_resume, active_resume_file, replace_active_resume, skills_from_json, NewResume,
};
use crate::resumes::text::detect_content_type;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub resume: ResumeRow,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ActiveResumeResponse {
    pub resume: ResumeRow,
    pub skills: SkillSet,
}

/// Fields collected from the upload form.
#[derive(Default)]
struct UploadForm {
    user_id: Option<Uuid>,
    title: Option<String>,
    file: Option<(Bytes, Option<String>)>,
}

/// POST /api/v1/resumes
///
/// Multipart form: `user_id`, `resume_title`, `resume_file`.
/// The upload becomes the candidate's only active resume.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "user_id" => {
                let raw = field_text(field).await?;
                let id = raw
                    .trim()
                    .parse::<Uuid>()
                    .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?;
                form.user_id = Some(id);
            }
            "resume_title" => form.title = Some(field_text(field).await?),
            "resume_file" => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read resume_file: {e}")))?;
                form.file = Some((bytes, content_type));
            }
            _ => {}
        }
    }

    let user_id = form
        .user_id
        .ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;
    let title = form
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("resume_title is required".to_string()))?;
    let (file, declared_type) = form
        .file
        .filter(|(bytes, _)| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("resume_file is required".to_string()))?;

    let content_type = detect_content_type(declared_type.as_deref(), &file);
    let resume = replace_active_resume(
        &state.db,
        NewResume {
            user_id,
            title: title.trim(),
            content_type: &content_type,
            file: &file,
        },
    )
    .await?;

    Ok(Json(UploadResponse {
        resume,
        message: "Resume uploaded and marked as active".to_string(),
    }))
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form field: {e}")))
}

/// GET /api/v1/resumes/active?user_id=
///
/// Metadata of the active resume plus its extracted skills.
pub async fn handle_get_active_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ActiveResumeResponse>, AppError> {
    let resume = active_resume(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No active resume found".to_string()))?;
    let skills = skills_from_json(resume.extracted_skills.clone());
    Ok(Json(ActiveResumeResponse { resume, skills }))
}

/// GET /api/v1/resumes/active/file?user_id=
///
/// Streams the stored file back with its content type.
pub async fn handle_download_active_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Response, AppError> {
    let file = active_resume_file(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No active resume found".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&file.resume_title),
            ),
        ],
        file.resume_file,
    )
        .into_response())
}

/// `inline` disposition naming the file after its title. Quotes and control
/// characters are dropped so the value is always a valid header.
fn content_disposition(title: &str) -> String {
    let filename: String = title
        .chars()
        .filter(|c| *c != '"' && !c.is_control())
        .collect();
    format!("inline; filename=\"{filename}\"")
}
