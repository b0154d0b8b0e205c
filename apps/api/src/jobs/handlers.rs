//! Axum route handlers for job listings and applications.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::applications::{
    applicants_for_job, apply_to_job, update_application_status, ApplyOutcome,
};
use crate::jobs::store::{close_job, create_job, is_owner, jobs_by_owner, NewJob};
use crate::matching::skills::SkillSet;
use crate::models::application::{ApplicantRow, ApplicationRow, ApplicationStatus};
use crate::models::job::JobListing;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Skills as a JSON list or as the comma-separated string job forms send.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    CommaSeparated(String),
}

impl SkillsInput {
    pub fn into_skill_set(self) -> SkillSet {
        match self {
            SkillsInput::List(items) => items.into_iter().collect(),
            SkillsInput::CommaSeparated(raw) => raw.split(',').collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub salary_range: Option<String>,
    pub department: Option<String>,
    pub skills: SkillsInput,
}

#[derive(Debug, Serialize)]
pub struct CreateJobResponse {
    pub job_id: Uuid,
    pub skills: SkillSet,
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub owner_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct OwnedJob {
    #[serde(flatten)]
    pub job: JobListing,
    pub applicants_count: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<CreateJobResponse>), AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("description cannot be empty".to_string()));
    }
    let skills = request.skills.into_skill_set();
    if skills.is_empty() {
        return Err(AppError::Validation(
            "a job needs at least one required skill".to_string(),
        ));
    }

    let job_id = create_job(
        &state.db,
        NewJob {
            owner_id: request.owner_id,
            title,
            description: request.description.trim(),
            salary_range: request.salary_range.as_deref(),
            department: request.department.as_deref(),
            skills: &skills,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(CreateJobResponse { job_id, skills })))
}

/// GET /api/v1/jobs?owner_id=
pub async fn handle_list_owned_jobs(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<Vec<OwnedJob>>, AppError> {
    let rows = jobs_by_owner(&state.db, params.owner_id).await?;
    Ok(Json(
        rows.into_iter()
            .map(|row| OwnedJob {
                job: row.job.into(),
                applicants_count: row.applicants_count,
                created_at: row.created_at,
            })
            .collect(),
    ))
}

/// PATCH /api/v1/jobs/:id/close?owner_id=
pub async fn handle_close_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(params): Query<OwnerQuery>,
) -> Result<StatusCode, AppError> {
    if close_job(&state.db, job_id, params.owner_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "Job {job_id} not found or not owned by caller"
        )))
    }
}

/// POST /api/v1/jobs/:id/applications
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    match apply_to_job(&state.db, job_id, request.user_id).await? {
        ApplyOutcome::Applied(row) => Ok((StatusCode::CREATED, Json(row))),
        ApplyOutcome::AlreadyApplied => Err(AppError::Conflict(
            "Already applied for this job".to_string(),
        )),
        ApplyOutcome::JobUnavailable => Err(AppError::NotFound(format!(
            "Job {job_id} not found or closed"
        ))),
    }
}

/// GET /api/v1/jobs/:id/applicants?owner_id=
pub async fn handle_list_applicants(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<Vec<ApplicantRow>>, AppError> {
    if !is_owner(&state.db, job_id, params.owner_id).await? {
        return Err(AppError::NotFound(format!(
            "Job {job_id} not found or not owned by caller"
        )));
    }
    Ok(Json(applicants_for_job(&state.db, job_id).await?))
}

/// PUT /api/v1/applications/:id/status
pub async fn handle_update_application_status(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<StatusUpdate>, AppError> {
    if update_application_status(&state.db, application_id, update.status).await? {
        Ok(Json(update))
    } else {
        Err(AppError::NotFound(format!(
            "Application {application_id} not found"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_from_list() {
        let input: SkillsInput = serde_json::from_str(r#"["Rust", "rust", " SQL "]"#).unwrap();
        assert_eq!(input.into_skill_set().to_strings(), vec!["rust", "sql"]);
    }

    #[test]
    fn test_skills_from_comma_separated_string() {
        let input: SkillsInput = serde_json::from_str(r#""Python, Docker,,  ""#).unwrap();
        assert_eq!(input.into_skill_set().to_strings(), vec!["python", "docker"]);
    }

    #[test]
    fn test_create_request_deserializes() {
        let request: CreateJobRequest = serde_json::from_str(
            r#"{
                "owner_id": "7f9c4f43-6f0e-4a53-9b43-3f0f2a4c8c11",
                "title": "Platform Engineer",
                "description": "Run the clusters",
                "salary_range": null,
                "skills": "Kubernetes, Terraform"
            }"#,
        )
        .unwrap();
        assert!(request.department.is_none());
        assert_eq!(request.skills.into_skill_set().len(), 2);
    }
}
