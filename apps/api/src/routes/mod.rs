pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// Resume uploads may exceed axum's 2 MB default body limit.
const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resumes
        .route(
            "/api/v1/resumes",
            post(resumes::handle_upload_resume).layer(DefaultBodyLimit::max(MAX_RESUME_BYTES)),
        )
        .route("/api/v1/resumes/active", get(resumes::handle_get_active_resume))
        .route(
            "/api/v1/resumes/active/file",
            get(resumes::handle_download_active_resume),
        )
        // Skill extraction and matching
        .route("/api/v1/skills/extract", post(extraction::handle_extract_skills))
        .route("/api/v1/matching/jobs", get(matching::handle_matched_jobs))
        // Jobs and applications
        .route(
            "/api/v1/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_owned_jobs),
        )
        .route("/api/v1/jobs/:id/close", patch(jobs::handle_close_job))
        .route("/api/v1/jobs/:id/applications", post(jobs::handle_apply))
        .route("/api/v1/jobs/:id/applicants", get(jobs::handle_list_applicants))
        .route(
            "/api/v1/applications/:id/status",
            put(jobs::handle_update_application_status),
        )
        .with_state(state)
}
