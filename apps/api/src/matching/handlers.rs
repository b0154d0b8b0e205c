//! Axum route handlers for the Matching API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::store::open_jobs_for_candidate;
use crate::matching::ranker::{rank_jobs, MatchResult, Rankable};
use crate::matching::skills::SkillSet;
use crate::models::application::ApplicationStatus;
use crate::models::job::{CandidateJobRow, JobListing};
use crate::resumes::store::candidate_skill_set;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    pub user_id: Uuid,
    /// Overrides the configured threshold for this request.
    pub min_match: Option<u8>,
}

/// An open job as seen by one candidate.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateJob {
    #[serde(flatten)]
    pub listing: JobListing,
    pub has_applied: bool,
    pub application_status: Option<ApplicationStatus>,
}

impl From<CandidateJobRow> for CandidateJob {
    fn from(row: CandidateJobRow) -> Self {
        CandidateJob {
            listing: row.job.into(),
            has_applied: row.has_applied,
            application_status: row
                .application_status
                .as_deref()
                .and_then(|s| s.parse().ok()),
        }
    }
}

impl Rankable for CandidateJob {
    fn required_skills(&self) -> &SkillSet {
        self.listing.required_skills()
    }

    fn is_open(&self) -> bool {
        self.listing.is_open()
    }
}

#[derive(Debug, Serialize)]
pub struct MatchedJobsResponse {
    pub matched_jobs: Vec<MatchResult<CandidateJob>>,
    pub user_skills: SkillSet,
}

/// GET /api/v1/matching/jobs?user_id=&min_match=
///
/// Ranks all open jobs against the candidate's active skill set.
pub async fn handle_matched_jobs(
    State(state): State<AppState>,
    Query(params): Query<MatchQuery>,
) -> Result<Json<MatchedJobsResponse>, AppError> {
    let user_skills = candidate_skill_set(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No active resume found".to_string()))?;

    let jobs: Vec<CandidateJob> = open_jobs_for_candidate(&state.db, params.user_id)
        .await?
        .into_iter()
        .map(CandidateJob::from)
        .collect();

    let threshold = params.min_match.unwrap_or(state.config.match_threshold);
    let matched_jobs = rank_jobs(&user_skills, jobs, threshold)?;

    Ok(Json(MatchedJobsResponse {
        matched_jobs,
        user_skills,
    }))
}
