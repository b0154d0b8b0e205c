use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::skills::SkillSet;

/// Job status. Closing a job is a soft delete; closed jobs are never matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Open,
    Closed,
}

impl JobStatus {
    pub fn as_db_str(self) -> &'static str {
        match self {
            JobStatus::Open => "Open",
            JobStatus::Closed => "Closed",
        }
    }

    /// Unknown values read as `Closed` so they are never offered to candidates.
    pub fn from_db_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("open") {
            JobStatus::Open
        } else {
            JobStatus::Closed
        }
    }

    pub fn is_open(self) -> bool {
        self == JobStatus::Open
    }
}

/// A job listing with its required skill set. The skill set is fixed at
/// creation; there is no update path.
#[derive(Debug, Clone, Serialize)]
pub struct JobListing {
    pub job_id: Uuid,
    pub title: String,
    pub description: String,
    pub salary_range: Option<String>,
    pub department: Option<String>,
    pub required_skills: SkillSet,
    pub status: JobStatus,
}

/// A job row joined with its aggregated skill names.
/// `skills` holds NULLs when a job has no skill rows (LEFT JOIN + ARRAY_AGG).
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub job_id: Uuid,
    pub job_title: String,
    pub job_description: String,
    pub salary_range: Option<String>,
    pub department_name: Option<String>,
    pub status: String,
    pub skills: Vec<Option<String>>,
}

impl From<JobRow> for JobListing {
    fn from(row: JobRow) -> Self {
        JobListing {
            job_id: row.job_id,
            title: row.job_title,
            description: row.job_description,
            salary_range: row.salary_range,
            department: row.department_name,
            required_skills: row.skills.iter().flatten().collect(),
            status: JobStatus::from_db_str(&row.status),
        }
    }
}

/// An open job as seen by one candidate, including their application state.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateJobRow {
    #[sqlx(flatten)]
    pub job: JobRow,
    pub has_applied: bool,
    pub application_status: Option<String>,
}

/// An owner's view of one of their jobs.
#[derive(Debug, Clone, FromRow)]
pub struct OwnedJobRow {
    #[sqlx(flatten)]
    pub job: JobRow,
    pub applicants_count: i64,
    pub created_at: DateTime<Utc>,
}
