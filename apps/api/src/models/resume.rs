use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata of a stored resume. The file body is fetched separately.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeRow {
    pub resume_id: Uuid,
    pub user_id: Uuid,
    pub resume_title: String,
    pub content_type: String,
    pub status: String,
    /// JSON array of normalized skills; NULL until extraction has run.
    pub extracted_skills: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ResumeFileRow {
    pub resume_id: Uuid,
    pub resume_title: String,
    pub content_type: String,
    pub resume_file: Vec<u8>,
}
