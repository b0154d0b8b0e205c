//! Resume persistence. A candidate has at most one active resume; uploading a
//! new one supersedes (never merges with) the previous one.

use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::matching::skills::SkillSet;
use crate::models::resume::{ResumeFileRow, ResumeRow};

pub const STATUS_ACTIVE: &str = "Active";
pub const STATUS_INACTIVE: &str = "Inactive";

pub struct NewResume<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub content_type: &'a str,
    pub file: &'a [u8],
}

/// Advisory lock key serializing resume replacement for one candidate.
pub fn resume_lock_key(user_id: Uuid) -> i64 {
    let (high, low) = user_id.as_u64_pair();
    (high ^ low) as i64
}

/// Deactivates the candidate's current resume and inserts `resume` as the
/// active one, in a single transaction. Concurrent uploads for the same
/// candidate queue on a transaction-scoped advisory lock.
pub async fn replace_active_resume(
    pool: &PgPool,
    resume: NewResume<'_>,
) -> Result<ResumeRow, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(resume_lock_key(resume.user_id))
        .execute(&mut *tx)
        .await?;

    let superseded = sqlx::query(
        "UPDATE resumes SET status = $1, updated_at = NOW() WHERE user_id = $2 AND status = $3",
    )
    .bind(STATUS_INACTIVE)
    .bind(resume.user_id)
    .bind(STATUS_ACTIVE)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes
            (resume_id, user_id, resume_title, content_type, resume_file, status,
             extracted_skills, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, NULL, NOW(), NOW())
        RETURNING resume_id, user_id, resume_title, content_type, status,
                  extracted_skills, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(resume.user_id)
    .bind(resume.title)
    .bind(resume.content_type)
    .bind(resume.file)
    .bind(STATUS_ACTIVE)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Resume {} is now active for user {} ({} superseded)",
        row.resume_id, row.user_id, superseded
    );
    Ok(row)
}

pub async fn active_resume(pool: &PgPool, user_id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        SELECT resume_id, user_id, resume_title, content_type, status,
               extracted_skills, created_at, updated_at
        FROM resumes
        WHERE user_id = $1 AND status = $2
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(STATUS_ACTIVE)
    .fetch_optional(pool)
    .await
}

pub async fn active_resume_file(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<ResumeFileRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeFileRow>(
        "SELECT resume_id, resume_title, content_type, resume_file FROM resumes \
         WHERE user_id = $1 AND status = $2 LIMIT 1",
    )
    .bind(user_id)
    .bind(STATUS_ACTIVE)
    .fetch_optional(pool)
    .await
}

/// The candidate's active skill set. `None` when there is no active resume;
/// an empty set when extraction has not run yet.
pub async fn candidate_skill_set(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<SkillSet>, sqlx::Error> {
    Ok(active_resume(pool, user_id)
        .await?
        .map(|resume| skills_from_json(resume.extracted_skills)))
}

/// Stores `skills` on resume `resume_id`, replacing earlier ones, provided it
/// is still the candidate's active resume. Returns `false` otherwise.
pub async fn persist_extracted_skills(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
    skills: &SkillSet,
) -> Result<bool, sqlx::Error> {
    let payload = Value::from(skills.to_strings());
    let updated = sqlx::query(
        "UPDATE resumes SET extracted_skills = $1, updated_at = NOW() \
         WHERE user_id = $2 AND resume_id = $3 AND status = $4",
    )
    .bind(payload)
    .bind(user_id)
    .bind(resume_id)
    .bind(STATUS_ACTIVE)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(updated > 0)
}

/// Reads a stored skill list. Older rows hold the list as a JSON-encoded
/// string instead of an array; anything unreadable counts as no skills.
pub fn skills_from_json(stored: Option<Value>) -> SkillSet {
    match stored {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(encoded)) => serde_json::from_str::<Vec<String>>(&encoded)
            .map(|skills| skills.into_iter().collect())
            .unwrap_or_default(),
        _ => SkillSet::new(),
    }
}
