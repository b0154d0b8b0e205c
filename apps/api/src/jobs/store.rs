//! Job listing persistence. Skill names live in a shared `skills` table and
//! are linked to jobs through `job_skills`.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::matching::skills::SkillSet;
use crate::models::job::{CandidateJobRow, JobStatus, OwnedJobRow};

pub struct NewJob<'a> {
    pub owner_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub salary_range: Option<&'a str>,
    pub department: Option<&'a str>,
    pub skills: &'a SkillSet,
}

/// Inserts an open job and links its skills, creating unknown skill names.
/// Returns the new job id.
pub async fn create_job(pool: &PgPool, job: NewJob<'_>) -> Result<Uuid, sqlx::Error> {
    let job_id = Uuid::new_v4();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO job_descriptions
            (job_id, owner_id, job_title, job_description, salary_range, department,
             status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
        "#,
    )
    .bind(job_id)
    .bind(job.owner_id)
    .bind(job.title)
    .bind(job.description)
    .bind(job.salary_range)
    .bind(job.department)
    .bind(JobStatus::Open.as_db_str())
    .execute(&mut *tx)
    .await?;

    for skill in job.skills.iter() {
        // DO UPDATE (not DO NOTHING) so RETURNING yields the existing id too.
        let skill_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO skills (skill_name) VALUES ($1)
            ON CONFLICT (skill_name) DO UPDATE SET skill_name = EXCLUDED.skill_name
            RETURNING skill_id
            "#,
        )
        .bind(skill.as_str())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO job_skills (job_id, skill_id) VALUES ($1, $2)")
            .bind(job_id)
            .bind(skill_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    info!(
        "Created job {job_id} for owner {} with {} skills",
        job.owner_id,
        job.skills.len()
    );
    Ok(job_id)
}

/// All open jobs with their skills and this candidate's application state.
/// Ordered oldest first so equal match scores rank deterministically.
pub async fn open_jobs_for_candidate(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<CandidateJobRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateJobRow>(
        r#"
        SELECT
            jd.job_id,
            jd.job_title,
            jd.job_description,
            jd.salary_range,
            jd.department AS department_name,
            jd.status,
            ARRAY_AGG(s.skill_name) AS skills,
            EXISTS (
                SELECT 1 FROM job_applications ja
                WHERE ja.job_id = jd.job_id AND ja.user_id = $1
            ) AS has_applied,
            (
                SELECT ja.status FROM job_applications ja
                WHERE ja.job_id = jd.job_id AND ja.user_id = $1
                LIMIT 1
            ) AS application_status
        FROM job_descriptions jd
        LEFT JOIN job_skills js ON js.job_id = jd.job_id
        LEFT JOIN skills s ON s.skill_id = js.skill_id
        WHERE jd.status = $2
        GROUP BY jd.job_id
        ORDER BY jd.created_at, jd.job_id
        "#,
    )
    .bind(user_id)
    .bind(JobStatus::Open.as_db_str())
    .fetch_all(pool)
    .await
}

/// The owner's open jobs, newest first, with applicant counts.
pub async fn jobs_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<OwnedJobRow>, sqlx::Error> {
    sqlx::query_as::<_, OwnedJobRow>(
        r#"
        SELECT
            jd.job_id,
            jd.job_title,
            jd.job_description,
            jd.salary_range,
            jd.department AS department_name,
            jd.status,
            jd.created_at,
            ARRAY_AGG(DISTINCT s.skill_name) AS skills,
            (
                SELECT COUNT(*) FROM job_applications ja WHERE ja.job_id = jd.job_id
            ) AS applicants_count
        FROM job_descriptions jd
        LEFT JOIN job_skills js ON js.job_id = jd.job_id
        LEFT JOIN skills s ON s.skill_id = js.skill_id
        WHERE jd.owner_id = $1 AND jd.status = $2
        GROUP BY jd.job_id
        ORDER BY jd.created_at DESC
        "#,
    )
    .bind(owner_id)
    .bind(JobStatus::Open.as_db_str())
    .fetch_all(pool)
    .await
}

/// Soft-deletes a job. Returns `false` if no job with that id belongs to `owner_id`.
pub async fn close_job(pool: &PgPool, job_id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
    let closed = sqlx::query(
        "UPDATE job_descriptions SET status = $1 WHERE job_id = $2 AND owner_id = $3",
    )
    .bind(JobStatus::Closed.as_db_str())
    .bind(job_id)
    .bind(owner_id)
    .execute(pool)
    .await?
    .rows_affected();

    if closed > 0 {
        info!("Closed job {job_id}");
    }
    Ok(closed > 0)
}

/// Whether `owner_id` owns `job_id`, regardless of status.
pub async fn is_owner(pool: &PgPool, job_id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM job_descriptions WHERE job_id = $1 AND owner_id = $2)",
    )
    .bind(job_id)
    .bind(owner_id)
    .fetch_one(pool)
    .await
}
