//! Job applications. One application per candidate per job.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::application::{ApplicantRow, ApplicationRow, ApplicationStatus};
use crate::models::job::JobStatus;

#[derive(Debug)]
pub enum ApplyOutcome {
    Applied(ApplicationRow),
    AlreadyApplied,
    /// The job does not exist or is closed.
    JobUnavailable,
}

impl ApplyOutcome {
    /// An insert that conflicted returns no row: the candidate already applied.
    fn from_insert(inserted: Option<ApplicationRow>) -> Self {
        match inserted {
            Some(row) => ApplyOutcome::Applied(row),
            None => ApplyOutcome::AlreadyApplied,
        }
    }
}

/// Records a Pending application. The job row is share-locked so a job closed
/// concurrently is not applied to; duplicates are settled by the
/// `(job_id, user_id)` unique constraint, never by a prior read.
pub async fn apply_to_job(
    pool: &PgPool,
    job_id: Uuid,
    user_id: Uuid,
) -> Result<ApplyOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let status: Option<String> =
        sqlx::query_scalar("SELECT status FROM job_descriptions WHERE job_id = $1 FOR SHARE")
            .bind(job_id)
            .fetch_optional(&mut *tx)
            .await?;
    if !status.is_some_and(|s| JobStatus::from_db_str(&s).is_open()) {
        return Ok(ApplyOutcome::JobUnavailable);
    }

    let inserted = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO job_applications (application_id, job_id, user_id, status, created_at)
        VALUES ($1, $2, $3, $4, NOW())
        ON CONFLICT (job_id, user_id) DO NOTHING
        RETURNING application_id, job_id, user_id, status, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(job_id)
    .bind(user_id)
    .bind(ApplicationStatus::Pending.as_db_str())
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;

    let outcome = ApplyOutcome::from_insert(inserted);
    if matches!(outcome, ApplyOutcome::Applied(_)) {
        info!("User {user_id} applied to job {job_id}");
    }
    Ok(outcome)
}

pub async fn applicants_for_job(
    pool: &PgPool,
    job_id: Uuid,
) -> Result<Vec<ApplicantRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicantRow>(
        r#"
        SELECT
            ja.application_id,
            ja.user_id AS applicant_id,
            u.name AS user_name,
            u.email,
            ja.status,
            ja.created_at AS application_date
        FROM job_applications ja
        LEFT JOIN users u ON u.id = ja.user_id
        WHERE ja.job_id = $1
        ORDER BY ja.created_at
        "#,
    )
    .bind(job_id)
    .fetch_all(pool)
    .await
}

/// Returns `false` when no application has that id.
pub async fn update_application_status(
    pool: &PgPool,
    application_id: Uuid,
    status: ApplicationStatus,
) -> Result<bool, sqlx::Error> {
    let updated = sqlx::query(
        "UPDATE job_applications SET status = $1, updated_at = NOW() WHERE application_id = $2",
    )
    .bind(status.as_db_str())
    .bind(application_id)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(updated > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row() -> ApplicationRow {
        ApplicationRow {
            application_id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            status: ApplicationStatus::Pending.as_db_str().to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_inserted_row_is_an_application() {
        let outcome = ApplyOutcome::from_insert(Some(row()));
        assert!(matches!(outcome, ApplyOutcome::Applied(ref r) if r.status == "Pending"));
    }

    #[test]
    fn test_conflicting_insert_is_already_applied() {
        assert!(matches!(
            ApplyOutcome::from_insert(None),
            ApplyOutcome::AlreadyApplied
        ));
    }
}
