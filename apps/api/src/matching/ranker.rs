//! Job Ranker: filters open jobs by match percentage and orders them best-first.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::matching::scorer::match_percentage;
use crate::matching::skills::SkillSet;
use crate::models::job::JobListing;

/// Jobs scoring below this percentage are not shown to a candidate.
pub const DEFAULT_MATCH_THRESHOLD: u8 = 30;

#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("match threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(u8),
}

/// Anything the ranker can score: it needs the job's required skills and
/// whether the job is still accepting candidates.
pub trait Rankable {
    fn required_skills(&self) -> &SkillSet;
    fn is_open(&self) -> bool;
}

impl Rankable for JobListing {
    fn required_skills(&self) -> &SkillSet {
        &self.required_skills
    }

    fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// A job paired with the candidate's match percentage. Computed per request,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<J = JobListing> {
    #[serde(flatten)]
    pub job: J,
    pub match_percentage: u8,
}

/// Scores every open job against `candidate`, drops jobs below `threshold`
/// and jobs with no required skills, and sorts by percentage descending.
///
/// The sort is stable: jobs with equal percentages keep their input order.
pub fn rank_jobs<J: Rankable>(
    candidate: &SkillSet,
    jobs: Vec<J>,
    threshold: u8,
) -> Result<Vec<MatchResult<J>>, MatchError> {
    if threshold > 100 {
        return Err(MatchError::InvalidThreshold(threshold));
    }

    let total = jobs.len();
    let mut matched: Vec<MatchResult<J>> = jobs
        .into_iter()
        .filter(|job| job.is_open() && !job.required_skills().is_empty())
        .filter_map(|job| {
            let pct = match_percentage(job.required_skills(), candidate);
            (pct >= threshold).then_some(MatchResult {
                job,
                match_percentage: pct,
            })
        })
        .collect();

    matched.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));

    debug!(
        "Ranked {} of {} jobs at threshold {}%",
        matched.len(),
        total,
        threshold
    );

    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobStatus;
    use uuid::Uuid;

    fn job(title: &str, skills: &[&str]) -> JobListing {
        JobListing {
            job_id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            salary_range: None,
            department: None,
            required_skills: skills.iter().collect(),
            status: JobStatus::Open,
        }
    }

    fn titles(results: &[MatchResult]) -> Vec<&str> {
        results.iter().map(|r| r.job.title.as_str()).collect()
    }

    #[test]
    fn test_end_to_end_threshold_scenario() {
        let candidate: SkillSet = ["python", "docker", "Kubernetes"].into_iter().collect();
        let jobs = vec![job("backend", &["Python", "SQL", "Docker"])];

        let included = rank_jobs(&candidate, jobs.clone(), 30).unwrap();
        assert_eq!(included.len(), 1);
        assert_eq!(included[0].match_percentage, 67);

        let excluded = rank_jobs(&candidate, jobs, 70).unwrap();
        assert!(excluded.is_empty());
    }

    #[test]
    fn test_sorted_descending() {
        let candidate: SkillSet = ["rust", "sql", "docker"].into_iter().collect();
        let jobs = vec![
            job("half", &["rust", "go"]),
            job("full", &["rust", "sql"]),
            job("third", &["docker", "java", "c"]),
        ];
        let ranked = rank_jobs(&candidate, jobs, 30).unwrap();
        assert_eq!(titles(&ranked), vec!["full", "half", "third"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let candidate: SkillSet = ["rust"].into_iter().collect();
        let jobs = vec![
            job("a", &["rust", "go"]),
            job("b", &["rust", "java"]),
            job("top", &["rust"]),
            job("c", &["rust", "c"]),
        ];
        let ranked = rank_jobs(&candidate, jobs, 0).unwrap();
        assert_eq!(titles(&ranked), vec!["top", "a", "b", "c"]);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let candidate: SkillSet = ["rust", "sql"].into_iter().collect();
        let jobs = vec![
            job("a", &["rust", "go"]),
            job("b", &["sql", "rust"]),
            job("c", &["sql", "java"]),
        ];
        let first = rank_jobs(&candidate, jobs.clone(), 30).unwrap();
        let second = rank_jobs(&candidate, jobs, 30).unwrap();
        assert_eq!(titles(&first), titles(&second));
    }

    #[test]
    fn test_everything_returned_meets_threshold() {
        let candidate: SkillSet = ["a", "b"].into_iter().collect();
        let jobs = vec![
            job("low", &["a", "x", "y", "z"]),
            job("mid", &["a", "x"]),
            job("none", &["q"]),
        ];
        let ranked = rank_jobs(&candidate, jobs, DEFAULT_MATCH_THRESHOLD).unwrap();
        assert!(ranked.iter().all(|r| r.match_percentage >= 30));
        assert_eq!(titles(&ranked), vec!["mid"]);
    }

    #[test]
    fn test_jobs_without_skills_are_excluded_even_at_zero_threshold() {
        let candidate: SkillSet = ["rust"].into_iter().collect();
        let ranked = rank_jobs(&candidate, vec![job("empty", &[])], 0).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_closed_jobs_are_excluded() {
        let candidate: SkillSet = ["rust"].into_iter().collect();
        let mut closed = job("closed", &["rust"]);
        closed.status = JobStatus::Closed;
        let ranked = rank_jobs(&candidate, vec![closed, job("open", &["rust"])], 30).unwrap();
        assert_eq!(titles(&ranked), vec!["open"]);
    }

    #[test]
    fn test_empty_candidate_yields_empty_result() {
        let ranked = rank_jobs(&SkillSet::new(), vec![job("a", &["rust"])], 30).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_threshold_above_100_is_rejected() {
        let err = rank_jobs::<JobListing>(&SkillSet::new(), vec![], 101).unwrap_err();
        assert_eq!(err, MatchError::InvalidThreshold(101));
    }

    #[test]
    fn test_result_serializes_job_inline() {
        let candidate: SkillSet = ["rust"].into_iter().collect();
        let ranked = rank_jobs(&candidate, vec![job("inline", &["Rust"])], 30).unwrap();
        let value = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(value["title"], "inline");
        assert_eq!(value["match_percentage"], 100);
        assert_eq!(value["required_skills"][0], "rust");
    }
}
