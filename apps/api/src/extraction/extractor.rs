//! Skill Extractor: resume text in, deduplicated skill set out.
//!
//! Flow: section filter → (chunk if long) → one inference call per chunk →
//! fold successful chunks in chunk order, skip failed ones → SkillSet.
//!
//! A failing chunk never fails the whole extraction.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use futures::FutureExt;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::extraction::chunker::split_into_chunks;
use crate::extraction::inference::{ExtractionError, SkillInference};
use crate::extraction::sections::filter_relevant_sections;
use crate::matching::skills::SkillSet;

/// Result of extracting skills from one resume.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub skills: SkillSet,
    /// Number of inference calls made (1 for short resumes).
    pub chunk_count: usize,
    /// Chunk indices whose call failed and contributed no skills.
    pub failed_chunks: Vec<usize>,
}

#[derive(Clone)]
pub struct SkillExtractor {
    inference: Arc<dyn SkillInference>,
    max_chunk_chars: usize,
    call_timeout: Duration,
    concurrency: usize,
}

impl SkillExtractor {
    pub fn new(
        inference: Arc<dyn SkillInference>,
        max_chunk_chars: usize,
        call_timeout: Duration,
        concurrency: usize,
    ) -> Self {
        Self {
            inference,
            max_chunk_chars: max_chunk_chars.max(1),
            call_timeout,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn extract(&self, resume_text: &str) -> ExtractionReport {
        let filtered = filter_relevant_sections(resume_text);
        if filtered.trim().is_empty() {
            return ExtractionReport {
                skills: SkillSet::new(),
                chunk_count: 0,
                failed_chunks: Vec::new(),
            };
        }

        let chunks: Vec<&str> = if filtered.chars().count() > self.max_chunk_chars {
            split_into_chunks(&filtered, self.max_chunk_chars)
        } else {
            vec![filtered.as_str()]
        };
        debug!(
            "Extracting skills from {} chunk(s), {} chars after filtering",
            chunks.len(),
            filtered.chars().count()
        );

        let mut calls = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            calls.push(self.extract_chunk(chunk).boxed());
        }

        // `buffered` yields results in chunk order regardless of completion order.
        let outcomes: Vec<Result<Vec<String>, ExtractionError>> = stream::iter(calls)
            .buffered(self.concurrency)
            .collect()
            .await;

        let report = merge_chunk_outcomes(outcomes);
        info!(
            skills = report.skills.len(),
            chunks = report.chunk_count,
            failed = report.failed_chunks.len(),
            "Skill extraction finished"
        );
        report
    }

    async fn extract_chunk(&self, chunk: &str) -> Result<Vec<String>, ExtractionError> {
        match tokio::time::timeout(self.call_timeout, self.inference.extract(chunk)).await {
            Ok(result) => result,
            Err(_) => Err(ExtractionError::TimedOut(self.call_timeout)),
        }
    }
}

/// Folds per-chunk outcomes into one skill set. Failed chunks are logged and
/// skipped; duplicates collapse to their first occurrence across chunks.
pub fn merge_chunk_outcomes(
    outcomes: Vec<Result<Vec<String>, ExtractionError>>,
) -> ExtractionReport {
    let chunk_count = outcomes.len();
    let mut skills = SkillSet::new();
    let mut failed_chunks = Vec::new();

    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(raw) => {
                for skill in &raw {
                    skills.insert(skill);
                }
            }
            Err(e) => {
                warn!("Skipping chunk {index} of {chunk_count}: {e}");
                failed_chunks.push(index);
            }
        }
    }

    ExtractionReport {
        skills,
        chunk_count,
        failed_chunks,
    }
}
