//! Match Orchestrator: scores one resume against many jobs, or one job
//! against every resume, and persists each result.
//!
//! Flow per batch: probe primary backend → score items concurrently (primary
//! with per-item local fallback) → persist each result → collect → stable sort.
//!
//! The probe runs on every call; an unavailable service is never latched.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::matching::scorer::{CompositeScorer, MatchOutcome};
use crate::matching::strategy::MatchStrategy;
use crate::models::job::JobPosting;
use crate::models::matches::MatchRecord;
use crate::models::resume::CandidateProfile;
use crate::store::{DocumentStore, StoreError};

/// How many results a rematch reports back.
pub const TOP_MATCH_LIMIT: usize = 10;

const DEFAULT_CONCURRENCY: usize = 8;
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);
const DEFAULT_SCORE_TIMEOUT: Duration = Duration::from_secs(5);

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RankedMatch {
    pub job: JobPosting,
    #[serde(flatten)]
    pub outcome: MatchOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateMatches {
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub total_jobs: usize,
    pub total_matches: usize,
    pub matches: Vec<RankedMatch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobRematch {
    pub job_id: Uuid,
    pub total_candidates: usize,
    pub top_matches: Vec<MatchRecord>,
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

pub struct MatchOrchestrator {
    fallback: CompositeScorer,
    primary: Option<Arc<dyn MatchStrategy>>,
    store: Arc<dyn DocumentStore>,
    concurrency: usize,
    probe_timeout: Duration,
    score_timeout: Duration,
}

impl MatchOrchestrator {
    pub fn new(fallback: CompositeScorer, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            fallback,
            primary: None,
            store,
            concurrency: DEFAULT_CONCURRENCY,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            score_timeout: DEFAULT_SCORE_TIMEOUT,
        }
    }

    /// Backend tried first for every item, when its probe succeeds.
    pub fn with_primary(mut self, primary: Arc<dyn MatchStrategy>) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_timeouts(mut self, probe: Duration, score: Duration) -> Self {
        self.probe_timeout = probe;
        self.score_timeout = score;
        self
    }

    /// One resume against many jobs. Only scores above zero are kept and
    /// persisted; equal scores keep the input job order.
    pub async fn match_candidate(
        &self,
        candidate: &CandidateProfile,
        jobs: &[JobPosting],
    ) -> CandidateMatches {
        let primary = self.select_primary().await;

        let pending: Vec<_> = jobs
            .iter()
            .map(|job| self.rank_job(primary.clone(), candidate, job))
            .collect();
        let results: Vec<Option<RankedMatch>> =
            stream::iter(pending).buffered(self.concurrency).collect().await;

        let mut matches: Vec<RankedMatch> = results.into_iter().flatten().collect();
        matches.sort_by(|a, b| b.outcome.score.cmp(&a.outcome.score));

        info!(
            "Matched resume {} against {} jobs: {} matches",
            candidate.id,
            jobs.len(),
            matches.len()
        );

        CandidateMatches {
            candidate_id: candidate.id,
            candidate_name: candidate.name.clone(),
            total_jobs: jobs.len(),
            total_matches: matches.len(),
            matches,
        }
    }

    /// One job against every resume. Previously stored matches for the job
    /// are cleared first; every result is kept, including zero scores.
    pub async fn rematch_job(
        &self,
        job: &JobPosting,
        candidates: &[CandidateProfile],
    ) -> Result<JobRematch, StoreError> {
        let removed = self.store.delete_matches_for_job(job.id).await?;
        info!("Cleared {removed} stored matches for job {}", job.id);

        let primary = self.select_primary().await;

        let pending: Vec<_> = candidates
            .iter()
            .map(|candidate| self.record_candidate(primary.clone(), candidate, job))
            .collect();
        let mut records: Vec<MatchRecord> =
            stream::iter(pending).buffered(self.concurrency).collect().await;

        records.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        records.truncate(TOP_MATCH_LIMIT);

        info!(
            "Rematched job {} against {} resumes",
            job.id,
            candidates.len()
        );

        Ok(JobRematch {
            job_id: job.id,
            total_candidates: candidates.len(),
            top_matches: records,
        })
    }

    async fn rank_job(
        &self,
        primary: Option<Arc<dyn MatchStrategy>>,
        candidate: &CandidateProfile,
        job: &JobPosting,
    ) -> Option<RankedMatch> {
        let outcome = self.score_pair(primary.as_deref(), candidate, job).await;
        if outcome.score == 0 {
            return None;
        }
        self.persist(&MatchRecord::new(candidate.id, job.id, &outcome))
            .await;
        Some(RankedMatch {
            job: job.clone(),
            outcome,
        })
    }

    async fn record_candidate(
        &self,
        primary: Option<Arc<dyn MatchStrategy>>,
        candidate: &CandidateProfile,
        job: &JobPosting,
    ) -> MatchRecord {
        let outcome = self.score_pair(primary.as_deref(), candidate, job).await;
        let record = MatchRecord::new(candidate.id, job.id, &outcome);
        self.persist(&record).await;
        record
    }

    /// Probes the primary backend within the probe budget.
    async fn select_primary(&self) -> Option<Arc<dyn MatchStrategy>> {
        let primary = self.primary.as_ref()?;
        match tokio::time::timeout(self.probe_timeout, primary.is_available()).await {
            Ok(true) => {
                info!("Scoring batch with the {} matcher", primary.backend().as_str());
                Some(Arc::clone(primary))
            }
            Ok(false) => {
                warn!("Primary matcher unavailable, scoring this batch locally");
                None
            }
            Err(_) => {
                warn!(
                    "Primary matcher probe exceeded {}ms, scoring this batch locally",
                    self.probe_timeout.as_millis()
                );
                None
            }
        }
    }

    /// Primary backend when selected, local scorer on any failure or timeout.
    async fn score_pair(
        &self,
        primary: Option<&dyn MatchStrategy>,
        candidate: &CandidateProfile,
        job: &JobPosting,
    ) -> MatchOutcome {
        let requirements = job.requirements();

        if let Some(primary) = primary {
            match tokio::time::timeout(self.score_timeout, primary.score(candidate, &requirements))
                .await
            {
                Ok(Ok(outcome)) => return outcome,
                Ok(Err(e)) => warn!(
                    "Primary matcher failed for resume {} / job {} ({e}), falling back to local scoring",
                    candidate.id, job.id
                ),
                Err(_) => warn!(
                    "Primary matcher timed out for resume {} / job {}, falling back to local scoring",
                    candidate.id, job.id
                ),
            }
        }

        self.fallback.evaluate(candidate, &requirements)
    }

    async fn persist(&self, record: &MatchRecord) {
        if let Err(e) = self.store.insert_match(record).await {
            warn!(
                "Could not save match for resume {} / job {}: {e}",
                record.resume_id, record.job_id
            );
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
