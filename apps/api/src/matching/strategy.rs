//! Pluggable scoring backends. The orchestrator only sees `dyn MatchStrategy`,
//! so it cannot tell the remote matcher from the local composite scorer.

use async_trait::async_trait;
use thiserror::Error;

use crate::matching::scorer::{CompositeScorer, MatchOutcome, ScoringBackend};
use crate::models::job::JobRequirements;
use crate::models::resume::CandidateProfile;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Matching service timed out after {0}ms")]
    Timeout(u128),

    #[error("Matching service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Matching service response was not understood: {0}")]
    Parse(String),
}

#[async_trait]
pub trait MatchStrategy: Send + Sync {
    fn backend(&self) -> ScoringBackend;

    /// Availability probe, run once per orchestration batch.
    async fn is_available(&self) -> bool {
        true
    }

    async fn score(
        &self,
        candidate: &CandidateProfile,
        job: &JobRequirements<'_>,
    ) -> Result<MatchOutcome, MatchError>;
}

#[async_trait]
impl MatchStrategy for CompositeScorer {
    fn backend(&self) -> ScoringBackend {
        ScoringBackend::Local
    }

    async fn score(
        &self,
        candidate: &CandidateProfile,
        job: &JobRequirements<'_>,
    ) -> Result<MatchOutcome, MatchError> {
        Ok(self.evaluate(candidate, job))
    }
}
