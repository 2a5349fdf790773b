//! Document store seam. Candidates and jobs are read-only documents here;
//! match records are written, listed and cleared per job.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::job::JobPosting;
use crate::models::matches::MatchRecord;
use crate::models::resume::CandidateProfile;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed {collection} document {id}: {source}")]
    Malformed {
        collection: &'static str,
        id: Uuid,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_candidate(&self, id: Uuid) -> Result<Option<CandidateProfile>, StoreError>;

    async fn list_candidates(&self) -> Result<Vec<CandidateProfile>, StoreError>;

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>, StoreError>;

    async fn list_jobs(&self) -> Result<Vec<JobPosting>, StoreError>;

    async fn insert_match(&self, record: &MatchRecord) -> Result<(), StoreError>;

    /// Returns the number of records removed.
    async fn delete_matches_for_job(&self, job_id: Uuid) -> Result<u64, StoreError>;

    /// Highest score first.
    async fn top_matches_for_job(
        &self,
        job_id: Uuid,
        limit: usize,
    ) -> Result<Vec<MatchRecord>, StoreError>;

    /// Newest first.
    async fn matches_for_candidate(&self, resume_id: Uuid)
        -> Result<Vec<MatchRecord>, StoreError>;
}
