use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::job::JobPosting;
use crate::models::matches::MatchRecord;
use crate::models::resume::CandidateProfile;
use crate::store::{DocumentStore, StoreError};

/// In-memory store for tests. Inserts touching a job in `failing_jobs` or a
/// resume in `failing_resumes` error out so persistence isolation can be
/// exercised.
#[derive(Default)]
pub struct MemoryStore {
    candidates: Vec<CandidateProfile>,
    jobs: Vec<JobPosting>,
    matches: Mutex<Vec<MatchRecord>>,
    failing_jobs: HashSet<Uuid>,
    failing_resumes: HashSet<Uuid>,
}

impl MemoryStore {
    pub fn new(candidates: Vec<CandidateProfile>, jobs: Vec<JobPosting>) -> Self {
        Self {
            candidates,
            jobs,
            ..Default::default()
        }
    }

    pub fn fail_inserts_for(mut self, job_id: Uuid) -> Self {
        self.failing_jobs.insert(job_id);
        self
    }

    pub fn fail_inserts_for_resume(mut self, resume_id: Uuid) -> Self {
        self.failing_resumes.insert(resume_id);
        self
    }

    pub fn with_matches(self, records: Vec<MatchRecord>) -> Self {
        self.matches.lock().unwrap().extend(records);
        self
    }

    pub fn stored_matches(&self) -> Vec<MatchRecord> {
        self.matches.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_candidate(&self, id: Uuid) -> Result<Option<CandidateProfile>, StoreError> {
        Ok(self.candidates.iter().find(|c| c.id == id).cloned())
    }

    async fn list_candidates(&self) -> Result<Vec<CandidateProfile>, StoreError> {
        Ok(self.candidates.clone())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>, StoreError> {
        Ok(self.jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
        Ok(self.jobs.clone())
    }

    async fn insert_match(&self, record: &MatchRecord) -> Result<(), StoreError> {
        if self.failing_jobs.contains(&record.job_id)
            || self.failing_resumes.contains(&record.resume_id)
        {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        self.matches.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn delete_matches_for_job(&self, job_id: Uuid) -> Result<u64, StoreError> {
        let mut matches = self.matches.lock().unwrap();
        let before = matches.len();
        matches.retain(|m| m.job_id != job_id);
        Ok((before - matches.len()) as u64)
    }

    async fn top_matches_for_job(
        &self,
        job_id: Uuid,
        limit: usize,
    ) -> Result<Vec<MatchRecord>, StoreError> {
        let mut found: Vec<MatchRecord> = self
            .matches
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.job_id == job_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        found.truncate(limit);
        Ok(found)
    }

    async fn matches_for_candidate(
        &self,
        resume_id: Uuid,
    ) -> Result<Vec<MatchRecord>, StoreError> {
        let mut found: Vec<MatchRecord> = self
            .matches
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.resume_id == resume_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.matched_date.cmp(&a.matched_date));
        Ok(found)
    }
}
