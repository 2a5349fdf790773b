use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::job::JobPosting;
use crate::models::matches::MatchRecord;
use crate::models::resume::CandidateProfile;
use crate::store::{DocumentStore, StoreError};

/// Postgres-backed store. Resumes and jobs are JSONB documents keyed by id;
/// matches are typed rows.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode<T: DeserializeOwned>(
    collection: &'static str,
    id: Uuid,
    document: Value,
) -> Result<T, StoreError> {
    serde_json::from_value(document).map_err(|source| StoreError::Malformed {
        collection,
        id,
        source,
    })
}

fn decode_candidate(id: Uuid, document: Value) -> Result<CandidateProfile, StoreError> {
    let mut profile: CandidateProfile = decode("resume", id, document)?;
    profile.id = id;
    Ok(profile)
}

fn decode_job(id: Uuid, document: Value) -> Result<JobPosting, StoreError> {
    let mut job: JobPosting = decode("job", id, document)?;
    job.id = id;
    Ok(job)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get_candidate(&self, id: Uuid) -> Result<Option<CandidateProfile>, StoreError> {
        let row: Option<(Uuid, Value)> =
            sqlx::query_as("SELECT id, document FROM resumes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(|(id, doc)| decode_candidate(id, doc)).transpose()
    }

    async fn list_candidates(&self) -> Result<Vec<CandidateProfile>, StoreError> {
        let rows: Vec<(Uuid, Value)> =
            sqlx::query_as("SELECT id, document FROM resumes ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter()
            .map(|(id, doc)| decode_candidate(id, doc))
            .collect()
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>, StoreError> {
        let row: Option<(Uuid, Value)> =
            sqlx::query_as("SELECT id, document FROM jobs WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(|(id, doc)| decode_job(id, doc)).transpose()
    }

    async fn list_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
        let rows: Vec<(Uuid, Value)> =
            sqlx::query_as("SELECT id, document FROM jobs ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(|(id, doc)| decode_job(id, doc)).collect()
    }

    async fn insert_match(&self, record: &MatchRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO matches
                (id, resume_id, job_id, match_score, skills_matched, skills_gap,
                 recommendation, scorer_backend, matched_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.id)
        .bind(record.resume_id)
        .bind(record.job_id)
        .bind(record.match_score)
        .bind(&record.skills_matched)
        .bind(&record.skills_gap)
        .bind(&record.recommendation)
        .bind(&record.scorer_backend)
        .bind(record.matched_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_matches_for_job(&self, job_id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM matches WHERE job_id = $1")
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn top_matches_for_job(
        &self,
        job_id: Uuid,
        limit: usize,
    ) -> Result<Vec<MatchRecord>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Ok(sqlx::query_as::<_, MatchRecord>(
            r#"
            SELECT * FROM matches
            WHERE job_id = $1
            ORDER BY match_score DESC, matched_date ASC
            LIMIT $2
            "#,
        )
        .bind(job_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn matches_for_candidate(
        &self,
        resume_id: Uuid,
    ) -> Result<Vec<MatchRecord>, StoreError> {
        Ok(sqlx::query_as::<_, MatchRecord>(
            "SELECT * FROM matches WHERE resume_id = $1 ORDER BY matched_date DESC",
        )
        .bind(resume_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
