//! Axum route handlers for the Match API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::orchestrator::{CandidateMatches, JobRematch, TOP_MATCH_LIMIT};
use crate::models::job::JobPosting;
use crate::models::matches::MatchRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TopMatchesQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchHistoryResponse {
    pub resume_id: Uuid,
    pub total_matches: usize,
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Serialize)]
pub struct RematchResponse {
    pub message: String,
    #[serde(flatten)]
    pub rematch: JobRematch,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/matches/resume/:resume_id
///
/// Scores the resume against every active job and returns the ranked,
/// non-zero matches.
pub async fn handle_match_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<CandidateMatches>, AppError> {
    let candidate = state
        .store
        .get_candidate(resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    let jobs: Vec<JobPosting> = state
        .store
        .list_jobs()
        .await?
        .into_iter()
        .filter(JobPosting::is_active)
        .collect();
    info!("Matching resume {resume_id} against {} active jobs", jobs.len());

    Ok(Json(state.orchestrator.match_candidate(&candidate, &jobs).await))
}

/// GET /api/v1/matches/resume/:resume_id/history
pub async fn handle_match_history(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<MatchHistoryResponse>, AppError> {
    let matches = state.store.matches_for_candidate(resume_id).await?;
    Ok(Json(MatchHistoryResponse {
        resume_id,
        total_matches: matches.len(),
        matches,
    }))
}

/// GET /api/v1/matches/job/:job_id?limit=N
///
/// Stored matches for a job, best first. A missing or zero limit means 10.
pub async fn handle_top_matches(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(query): Query<TopMatchesQuery>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    let limit = query
        .limit
        .filter(|l| *l > 0)
        .unwrap_or(TOP_MATCH_LIMIT);
    Ok(Json(state.store.top_matches_for_job(job_id, limit).await?))
}

/// POST /api/v1/matches/job/:job_id/rematch
///
/// Clears stored matches for the job and rescores every resume.
pub async fn handle_rematch(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<RematchResponse>, AppError> {
    let job = state
        .store
        .get_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let candidates = state.store.list_candidates().await?;
    let rematch = state.orchestrator.rematch_job(&job, &candidates).await?;

    Ok(Json(RematchResponse {
        message: "Rematching completed".to_string(),
        rematch,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::matching::orchestrator::MatchOrchestrator;
    use crate::matching::scorer::CompositeScorer;
    use crate::models::job::JobStatus;
    use crate::models::resume::CandidateProfile;
    use crate::routes::build_router;
    use crate::store::memory::MemoryStore;

    use super::*;

    fn fixtures() -> (Vec<CandidateProfile>, Vec<JobPosting>) {
        let candidates = vec![
            CandidateProfile {
                id: Uuid::new_v4(),
                name: "Python Dev".to_string(),
                skills: vec!["Python".to_string(), "SQL".to_string()],
                ..Default::default()
            },
            CandidateProfile {
                id: Uuid::new_v4(),
                name: "Designer".to_string(),
                skills: vec!["Figma".to_string()],
                ..Default::default()
            },
        ];
        let jobs = vec![
            JobPosting {
                id: Uuid::new_v4(),
                title: "Data Analyst".to_string(),
                required_skills: Some("python, java, sql".into()),
                experience_required: Some("fresher".to_string()),
                ..Default::default()
            },
            JobPosting {
                id: Uuid::new_v4(),
                title: "Archived".to_string(),
                required_skills: Some("python".into()),
                status: JobStatus::Closed,
                ..Default::default()
            },
        ];
        (candidates, jobs)
    }

    fn app(store: Arc<MemoryStore>) -> axum::Router {
        let orchestrator = MatchOrchestrator::new(CompositeScorer::default(), store.clone());
        build_router(AppState {
            store,
            orchestrator: Arc::new(orchestrator),
        })
    }

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_match_resume_skips_closed_jobs() {
        let (candidates, jobs) = fixtures();
        let store = Arc::new(MemoryStore::new(candidates.clone(), jobs.clone()));

        let (status, body) = send(
            app(store.clone()),
            Request::get(format!("/api/v1/matches/resume/{}", candidates[0].id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["candidate_name"], "Python Dev");
        assert_eq!(body["total_jobs"], 1);
        assert_eq!(body["total_matches"], 1);
        assert_eq!(body["matches"][0]["match_score"], 80);
        assert!(body["matches"][0].get("score").is_none());
        assert_eq!(
            body["matches"][0]["recommendation"],
            "Excellent match – Highly recommended"
        );
        assert_eq!(body["matches"][0]["skills_gap"][0], "java");
        assert_eq!(store.stored_matches().len(), 1);
    }

    #[tokio::test]
    async fn test_match_unknown_resume_is_404() {
        let store = Arc::new(MemoryStore::default());
        let (status, body) = send(
            app(store),
            Request::get(format!("/api/v1/matches/resume/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_rematch_then_read_top_matches_and_history() {
        let (candidates, jobs) = fixtures();
        let store = Arc::new(MemoryStore::new(candidates.clone(), jobs.clone()));
        let job_id = jobs[0].id;

        let (status, body) = send(
            app(store.clone()),
            Request::post(format!("/api/v1/matches/job/{job_id}/rematch"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Rematching completed");
        assert_eq!(body["total_candidates"], 2);
        assert_eq!(body["top_matches"][0]["match_score"], 80);
        // no skills matched, fresher, no qualifications → 40
        assert_eq!(body["top_matches"][1]["match_score"], 40);

        let (status, body) = send(
            app(store.clone()),
            Request::get(format!("/api/v1/matches/job/{job_id}?limit=1"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["resume_id"], candidates[0].id.to_string());

        let (status, body) = send(
            app(store),
            Request::get(format!("/api/v1/matches/resume/{}/history", candidates[1].id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_matches"], 1);
        assert_eq!(body["matches"][0]["scorer_backend"], "local");
    }

    #[tokio::test]
    async fn test_rematch_unknown_job_is_404() {
        let store = Arc::new(MemoryStore::default());
        let (status, _) = send(
            app(store),
            Request::post(format!("/api/v1/matches/job/{}/rematch", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
