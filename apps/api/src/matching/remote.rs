//! Client for the optional external matching service.
//!
//! `GET /health` is the availability probe; `POST /match` scores one
//! resume/job pair. Both calls carry their own timeout so a slow service only
//! degrades the item it was asked about.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::matching::scorer::{clamp_score, CompositeScorer, MatchOutcome, ScoringBackend};
use crate::matching::strategy::{MatchError, MatchStrategy};
use crate::models::job::JobRequirements;
use crate::models::resume::CandidateProfile;

#[derive(Debug, Serialize)]
struct RemoteMatchRequest<'a> {
    resume_text: &'a str,
    job_description: &'a str,
    resume_skills: &'a [String],
    required_skills: &'a [String],
}

#[derive(Debug, Deserialize)]
struct RemoteMatchResponse {
    #[serde(alias = "matchScore")]
    match_score: f64,
    #[serde(default, alias = "matchedSkills")]
    matched_skills: Vec<String>,
    #[serde(default, alias = "skillsGap")]
    skills_gap: Vec<String>,
}

#[derive(Clone)]
pub struct MatchServiceClient {
    client: Client,
    base_url: String,
    probe_timeout: Duration,
    score_timeout: Duration,
    /// Recommendation labels always come from local thresholds.
    labels: CompositeScorer,
}

impl MatchServiceClient {
    pub fn new(
        base_url: impl Into<String>,
        probe_timeout: Duration,
        score_timeout: Duration,
        labels: CompositeScorer,
    ) -> Result<Self, MatchError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            // sidecar service; never routed through an HTTP proxy
            client: Client::builder().no_proxy().build()?,
            base_url,
            probe_timeout,
            score_timeout,
            labels,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Any 2xx from `/health` within the probe budget counts as available.
    pub async fn probe(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).timeout(self.probe_timeout).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("Matching service available at {}", self.base_url);
                true
            }
            Ok(resp) => {
                warn!(
                    "Matching service probe returned {}, using local scoring",
                    resp.status()
                );
                false
            }
            Err(e) => {
                warn!("Matching service not reachable ({e}), using local scoring");
                false
            }
        }
    }

    async fn post_match(
        &self,
        candidate: &CandidateProfile,
        job: &JobRequirements<'_>,
    ) -> Result<RemoteMatchResponse, MatchError> {
        let body = RemoteMatchRequest {
            resume_text: &candidate.resume_text,
            job_description: job.description,
            resume_skills: &candidate.skills,
            required_skills: &job.required_skills,
        };

        let response = self
            .client
            .post(format!("{}/match", self.base_url))
            .timeout(self.score_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MatchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await.map_err(|e| self.classify(e))?;
        serde_json::from_str(&text).map_err(|e| MatchError::Parse(e.to_string()))
    }

    fn classify(&self, error: reqwest::Error) -> MatchError {
        if error.is_timeout() {
            MatchError::Timeout(self.score_timeout.as_millis())
        } else {
            MatchError::Http(error)
        }
    }

    fn to_outcome(&self, response: RemoteMatchResponse) -> Result<MatchOutcome, MatchError> {
        if !response.match_score.is_finite() {
            return Err(MatchError::Parse(format!(
                "match_score is not a number: {}",
                response.match_score
            )));
        }
        let score = clamp_score(response.match_score);
        Ok(MatchOutcome {
            score,
            matched_skills: response.matched_skills,
            skills_gap: response.skills_gap,
            recommendation: self.labels.recommend(score),
            backend: ScoringBackend::Remote,
            breakdown: None,
        })
    }
}

#[async_trait]
impl MatchStrategy for MatchServiceClient {
    fn backend(&self) -> ScoringBackend {
        ScoringBackend::Remote
    }

    async fn is_available(&self) -> bool {
        self.probe().await
    }

    async fn score(
        &self,
        candidate: &CandidateProfile,
        job: &JobRequirements<'_>,
    ) -> Result<MatchOutcome, MatchError> {
        let response = self.post_match(candidate, job).await?;
        debug!(
            "Matching service scored {} at {}",
            candidate.name, response.match_score
        );
        self.to_outcome(response)
    }
}
