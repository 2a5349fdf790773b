use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::scorer::MatchOutcome;

/// One persisted resume/job match.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRecord {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub job_id: Uuid,
    pub match_score: i32,
    pub skills_matched: Vec<String>,
    pub skills_gap: Vec<String>,
    pub recommendation: String,
    pub scorer_backend: String,
    pub matched_date: DateTime<Utc>,
}

impl MatchRecord {
    pub fn new(resume_id: Uuid, job_id: Uuid, outcome: &MatchOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            resume_id,
            job_id,
            match_score: i32::try_from(outcome.score).unwrap_or(i32::MAX),
            skills_matched: outcome.matched_skills.clone(),
            skills_gap: outcome.skills_gap.clone(),
            recommendation: outcome.recommendation.label().to_string(),
            scorer_backend: outcome.backend.as_str().to_string(),
            matched_date: Utc::now(),
        }
    }
}
