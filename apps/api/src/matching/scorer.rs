//! Composite Scorer: combines skill, experience and education sub-scores into
//! one 0–100 match score with a recommendation label.
//!
//! `score = round(w_skills·skills + w_experience·experience + w_education·education)`
//! with the default weights 0.6 / 0.2 / 0.2. Weights and recommendation cut-offs
//! are plain values in `ScoringConfig` so they can be tuned and tested alone.

use serde::{Deserialize, Serialize};

use crate::matching::education::score_education;
use crate::matching::experience::score_experience;
use crate::matching::skills::match_skills;
use crate::models::job::JobRequirements;
use crate::models::resume::CandidateProfile;

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.6,
            experience: 0.2,
            education: 0.2,
        }
    }
}

/// Inclusive lower bounds for each recommendation band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationThresholds {
    pub excellent: u32,
    pub good: u32,
    pub moderate: u32,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            excellent: 80,
            good: 60,
            moderate: 40,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub thresholds: RecommendationThresholds,
}

// ────────────────────────────────────────────────────────────────────────────
// Output data models (shared by every scoring backend)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Excellent match – Highly recommended")]
    Excellent,
    #[serde(rename = "Good match – Recommended")]
    Good,
    #[serde(rename = "Moderate match – Consider")]
    Moderate,
    #[serde(rename = "Low match – Not recommended")]
    Low,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Excellent => "Excellent match – Highly recommended",
            Recommendation::Good => "Good match – Recommended",
            Recommendation::Moderate => "Moderate match – Consider",
            Recommendation::Low => "Low match – Not recommended",
        }
    }
}

/// Which backend produced a result, stored on every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringBackend {
    Remote,
    Local,
}

impl ScoringBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringBackend::Remote => "remote",
            ScoringBackend::Local => "local",
        }
    }
}

/// Sub-scores behind a locally computed result, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    #[serde(rename = "match_score")]
    pub score: u32, // 0 – 100
    pub matched_skills: Vec<String>,
    pub skills_gap: Vec<String>,
    pub recommendation: Recommendation,
    pub backend: ScoringBackend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

// ────────────────────────────────────────────────────────────────────────────
// CompositeScorer: local rule-based scoring
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic local scorer. Also the fallback whenever the external
/// matching service is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeScorer {
    config: ScoringConfig,
}

impl CompositeScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, candidate: &CandidateProfile, job: &JobRequirements<'_>) -> MatchOutcome {
        let skills = match_skills(&candidate.skills, &job.required_skills);
        let experience = score_experience(candidate.experience.len(), job.experience_required);
        let education = score_education(&candidate.education, &job.qualifications);

        let breakdown = ScoreBreakdown {
            skills: skills.percentage,
            experience,
            education,
        };
        let score = self.combine(&breakdown);

        MatchOutcome {
            score,
            matched_skills: skills.matched,
            skills_gap: skills.gap,
            recommendation: self.recommend(score),
            backend: ScoringBackend::Local,
            breakdown: Some(breakdown),
        }
    }

    /// Weighted sum rounded to the nearest integer and held to [0, 100].
    pub fn combine(&self, breakdown: &ScoreBreakdown) -> u32 {
        let w = &self.config.weights;
        let raw = w.skills * breakdown.skills
            + w.experience * breakdown.experience
            + w.education * breakdown.education;
        clamp_score(raw)
    }

    pub fn recommend(&self, score: u32) -> Recommendation {
        let t = &self.config.thresholds;
        if score >= t.excellent {
            Recommendation::Excellent
        } else if score >= t.good {
            Recommendation::Good
        } else if score >= t.moderate {
            Recommendation::Moderate
        } else {
            Recommendation::Low
        }
    }
}

/// Rounds a raw score and clamps it into [0, 100]. NaN maps to 0.
pub fn clamp_score(raw: f64) -> u32 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
