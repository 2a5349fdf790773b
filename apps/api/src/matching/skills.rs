//! Skill Matcher: bidirectional substring overlap between candidate skills and
//! a job's required skills.
//!
//! A job skill counts as matched when any candidate skill contains it or is
//! contained by it, case-insensitively. This over-matches partial tokens
//! ("java" matches "javascript") and is kept that way for score compatibility.

/// Partition of a job's required skills into matched and missing.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatch {
    /// Job skills (original spelling, job order) covered by the candidate.
    pub matched: Vec<String>,
    /// Job skills not covered.
    pub gap: Vec<String>,
    /// `matched / job skills × 100`, 0 when either side is empty.
    pub percentage: f64,
}

pub fn match_skills(candidate_skills: &[String], job_skills: &[String]) -> SkillMatch {
    // an empty candidate skill is a substring of every job skill
    let candidate_lower: Vec<String> = candidate_skills.iter().map(|s| s.to_lowercase()).collect();

    if candidate_lower.is_empty() {
        return SkillMatch {
            matched: vec![],
            gap: job_skills.to_vec(),
            percentage: 0.0,
        };
    }

    let (matched, gap): (Vec<String>, Vec<String>) = job_skills
        .iter()
        .cloned()
        .partition(|job_skill| covers(&candidate_lower, job_skill));

    let percentage = if job_skills.is_empty() {
        0.0
    } else {
        matched.len() as f64 * 100.0 / job_skills.len() as f64
    };

    SkillMatch {
        matched,
        gap,
        percentage,
    }
}

fn covers(candidate_lower: &[String], job_skill: &str) -> bool {
    let job_lower = job_skill.to_lowercase();
    candidate_lower
        .iter()
        .any(|c| c.contains(&job_lower) || job_lower.contains(c.as_str()))
}
