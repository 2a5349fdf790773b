use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A job listing field stored either as an array of strings or as a single
/// comma-separated string. Anything else fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    Many(Vec<String>),
    Joined(String),
}

impl StringList {
    /// Canonical ordered sequence: entries trimmed, blanks dropped.
    pub fn normalized(&self) -> Vec<String> {
        let items: Vec<&str> = match self {
            StringList::Many(items) => items.iter().map(String::as_str).collect(),
            StringList::Joined(joined) => joined.split(',').collect(),
        };
        items
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl From<&str> for StringList {
    fn from(joined: &str) -> Self {
        StringList::Joined(joined.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: Option<StringList>,
    /// Free text such as "3+ years" or "Fresher".
    #[serde(default)]
    pub experience_required: Option<String>,
    #[serde(default)]
    pub qualifications: Option<StringList>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub posted_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: JobStatus,
}

/// The normalized view of a posting that every matcher consumes.
#[derive(Debug, Clone)]
pub struct JobRequirements<'a> {
    pub description: &'a str,
    pub required_skills: Vec<String>,
    pub experience_required: Option<&'a str>,
    pub qualifications: Vec<String>,
}

impl JobPosting {
    pub fn is_active(&self) -> bool {
        self.status == JobStatus::Active
    }

    pub fn requirements(&self) -> JobRequirements<'_> {
        JobRequirements {
            description: &self.description,
            required_skills: self
                .required_skills
                .as_ref()
                .map(StringList::normalized)
                .unwrap_or_default(),
            experience_required: self
                .experience_required
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty()),
            qualifications: self
                .qualifications
                .as_ref()
                .map(StringList::normalized)
                .unwrap_or_default(),
        }
    }
}
