use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AgniType, AssessmentId, DoshaScores, QuestionId, QuestionResponse, UserId};
use super::engine::PrakritiAnalysis;

/// Why an attempt was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentType {
    Initial,
    Reassessment,
}

/// High level status tracked throughout an assessment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentStatus {
    InProgress,
    Completed,
}

impl AssessmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AssessmentStatus::InProgress => "in_progress",
            AssessmentStatus::Completed => "completed",
        }
    }
}

/// Repository record tracking one questionnaire attempt. Responses are keyed
/// by question so re-answering replaces the earlier choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub assessment_id: AssessmentId,
    pub user_id: UserId,
    pub assessment_type: AssessmentType,
    pub status: AssessmentStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub time_taken_seconds: Option<i64>,
    pub responses: BTreeMap<QuestionId, QuestionResponse>,
    pub analysis: Option<PrakritiAnalysis>,
    pub confidence: Option<f64>,
}

impl AssessmentRecord {
    pub fn answered(&self) -> usize {
        self.responses.len()
    }

    pub fn status_view(&self) -> AssessmentStatusView {
        AssessmentStatusView {
            assessment_id: self.assessment_id.clone(),
            status: self.status.label(),
            answered: self.answered(),
            prakriti_type: self
                .analysis
                .as_ref()
                .map(|analysis| analysis.prakriti_type.clone()),
            confidence: self.confidence,
        }
    }
}

/// Storage abstraction so the workflow can be exercised without a database.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    fn in_progress_for(&self, user_id: &UserId)
        -> Result<Option<AssessmentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Durable constitutional profile derived from the latest completed
/// assessment. Prakriti is the baseline; vikriti tracks the present state
/// and starts out equal to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoshaProfileRecord {
    pub user_id: UserId,
    pub prakriti: DoshaScores,
    pub prakriti_type: String,
    pub vikriti: DoshaScores,
    pub vikriti_type: String,
    pub agni_type: AgniType,
    pub dominant_gunas: Vec<String>,
    pub last_assessment_id: AssessmentId,
    pub last_assessed_at: DateTime<Utc>,
}

/// Profile storage abstraction, one record per user.
pub trait DoshaProfileStore: Send + Sync {
    fn upsert(&self, profile: DoshaProfileRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, user_id: &UserId) -> Result<Option<DoshaProfileRecord>, RepositoryError>;
}

/// Sanitized assessment summary for rendering and API payloads.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStatusView {
    pub assessment_id: AssessmentId,
    pub status: &'static str,
    pub answered: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prakriti_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}
