use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{AssessmentId, DoshaScores, QuestionId, QuestionResponse, UserId};
use super::engine::{self, ImbalanceReport, PrakritiAnalysis};
use super::repository::{
    AssessmentRecord, AssessmentRepository, AssessmentStatus, AssessmentType, DoshaProfileRecord,
    DoshaProfileStore, RepositoryError,
};

/// Confidence recorded when a completed attempt answered at least the
/// high-confidence threshold of questions.
const HIGH_CONFIDENCE: f64 = 0.9;
/// Confidence recorded for thinner completed attempts.
const BASE_CONFIDENCE: f64 = 0.7;

/// Questionnaire flow policy shared by every attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Active question-bank size, used for progress percentages.
    pub total_questions: usize,
    /// Answer count at which a completed attempt is considered high
    /// confidence.
    pub high_confidence_responses: usize,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            total_questions: 32,
            high_confidence_responses: 20,
        }
    }
}

/// Progress snapshot returned after each saved response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssessmentProgress {
    pub answered: usize,
    pub total: usize,
    pub percentage: f64,
}

/// Outcome of a bulk response submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BulkResponseOutcome {
    pub saved: usize,
    pub progress: AssessmentProgress,
}

/// Result of starting an attempt; `is_existing` marks a resumed one.
#[derive(Debug, Clone)]
pub struct StartedAssessment {
    pub record: AssessmentRecord,
    pub is_existing: bool,
}

/// Result of completing an attempt.
#[derive(Debug, Clone)]
pub struct CompletedAssessment {
    pub record: AssessmentRecord,
    pub analysis: PrakritiAnalysis,
}

/// Service composing the scoring engine with assessment and profile storage.
pub struct AssessmentService<R, P> {
    repository: Arc<R>,
    profiles: Arc<P>,
    config: AssessmentConfig,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("assessment-{id:06}"))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl<R, P> AssessmentService<R, P>
where
    R: AssessmentRepository + 'static,
    P: DoshaProfileStore + 'static,
{
    pub fn new(repository: Arc<R>, profiles: Arc<P>, config: AssessmentConfig) -> Self {
        Self {
            repository,
            profiles,
            config,
        }
    }

    /// Begin a new attempt, or hand back the user's in-progress one.
    pub fn start(
        &self,
        user_id: &UserId,
        assessment_type: AssessmentType,
    ) -> Result<StartedAssessment, AssessmentServiceError> {
        if let Some(existing) = self.repository.in_progress_for(user_id)? {
            return Ok(StartedAssessment {
                record: existing,
                is_existing: true,
            });
        }

        let record = AssessmentRecord {
            assessment_id: next_assessment_id(),
            user_id: user_id.clone(),
            assessment_type,
            status: AssessmentStatus::InProgress,
            started_at: Utc::now(),
            completed_at: None,
            time_taken_seconds: None,
            responses: BTreeMap::new(),
            analysis: None,
            confidence: None,
        };

        let stored = self.repository.insert(record)?;
        Ok(StartedAssessment {
            record: stored,
            is_existing: false,
        })
    }

    /// Record (or replace) the answer for one question on the owner's
    /// in-progress attempt.
    pub fn record_response(
        &self,
        assessment_id: &AssessmentId,
        user_id: &UserId,
        question_id: QuestionId,
        response: QuestionResponse,
    ) -> Result<AssessmentProgress, AssessmentServiceError> {
        let mut record = self.in_progress_record(assessment_id, user_id)?;
        record.responses.insert(question_id, response);
        let progress = self.progress(&record);
        self.repository.update(record)?;
        Ok(progress)
    }

    /// Record a batch of answers in one shot.
    pub fn record_responses(
        &self,
        assessment_id: &AssessmentId,
        user_id: &UserId,
        responses: Vec<(QuestionId, QuestionResponse)>,
    ) -> Result<BulkResponseOutcome, AssessmentServiceError> {
        let mut record = self.in_progress_record(assessment_id, user_id)?;
        let saved = responses.len();
        for (question_id, response) in responses {
            record.responses.insert(question_id, response);
        }
        let progress = self.progress(&record);
        self.repository.update(record)?;
        Ok(BulkResponseOutcome { saved, progress })
    }

    /// Score the attempt, mark it completed, and refresh the user's dosha
    /// profile. The vikriti side of a fresh profile starts at the prakriti
    /// baseline.
    pub fn complete(
        &self,
        assessment_id: &AssessmentId,
        user_id: &UserId,
    ) -> Result<CompletedAssessment, AssessmentServiceError> {
        let mut record = self.in_progress_record(assessment_id, user_id)?;
        if record.responses.is_empty() {
            return Err(AssessmentServiceError::EmptyAssessment);
        }

        let responses: Vec<QuestionResponse> = record.responses.values().cloned().collect();
        let analysis = engine::analyze(&responses);

        let completed_at = Utc::now();
        record.status = AssessmentStatus::Completed;
        record.completed_at = Some(completed_at);
        record.time_taken_seconds = Some((completed_at - record.started_at).num_seconds().max(0));
        record.confidence = Some(
            if record.responses.len() >= self.config.high_confidence_responses {
                HIGH_CONFIDENCE
            } else {
                BASE_CONFIDENCE
            },
        );
        record.analysis = Some(analysis.clone());
        self.repository.update(record.clone())?;

        let scores = analysis.scores();
        self.profiles.upsert(DoshaProfileRecord {
            user_id: user_id.clone(),
            prakriti: scores,
            prakriti_type: analysis.prakriti_type.clone(),
            vikriti: scores,
            vikriti_type: analysis.prakriti_type.clone(),
            agni_type: analysis.agni_type,
            dominant_gunas: analysis.dominant_gunas.clone(),
            last_assessment_id: record.assessment_id.clone(),
            last_assessed_at: completed_at,
        })?;

        info!(
            assessment = %record.assessment_id.0,
            prakriti = %analysis.prakriti_type,
            answered = record.responses.len(),
            "assessment completed"
        );

        Ok(CompletedAssessment { record, analysis })
    }

    /// Fetch an attempt, owner-checked.
    pub fn get(
        &self,
        assessment_id: &AssessmentId,
        user_id: &UserId,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch(assessment_id)?
            .filter(|record| record.user_id == *user_id)
            .ok_or(AssessmentServiceError::NotFound)?;
        Ok(record)
    }

    /// Fetch the user's dosha profile.
    pub fn profile(&self, user_id: &UserId) -> Result<DoshaProfileRecord, AssessmentServiceError> {
        self.profiles
            .fetch(user_id)?
            .ok_or(AssessmentServiceError::MissingProfile)
    }

    /// Compare present-state scores against the stored prakriti baseline.
    pub fn imbalance_report(
        &self,
        user_id: &UserId,
        current: &DoshaScores,
    ) -> Result<ImbalanceReport, AssessmentServiceError> {
        let profile = self.profile(user_id)?;
        Ok(engine::check_imbalance(&profile.prakriti, current))
    }

    fn in_progress_record(
        &self,
        assessment_id: &AssessmentId,
        user_id: &UserId,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        self.repository
            .fetch(assessment_id)?
            .filter(|record| {
                record.user_id == *user_id && record.status == AssessmentStatus::InProgress
            })
            .ok_or(AssessmentServiceError::NotInProgress)
    }

    fn progress(&self, record: &AssessmentRecord) -> AssessmentProgress {
        let answered = record.answered();
        let total = self.config.total_questions;
        let percentage = if total > 0 {
            round1(answered as f64 / total as f64 * 100.0)
        } else {
            0.0
        };
        AssessmentProgress {
            answered,
            total,
            percentage,
        }
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error("assessment not found or already completed")]
    NotInProgress,
    #[error("assessment not found")]
    NotFound,
    #[error("no responses submitted for this assessment")]
    EmptyAssessment,
    #[error("no dosha profile on file; complete a prakriti assessment first")]
    MissingProfile,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
