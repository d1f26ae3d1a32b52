use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::workflows::assessment::domain::{
    AssessmentId, Dosha, DoshaScores, QuestionCategory, QuestionId, QuestionResponse,
    SelectedOption, UserId,
};
use crate::workflows::assessment::repository::{
    AssessmentRecord, AssessmentRepository, AssessmentStatus, DoshaProfileRecord, DoshaProfileStore,
    RepositoryError,
};
use crate::workflows::assessment::service::{AssessmentConfig, AssessmentService};

pub(super) fn response(
    category: QuestionCategory,
    dosha: Dosha,
    weightage: f64,
) -> QuestionResponse {
    QuestionResponse {
        category: Some(category),
        option: Some(SelectedOption {
            dosha_type: Some(dosha),
            weightage: Some(weightage),
        }),
    }
}

pub(super) fn unit_response(category: QuestionCategory, dosha: Dosha) -> QuestionResponse {
    response(category, dosha, 1.0)
}

pub(super) fn neutral_response(category: QuestionCategory) -> QuestionResponse {
    QuestionResponse {
        category: Some(category),
        option: Some(SelectedOption {
            dosha_type: None,
            weightage: Some(1.0),
        }),
    }
}

pub(super) fn scores(vata: f64, pitta: f64, kapha: f64) -> DoshaScores {
    DoshaScores { vata, pitta, kapha }
}

/// A questionnaire answering every section with the given per-section mix.
pub(super) fn full_questionnaire(mix: &[(Dosha, f64)]) -> Vec<QuestionResponse> {
    let mut responses = Vec::new();
    for category in QuestionCategory::ALL {
        for (dosha, weightage) in mix {
            responses.push(response(category, *dosha, *weightage));
        }
    }
    responses
}

pub(super) fn assessment_config() -> AssessmentConfig {
    AssessmentConfig {
        total_questions: 24,
        high_confidence_responses: 20,
    }
}

pub(super) fn user() -> UserId {
    UserId("user-100".to_string())
}

pub(super) fn question(index: usize) -> QuestionId {
    QuestionId(format!("question-{index:03}"))
}

#[derive(Default, Clone)]
pub(super) struct MemoryAssessments {
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for MemoryAssessments {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.assessment_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.assessment_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.assessment_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn in_progress_for(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|record| {
                record.user_id == *user_id && record.status == AssessmentStatus::InProgress
            })
            .cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryProfiles {
    profiles: Arc<Mutex<HashMap<UserId, DoshaProfileRecord>>>,
}

impl MemoryProfiles {
    pub(super) fn stored(&self, user_id: &UserId) -> Option<DoshaProfileRecord> {
        self.profiles
            .lock()
            .expect("profile mutex poisoned")
            .get(user_id)
            .cloned()
    }
}

impl DoshaProfileStore for MemoryProfiles {
    fn upsert(&self, profile: DoshaProfileRecord) -> Result<(), RepositoryError> {
        self.profiles
            .lock()
            .expect("profile mutex poisoned")
            .insert(profile.user_id.clone(), profile);
        Ok(())
    }

    fn fetch(&self, user_id: &UserId) -> Result<Option<DoshaProfileRecord>, RepositoryError> {
        Ok(self
            .profiles
            .lock()
            .expect("profile mutex poisoned")
            .get(user_id)
            .cloned())
    }
}

pub(super) fn build_service() -> (
    AssessmentService<MemoryAssessments, MemoryProfiles>,
    Arc<MemoryAssessments>,
    Arc<MemoryProfiles>,
) {
    build_service_with(assessment_config())
}

pub(super) fn build_service_with(
    config: AssessmentConfig,
) -> (
    AssessmentService<MemoryAssessments, MemoryProfiles>,
    Arc<MemoryAssessments>,
    Arc<MemoryProfiles>,
) {
    let repository = Arc::new(MemoryAssessments::default());
    let profiles = Arc::new(MemoryProfiles::default());
    let service = AssessmentService::new(repository.clone(), profiles.clone(), config);
    (service, repository, profiles)
}
