//! Integration specifications for the prakriti assessment workflow.
//!
//! Scenarios drive the public service facade end-to-end so questionnaire
//! scoring, profile derivation, and the vikriti reading are validated
//! without reaching into private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use prakriti_ai::workflows::assessment::{
        AssessmentConfig, AssessmentId, AssessmentRecord, AssessmentRepository, AssessmentService,
        AssessmentStatus, Dosha, DoshaProfileRecord, DoshaProfileStore, QuestionCategory,
        QuestionId, QuestionResponse, RepositoryError, SelectedOption, UserId,
    };

    pub(super) fn respondent() -> UserId {
        UserId("user-42".to_string())
    }

    pub(super) fn assessment_config() -> AssessmentConfig {
        AssessmentConfig {
            total_questions: 24,
            high_confidence_responses: 20,
        }
    }

    pub(super) fn answer(
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

    /// A complete 24-answer questionnaire leaning two-to-one vata over pitta
    /// in every section.
    pub(super) fn vata_dominant_answers() -> Vec<(QuestionId, QuestionResponse)> {
        let mut answers = Vec::new();
        for (section_index, category) in QuestionCategory::ALL.into_iter().enumerate() {
            for (offset, dosha) in [Dosha::Vata, Dosha::Vata, Dosha::Pitta]
                .into_iter()
                .enumerate()
            {
                let question = QuestionId(format!("q-{:02}", section_index * 3 + offset + 1));
                answers.push((question, answer(category, dosha, 1.0)));
            }
        }
        answers
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryAssessments {
        records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
    }

    impl AssessmentRepository for MemoryAssessments {
        fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&record.assessment_id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.assessment_id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.insert(record.assessment_id.clone(), record);
            Ok(())
        }

        fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }

        fn in_progress_for(
            &self,
            user_id: &UserId,
        ) -> Result<Option<AssessmentRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
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

    impl DoshaProfileStore for MemoryProfiles {
        fn upsert(&self, profile: DoshaProfileRecord) -> Result<(), RepositoryError> {
            self.profiles
                .lock()
                .expect("lock")
                .insert(profile.user_id.clone(), profile);
            Ok(())
        }

        fn fetch(&self, user_id: &UserId) -> Result<Option<DoshaProfileRecord>, RepositoryError> {
            Ok(self.profiles.lock().expect("lock").get(user_id).cloned())
        }
    }

    pub(super) fn build_service() -> (
        AssessmentService<MemoryAssessments, MemoryProfiles>,
        Arc<MemoryAssessments>,
        Arc<MemoryProfiles>,
    ) {
        let repository = Arc::new(MemoryAssessments::default());
        let profiles = Arc::new(MemoryProfiles::default());
        let service =
            AssessmentService::new(repository.clone(), profiles.clone(), assessment_config());
        (service, repository, profiles)
    }
}

mod lifecycle {
    use super::common::*;
    use prakriti_ai::workflows::assessment::{
        AgniType, AssessmentRepository, AssessmentStatus, AssessmentType, Dosha, DoshaProfileStore,
    };
    use serde_json::Value;

    #[test]
    fn full_questionnaire_flow_scores_and_derives_the_profile() {
        let (service, repository, profiles) = build_service();
        let user = respondent();

        let started = service
            .start(&user, AssessmentType::Initial)
            .expect("assessment starts");
        assert!(!started.is_existing);

        let outcome = service
            .record_responses(
                &started.record.assessment_id,
                &user,
                vata_dominant_answers(),
            )
            .expect("bulk submission succeeds");
        assert_eq!(outcome.saved, 24);
        assert_eq!(outcome.progress.answered, 24);
        assert_eq!(outcome.progress.percentage, 100.0);

        let completed = service
            .complete(&started.record.assessment_id, &user)
            .expect("completion succeeds");

        assert_eq!(completed.analysis.vata_score, 66.67);
        assert_eq!(completed.analysis.pitta_score, 33.33);
        assert_eq!(completed.analysis.kapha_score, 0.0);
        assert_eq!(completed.analysis.prakriti_type, "Vata");
        assert_eq!(completed.analysis.primary_dosha, Dosha::Vata);
        assert_eq!(completed.analysis.agni_type, AgniType::Vishama);
        assert_eq!(completed.analysis.sub_scores.len(), 8);
        assert_eq!(completed.analysis.physical_vata, Some(66.67));
        assert_eq!(completed.analysis.digestive_pitta, Some(33.33));
        assert_eq!(completed.record.confidence, Some(0.9));

        let stored = repository
            .fetch(&started.record.assessment_id)
            .expect("repo fetch")
            .expect("record present");
        assert_eq!(stored.status, AssessmentStatus::Completed);

        let profile = profiles
            .fetch(&user)
            .expect("profile fetch")
            .expect("profile present");
        assert_eq!(profile.prakriti_type, "Vata");
        assert_eq!(profile.vikriti, profile.prakriti);
        assert_eq!(profile.last_assessment_id, started.record.assessment_id);
    }

    #[test]
    fn status_view_exposes_a_sanitized_payload() {
        let (service, _, _) = build_service();
        let user = respondent();

        let started = service
            .start(&user, AssessmentType::Initial)
            .expect("assessment starts");
        service
            .record_responses(
                &started.record.assessment_id,
                &user,
                vata_dominant_answers(),
            )
            .expect("answers recorded");
        let completed = service
            .complete(&started.record.assessment_id, &user)
            .expect("completion succeeds");

        let payload =
            serde_json::to_value(completed.record.status_view()).expect("view serializes");
        assert_eq!(payload.get("status"), Some(&Value::from("completed")));
        assert_eq!(payload.get("answered"), Some(&Value::from(24)));
        assert_eq!(payload.get("prakritiType"), None);
        assert_eq!(payload.get("prakriti_type"), Some(&Value::from("Vata")));
        assert_eq!(payload.get("confidence"), Some(&Value::from(0.9)));
    }

    #[test]
    fn starting_twice_resumes_the_open_attempt() {
        let (service, _, _) = build_service();
        let user = respondent();

        let first = service
            .start(&user, AssessmentType::Initial)
            .expect("first start");
        let second = service
            .start(&user, AssessmentType::Reassessment)
            .expect("second start");

        assert!(second.is_existing);
        assert_eq!(second.record.assessment_id, first.record.assessment_id);
    }
}

mod vikriti {
    use super::common::*;
    use prakriti_ai::workflows::assessment::{
        AssessmentServiceError, AssessmentType, Dosha, DoshaScores, ImbalanceDirection,
    };

    #[test]
    fn report_compares_present_state_against_the_stored_baseline() {
        let (service, _, _) = build_service();
        let user = respondent();

        let started = service
            .start(&user, AssessmentType::Initial)
            .expect("assessment starts");
        service
            .record_responses(
                &started.record.assessment_id,
                &user,
                vata_dominant_answers(),
            )
            .expect("answers recorded");
        service
            .complete(&started.record.assessment_id, &user)
            .expect("completion succeeds");

        // Baseline is {66.67, 33.33, 0}; vata collapses while kapha surges.
        let report = service
            .imbalance_report(
                &user,
                &DoshaScores {
                    vata: 40.0,
                    pitta: 40.0,
                    kapha: 20.0,
                },
            )
            .expect("report builds");

        assert!(report.is_imbalanced);
        assert_eq!(report.imbalances.len(), 2);
        assert_eq!(report.imbalances[0].dosha, Dosha::Vata);
        assert_eq!(report.imbalances[0].direction, ImbalanceDirection::Deficient);
        assert_eq!(report.imbalances[0].deviation, 26.67);
        assert_eq!(report.imbalances[1].dosha, Dosha::Kapha);
        assert_eq!(report.imbalances[1].direction, ImbalanceDirection::Excess);
        assert_eq!(report.imbalances[1].deviation, 20.0);

        // Deficiency has no curated guidance; the kapha excess bundle does.
        assert!(report.balancing_actions[0].herbs.is_empty());
        assert!(report.balancing_actions[1].herbs.contains(&"Trikatu"));
    }

    #[test]
    fn report_requires_a_completed_assessment_first() {
        let (service, _, _) = build_service();

        let err = service
            .imbalance_report(
                &respondent(),
                &DoshaScores {
                    vata: 40.0,
                    pitta: 30.0,
                    kapha: 30.0,
                },
            )
            .expect_err("no baseline on file");

        assert!(matches!(err, AssessmentServiceError::MissingProfile));
    }
}

mod edge_cases {
    use super::common::*;
    use prakriti_ai::workflows::assessment::{AssessmentServiceError, AssessmentType};

    #[test]
    fn completing_without_answers_is_a_workflow_error() {
        let (service, _, _) = build_service();
        let user = respondent();

        let started = service
            .start(&user, AssessmentType::Initial)
            .expect("assessment starts");
        let err = service
            .complete(&started.record.assessment_id, &user)
            .expect_err("empty attempt rejected");

        assert!(matches!(err, AssessmentServiceError::EmptyAssessment));
    }

    #[test]
    fn foreign_users_cannot_touch_an_attempt() {
        let (service, _, _) = build_service();
        let user = respondent();
        let outsider = prakriti_ai::workflows::assessment::UserId("user-999".to_string());

        let started = service
            .start(&user, AssessmentType::Initial)
            .expect("assessment starts");
        let err = service
            .record_responses(
                &started.record.assessment_id,
                &outsider,
                vata_dominant_answers(),
            )
            .expect_err("foreign user rejected");

        assert!(matches!(err, AssessmentServiceError::NotInProgress));
    }
}
