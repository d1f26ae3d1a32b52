//! Prakriti questionnaire scoring and the assessment lifecycle around it.
//!
//! The engine submodule is the pure scoring core; the service wraps it with
//! attempt tracking and dosha-profile maintenance over storage traits.

pub mod domain;
pub mod engine;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AgniType, AssessmentId, Dosha, DoshaScores, QuestionCategory, QuestionId, QuestionResponse,
    SelectedOption, UserId,
};
pub use engine::{
    analyze, check_imbalance, BalancingActions, CompositeGroup, DoshaClassification,
    ImbalanceDirection, ImbalanceEntry, ImbalanceReport, PrakritiAnalysis,
};
pub use repository::{
    AssessmentRecord, AssessmentRepository, AssessmentStatus, AssessmentStatusView, AssessmentType,
    DoshaProfileRecord, DoshaProfileStore, RepositoryError,
};
pub use service::{
    AssessmentConfig, AssessmentProgress, AssessmentService, AssessmentServiceError,
    BulkResponseOutcome, CompletedAssessment, StartedAssessment,
};
