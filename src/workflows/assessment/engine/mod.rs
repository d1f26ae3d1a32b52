//! The dosha scoring engine: a pure, single-pass transformation from
//! questionnaire responses to a constitution analysis. The engine performs
//! no I/O and raises no errors; every edge case degrades to a defined
//! neutral value.

mod classify;
mod imbalance;
mod scoring;

pub use classify::{agni_type, classify, dominant_gunas, DoshaClassification};
pub use imbalance::{
    balancing_actions, check_imbalance, BalancingActions, ImbalanceDirection, ImbalanceEntry,
    ImbalanceReport,
};
pub use scoring::{composite_score, dosha_scores, sub_scores, CompositeGroup};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{AgniType, Dosha, DoshaScores, QuestionCategory, QuestionResponse};

/// Flat analysis result assembled by [`analyze`]: overall scores, the
/// constitution classification, derived attributes, the per-section
/// breakdown, and the nine composite group averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrakritiAnalysis {
    pub vata_score: f64,
    pub pitta_score: f64,
    pub kapha_score: f64,
    pub primary_dosha: Dosha,
    pub secondary_dosha: Dosha,
    pub prakriti_type: String,
    pub agni_type: AgniType,
    pub dominant_gunas: Vec<String>,
    pub sub_scores: BTreeMap<QuestionCategory, DoshaScores>,
    pub physical_vata: Option<f64>,
    pub physical_pitta: Option<f64>,
    pub physical_kapha: Option<f64>,
    pub mental_vata: Option<f64>,
    pub mental_pitta: Option<f64>,
    pub mental_kapha: Option<f64>,
    pub digestive_vata: Option<f64>,
    pub digestive_pitta: Option<f64>,
    pub digestive_kapha: Option<f64>,
}

impl PrakritiAnalysis {
    /// The overall scores as one value, for baseline comparisons.
    pub fn scores(&self) -> DoshaScores {
        DoshaScores {
            vata: self.vata_score,
            pitta: self.pitta_score,
            kapha: self.kapha_score,
        }
    }
}

/// Runs the full questionnaire analysis. This is the only entry point the
/// surrounding workflow needs; empty input yields the all-zero, tridoshic,
/// empty-breakdown result rather than an error.
pub fn analyze(responses: &[QuestionResponse]) -> PrakritiAnalysis {
    let scores = dosha_scores(responses);
    let classification = classify(&scores);
    let sub_scores = sub_scores(responses);
    let agni = agni_type(Some(classification.primary_dosha));
    let gunas = dominant_gunas(Some(classification.primary_dosha));

    let composite =
        |group: CompositeGroup, dosha: Dosha| composite_score(&sub_scores, group, dosha);

    let physical_vata = composite(CompositeGroup::Physical, Dosha::Vata);
    let physical_pitta = composite(CompositeGroup::Physical, Dosha::Pitta);
    let physical_kapha = composite(CompositeGroup::Physical, Dosha::Kapha);
    let mental_vata = composite(CompositeGroup::Mental, Dosha::Vata);
    let mental_pitta = composite(CompositeGroup::Mental, Dosha::Pitta);
    let mental_kapha = composite(CompositeGroup::Mental, Dosha::Kapha);
    let digestive_vata = composite(CompositeGroup::Digestive, Dosha::Vata);
    let digestive_pitta = composite(CompositeGroup::Digestive, Dosha::Pitta);
    let digestive_kapha = composite(CompositeGroup::Digestive, Dosha::Kapha);

    PrakritiAnalysis {
        vata_score: scores.vata,
        pitta_score: scores.pitta,
        kapha_score: scores.kapha,
        primary_dosha: classification.primary_dosha,
        secondary_dosha: classification.secondary_dosha,
        prakriti_type: classification.prakriti_type,
        agni_type: agni,
        dominant_gunas: gunas.iter().map(|guna| (*guna).to_string()).collect(),
        sub_scores,
        physical_vata,
        physical_pitta,
        physical_kapha,
        mental_vata,
        mental_pitta,
        mental_kapha,
        digestive_vata,
        digestive_pitta,
        digestive_kapha,
    }
}
