use serde::{Deserialize, Serialize};

use super::super::domain::{AgniType, Dosha, DoshaScores};

/// Gap below which the top two doshas count as co-dominant.
const DUAL_DOSHA_GAP: f64 = 10.0;
/// Top-to-mid gap below which a tridoshic constitution becomes possible.
const TRIDOSHIC_TOP_GAP: f64 = 5.0;
/// Top-to-bottom spread below which all three doshas count as balanced.
const TRIDOSHIC_SPREAD: f64 = 10.0;

/// Primary/secondary ranking with the composite constitution label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoshaClassification {
    pub primary_dosha: Dosha,
    pub secondary_dosha: Dosha,
    pub prakriti_type: String,
}

/// Ranks the three scores and derives the constitution label.
///
/// The tridoshic check runs before the dual-dosha check: a small top-to-mid
/// gap alone is not evidence of balance across all three doshas. Ties keep
/// the Vata, Pitta, Kapha declaration order.
pub fn classify(scores: &DoshaScores) -> DoshaClassification {
    let mut ranked = [
        (Dosha::Vata, scores.vata),
        (Dosha::Pitta, scores.pitta),
        (Dosha::Kapha, scores.kapha),
    ];
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (primary, top) = ranked[0];
    let (secondary, mid) = ranked[1];
    let (_, bottom) = ranked[2];

    let prakriti_type = if top - mid < TRIDOSHIC_TOP_GAP && top - bottom < TRIDOSHIC_SPREAD {
        "Tridoshic".to_string()
    } else if top - mid < DUAL_DOSHA_GAP {
        format!("{}-{}", primary.display_name(), secondary.display_name())
    } else {
        primary.display_name().to_string()
    };

    DoshaClassification {
        primary_dosha: primary,
        secondary_dosha: secondary,
        prakriti_type,
    }
}

/// Metabolic fire type for a dominant dosha; readings without one resolve to
/// the balanced `Sama` default.
pub fn agni_type(primary: Option<Dosha>) -> AgniType {
    match primary {
        Some(Dosha::Vata) => AgniType::Vishama,
        Some(Dosha::Pitta) => AgniType::Tikshna,
        Some(Dosha::Kapha) => AgniType::Manda,
        None => AgniType::Sama,
    }
}

/// The six qualities classically attributed to each dosha, in their
/// canonical order; readings without a dominant dosha get an empty list.
pub fn dominant_gunas(primary: Option<Dosha>) -> &'static [&'static str] {
    match primary {
        Some(Dosha::Vata) => &["Dry", "Light", "Cold", "Rough", "Subtle", "Mobile"],
        Some(Dosha::Pitta) => &["Hot", "Sharp", "Light", "Liquid", "Oily", "Spreading"],
        Some(Dosha::Kapha) => &["Heavy", "Slow", "Cold", "Oily", "Smooth", "Dense"],
        None => &[],
    }
}
