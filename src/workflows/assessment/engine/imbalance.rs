use serde::Serialize;

use super::super::domain::{Dosha, DoshaScores};
use super::scoring::round2;

/// Deviation from the constitutional baseline beyond which a dosha is
/// flagged as out of balance.
const IMBALANCE_THRESHOLD: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImbalanceDirection {
    Excess,
    Deficient,
}

impl ImbalanceDirection {
    pub const fn label(self) -> &'static str {
        match self {
            ImbalanceDirection::Excess => "EXCESS",
            ImbalanceDirection::Deficient => "DEFICIENT",
        }
    }
}

/// One dosha drifting from the constitutional baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImbalanceEntry {
    pub dosha: Dosha,
    pub direction: ImbalanceDirection,
    pub deviation: f64,
}

/// Diet, lifestyle, and herb guidance bundled for one flagged imbalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalancingActions {
    pub diet: &'static [&'static str],
    pub lifestyle: &'static [&'static str],
    pub herbs: &'static [&'static str],
}

impl BalancingActions {
    pub const EMPTY: BalancingActions = BalancingActions {
        diet: &[],
        lifestyle: &[],
        herbs: &[],
    };
}

/// Vikriti reading: which doshas drifted, how far, and what to do about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImbalanceReport {
    pub is_imbalanced: bool,
    pub imbalances: Vec<ImbalanceEntry>,
    pub balancing_actions: Vec<BalancingActions>,
}

/// Compares present-state scores against the constitutional baseline.
/// Deviations at or below the threshold are left unreported.
pub fn check_imbalance(prakriti: &DoshaScores, current: &DoshaScores) -> ImbalanceReport {
    let mut imbalances = Vec::new();
    for dosha in Dosha::ALL {
        let deviation = current.get(dosha) - prakriti.get(dosha);
        if deviation.abs() > IMBALANCE_THRESHOLD {
            imbalances.push(ImbalanceEntry {
                dosha,
                direction: if deviation > 0.0 {
                    ImbalanceDirection::Excess
                } else {
                    ImbalanceDirection::Deficient
                },
                deviation: round2(deviation.abs()),
            });
        }
    }

    let balancing_actions = imbalances
        .iter()
        .map(|entry| balancing_actions(entry.dosha, entry.direction))
        .collect();

    ImbalanceReport {
        is_imbalanced: !imbalances.is_empty(),
        imbalances,
        balancing_actions,
    }
}

/// Fixed guidance table keyed by dosha and drift direction. Keys without
/// curated guidance resolve to the empty bundle.
pub fn balancing_actions(dosha: Dosha, direction: ImbalanceDirection) -> BalancingActions {
    match (dosha, direction) {
        (Dosha::Vata, ImbalanceDirection::Excess) => BalancingActions {
            diet: &[
                "Warm, cooked foods",
                "Sweet, sour, salty tastes",
                "Ghee and warm oils",
                "Avoid raw/cold foods",
            ],
            lifestyle: &[
                "Regular routine",
                "Warm oil massage (Abhyanga)",
                "Early bedtime",
                "Gentle yoga",
            ],
            herbs: &["Ashwagandha", "Shatavari", "Bala", "Dashmool"],
        },
        (Dosha::Pitta, ImbalanceDirection::Excess) => BalancingActions {
            diet: &[
                "Cool, refreshing foods",
                "Sweet, bitter, astringent tastes",
                "Coconut oil",
                "Avoid spicy/fried foods",
            ],
            lifestyle: &[
                "Moonlight walks",
                "Cool showers",
                "Moderate exercise",
                "Meditation",
            ],
            herbs: &["Amalaki", "Brahmi", "Neem", "Guduchi"],
        },
        (Dosha::Kapha, ImbalanceDirection::Excess) => BalancingActions {
            diet: &[
                "Light, warm foods",
                "Pungent, bitter, astringent tastes",
                "Honey",
                "Avoid heavy/oily foods",
            ],
            lifestyle: &[
                "Vigorous exercise",
                "Dry brushing",
                "Wake early",
                "Variety in routine",
            ],
            herbs: &["Trikatu", "Guggulu", "Punarnava", "Tulsi"],
        },
        (_, ImbalanceDirection::Deficient) => BalancingActions::EMPTY,
    }
}
