use std::collections::BTreeMap;

use super::super::domain::{Dosha, DoshaScores, QuestionCategory, QuestionResponse};

/// Half-away-from-zero rounding to two decimals, applied at every site that
/// emits a score so outputs stay bit-for-bit comparable.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Default)]
struct CategoryAccumulator {
    vata: f64,
    pitta: f64,
    kapha: f64,
    total: f64,
}

impl CategoryAccumulator {
    fn add(&mut self, dosha: Option<Dosha>, weight: f64) {
        self.total += weight;
        match dosha {
            Some(Dosha::Vata) => self.vata += weight,
            Some(Dosha::Pitta) => self.pitta += weight,
            Some(Dosha::Kapha) => self.kapha += weight,
            None => {}
        }
    }

    fn normalized(&self) -> DoshaScores {
        DoshaScores {
            vata: round2(self.vata / self.total * 100.0),
            pitta: round2(self.pitta / self.total * 100.0),
            kapha: round2(self.kapha / self.total * 100.0),
        }
    }
}

/// Accumulates weighted dosha affinities across all responses and normalizes
/// each bucket to a 0-100 scale. Neutral responses (no recognized affinity)
/// widen the denominator without feeding any bucket, so the three scores sum
/// to at most 100. Zero accumulated weight yields all-zero scores.
pub fn dosha_scores(responses: &[QuestionResponse]) -> DoshaScores {
    let mut overall = CategoryAccumulator::default();
    for response in responses {
        overall.add(response.dosha(), response.weight());
    }

    if overall.total > 0.0 {
        overall.normalized()
    } else {
        DoshaScores::ZERO
    }
}

/// Per-section normalization over the eight fixed questionnaire sections.
///
/// Sections that collected no weight are omitted from the map entirely, so
/// "no data for this section" stays distinguishable from a genuine zero.
/// Responses without a recognized section are skipped.
pub fn sub_scores(responses: &[QuestionResponse]) -> BTreeMap<QuestionCategory, DoshaScores> {
    let mut buckets: BTreeMap<QuestionCategory, CategoryAccumulator> = BTreeMap::new();
    for response in responses {
        let Some(category) = response.category else {
            continue;
        };
        buckets
            .entry(category)
            .or_default()
            .add(response.dosha(), response.weight());
    }

    buckets
        .into_iter()
        .filter(|(_, bucket)| bucket.total > 0.0)
        .map(|(category, bucket)| (category, bucket.normalized()))
        .collect()
}

/// Fixed section groupings behind the composite physical/mental/digestive
/// averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeGroup {
    Physical,
    Mental,
    Digestive,
}

impl CompositeGroup {
    pub const fn categories(self) -> [QuestionCategory; 2] {
        match self {
            CompositeGroup::Physical => [
                QuestionCategory::BodyStructure,
                QuestionCategory::SkinHairNails,
            ],
            CompositeGroup::Mental => [
                QuestionCategory::MentalEmotional,
                QuestionCategory::StressResponse,
            ],
            CompositeGroup::Digestive => [
                QuestionCategory::MetabolismDigestion,
                QuestionCategory::AppetiteTaste,
            ],
        }
    }
}

/// Mean of one dosha's sub-scores across the group's sections that are
/// present in the breakdown. Returns `None` when every section in the group
/// was omitted, signalling insufficient data rather than a zero score.
pub fn composite_score(
    sub_scores: &BTreeMap<QuestionCategory, DoshaScores>,
    group: CompositeGroup,
    dosha: Dosha,
) -> Option<f64> {
    let mut sum = 0.0;
    let mut present = 0usize;
    for category in group.categories() {
        if let Some(scores) = sub_scores.get(&category) {
            sum += scores.get(dosha);
            present += 1;
        }
    }

    if present == 0 {
        None
    } else {
        Some(round2(sum / present as f64))
    }
}
