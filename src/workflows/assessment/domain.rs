use serde::{Deserialize, Serialize};

/// Identifier wrapper for assessment attempts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Identifier wrapper for platform users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for question-bank entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// The three constitutional doshas the questionnaire scores against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    pub const ALL: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

    pub const fn label(self) -> &'static str {
        match self {
            Dosha::Vata => "VATA",
            Dosha::Pitta => "PITTA",
            Dosha::Kapha => "KAPHA",
        }
    }

    /// Capitalized form used when composing constitution labels.
    pub const fn display_name(self) -> &'static str {
        match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        }
    }
}

/// Questionnaire sections. Every active question belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionCategory {
    BodyStructure,
    SkinHairNails,
    MetabolismDigestion,
    AppetiteTaste,
    SleepPatterns,
    MentalEmotional,
    StressResponse,
    EnergyStamina,
}

impl QuestionCategory {
    pub const ALL: [QuestionCategory; 8] = [
        QuestionCategory::BodyStructure,
        QuestionCategory::SkinHairNails,
        QuestionCategory::MetabolismDigestion,
        QuestionCategory::AppetiteTaste,
        QuestionCategory::SleepPatterns,
        QuestionCategory::MentalEmotional,
        QuestionCategory::StressResponse,
        QuestionCategory::EnergyStamina,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            QuestionCategory::BodyStructure => "BODY_STRUCTURE",
            QuestionCategory::SkinHairNails => "SKIN_HAIR_NAILS",
            QuestionCategory::MetabolismDigestion => "METABOLISM_DIGESTION",
            QuestionCategory::AppetiteTaste => "APPETITE_TASTE",
            QuestionCategory::SleepPatterns => "SLEEP_PATTERNS",
            QuestionCategory::MentalEmotional => "MENTAL_EMOTIONAL",
            QuestionCategory::StressResponse => "STRESS_RESPONSE",
            QuestionCategory::EnergyStamina => "ENERGY_STAMINA",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            QuestionCategory::BodyStructure => "Body Structure",
            QuestionCategory::SkinHairNails => "Skin, Hair & Nails",
            QuestionCategory::MetabolismDigestion => "Metabolism & Digestion",
            QuestionCategory::AppetiteTaste => "Appetite & Taste",
            QuestionCategory::SleepPatterns => "Sleep Patterns",
            QuestionCategory::MentalEmotional => "Mental & Emotional",
            QuestionCategory::StressResponse => "Stress Response",
            QuestionCategory::EnergyStamina => "Energy & Stamina",
        }
    }
}

/// Metabolic fire classification derived from the dominant dosha. `Sama`
/// (balanced) is the fallback for profiles without a dominant dosha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgniType {
    Vishama,
    Tikshna,
    Manda,
    #[default]
    Sama,
}

impl AgniType {
    pub const fn label(self) -> &'static str {
        match self {
            AgniType::Vishama => "VISHAMA",
            AgniType::Tikshna => "TIKSHNA",
            AgniType::Manda => "MANDA",
            AgniType::Sama => "SAMA",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            AgniType::Vishama => "irregular",
            AgniType::Tikshna => "sharp",
            AgniType::Manda => "slow",
            AgniType::Sama => "balanced",
        }
    }
}

/// The answer option a respondent selected, as resolved from the question
/// bank. Options without a dosha affinity count as neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    #[serde(default)]
    pub dosha_type: Option<Dosha>,
    #[serde(default)]
    pub weightage: Option<f64>,
}

impl SelectedOption {
    /// Contribution strength. Absent or invalid (negative, non-finite)
    /// weights fall back to 1; an explicit zero stays zero.
    pub(crate) fn weight(&self) -> f64 {
        match self.weightage {
            Some(value) if value.is_finite() && value >= 0.0 => value,
            _ => 1.0,
        }
    }
}

/// One answered question within an assessment attempt.
///
/// `category` is `None` when the response references a section the engine
/// does not recognize; such responses still count toward the overall weight
/// totals but never appear in the per-section breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    #[serde(default)]
    pub category: Option<QuestionCategory>,
    #[serde(default)]
    pub option: Option<SelectedOption>,
}

impl QuestionResponse {
    pub(crate) fn weight(&self) -> f64 {
        self.option.as_ref().map_or(1.0, SelectedOption::weight)
    }

    pub(crate) fn dosha(&self) -> Option<Dosha> {
        self.option.as_ref().and_then(|option| option.dosha_type)
    }
}

/// Normalized 0-100 dosha scores for one profile or one section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoshaScores {
    pub vata: f64,
    pub pitta: f64,
    pub kapha: f64,
}

impl DoshaScores {
    pub const ZERO: DoshaScores = DoshaScores {
        vata: 0.0,
        pitta: 0.0,
        kapha: 0.0,
    };

    pub fn get(&self, dosha: Dosha) -> f64 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }
}
