use super::domain::{Category, CategoryScores};
use serde::{Deserialize, Serialize};
use std::fmt;

const POOR_CEILING: f64 = 3.0;
const AVERAGE_CEILING: f64 = 7.0;
const MAJORITY: usize = 3;

/// Coarse qualitative bucket for a category score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinguisticLabel {
    Poor,
    Average,
    Excellent,
}

impl LinguisticLabel {
    /// NaN counts as `Poor`, in line with the boundary classifier sending it to one star.
    pub fn classify(value: f64) -> Self {
        if value.is_nan() || value <= POOR_CEILING {
            Self::Poor
        } else if value <= AVERAGE_CEILING {
            Self::Average
        } else {
            Self::Excellent
        }
    }

    /// Wording used in human-facing explanations.
    pub const fn quality(self) -> &'static str {
        match self {
            Self::Poor => "Low",
            Self::Average => "Medium",
            Self::Excellent => "High",
        }
    }
}

/// Identifies an entry of the override ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    AllPoor,
    MostlyPoor,
    AverageServiceAndInfrastructure,
    AllAverage,
    MostlyExcellent,
    AllExcellent,
}

impl RuleId {
    pub const fn code(self) -> &'static str {
        match self {
            Self::AllPoor => "R1",
            Self::MostlyPoor => "R2",
            Self::AverageServiceAndInfrastructure => "R3",
            Self::AllAverage => "R4",
            Self::MostlyExcellent => "R5",
            Self::AllExcellent => "R6",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::AllPoor => "every category is poor",
            Self::MostlyPoor => "at least three categories are poor",
            Self::AverageServiceAndInfrastructure => {
                "service quality and infrastructure are both average"
            }
            Self::AllAverage => "every category is average",
            Self::MostlyExcellent => "at least three categories are excellent",
            Self::AllExcellent => "every category is excellent",
        }
    }
}

/// Star level an override rule assigns when it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Fixed(u8),
    /// Keeps the boundary result but never lets it fall below the floor.
    AtLeast(u8),
}

impl RuleOutcome {
    fn resolve(self, base_star: u8) -> u8 {
        match self {
            Self::Fixed(star) => star,
            Self::AtLeast(floor) => base_star.max(floor),
        }
    }
}

/// Linguistic labels for every category present in a score set.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelProfile {
    labels: Vec<(Category, LinguisticLabel)>,
}

impl LabelProfile {
    pub fn from_scores(scores: &CategoryScores) -> Self {
        Self {
            labels: scores
                .iter()
                .map(|(category, value)| (category, LinguisticLabel::classify(value)))
                .collect(),
        }
    }

    /// Vacuously true when no category is present.
    pub fn all(&self, label: LinguisticLabel) -> bool {
        self.labels.iter().all(|(_, existing)| *existing == label)
    }

    pub fn count(&self, label: LinguisticLabel) -> usize {
        self.labels
            .iter()
            .filter(|(_, existing)| *existing == label)
            .count()
    }

    pub fn label_of(&self, category: Category) -> Option<LinguisticLabel> {
        self.labels
            .iter()
            .find(|(existing, _)| *existing == category)
            .map(|(_, label)| *label)
    }
}

/// One row of the override ladder.
#[derive(Clone, Copy)]
pub struct OverrideRule {
    pub id: RuleId,
    pub applies: fn(&LabelProfile) -> bool,
    pub outcome: RuleOutcome,
}

impl fmt::Debug for OverrideRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideRule")
            .field("id", &self.id)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

/// Result of the first override rule that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule: RuleId,
    pub star: u8,
}

const OVERRIDE_LADDER: [OverrideRule; 6] = [
    OverrideRule {
        id: RuleId::AllPoor,
        applies: all_poor,
        outcome: RuleOutcome::Fixed(1),
    },
    OverrideRule {
        id: RuleId::MostlyPoor,
        applies: mostly_poor,
        outcome: RuleOutcome::Fixed(1),
    },
    OverrideRule {
        id: RuleId::AverageServiceAndInfrastructure,
        applies: average_service_and_infrastructure,
        outcome: RuleOutcome::AtLeast(2),
    },
    OverrideRule {
        id: RuleId::AllAverage,
        applies: all_average,
        outcome: RuleOutcome::Fixed(3),
    },
    // All-excellent must precede the majority rule, which would otherwise
    // shadow it for any score set with three or more categories.
    OverrideRule {
        id: RuleId::AllExcellent,
        applies: all_excellent,
        outcome: RuleOutcome::Fixed(5),
    },
    OverrideRule {
        id: RuleId::MostlyExcellent,
        applies: mostly_excellent,
        outcome: RuleOutcome::Fixed(4),
    },
];

/// Override rules in evaluation priority order.
pub fn override_ladder() -> &'static [OverrideRule] {
    &OVERRIDE_LADDER
}

pub(crate) fn evaluate(scores: &CategoryScores, base_star: u8) -> Option<RuleMatch> {
    let profile = LabelProfile::from_scores(scores);

    override_ladder()
        .iter()
        .find(|rule| (rule.applies)(&profile))
        .map(|rule| RuleMatch {
            rule: rule.id,
            star: rule.outcome.resolve(base_star),
        })
}

fn all_poor(profile: &LabelProfile) -> bool {
    profile.all(LinguisticLabel::Poor)
}

fn mostly_poor(profile: &LabelProfile) -> bool {
    profile.count(LinguisticLabel::Poor) >= MAJORITY
}

fn average_service_and_infrastructure(profile: &LabelProfile) -> bool {
    profile.label_of(Category::ServiceQuality) == Some(LinguisticLabel::Average)
        && profile.label_of(Category::Infrastructure) == Some(LinguisticLabel::Average)
}

fn all_average(profile: &LabelProfile) -> bool {
    profile.all(LinguisticLabel::Average)
}

fn mostly_excellent(profile: &LabelProfile) -> bool {
    profile.count(LinguisticLabel::Excellent) >= MAJORITY
}

fn all_excellent(profile: &LabelProfile) -> bool {
    profile.all(LinguisticLabel::Excellent)
}
