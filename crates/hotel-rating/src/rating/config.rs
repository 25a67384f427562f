use super::domain::Category;
use serde::{Deserialize, Serialize};
use std::path::Path;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;
const STAR_LEVELS: usize = 5;
/// Exclusive upper end of the top star range; keeps a perfect 10 inside it.
const BOUNDARY_END: f64 = 10.1;

/// Importance weight of each category in the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub category: Category,
    pub weight: f64,
}

/// Half-open `[min, max)` composite range mapped to a star level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarBoundary {
    pub star: u8,
    pub min: f64,
    pub max: f64,
}

impl StarBoundary {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value < self.max
    }
}

/// Weights and star boundaries the engine classifies against.
///
/// Construct through [`RatingConfig::new`] or [`RatingConfig::standard`];
/// both guarantee the tables are internally consistent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingConfig {
    weights: Vec<CategoryWeight>,
    boundaries: Vec<StarBoundary>,
}

impl RatingConfig {
    pub fn new(
        weights: Vec<CategoryWeight>,
        boundaries: Vec<StarBoundary>,
    ) -> Result<Self, RatingConfigError> {
        validate_weights(&weights)?;
        validate_boundaries(&boundaries)?;
        Ok(Self {
            weights,
            boundaries,
        })
    }

    /// The published hotel classification tables.
    pub fn standard() -> Self {
        Self {
            weights: vec![
                weight(Category::ServiceQuality, 0.25),
                weight(Category::Infrastructure, 0.20),
                weight(Category::Location, 0.15),
                weight(Category::Dining, 0.20),
                weight(Category::RoomComfort, 0.20),
            ],
            boundaries: vec![
                boundary(1, 0.0, 3.5),
                boundary(2, 3.5, 5.5),
                boundary(3, 5.5, 7.5),
                boundary(4, 7.5, 9.0),
                boundary(5, 9.0, BOUNDARY_END),
            ],
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RatingConfigError> {
        let parsed: RawRatingConfig = serde_json::from_str(raw)?;
        Self::new(parsed.weights, parsed.boundaries)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, RatingConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn weights(&self) -> &[CategoryWeight] {
        &self.weights
    }

    pub fn weight_for(&self, category: Category) -> Option<f64> {
        self.weights
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.weight)
    }

    pub fn boundaries(&self) -> &[StarBoundary] {
        &self.boundaries
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'de> Deserialize<'de> for RatingConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawRatingConfig::deserialize(deserializer)?;
        Self::new(raw.weights, raw.boundaries).map_err(serde::de::Error::custom)
    }
}

#[derive(Deserialize)]
struct RawRatingConfig {
    weights: Vec<CategoryWeight>,
    boundaries: Vec<StarBoundary>,
}

/// Reasons a weight or boundary table is rejected.
#[derive(Debug, thiserror::Error)]
pub enum RatingConfigError {
    #[error("weight for {category} must be a finite, non-negative number (found {weight})")]
    InvalidWeight { category: Category, weight: f64 },
    #[error("category {0} is weighted more than once")]
    DuplicateWeight(Category),
    #[error("category weights must sum to 1.0 (found {0})")]
    WeightSum(f64),
    #[error("expected {expected} star boundaries, found {found}")]
    BoundaryCount { expected: usize, found: usize },
    #[error("boundary {position} must describe star {expected} (found {found})")]
    BoundaryOrder { position: usize, expected: u8, found: u8 },
    #[error("boundary for star {star} has an empty or invalid range [{min}, {max})")]
    EmptyBoundary { star: u8, min: f64, max: f64 },
    #[error("lowest boundary must start at 0 (found {0})")]
    BoundaryStart(f64),
    #[error("boundary for star {star} starts at {min} but the previous one ends at {previous_max}")]
    BoundaryGap { star: u8, min: f64, previous_max: f64 },
    #[error("highest boundary must end at {expected} (found {found})")]
    BoundaryEnd { expected: f64, found: f64 },
    #[error("failed to read rating configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rating configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn weight(category: Category, weight: f64) -> CategoryWeight {
    CategoryWeight { category, weight }
}

fn boundary(star: u8, min: f64, max: f64) -> StarBoundary {
    StarBoundary { star, min, max }
}

fn validate_weights(weights: &[CategoryWeight]) -> Result<(), RatingConfigError> {
    let mut seen = Vec::with_capacity(weights.len());
    for entry in weights {
        if !entry.weight.is_finite() || entry.weight < 0.0 {
            return Err(RatingConfigError::InvalidWeight {
                category: entry.category,
                weight: entry.weight,
            });
        }
        if seen.contains(&entry.category) {
            return Err(RatingConfigError::DuplicateWeight(entry.category));
        }
        seen.push(entry.category);
    }

    let total: f64 = weights.iter().map(|entry| entry.weight).sum();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(RatingConfigError::WeightSum(total));
    }

    Ok(())
}

fn validate_boundaries(boundaries: &[StarBoundary]) -> Result<(), RatingConfigError> {
    if boundaries.len() != STAR_LEVELS {
        return Err(RatingConfigError::BoundaryCount {
            expected: STAR_LEVELS,
            found: boundaries.len(),
        });
    }

    let mut previous_max: Option<f64> = None;
    for (position, entry) in boundaries.iter().enumerate() {
        let expected = position as u8 + 1;
        if entry.star != expected {
            return Err(RatingConfigError::BoundaryOrder {
                position,
                expected,
                found: entry.star,
            });
        }

        if !(entry.min.is_finite() && entry.max.is_finite() && entry.min < entry.max) {
            return Err(RatingConfigError::EmptyBoundary {
                star: entry.star,
                min: entry.min,
                max: entry.max,
            });
        }

        match previous_max {
            None if entry.min != 0.0 => return Err(RatingConfigError::BoundaryStart(entry.min)),
            Some(previous_max) if entry.min != previous_max => {
                return Err(RatingConfigError::BoundaryGap {
                    star: entry.star,
                    min: entry.min,
                    previous_max,
                })
            }
            _ => {}
        }
        previous_max = Some(entry.max);
    }

    match previous_max {
        Some(found) if found != BOUNDARY_END => Err(RatingConfigError::BoundaryEnd {
            expected: BOUNDARY_END,
            found,
        }),
        _ => Ok(()),
    }
}
