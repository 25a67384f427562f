use std::io::Read;

use serde::Deserialize;
use tracing::debug;

use super::{AnswerScale, ScoreSheet};
use crate::rating::{Category, CriteriaScores, RatingEngine};

#[derive(Debug)]
pub enum SurveyImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    OutOfRange {
        row: usize,
        criterion: String,
        value: f64,
        max: f64,
    },
    NoScores,
}

impl std::fmt::Display for SurveyImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyImportError::Io(err) => write!(f, "failed to read criteria export: {}", err),
            SurveyImportError::Csv(err) => write!(f, "invalid criteria CSV data: {}", err),
            SurveyImportError::OutOfRange {
                row,
                criterion,
                value,
                max,
            } => write!(
                f,
                "row {}: score {} for '{}' is outside [0, {}]",
                row, value, criterion, max
            ),
            SurveyImportError::NoScores => {
                write!(f, "criteria export contains no rows for a known category")
            }
        }
    }
}

impl std::error::Error for SurveyImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurveyImportError::Io(err) => Some(err),
            SurveyImportError::Csv(err) => Some(err),
            SurveyImportError::OutOfRange { .. } | SurveyImportError::NoScores => None,
        }
    }
}

impl From<std::io::Error> for SurveyImportError {
    fn from(err: std::io::Error) -> Self {
        SurveyImportError::Io(err)
    }
}

impl From<csv::Error> for SurveyImportError {
    fn from(err: csv::Error) -> Self {
        SurveyImportError::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct CriterionRow {
    category: String,
    criterion: String,
    score: f64,
}

/// Reads `category,criterion,score` rows into a score sheet.
///
/// Criterion groups keep the order in which their category first appears.
/// Rows naming an unknown category are skipped.
pub fn parse_criteria_csv<R: Read>(
    reader: R,
    engine: &RatingEngine,
    scale: AnswerScale,
) -> Result<ScoreSheet, SurveyImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut criteria = CriteriaScores::new();

    for (index, record) in csv_reader.deserialize::<CriterionRow>().enumerate() {
        let row = record?;
        let Ok(category) = row.category.parse::<Category>() else {
            debug!(category = %row.category, "skipping row for unknown category");
            continue;
        };
        if !scale.contains(row.score) {
            return Err(SurveyImportError::OutOfRange {
                // header is line 1
                row: index + 2,
                criterion: row.criterion,
                value: row.score,
                max: scale.max(),
            });
        }
        criteria.insert(category, row.criterion, scale.normalize(row.score));
    }

    if criteria.is_empty() {
        return Err(SurveyImportError::NoScores);
    }

    Ok(ScoreSheet::from_criteria(engine, criteria))
}
