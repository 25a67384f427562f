//! Hotel star classification: weighted category scores, boundary tables,
//! an override ladder, and a plain-language explanation of every result.

pub mod assessments;
pub mod config;
pub mod error;
pub mod rating;
pub mod survey;
pub mod telemetry;
