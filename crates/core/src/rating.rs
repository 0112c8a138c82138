//! Rating rules: field limits, category-derived scores, and vehicle statistics.
//!
//! A rating carries an overall `score` in `[1, 5]`. When any per-category
//! sub-score is present, the overall score is the mean of the present
//! sub-scores rounded to one decimal place, and any client-supplied score
//! is ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Lowest allowed score (overall or per category).
pub const MIN_SCORE: f64 = 1.0;

/// Highest allowed score (overall or per category).
pub const MAX_SCORE: f64 = 5.0;

/// Maximum length of a single pros/cons entry, in characters.
pub const MAX_LIST_ENTRY_LENGTH: usize = 100;

/* --------------------------------------------------------------------------
Categories
-------------------------------------------------------------------------- */

/// Optional per-category sub-scores of a rating.
///
/// Stored as JSONB; absent categories are omitted from the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RatingCategories {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1.0, max = 5.0))]
    pub vehicle_condition: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1.0, max = 5.0))]
    pub driver_service: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1.0, max = 5.0))]
    pub booking_process: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1.0, max = 5.0))]
    pub value_for_money: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1.0, max = 5.0))]
    pub overall_experience: Option<f64>,
}

impl RatingCategories {
    /// Values of the categories that are present, in declaration order.
    pub fn present_values(&self) -> Vec<f64> {
        [
            self.vehicle_condition,
            self.driver_service,
            self.booking_process,
            self.value_for_money,
            self.overall_experience,
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Mean of the present sub-scores rounded to one decimal, or `None`
    /// when no category has a value.
    pub fn derived_score(&self) -> Option<f64> {
        let values = self.present_values();
        if values.is_empty() {
            return None;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(round_one_decimal(mean))
    }
}

/// Round to one decimal place, halves away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/* --------------------------------------------------------------------------
Score resolution
-------------------------------------------------------------------------- */

/// Resolve the score to persist for a new rating.
///
/// Categories win over the supplied score. Without any category value the
/// supplied score is required.
pub fn resolve_create_score(
    categories: Option<&RatingCategories>,
    supplied: Option<f64>,
) -> Result<f64, CoreError> {
    if let Some(derived) = categories.and_then(RatingCategories::derived_score) {
        return Ok(derived);
    }
    let score = supplied.ok_or_else(|| {
        CoreError::Validation(
            "A score is required when no category ratings are provided".to_string(),
        )
    })?;
    validate_score(score)?;
    Ok(score)
}

/// Resolve the score after an update.
///
/// `categories` is the mapping the rating will hold once the update is
/// applied. A derived score overrides both the supplied and the current one.
pub fn resolve_update_score(
    categories: Option<&RatingCategories>,
    supplied: Option<f64>,
    current: f64,
) -> Result<f64, CoreError> {
    if let Some(derived) = categories.and_then(RatingCategories::derived_score) {
        return Ok(derived);
    }
    match supplied {
        Some(score) => {
            validate_score(score)?;
            Ok(score)
        }
        None => Ok(current),
    }
}

/// Validate that a score lies within `[MIN_SCORE, MAX_SCORE]`.
pub fn validate_score(score: f64) -> Result<(), CoreError> {
    if score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Score {score} is out of range. Must be between {MIN_SCORE} and {MAX_SCORE}"
        )))
    }
}

/// `validator` hook: every pros/cons entry must fit in [`MAX_LIST_ENTRY_LENGTH`].
pub fn validate_list_entries(entries: &[String]) -> Result<(), ValidationError> {
    if entries
        .iter()
        .all(|e| e.chars().count() <= MAX_LIST_ENTRY_LENGTH)
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("entry_too_long");
        err.message = Some(
            format!("Each entry must be at most {MAX_LIST_ENTRY_LENGTH} characters").into(),
        );
        Err(err)
    }
}

/// Flatten `validator` errors into a single [`CoreError::Validation`].
pub fn validation_error(errors: validator::ValidationErrors) -> CoreError {
    CoreError::Validation(errors.to_string())
}

/* --------------------------------------------------------------------------
Vehicle statistics
-------------------------------------------------------------------------- */

/// Per-star histogram of scores.
///
/// A score lands in a bucket only when it equals the star value exactly, so
/// fractional scores derived from categories are not counted anywhere. The
/// counting itself happens in the database; this type carries the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "BTreeMap<String, i64>")]
pub struct StarDistribution {
    counts: [i64; 5],
}

impl StarDistribution {
    /// Build from per-star counts, index 0 holding the 1-star count.
    pub fn from_counts(counts: [i64; 5]) -> Self {
        Self { counts }
    }

    /// Number of ratings whose score is exactly `star`.
    pub fn count(&self, star: u8) -> i64 {
        match star {
            1..=5 => self.counts[usize::from(star - 1)],
            _ => 0,
        }
    }

    /// Ratings that landed in some bucket.
    pub fn bucketed(&self) -> i64 {
        self.counts.iter().sum()
    }
}

impl From<StarDistribution> for BTreeMap<String, i64> {
    fn from(dist: StarDistribution) -> Self {
        (1..=5u8)
            .map(|star| (star.to_string(), dist.count(star)))
            .collect()
    }
}

/// Aggregate statistics over the public ratings of one vehicle.
///
/// `average_score` is the raw mean (not rounded), 0 when there are none.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStatistics {
    pub average_score: f64,
    pub total_ratings: i64,
    pub distribution: StarDistribution,
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
