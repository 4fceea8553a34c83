//! Linear scaling of raw scores onto the category and overall scales.

use crate::assessment::config::ScoringConfig;

/// Scale `raw` out of `max_raw` onto `0..=target`.
///
/// A zero (or non-positive) `max_raw` and non-finite input both yield 0.
pub fn scale(raw: f64, max_raw: f64, target: f64) -> f64 {
    if !(max_raw > 0.0) || !raw.is_finite() || !max_raw.is_finite() {
        return 0.0;
    }
    (raw / max_raw * target).clamp(0.0, target)
}

/// Maps raw values onto the configured canonical scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreNormalizer {
    category_scale: f64,
    overall_scale: f64,
}

impl ScoreNormalizer {
    pub fn new(category_scale: f64, overall_scale: f64) -> Self {
        Self {
            category_scale,
            overall_scale,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.category_scale, config.overall_scale)
    }

    pub fn category_scale(&self) -> f64 {
        self.category_scale
    }

    pub fn overall_scale(&self) -> f64 {
        self.overall_scale
    }

    pub fn normalize_to_category_scale(&self, raw: f64, max_raw: f64) -> f64 {
        scale(raw, max_raw, self.category_scale)
    }

    pub fn normalize_to_overall_scale(&self, raw: f64, max_raw: f64) -> f64 {
        scale(raw, max_raw, self.overall_scale)
    }
}

impl Default for ScoreNormalizer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}
