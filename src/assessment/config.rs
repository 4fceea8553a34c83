//! Scoring configuration.
//!
//! A process-wide default that can be overridden per engine at construction:
//! - JSON file: `ScoringConfig::load(path)` (missing fields take defaults)
//! - Builder methods: `with_source_weights`, `with_category_weight`, `with_thresholds`
//!
//! The engine validates the configuration once and never mutates it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assessment::criteria::Category;
use crate::assessment::AssessmentError;

/// Tolerance when checking that weights sum to 1.0.
const WEIGHT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    /// Upper bound of every per-category value.
    pub category_scale: f64,
    /// Upper bound of the overall value.
    pub overall_scale: f64,
    /// Weight of the static source in hybrid metrics.
    pub static_weight: f64,
    /// Weight of the AI source in hybrid metrics.
    pub ai_weight: f64,
    /// Contribution of each category to the overall score; sums to 1.0.
    pub category_weights: BTreeMap<Category, f64>,
    /// Confidence (0-100) below which a source is flagged.
    pub min_confidence_threshold: f64,
    /// Largest tolerated static/AI disagreement, in category points.
    pub max_score_variance: f64,
    /// Confidence assigned to static heuristics.
    pub static_confidence: f64,
    /// Confidence assumed for AI scores that carry none.
    pub ai_confidence: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            category_scale: 20.0,
            overall_scale: 100.0,
            static_weight: 0.3,
            ai_weight: 0.7,
            category_weights: default_category_weights(),
            min_confidence_threshold: 60.0,
            max_score_variance: 15.0,
            static_confidence: 80.0,
            ai_confidence: 70.0,
        }
    }
}

fn default_category_weights() -> BTreeMap<Category, f64> {
    BTreeMap::from([
        (Category::Documentation, 0.20),
        (Category::InstructionClarity, 0.20),
        (Category::WorkflowAutomation, 0.15),
        (Category::RiskCompliance, 0.15),
        (Category::IntegrationStructure, 0.15),
        (Category::FileSizeOptimization, 0.15),
    ])
}

impl ScoringConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file. Fields not present keep their defaults.
    pub fn load(path: &Path) -> Result<Self, AssessmentError> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| {
            AssessmentError::InvalidConfig(format!("{}: {}", path.display(), e))
        })
    }

    /// Set the static/AI blend.
    pub fn with_source_weights(mut self, static_weight: f64, ai_weight: f64) -> Self {
        self.static_weight = static_weight;
        self.ai_weight = ai_weight;
        self
    }

    /// Set one category's contribution to the overall score.
    pub fn with_category_weight(mut self, category: Category, weight: f64) -> Self {
        self.category_weights.insert(category, weight);
        self
    }

    /// Set the confidence floor and variance ceiling.
    pub fn with_thresholds(mut self, min_confidence: f64, max_variance: f64) -> Self {
        self.min_confidence_threshold = min_confidence;
        self.max_score_variance = max_variance;
        self
    }

    /// Merge with CLI overrides. CLI values take precedence.
    pub fn with_overrides(mut self, static_weight: Option<f64>, ai_weight: Option<f64>) -> Self {
        match (static_weight, ai_weight) {
            (Some(s), Some(a)) => self = self.with_source_weights(s, a),
            (Some(s), None) => self = self.with_source_weights(s, 1.0 - s),
            (None, Some(a)) => self = self.with_source_weights(1.0 - a, a),
            (None, None) => {}
        }
        self
    }

    /// Weight of a category, 0 when it has none.
    pub fn category_weight(&self, category: Category) -> f64 {
        self.category_weights.get(&category).copied().unwrap_or(0.0)
    }

    /// Check the structural invariants the engine relies on.
    pub fn validate(&self) -> Result<(), AssessmentError> {
        if !(self.category_scale > 0.0) || !(self.overall_scale > 0.0) {
            return Err(AssessmentError::InvalidConfig(
                "scales must be positive".to_string(),
            ));
        }

        let weights = [self.static_weight, self.ai_weight];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(AssessmentError::InvalidConfig(
                "source weights must be non-negative".to_string(),
            ));
        }
        let source_sum = self.static_weight + self.ai_weight;
        if (source_sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(AssessmentError::InvalidConfig(format!(
                "static and AI weights must sum to 1.0 (got {:.3})",
                source_sum
            )));
        }

        for category in Category::all() {
            match self.category_weights.get(category) {
                None => {
                    return Err(AssessmentError::InvalidConfig(format!(
                        "missing weight for category '{}'",
                        category
                    )))
                }
                Some(w) if !w.is_finite() || *w < 0.0 => {
                    return Err(AssessmentError::InvalidConfig(format!(
                        "invalid weight {} for category '{}'",
                        w, category
                    )))
                }
                Some(_) => {}
            }
        }
        let category_sum: f64 = self.category_weights.values().sum();
        if (category_sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(AssessmentError::InvalidConfig(format!(
                "category weights must sum to 1.0 (got {:.3})",
                category_sum
            )));
        }

        for (name, value) in [
            ("minConfidenceThreshold", self.min_confidence_threshold),
            ("staticConfidence", self.static_confidence),
            ("aiConfidence", self.ai_confidence),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(AssessmentError::InvalidConfig(format!(
                    "{} must be within 0-100 (got {})",
                    name, value
                )));
            }
        }
        if !(self.max_score_variance >= 0.0) {
            return Err(AssessmentError::InvalidConfig(
                "maxScoreVariance must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}
