//! Per-category and overall aggregation.

use std::collections::BTreeMap;

use log::debug;

use crate::assessment::config::ScoringConfig;
use crate::assessment::criteria::{self, Category, MAX_RAW_POINTS};
use crate::assessment::normalize::ScoreNormalizer;
use crate::assessment::reconcile::MetricReconciler;
use crate::assessment::types::{CategoryScore, MetricSource, UnifiedMetric};
use crate::assessment::AssessmentError;
use crate::models::{AiAnalysis, Subject};

/// Both sources' view of one category, already on the category scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySources {
    pub static_score: f64,
    pub ai_score: Option<f64>,
    pub static_confidence: f64,
    /// Present exactly when `ai_score` is.
    pub ai_confidence: Option<f64>,
}

impl CategorySources {
    /// `|static - ai|`, or 0 when the AI did not score the category.
    pub fn variance(&self) -> f64 {
        self.ai_score
            .map(|ai| (self.static_score - ai).abs())
            .unwrap_or(0.0)
    }
}

/// Builds a [`CategoryScore`] per category from the raw source objects.
#[derive(Debug, Clone)]
pub struct CategoryAggregator {
    normalizer: ScoreNormalizer,
    reconciler: MetricReconciler,
    static_confidence: f64,
    ai_confidence: f64,
}

impl CategoryAggregator {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            normalizer: ScoreNormalizer::from_config(config),
            reconciler: MetricReconciler::from_config(config),
            static_confidence: config.static_confidence,
            ai_confidence: config.ai_confidence,
        }
    }

    /// Normalize both sources for one category.
    pub fn category_sources(
        &self,
        subject: &Subject,
        ai: Option<&AiAnalysis>,
        category: Category,
    ) -> CategorySources {
        let raw = criteria::raw_score(subject, category);
        let static_score = self
            .normalizer
            .normalize_to_category_scale(raw.total(), MAX_RAW_POINTS);

        let ai_score = ai
            .and_then(|a| a.score(category))
            .filter(|v| !v.is_nan())
            .map(|v| self.normalizer.normalize_to_category_scale(v, MAX_RAW_POINTS));
        let ai_confidence = ai_score.map(|_| {
            ai.and_then(|a| a.confidence_for(category))
                .unwrap_or(self.ai_confidence)
                .clamp(0.0, 100.0)
        });

        CategorySources {
            static_score,
            ai_score,
            static_confidence: self.static_confidence,
            ai_confidence,
        }
    }

    /// Reconciled score, indicator breakdown, findings and recommendations.
    pub fn score_category(
        &self,
        subject: &Subject,
        ai: Option<&AiAnalysis>,
        category: Category,
    ) -> CategoryScore {
        let sources = self.category_sources(subject, ai, category);
        let score = self.reconciler.create_unified_metric(
            sources.static_score,
            sources.ai_score,
            sources.static_confidence,
            sources.ai_confidence.unwrap_or(self.ai_confidence),
        );

        debug!(
            "{}: static={:.1} ai={:?} -> {:.1} ({:?})",
            category, sources.static_score, sources.ai_score, score.value, score.source
        );

        let sub_metrics = criteria::raw_score(subject, category)
            .indicators
            .into_iter()
            .map(|indicator| {
                let value = self
                    .normalizer
                    .normalize_to_category_scale(indicator.earned, MAX_RAW_POINTS);
                (
                    indicator.name.to_string(),
                    self.reconciler
                        .create_unified_metric(value, None, self.static_confidence, 0.0),
                )
            })
            .collect();

        let notes = criteria::category_notes(subject, category);

        CategoryScore {
            score,
            sub_metrics,
            findings: notes.findings,
            recommendations: notes.recommendations,
        }
    }

    /// Score every tracked category.
    pub fn score_all(
        &self,
        subject: &Subject,
        ai: Option<&AiAnalysis>,
    ) -> BTreeMap<Category, CategoryScore> {
        Category::all()
            .iter()
            .map(|c| (*c, self.score_category(subject, ai, *c)))
            .collect()
    }

    /// Normalized sources for every tracked category.
    pub fn sources_all(
        &self,
        subject: &Subject,
        ai: Option<&AiAnalysis>,
    ) -> BTreeMap<Category, CategorySources> {
        Category::all()
            .iter()
            .map(|c| (*c, self.category_sources(subject, ai, *c)))
            .collect()
    }
}

/// Combines category scores into the overall metric using the weight table.
#[derive(Debug, Clone)]
pub struct OverallAggregator {
    normalizer: ScoreNormalizer,
    weights: BTreeMap<Category, f64>,
}

impl OverallAggregator {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            normalizer: ScoreNormalizer::from_config(config),
            weights: config.category_weights.clone(),
        }
    }

    /// Weighted sum on the category scale, rescaled to the overall scale.
    ///
    /// Fails when a weighted category has no score.
    pub fn calculate_overall_score(
        &self,
        category_scores: &BTreeMap<Category, CategoryScore>,
    ) -> Result<UnifiedMetric, AssessmentError> {
        let mut weighted = 0.0;
        let mut confidence_sum = 0.0;

        for (category, weight) in &self.weights {
            let score = category_scores
                .get(category)
                .ok_or(AssessmentError::MissingCategory(*category))?;
            weighted += weight * score.score.value;
            confidence_sum += score.score.confidence;
        }

        let confidence = if self.weights.is_empty() {
            0.0
        } else {
            (confidence_sum / self.weights.len() as f64).round()
        };

        let value = self
            .normalizer
            .normalize_to_overall_scale(weighted, self.normalizer.category_scale())
            .round();

        Ok(UnifiedMetric {
            value,
            confidence: confidence.clamp(0.0, 100.0),
            source: MetricSource::Hybrid,
            static_value: None,
            ai_value: None,
            variance: None,
            is_validated: true,
        })
    }
}
