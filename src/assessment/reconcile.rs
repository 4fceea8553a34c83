//! Blending a static value and an optional AI value into one metric.

use crate::assessment::config::ScoringConfig;
use crate::assessment::types::{MetricSource, UnifiedMetric};
use crate::coerce::finite_or_zero;

/// Combines per-source values using the configured blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricReconciler {
    static_weight: f64,
    ai_weight: f64,
    max_variance: f64,
    scale: f64,
}

impl MetricReconciler {
    pub fn new(static_weight: f64, ai_weight: f64, max_variance: f64, scale: f64) -> Self {
        Self {
            static_weight,
            ai_weight,
            max_variance,
            scale,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(
            config.static_weight,
            config.ai_weight,
            config.max_score_variance,
            config.category_scale,
        )
    }

    /// Reconcile one static value with an optional AI value.
    ///
    /// An absent or NaN AI value yields a static metric. Any other AI value,
    /// including 0, yields a hybrid metric whose value and confidence are the
    /// rounded weighted blend of both sources. Values are clamped to
    /// `0..=scale`; variance is taken before clamping.
    pub fn create_unified_metric(
        &self,
        static_value: f64,
        ai_value: Option<f64>,
        static_confidence: f64,
        ai_confidence: f64,
    ) -> UnifiedMetric {
        let static_value = finite_or_zero(static_value);
        let static_confidence = finite_or_zero(static_confidence);

        match ai_value.filter(|v| !v.is_nan()) {
            None => UnifiedMetric {
                value: static_value.clamp(0.0, self.scale),
                confidence: static_confidence.clamp(0.0, 100.0),
                source: MetricSource::Static,
                static_value: Some(static_value),
                ai_value: None,
                variance: Some(0.0),
                is_validated: 0.0 <= self.max_variance,
            },
            Some(ai_value) => {
                let ai_value = finite_or_zero(ai_value);
                let ai_confidence = finite_or_zero(ai_confidence);
                let variance = (static_value - ai_value).abs();

                UnifiedMetric {
                    value: (static_value * self.static_weight + ai_value * self.ai_weight)
                        .round()
                        .clamp(0.0, self.scale),
                    confidence: (static_confidence * self.static_weight
                        + ai_confidence * self.ai_weight)
                        .round()
                        .clamp(0.0, 100.0),
                    source: MetricSource::Hybrid,
                    static_value: Some(static_value),
                    ai_value: Some(ai_value),
                    variance: Some(variance),
                    is_validated: variance <= self.max_variance,
                }
            }
        }
    }
}

impl Default for MetricReconciler {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}
