//! Core types for readiness assessment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::assessment::criteria::Category;
use crate::assessment::validation::{AlignmentReport, ValidationIssue};
use crate::models::SubjectKind;

/// Where a metric's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricSource {
    Static,
    Ai,
    Hybrid,
}

/// A value reconciled from the static and AI sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedMetric {
    /// On the category scale (0-20) or overall scale (0-100).
    pub value: f64,
    /// 0-100.
    pub confidence: f64,
    pub source: MetricSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_value: Option<f64>,
    /// Absolute static/AI disagreement; 0 for static-only metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
    pub is_validated: bool,
}

impl UnifiedMetric {
    pub fn is_hybrid(&self) -> bool {
        self.source == MetricSource::Hybrid
    }
}

/// Reconciled score of one category with its explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub score: UnifiedMetric,
    /// Breakdown of the static raw score, one entry per indicator.
    pub sub_metrics: BTreeMap<String, UnifiedMetric>,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Cross-source consistency outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub is_valid: bool,
    /// 0-100, derived from the mean variance.
    pub alignment_score: f64,
    pub variances: BTreeMap<Category, f64>,
    pub issues: Vec<ValidationIssue>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentStatus {
    pub static_analysis_enabled: bool,
    pub ai_analysis_enabled: bool,
    /// At least one category blends both sources.
    pub hybrid_mode: bool,
    pub validation_passed: bool,
    /// Timestamp of the validation run (RFC 3339 format).
    pub last_validation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentMetadata {
    /// URL or identifier of the assessed subject.
    pub subject: String,
    pub subject_kind: SubjectKind,
    /// Timestamp of assessment (RFC 3339 format).
    pub assessed_at: String,
    pub engine_version: String,
    pub category_scale: f64,
    pub overall_scale: f64,
    pub static_weight: f64,
    pub ai_weight: f64,
}

/// Complete readiness assessment of one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub overall_score: UnifiedMetric,
    pub categories: BTreeMap<Category, CategoryScore>,
    pub validation: ValidationSummary,
    pub alignment: AlignmentReport,
    pub insights: Insights,
    pub assessment_status: AssessmentStatus,
    pub metadata: AssessmentMetadata,
}

impl AssessmentResult {
    pub fn category(&self, category: Category) -> Option<&CategoryScore> {
        self.categories.get(&category)
    }
}
