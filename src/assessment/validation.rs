//! Cross-source consistency validation and alignment reporting.
//!
//! Both consume the same normalized per-category sources the reconciler
//! sees. Problems are returned as data, never as errors.
//!
//! Two alignment formulas coexist: the validator's overall score
//! (`100 - 2 * mean variance`) and the report's per-category score
//! (`100 - 5 * variance`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assessment::aggregate::CategorySources;
use crate::assessment::config::ScoringConfig;
use crate::assessment::criteria::Category;
use crate::assessment::types::ValidationSummary;

/// Alignment below this triggers generic remediation advice.
const LOW_ALIGNMENT: f64 = 70.0;
/// More issues than this triggers a system-wide review.
const MAX_ISSUES_BEFORE_REVIEW: usize = 5;
/// High-severity issues tolerated in a valid result.
const MAX_HIGH_ISSUES: usize = 2;

/// What kind of inconsistency was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Static and AI scores disagree beyond the tolerated variance.
    Variance,
    /// A source reported low confidence.
    Confidence,
    /// Neither source could measure the category.
    MissingData,
    /// One source saw nothing while the other saw substantial readiness.
    Inconsistency,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variance => write!(f, "variance"),
            Self::Confidence => write!(f, "confidence"),
            Self::MissingData => write!(f, "missing_data"),
            Self::Inconsistency => write!(f, "inconsistency"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// A single consistency problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub category: Category,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
}

impl ValidationIssue {
    fn new(kind: IssueKind, category: Category, severity: Severity, message: String) -> Self {
        Self {
            kind,
            category,
            severity,
            message,
            static_value: None,
            ai_value: None,
            expected_value: None,
            variance: None,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.category, self.kind, self.message
        )
    }
}

/// Bucketed confidence across both sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl ConfidenceLevel {
    /// low (<60), medium (<80), high otherwise.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence < 60.0 {
            Self::Low
        } else if confidence < 80.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAlignment {
    pub static_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_score: Option<f64>,
    pub variance: f64,
    /// `max(0, 100 - 5 * variance)`.
    pub alignment_score: f64,
}

/// A category whose sources disagree beyond the tolerated variance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalVariance {
    pub category: Category,
    pub static_score: f64,
    pub ai_score: f64,
    pub variance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentReport {
    /// Mean of the per-category alignment scores.
    pub overall_alignment: f64,
    pub categories: BTreeMap<Category, CategoryAlignment>,
    pub critical_variances: Vec<CriticalVariance>,
    /// Mean of every supplied static and AI confidence.
    pub average_confidence: f64,
    pub confidence_level: ConfidenceLevel,
    pub summary: String,
}

/// Stateless checker for static/AI agreement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsistencyValidator {
    max_variance: f64,
    min_confidence: f64,
    category_scale: f64,
}

impl ConsistencyValidator {
    pub fn new(max_variance: f64, min_confidence: f64, category_scale: f64) -> Self {
        Self {
            max_variance,
            min_confidence,
            category_scale,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(
            config.max_score_variance,
            config.min_confidence_threshold,
            config.category_scale,
        )
    }

    /// Severity of a variance relative to the configured maximum.
    pub fn severity_for(&self, variance: f64) -> Severity {
        let threshold = self.max_variance;
        if variance <= threshold * 0.5 {
            Severity::Low
        } else if variance <= threshold {
            Severity::Medium
        } else if variance <= threshold * 1.5 {
            Severity::High
        } else {
            Severity::Critical
        }
    }

    /// Issues found in one category, with their recommendations.
    fn check_category(
        &self,
        category: Category,
        sources: &CategorySources,
        issues: &mut Vec<ValidationIssue>,
        recommendations: &mut Vec<String>,
    ) {
        let static_score = sources.static_score;
        let ai_score = sources.ai_score.unwrap_or(0.0);
        let variance = sources.variance();

        if sources.ai_score.is_some() && variance >= self.max_variance {
            let mut issue = ValidationIssue::new(
                IssueKind::Variance,
                category,
                self.severity_for(variance),
                format!(
                    "{} scores disagree by {:.1} points (static {:.1}, AI {:.1})",
                    category.name(),
                    variance,
                    static_score,
                    ai_score
                ),
            );
            issue.static_value = Some(static_score);
            issue.ai_value = Some(ai_score);
            issue.expected_value = Some(static_score);
            issue.variance = Some(variance);
            issues.push(issue);
            recommendations.push(format!(
                "Review {} scoring: static and AI analyses differ by {:.1} points",
                category.name(),
                variance
            ));
        }

        if static_score == 0.0 && ai_score == 0.0 {
            let mut issue = ValidationIssue::new(
                IssueKind::MissingData,
                category,
                Severity::Medium,
                format!("{} could not be measured by either source", category.name()),
            );
            issue.static_value = Some(static_score);
            issue.ai_value = sources.ai_score;
            issues.push(issue);
        }

        if let Some(ai) = sources.ai_score {
            let half_scale = self.category_scale / 2.0;
            let one_sided = (static_score == 0.0 && ai >= half_scale)
                || (ai == 0.0 && static_score >= half_scale);
            if one_sided {
                let mut issue = ValidationIssue::new(
                    IssueKind::Inconsistency,
                    category,
                    Severity::Low,
                    format!(
                        "{}: one source found no signal while the other scored {:.1}",
                        category.name(),
                        static_score.max(ai)
                    ),
                );
                issue.static_value = Some(static_score);
                issue.ai_value = Some(ai);
                issue.variance = Some(variance);
                issues.push(issue);
            }
        }

        if sources.static_confidence < self.min_confidence {
            let mut issue = ValidationIssue::new(
                IssueKind::Confidence,
                category,
                Severity::Medium,
                format!(
                    "Static analysis confidence for {} is low ({:.0}%)",
                    category.name(),
                    sources.static_confidence
                ),
            );
            issue.expected_value = Some(self.min_confidence);
            issues.push(issue);
        }

        if let Some(ai_confidence) = sources.ai_confidence {
            if ai_confidence < self.min_confidence {
                let mut issue = ValidationIssue::new(
                    IssueKind::Confidence,
                    category,
                    Severity::Medium,
                    format!(
                        "AI analysis confidence for {} is low ({:.0}%)",
                        category.name(),
                        ai_confidence
                    ),
                );
                issue.expected_value = Some(self.min_confidence);
                issues.push(issue);
                recommendations.push(format!(
                    "Provide more context to the AI analysis to improve confidence in {}",
                    category.name()
                ));
            }
        }
    }

    /// Validate all categories.
    pub fn validate(&self, sources: &BTreeMap<Category, CategorySources>) -> ValidationSummary {
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();
        let mut variances = BTreeMap::new();

        for (category, category_sources) in sources {
            variances.insert(*category, category_sources.variance());
            self.check_category(*category, category_sources, &mut issues, &mut recommendations);
        }

        let average_variance = if variances.is_empty() {
            0.0
        } else {
            variances.values().sum::<f64>() / variances.len() as f64
        };
        let alignment_score = (100.0 - 2.0 * average_variance).max(0.0);

        if alignment_score < LOW_ALIGNMENT {
            recommendations
                .push("Review scoring algorithms for consistency between static and AI analysis".to_string());
            recommendations
                .push("Adjust weighting factors between static and AI sources".to_string());
        }
        if issues.len() > MAX_ISSUES_BEFORE_REVIEW {
            recommendations.push(
                "Conduct a system-wide review of the assessment inputs; many consistency issues were found"
                    .to_string(),
            );
        }

        let critical = issues
            .iter()
            .filter(|i| i.severity == Severity::Critical)
            .count();
        let high = issues
            .iter()
            .filter(|i| i.severity == Severity::High)
            .count();
        // Only variance issues are graded High or Critical, so
        // `out_of_tolerance` decides validity whenever either count is non-zero.
        let out_of_tolerance = issues.iter().any(|i| i.kind == IssueKind::Variance);
        let is_valid = critical == 0 && high <= MAX_HIGH_ISSUES && !out_of_tolerance;

        dedup_preserving_order(&mut recommendations);

        ValidationSummary {
            is_valid,
            alignment_score,
            variances,
            issues,
            recommendations,
        }
    }

    /// Per-category alignment, critical variances and confidence level.
    pub fn generate_alignment_report(
        &self,
        sources: &BTreeMap<Category, CategorySources>,
    ) -> AlignmentReport {
        let mut categories = BTreeMap::new();
        let mut critical_variances = Vec::new();
        let mut confidences = Vec::new();

        for (category, s) in sources {
            let variance = s.variance();
            categories.insert(
                *category,
                CategoryAlignment {
                    static_score: s.static_score,
                    ai_score: s.ai_score,
                    variance,
                    alignment_score: (100.0 - 5.0 * variance).max(0.0),
                },
            );

            if let Some(ai) = s.ai_score {
                if variance > self.max_variance {
                    critical_variances.push(CriticalVariance {
                        category: *category,
                        static_score: s.static_score,
                        ai_score: ai,
                        variance,
                    });
                }
            }

            confidences.push(s.static_confidence);
            confidences.extend(s.ai_confidence);
        }

        let overall_alignment = mean(categories.values().map(|c| c.alignment_score));
        let average_confidence = mean(confidences.into_iter());
        let confidence_level = ConfidenceLevel::from_confidence(average_confidence);

        let summary = if critical_variances.is_empty() {
            format!(
                "Static and AI analyses are aligned ({:.0}/100, {} confidence)",
                overall_alignment, confidence_level
            )
        } else {
            let names: Vec<&str> = critical_variances.iter().map(|c| c.category.name()).collect();
            format!(
                "Static and AI analyses diverge in {} ({:.0}/100, {} confidence)",
                names.join(", "),
                overall_alignment,
                confidence_level
            )
        };

        AlignmentReport {
            overall_alignment,
            categories,
            critical_variances,
            average_confidence,
            confidence_level,
            summary,
        }
    }
}

impl Default for ConsistencyValidator {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn dedup_preserving_order(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
