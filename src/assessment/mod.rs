//! Agent readiness assessment.
//!
//! Static heuristics and an optional AI assessment are scored per category,
//! reconciled into hybrid metrics, aggregated into an overall score and
//! cross-checked for consistency.

pub mod aggregate;
pub mod config;
pub mod criteria;
pub mod insights;
pub mod llm;
pub mod normalize;
pub mod reconcile;
pub mod report;
pub mod types;
pub mod validation;

pub use aggregate::{CategoryAggregator, CategorySources, OverallAggregator};
pub use config::ScoringConfig;
pub use criteria::Category;
pub use insights::InsightGenerator;
pub use normalize::ScoreNormalizer;
pub use reconcile::MetricReconciler;
pub use types::{
    AssessmentMetadata, AssessmentResult, AssessmentStatus, CategoryScore, Insights,
    MetricSource, UnifiedMetric, ValidationSummary,
};
pub use validation::{
    AlignmentReport, ConfidenceLevel, ConsistencyValidator, IssueKind, Severity,
    ValidationIssue,
};

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, info};

use crate::llm::LlmClient;
use crate::models::{AiAnalysis, Subject};

use llm::AiAssessor;

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("No score for weighted category '{0}'")]
    MissingCategory(Category),
    #[error("Invalid scoring configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main engine for assessing agent readiness.
///
/// Holds only its validated configuration and an optional model client, so
/// one engine can serve any number of assessments concurrently.
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    config: ScoringConfig,
    assessor: Option<AiAssessor>,
}

impl AssessmentEngine {
    /// Create an engine, rejecting inconsistent configurations.
    pub fn new(config: ScoringConfig) -> Result<Self, AssessmentError> {
        config.validate()?;
        Ok(Self {
            config,
            assessor: None,
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: ScoringConfig::default(),
            assessor: None,
        }
    }

    /// Attach a model client used by [`Self::assess_with_model`].
    pub fn with_client(mut self, client: Arc<dyn LlmClient>) -> Self {
        self.assessor = Some(AiAssessor::new(client));
        self
    }

    /// Replace the AI assessor, e.g. to change its retry budget.
    pub fn with_assessor(mut self, assessor: AiAssessor) -> Self {
        self.assessor = Some(assessor);
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Assess a subject from its static analysis and an optional AI analysis.
    pub fn assess(
        &self,
        subject: &Subject,
        ai: Option<&AiAnalysis>,
    ) -> Result<AssessmentResult, AssessmentError> {
        let aggregator = CategoryAggregator::new(&self.config);
        let sources = aggregator.sources_all(subject, ai);
        let categories = aggregator.score_all(subject, ai);

        let overall_score = OverallAggregator::new(&self.config).calculate_overall_score(&categories)?;

        let validator = ConsistencyValidator::from_config(&self.config);
        let validation = validator.validate(&sources);
        let alignment = validator.generate_alignment_report(&sources);
        let insights =
            InsightGenerator::from_config(&self.config).generate(subject, &categories, &sources, ai);

        for issue in &validation.issues {
            debug!("{}", issue);
        }

        let now = chrono::Utc::now().to_rfc3339();
        let assessment_status = AssessmentStatus {
            static_analysis_enabled: true,
            ai_analysis_enabled: ai.is_some(),
            hybrid_mode: categories.values().any(|c| c.score.is_hybrid()),
            validation_passed: validation.is_valid,
            last_validation: now.clone(),
        };

        info!(
            "Assessed {} {}: {:.0}/100 (confidence {:.0}%, {} issue(s))",
            subject.kind(),
            subject.identifier(),
            overall_score.value,
            overall_score.confidence,
            validation.issues.len()
        );

        Ok(AssessmentResult {
            overall_score,
            categories,
            validation,
            alignment,
            insights,
            assessment_status,
            metadata: AssessmentMetadata {
                subject: subject.identifier().to_string(),
                subject_kind: subject.kind(),
                assessed_at: now,
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                category_scale: self.config.category_scale,
                overall_scale: self.config.overall_scale,
                static_weight: self.config.static_weight,
                ai_weight: self.config.ai_weight,
            },
        })
    }

    /// Ask the attached model for an AI analysis, then assess.
    ///
    /// Without a client, or when the model fails, the result is static-only.
    pub fn assess_with_model(&self, subject: &Subject) -> Result<AssessmentResult, AssessmentError> {
        let ai = match &self.assessor {
            Some(assessor) => assessor.assess(subject),
            None => {
                debug!("No model client attached; assessing statically");
                None
            }
        };
        self.assess(subject, ai.as_ref())
    }

    /// Consistency check and alignment report without full scoring.
    pub fn validate_sources(
        &self,
        subject: &Subject,
        ai: &AiAnalysis,
    ) -> (ValidationSummary, AlignmentReport) {
        let sources: BTreeMap<Category, CategorySources> =
            CategoryAggregator::new(&self.config).sources_all(subject, Some(ai));
        let validator = ConsistencyValidator::from_config(&self.config);
        (
            validator.validate(&sources),
            validator.generate_alignment_report(&sources),
        )
    }
}

impl Default for AssessmentEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
