//! End-to-end tests of the readiness engine through its public API.

use serde_json::json;

use agent_readiness::assessment::{
    AssessmentEngine, Category, IssueKind, MetricSource, ScoringConfig,
};
use agent_readiness::models::{AiAnalysis, Subject, SubjectKind};

fn subject(value: serde_json::Value) -> Subject {
    Subject::from_value(value).expect("valid subject")
}

fn ai(value: serde_json::Value) -> AiAnalysis {
    AiAnalysis::from_value(&value)
}

#[test]
fn empty_analysis_without_ai_is_complete() {
    let engine = AssessmentEngine::with_defaults();
    let result = engine.assess(&subject(json!({})), None).unwrap();

    assert_eq!(result.categories.len(), 6);
    assert!((0.0..=100.0).contains(&result.overall_score.value));
    // only the assumed file-size points: 15 * 0.15 / 20 * 100
    assert_eq!(result.overall_score.value, 11.0);
    assert_eq!(result.metadata.subject_kind, SubjectKind::Repository);
    assert!(result
        .categories
        .values()
        .all(|c| c.score.source == MetricSource::Static));
    assert!(!result.insights.findings.is_empty());
}

#[test]
fn large_file_scenario() {
    let repo = subject(json!({
        "url": "https://github.com/acme/assets",
        "hasReadme": true,
        "hasLicense": true,
        "fileCount": 10,
        "fileSizeAnalysis": {
            "largeFiles": [{"path": "data/model.bin", "size": 3145728}],
            "criticalFiles": [],
            "agentCompatibility": {"overallCompatibility": 75}
        }
    }));
    let ai = ai(json!({"categories": {"fileSizeOptimization": 16}}));

    let result = AssessmentEngine::with_defaults()
        .assess(&repo, Some(&ai))
        .unwrap();
    let file_size = result.category(Category::FileSizeOptimization).unwrap();

    assert!(file_size
        .findings
        .contains(&"1 files exceed 2MB, limiting AI agent compatibility".to_string()));
    assert!(file_size
        .recommendations
        .iter()
        .any(|r| r.contains("splitting large files or using repository-level processing tools")));
    assert!(file_size.score.value < 20.0);
    assert_eq!(file_size.score.value, 16.0);
    assert_eq!(file_size.score.static_value, Some(15.0));
}

#[test]
fn disagreement_fails_validation() {
    let repo = subject(json!({"url": "r", "hasReadme": true}));
    // both categories score 0 statically
    let ai = ai(json!({"categories": {"workflowAutomation": 20, "riskCompliance": 20}}));

    let result = AssessmentEngine::with_defaults()
        .assess(&repo, Some(&ai))
        .unwrap();

    assert!(!result.validation.is_valid);
    assert!(!result.assessment_status.validation_passed);
    let variance_issues: Vec<_> = result
        .validation
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::Variance)
        .collect();
    assert_eq!(variance_issues.len(), 2);
    assert!(variance_issues.iter().all(|i| i.variance.unwrap() > 10.0));
    assert_eq!(result.alignment.critical_variances.len(), 2);
}

#[test]
fn values_stay_on_scale_for_hostile_ai_input() {
    let repo = subject(json!({"url": "r", "hasReadme": true, "hasAgents": true}));
    let ai = ai(json!({
        "categories": {
            "documentation": 1000,
            "instructionClarity": -40,
            "workflowAutomation": "not a number",
            "riskCompliance": null,
            "integrationStructure": {"score": "17", "confidence": 250},
            "unknownCategory": 5
        }
    }));

    let result = AssessmentEngine::with_defaults()
        .assess(&repo, Some(&ai))
        .unwrap();

    for (category, score) in &result.categories {
        assert!(
            (0.0..=20.0).contains(&score.score.value),
            "{} = {}",
            category,
            score.score.value
        );
        assert!((0.0..=100.0).contains(&score.score.confidence));
    }
    assert!((0.0..=100.0).contains(&result.overall_score.value));
    assert_eq!(
        result.category(Category::RiskCompliance).unwrap().score.source,
        MetricSource::Static
    );
    assert_eq!(
        result.category(Category::WorkflowAutomation).unwrap().score.source,
        MetricSource::Hybrid
    );
}

#[test]
fn assessment_is_deterministic() {
    let repo = subject(json!({"url": "r", "hasReadme": true, "hasWorkflows": true}));
    let ai = ai(json!({"categories": {"documentation": 9, "workflowAutomation": 3}}));
    let engine = AssessmentEngine::with_defaults();

    let a = engine.assess(&repo, Some(&ai)).unwrap();
    let b = engine.assess(&repo, Some(&ai)).unwrap();

    assert_eq!(a.overall_score, b.overall_score);
    assert_eq!(a.categories, b.categories);
    assert_eq!(a.validation, b.validation);
    assert_eq!(a.alignment, b.alignment);
    assert_eq!(a.insights, b.insights);
}

#[test]
fn website_is_classified_and_scored() {
    let site = subject(json!({
        "websiteUrl": "https://shop.example",
        "pageTitle": "Shop",
        "hasStructuredData": true,
        "hasOpenGraph": true,
        "isMobileFriendly": true,
        "loadTimeMs": 800,
        "accessibilityScore": 72,
        "headings": {"h1": 1}
    }));
    assert_eq!(site.kind(), SubjectKind::Website);

    let result = AssessmentEngine::with_defaults().assess(&site, None).unwrap();
    assert_eq!(result.metadata.subject, "https://shop.example");
    // structured data 6 + open graph 5
    assert_eq!(
        result.category(Category::Documentation).unwrap().score.value,
        11.0
    );
    // mobile 6 + fast 6
    assert_eq!(
        result.category(Category::WorkflowAutomation).unwrap().score.value,
        12.0
    );
    assert!(!result
        .insights
        .findings
        .iter()
        .any(|f| f.contains("Open Graph")));
}

#[test]
fn custom_configuration_changes_the_blend() {
    let config = ScoringConfig::default().with_source_weights(1.0, 0.0);
    let engine = AssessmentEngine::new(config).unwrap();
    let repo = subject(json!({"url": "r", "hasReadme": true}));
    let ai = ai(json!({"categories": {"documentation": 20}}));

    let result = engine.assess(&repo, Some(&ai)).unwrap();
    let doc = result.category(Category::Documentation).unwrap();
    assert_eq!(doc.score.source, MetricSource::Hybrid);
    assert_eq!(doc.score.value, 6.0);
    assert_eq!(result.metadata.static_weight, 1.0);
}

#[test]
fn result_serializes_camel_case() {
    let result = AssessmentEngine::with_defaults()
        .assess(&subject(json!({"url": "r"})), None)
        .unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert!(value["overallScore"]["value"].is_number());
    assert!(value["categories"]["fileSizeOptimization"]["subMetrics"].is_object());
    assert!(value["assessmentStatus"]["lastValidation"].is_string());
    assert_eq!(value["metadata"]["subjectKind"], "repository");
}

#[test]
fn nulls_in_provider_output_still_produce_a_report() {
    let repo = subject(json!({
        "url": null,
        "hasReadme": true,
        "languages": null,
        "fileSizeAnalysis": {
            "largeFiles": null,
            "criticalFiles": [{"path": "core.dump", "size": 11534336, "agentImpact": {"cursor": 2}}],
            "agentCompatibility": {"overallCompatibility": 40}
        }
    }));
    let site = subject(json!({
        "websiteUrl": "https://example.com",
        "metaDescription": null,
        "headings": null
    }));

    let engine = AssessmentEngine::with_defaults();
    let repo_result = engine.assess(&repo, None).unwrap();
    let file_size = repo_result.category(Category::FileSizeOptimization).unwrap();
    assert_eq!(file_size.score.value, 8.0);
    assert!(file_size
        .findings
        .iter()
        .any(|f| f.starts_with("1 files exceed 10MB")));
    assert_eq!(repo_result.metadata.subject, "");

    let site_result = engine.assess(&site, None).unwrap();
    assert_eq!(site_result.metadata.subject_kind, SubjectKind::Website);
    assert_eq!(site_result.categories.len(), 6);
}

#[test]
fn ai_scores_follow_a_smaller_category_scale() {
    let mut config = ScoringConfig::default();
    config.category_scale = 10.0;
    let engine = AssessmentEngine::new(config).unwrap();
    let repo = subject(json!({"url": "r", "hasReadme": true}));
    let ai = ai(json!({"categories": {"instructionClarity": 10}}));

    let result = engine.assess(&repo, Some(&ai)).unwrap();
    let clarity = result.category(Category::InstructionClarity).unwrap();
    assert_eq!(clarity.score.ai_value, Some(5.0));
    assert_eq!(clarity.score.static_value, Some(4.0));
    assert_eq!(clarity.score.value, 5.0);
    assert!(result
        .categories
        .values()
        .all(|c| (0.0..=10.0).contains(&c.score.value)));
}
