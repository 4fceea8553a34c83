//! Report formatting for assessment output.

use serde::Serialize;

use crate::assessment::types::{AssessmentResult, CategoryScore, ValidationSummary};
use crate::assessment::validation::AlignmentReport;

/// Output format for assessment reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON of the full result.
    #[default]
    Json,
    /// Human-readable report with findings.
    Pretty,
    /// One summary line plus one line per category.
    Compact,
}

pub fn format_assessment(result: &AssessmentResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_json(result),
        OutputFormat::Pretty => format_pretty(result),
        OutputFormat::Compact => format_compact(result),
    }
}

/// Validation outcome and alignment report as one JSON document.
pub fn format_validation(validation: &ValidationSummary, alignment: &AlignmentReport) -> String {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct ValidationReport<'a> {
        validation: &'a ValidationSummary,
        alignment: &'a AlignmentReport,
    }

    format_json(&ValidationReport {
        validation,
        alignment,
    })
}

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("Error: {}", e))
}

fn status_label(result: &AssessmentResult) -> &'static str {
    match (
        result.assessment_status.hybrid_mode,
        result.validation.is_valid,
    ) {
        (true, true) => "hybrid, validated",
        (true, false) => "hybrid, NOT validated",
        (false, _) => "static only",
    }
}

fn category_line(name: &str, score: &CategoryScore, scale: f64) -> String {
    let mut line = format!(
        "{:<24} {:>4.0}/{}  conf {:>3.0}%  {}",
        name,
        score.score.value,
        scale,
        score.score.confidence,
        source_label(score)
    );
    if let Some(variance) = score.score.variance.filter(|_| score.score.is_hybrid()) {
        line.push_str(&format!("  var {:.1}", variance));
    }
    line
}

fn source_label(score: &CategoryScore) -> String {
    match (score.score.static_value, score.score.ai_value) {
        (Some(s), Some(a)) => format!("(static {:.0} / ai {:.0})", s, a),
        _ => "(static)".to_string(),
    }
}

fn format_pretty(result: &AssessmentResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Agent readiness: {} ({})\n",
        result.metadata.subject, result.metadata.subject_kind
    ));
    output.push_str(&format!(
        "Overall Score: {:.0}/100 (confidence {:.0}%, {})\n\n",
        result.overall_score.value,
        result.overall_score.confidence,
        status_label(result)
    ));

    output.push_str("Categories:\n");
    for (category, score) in &result.categories {
        let line = category_line(category.name(), score, result.metadata.category_scale);
        output.push_str(&format!("  {}\n", line));
        for finding in &score.findings {
            output.push_str(&format!("      - {}\n", finding));
        }
    }
    output.push('\n');

    if !result.validation.issues.is_empty() {
        output.push_str(&format!(
            "Validation (alignment {:.0}/100):\n",
            result.validation.alignment_score
        ));
        for issue in &result.validation.issues {
            output.push_str(&format!("  {}\n", issue));
        }
        output.push('\n');
    }

    if !result.insights.findings.is_empty() {
        output.push_str("Findings:\n");
        for finding in &result.insights.findings {
            output.push_str(&format!("  - {}\n", finding));
        }
        output.push('\n');
    }

    let recommendations: Vec<&String> = result
        .insights
        .recommendations
        .iter()
        .chain(&result.validation.recommendations)
        .collect();
    if !recommendations.is_empty() {
        output.push_str("Recommendations:\n");
        for rec in recommendations {
            output.push_str(&format!("  - {}\n", rec));
        }
    }

    output
}

fn format_compact(result: &AssessmentResult) -> String {
    let mut output = format!(
        "{} {:.0}/100 conf {:.0}% [{}]\n",
        result.metadata.subject,
        result.overall_score.value,
        result.overall_score.confidence,
        status_label(result)
    );

    for (category, score) in &result.categories {
        output.push_str(&format!(
            "  {}: {:.0} {}\n",
            category,
            score.score.value,
            source_label(score)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AssessmentEngine, ScoringConfig};
    use crate::models::{AiAnalysis, Subject};
    use crate::assessment::criteria::Category;
    use crate::test_utils::full_repository;

    fn make_result() -> AssessmentResult {
        let mut repo = full_repository();
        repo.url = "https://github.com/acme/widgets".to_string();
        let ai = AiAnalysis::new().with_score(Category::Documentation, 14.0);
        AssessmentEngine::with_defaults()
            .assess(&Subject::Repository(repo), Some(&ai))
            .unwrap()
    }

    #[test]
    fn compact_format_is_brief() {
        let output = format_assessment(&make_result(), OutputFormat::Compact);
        assert_eq!(output.lines().count(), 7);
        assert!(output.starts_with("https://github.com/acme/widgets"));
        assert!(output.contains("documentation: 16 (static 20 / ai 14)"));
    }

    #[test]
    fn pretty_format_includes_score() {
        let output = format_assessment(&make_result(), OutputFormat::Pretty);
        assert!(output.contains("Overall Score:"));
        assert!(output.contains("Documentation"));
        assert!(output.contains("hybrid, validated"));
        assert!(output.contains("/20  conf"));
    }

    #[test]
    fn pretty_format_uses_configured_scale() {
        let mut config = ScoringConfig::default();
        config.category_scale = 10.0;
        let result = AssessmentEngine::new(config)
            .unwrap()
            .assess(&Subject::Repository(full_repository()), None)
            .unwrap();
        let output = format_assessment(&result, OutputFormat::Pretty);
        assert!(output.contains("  10/10  conf"));
        assert!(!output.contains("/20"));
    }

    #[test]
    fn json_format_is_valid() {
        let result = make_result();
        let output = format_assessment(&result, OutputFormat::Json);
        let parsed: AssessmentResult = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.overall_score, result.overall_score);
        assert_eq!(parsed.categories, result.categories);
        assert_eq!(parsed.metadata.subject, result.metadata.subject);
    }

    #[test]
    fn validation_report_has_both_sections() {
        let result = make_result();
        let output = format_validation(&result.validation, &result.alignment);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["validation"]["isValid"].is_boolean());
        assert!(value["alignment"]["overallAlignment"].is_number());
    }
}
