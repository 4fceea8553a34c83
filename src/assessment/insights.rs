//! Assessment-wide findings and recommendations.

use std::collections::BTreeMap;

use crate::assessment::aggregate::CategorySources;
use crate::assessment::config::ScoringConfig;
use crate::assessment::criteria::website::MIN_ACCESSIBILITY;
use crate::assessment::criteria::Category;
use crate::assessment::types::{CategoryScore, Insights};
use crate::models::{AiAnalysis, RepositoryAnalysis, Subject, WebsiteAnalysis};

/// Share of the category scale below which a category needs improvement
/// (10 of 20).
pub const NEEDS_IMPROVEMENT_BELOW: f64 = 0.5;
/// Share of the category scale from which a category is excellent (16 of 20).
pub const EXCELLENT_FROM: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightGenerator {
    min_confidence: f64,
    category_scale: f64,
}

impl InsightGenerator {
    pub fn new(min_confidence: f64, category_scale: f64) -> Self {
        Self {
            min_confidence,
            category_scale,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.min_confidence_threshold, config.category_scale)
    }

    pub fn generate(
        &self,
        subject: &Subject,
        categories: &BTreeMap<Category, CategoryScore>,
        sources: &BTreeMap<Category, CategorySources>,
        ai: Option<&AiAnalysis>,
    ) -> Insights {
        let mut insights = Insights::default();

        let scale = self.category_scale;
        for (category, score) in categories {
            let value = score.score.value;
            if value < NEEDS_IMPROVEMENT_BELOW * scale {
                insights.findings.push(format!(
                    "{} needs improvement ({:.0}/{})",
                    category.name(),
                    value,
                    scale
                ));
                insights
                    .recommendations
                    .push(format!("Focus on improving {}", category.name()));
            } else if value >= EXCELLENT_FROM * scale {
                insights.findings.push(format!(
                    "{} is excellent ({:.0}/{})",
                    category.name(),
                    value,
                    scale
                ));
            }
        }

        match subject {
            Subject::Repository(repo) => repository_findings(repo, &mut insights),
            Subject::Website(site) => website_findings(site, &mut insights),
        }

        let unsure: Vec<&str> = sources
            .iter()
            .filter(|(_, s)| s.ai_confidence.is_some_and(|c| c < self.min_confidence))
            .map(|(c, _)| c.name())
            .collect();
        if !unsure.is_empty() {
            insights.findings.push(format!(
                "AI analysis has low confidence in: {}",
                unsure.join(", ")
            ));
            insights.recommendations.push(
                "Provide more context (documentation, examples) so the AI analysis can assess with higher confidence"
                    .to_string(),
            );
        }

        if let Some(ai) = ai {
            insights.findings.extend(ai.findings.iter().cloned());
            insights
                .recommendations
                .extend(ai.recommendations.iter().cloned());
        }

        dedup(&mut insights.findings);
        dedup(&mut insights.recommendations);
        insights
    }
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

fn repository_findings(repo: &RepositoryAnalysis, insights: &mut Insights) {
    if !repo.has_readme {
        insights
            .findings
            .push("Repository has no README.md".to_string());
    }
    if !repo.has_agents {
        insights
            .findings
            .push("Repository has no AGENTS.md with instructions for AI agents".to_string());
    }
}

fn website_findings(site: &WebsiteAnalysis, insights: &mut Insights) {
    if !site.has_structured_data {
        insights
            .findings
            .push("Website has no structured data (JSON-LD / schema.org)".to_string());
    }
    if !site.has_open_graph {
        insights
            .findings
            .push("Website has no Open Graph metadata".to_string());
    }
    if !site.is_mobile_friendly {
        insights
            .findings
            .push("Website is not mobile friendly".to_string());
    }
    if site.accessibility_score < MIN_ACCESSIBILITY {
        insights.findings.push(format!(
            "Website accessibility score is low ({:.0}/100)",
            site.accessibility_score
        ));
    }
}

fn dedup(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
