//! Readiness categories and the static scoring heuristics behind them.
//!
//! Each category's static raw score is a sum of fixed point values gated by
//! boolean or threshold predicates on the subject, out of
//! [`MAX_RAW_POINTS`]. The point tables live in the per-subject modules.

pub mod repository;
pub mod website;

use serde::{Deserialize, Serialize};

use crate::models::Subject;

/// Maximum raw points a category can earn from static indicators.
pub const MAX_RAW_POINTS: f64 = 20.0;

/// A readiness dimension scored independently before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Documentation,
    InstructionClarity,
    WorkflowAutomation,
    RiskCompliance,
    IntegrationStructure,
    FileSizeOptimization,
}

impl Category {
    /// All tracked categories, in report order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Documentation,
            Category::InstructionClarity,
            Category::WorkflowAutomation,
            Category::RiskCompliance,
            Category::IntegrationStructure,
            Category::FileSizeOptimization,
        ]
    }

    /// Returns the human-readable name of this category.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Documentation => "Documentation",
            Self::InstructionClarity => "Instruction Clarity",
            Self::WorkflowAutomation => "Workflow Automation",
            Self::RiskCompliance => "Risk & Compliance",
            Self::IntegrationStructure => "Integration Structure",
            Self::FileSizeOptimization => "File Size Optimization",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Documentation => write!(f, "documentation"),
            Self::InstructionClarity => write!(f, "instructionClarity"),
            Self::WorkflowAutomation => write!(f, "workflowAutomation"),
            Self::RiskCompliance => write!(f, "riskCompliance"),
            Self::IntegrationStructure => write!(f, "integrationStructure"),
            Self::FileSizeOptimization => write!(f, "fileSizeOptimization"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "documentation" | "docs" => Ok(Self::Documentation),
            "instructionclarity" | "instructions" => Ok(Self::InstructionClarity),
            "workflowautomation" | "workflow" => Ok(Self::WorkflowAutomation),
            "riskcompliance" | "risk" => Ok(Self::RiskCompliance),
            "integrationstructure" | "integration" => Ok(Self::IntegrationStructure),
            "filesizeoptimization" | "filesize" => Ok(Self::FileSizeOptimization),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// One static signal contributing to a category's raw score.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    pub name: &'static str,
    /// Points available.
    pub points: f64,
    /// Points actually earned (0..=points).
    pub earned: f64,
}

/// Static raw score of one category, with its breakdown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawScore {
    pub indicators: Vec<Indicator>,
}

impl RawScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award all `points` when `present` holds.
    pub fn award(mut self, name: &'static str, points: f64, present: bool) -> Self {
        let earned = if present { points } else { 0.0 };
        self.indicators.push(Indicator {
            name,
            points,
            earned,
        });
        self
    }

    /// Award a fractional amount, clamped to `0..=points`.
    pub fn partial(mut self, name: &'static str, points: f64, earned: f64) -> Self {
        let earned = if earned.is_finite() {
            earned.clamp(0.0, points)
        } else {
            0.0
        };
        self.indicators.push(Indicator {
            name,
            points,
            earned,
        });
        self
    }

    pub fn total(&self) -> f64 {
        self.indicators.iter().map(|i| i.earned).sum()
    }
}

/// Category-specific findings and recommendations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryNotes {
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl CategoryNotes {
    pub fn finding(&mut self, text: impl Into<String>) {
        self.findings.push(text.into());
    }

    pub fn recommend(&mut self, text: impl Into<String>) {
        self.recommendations.push(text.into());
    }

    /// Record a missing signal together with how to fix it.
    pub fn gap(&mut self, finding: impl Into<String>, recommendation: impl Into<String>) {
        self.finding(finding);
        self.recommend(recommendation);
    }
}

/// Static raw score for a category, out of [`MAX_RAW_POINTS`].
pub fn raw_score(subject: &Subject, category: Category) -> RawScore {
    match subject {
        Subject::Repository(repo) => repository::raw_score(repo, category),
        Subject::Website(site) => website::raw_score(site, category),
    }
}

/// Findings and recommendations read off the un-reconciled subject.
pub fn category_notes(subject: &Subject, category: Category) -> CategoryNotes {
    match subject {
        Subject::Repository(repo) => repository::notes(repo, category),
        Subject::Website(site) => website::notes(site, category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RepositoryAnalysis, WebsiteAnalysis};

    #[test]
    fn category_display() {
        assert_eq!(Category::Documentation.to_string(), "documentation");
        assert_eq!(
            Category::FileSizeOptimization.to_string(),
            "fileSizeOptimization"
        );
    }

    #[test]
    fn category_parse_accepts_spellings() {
        assert_eq!(
            "instructionClarity".parse::<Category>().unwrap(),
            Category::InstructionClarity
        );
        assert_eq!(
            "risk_compliance".parse::<Category>().unwrap(),
            Category::RiskCompliance
        );
        assert_eq!(
            "file-size-optimization".parse::<Category>().unwrap(),
            Category::FileSizeOptimization
        );
        assert!("velocity".parse::<Category>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for category in Category::all() {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), *category);
        }
    }

    #[test]
    fn all_categories() {
        assert_eq!(Category::all().len(), 6);
    }

    #[test]
    fn raw_score_sums_earned_points() {
        let score = RawScore::new()
            .award("a", 6.0, true)
            .award("b", 4.0, false)
            .partial("c", 10.0, 25.0);
        assert_eq!(score.total(), 16.0);
        assert_eq!(score.indicators[1].earned, 0.0);
    }

    #[test]
    fn partial_ignores_non_finite() {
        let score = RawScore::new().partial("x", 5.0, f64::NAN);
        assert_eq!(score.total(), 0.0);
    }

    #[test]
    fn point_tables_max_out_at_twenty() {
        let repo = Subject::Repository(crate::test_utils::full_repository());
        let site = Subject::Website(crate::test_utils::full_website());
        for category in Category::all() {
            for subject in [&repo, &site] {
                let max: f64 = raw_score(subject, *category)
                    .indicators
                    .iter()
                    .map(|i| i.points)
                    .sum();
                assert_eq!(max, MAX_RAW_POINTS, "{} on {:?}", category, subject.kind());
            }
        }
    }

    #[test]
    fn empty_subjects_score_low() {
        let repo = Subject::Repository(RepositoryAnalysis::default());
        let site = Subject::Website(WebsiteAnalysis::default());
        for category in Category::all() {
            assert_eq!(raw_score(&site, *category).total(), 0.0);
            if *category != Category::FileSizeOptimization {
                assert_eq!(raw_score(&repo, *category).total(), 0.0);
            }
        }
    }
}
