//! Static scoring and notes for source repositories.

use crate::assessment::criteria::{Category, CategoryNotes, RawScore, MAX_RAW_POINTS};
use crate::models::{
    megabytes, FileSizeAnalysis, RepositoryAnalysis, CRITICAL_FILE_BYTES, LARGE_FILE_BYTES,
};

/// Raw file-size points when no file-size analysis was produced.
pub const DEFAULT_FILE_SIZE_POINTS: f64 = 15.0;

/// Composite compatibility below this is called out.
const LOW_COMPATIBILITY: f64 = 50.0;

pub fn raw_score(repo: &RepositoryAnalysis, category: Category) -> RawScore {
    match category {
        Category::Documentation => RawScore::new()
            .award("readme", 6.0, repo.has_readme)
            .award("agents", 6.0, repo.has_agents)
            .award("contributing", 4.0, repo.has_contributing)
            .award("license", 4.0, repo.has_license),
        Category::InstructionClarity => RawScore::new()
            .award("readme", 8.0, repo.has_readme)
            .award("agents", 12.0, repo.has_agents),
        Category::WorkflowAutomation => RawScore::new()
            .award("workflows", 12.0, repo.has_workflows)
            .award("tests", 8.0, repo.has_tests),
        Category::RiskCompliance => RawScore::new()
            .award("license", 6.0, repo.has_license)
            .award("errorHandling", 8.0, repo.error_handling)
            .award("tests", 6.0, repo.has_tests),
        Category::IntegrationStructure => RawScore::new()
            .award("workflows", 8.0, repo.has_workflows)
            .award("tests", 6.0, repo.has_tests)
            .award("languages", 6.0, !repo.languages.is_empty()),
        Category::FileSizeOptimization => match &repo.file_size_analysis {
            Some(analysis) => {
                let compatibility = analysis.agent_compatibility.overall_compatibility;
                RawScore::new().partial("agentCompatibility", MAX_RAW_POINTS, compatibility / 5.0)
            }
            None => RawScore::new().partial(
                "assumedCompatibility",
                MAX_RAW_POINTS,
                DEFAULT_FILE_SIZE_POINTS,
            ),
        },
    }
}

pub fn notes(repo: &RepositoryAnalysis, category: Category) -> CategoryNotes {
    let mut notes = CategoryNotes::default();

    match category {
        Category::Documentation => {
            if repo.has_readme {
                notes.finding("README.md present");
            } else {
                notes.gap(
                    "Missing README.md file",
                    "Add a README.md describing the project purpose, setup, and usage",
                );
            }
            if !repo.has_agents {
                notes.gap(
                    "Missing AGENTS.md file for AI agent instructions",
                    "Create an AGENTS.md file with build commands, conventions, and boundaries for AI agents",
                );
            }
            if !repo.has_contributing {
                notes.gap(
                    "Missing CONTRIBUTING.md file",
                    "Add a CONTRIBUTING.md describing the contribution workflow",
                );
            }
            if !repo.has_license {
                notes.gap(
                    "Missing LICENSE file",
                    "Add a LICENSE file to clarify usage rights",
                );
            }
        }
        Category::InstructionClarity => {
            if repo.has_agents {
                notes.finding("AI agent instructions file found");
            } else {
                notes.gap(
                    "No AI agent instructions file found",
                    "Document agent-specific instructions (commands, code style, restricted areas) in AGENTS.md",
                );
            }
            if !repo.has_readme {
                notes.finding("No README to give agents project context");
            }
        }
        Category::WorkflowAutomation => {
            if !repo.has_workflows {
                notes.gap(
                    "No CI/CD workflows detected",
                    "Add CI workflows (e.g. GitHub Actions) so agent changes are verified automatically",
                );
            }
            if !repo.has_tests {
                notes.gap(
                    "No test files detected",
                    "Add automated tests that agents can run to validate their changes",
                );
            }
            if repo.has_workflows && repo.has_tests {
                notes.finding("CI workflows and automated tests are in place");
            }
        }
        Category::RiskCompliance => {
            if !repo.has_license {
                notes.gap(
                    "No license declared",
                    "Declare a license so agents and users know the usage terms",
                );
            }
            if !repo.error_handling {
                notes.gap(
                    "No error handling patterns detected",
                    "Adopt consistent error handling so agent-introduced failures surface clearly",
                );
            }
            if !repo.has_tests {
                notes.gap(
                    "No tests guard against regressions",
                    "Add tests to catch regressions introduced by automated changes",
                );
            }
        }
        Category::IntegrationStructure => {
            if repo.languages.is_empty() {
                notes.gap(
                    "No programming languages detected",
                    "Use conventional file extensions and project layout so tooling can detect the stack",
                );
            } else {
                notes.finding(format!("Languages detected: {}", repo.languages.join(", ")));
            }
            if repo.file_count == 0 {
                notes.finding("Repository appears to be empty");
            }
        }
        Category::FileSizeOptimization => match &repo.file_size_analysis {
            Some(analysis) => file_size_notes(analysis, &mut notes),
            None => notes.finding("File size analysis not available"),
        },
    }

    notes
}

fn file_size_notes(analysis: &FileSizeAnalysis, notes: &mut CategoryNotes) {
    let large = analysis.large_files.len();
    let critical = analysis.critical_files.len();

    if large > 0 {
        notes.gap(
            format!(
                "{} files exceed {}MB, limiting AI agent compatibility",
                large,
                megabytes(LARGE_FILE_BYTES)
            ),
            "Consider splitting large files or using repository-level processing tools",
        );
    }
    if critical > 0 {
        notes.gap(
            format!(
                "{} files exceed {}MB and cannot be read by most AI agents",
                critical,
                megabytes(CRITICAL_FILE_BYTES)
            ),
            format!(
                "Move files over {}MB out of the repository (e.g. Git LFS or external storage)",
                megabytes(CRITICAL_FILE_BYTES)
            ),
        );
    }

    let blocked = analysis.blocked_files();
    if !blocked.is_empty() {
        let paths: Vec<&str> = blocked.iter().map(|f| f.path.as_str()).collect();
        notes.finding(format!(
            "{} files are blocked for at least one AI agent: {}",
            blocked.len(),
            paths.join(", ")
        ));
    }

    let compatibility = analysis.agent_compatibility.overall_compatibility;
    if compatibility < LOW_COMPATIBILITY {
        notes.gap(
            format!("Low overall AI agent compatibility ({:.0}%)", compatibility),
            "Reduce file sizes to improve compatibility across AI agents",
        );
    }

    if large == 0 && critical == 0 {
        notes.finding("All files are within AI agent size limits");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgentCompatibility, FileSizeEntry};
    use crate::test_utils::{full_repository, large_file};

    #[test]
    fn full_repository_maxes_every_category() {
        let repo = full_repository();
        for category in Category::all() {
            assert_eq!(raw_score(&repo, *category).total(), MAX_RAW_POINTS, "{}", category);
        }
    }

    #[test]
    fn documentation_points() {
        let repo = RepositoryAnalysis {
            has_readme: true,
            has_license: true,
            ..Default::default()
        };
        assert_eq!(raw_score(&repo, Category::Documentation).total(), 10.0);
    }

    #[test]
    fn file_size_uses_compatibility_composite() {
        let repo = RepositoryAnalysis {
            file_size_analysis: Some(FileSizeAnalysis {
                agent_compatibility: AgentCompatibility {
                    overall_compatibility: 70.0,
                },
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(raw_score(&repo, Category::FileSizeOptimization).total(), 14.0);
    }

    #[test]
    fn file_size_default_without_analysis() {
        let repo = RepositoryAnalysis::default();
        assert_eq!(
            raw_score(&repo, Category::FileSizeOptimization).total(),
            DEFAULT_FILE_SIZE_POINTS
        );
    }

    #[test]
    fn out_of_range_compatibility_is_clamped() {
        let repo = RepositoryAnalysis {
            file_size_analysis: Some(FileSizeAnalysis {
                agent_compatibility: AgentCompatibility {
                    overall_compatibility: 250.0,
                },
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(raw_score(&repo, Category::FileSizeOptimization).total(), 20.0);
    }

    #[test]
    fn missing_readme_is_reported_regardless_of_score() {
        let repo = RepositoryAnalysis {
            has_agents: true,
            has_contributing: true,
            has_license: true,
            ..Default::default()
        };
        let notes = notes(&repo, Category::Documentation);
        assert!(notes.findings.contains(&"Missing README.md file".to_string()));
        assert_eq!(notes.recommendations.len(), 1);
    }

    #[test]
    fn large_files_produce_finding_and_recommendation() {
        let repo = RepositoryAnalysis {
            file_size_analysis: Some(FileSizeAnalysis {
                large_files: vec![large_file("assets/model.bin", 3_000_000)],
                agent_compatibility: AgentCompatibility {
                    overall_compatibility: 80.0,
                },
                ..Default::default()
            }),
            ..Default::default()
        };
        let notes = notes(&repo, Category::FileSizeOptimization);
        assert_eq!(
            notes.findings[0],
            "1 files exceed 2MB, limiting AI agent compatibility"
        );
        assert!(notes.recommendations[0]
            .contains("splitting large files or using repository-level processing tools"));
    }

    #[test]
    fn blocked_and_low_compatibility_are_reported() {
        let mut blocked = FileSizeEntry {
            path: "dump.sql".to_string(),
            size_bytes: 12_000_000,
            ..Default::default()
        };
        blocked
            .agent_impact
            .insert("cursor".to_string(), crate::models::AgentImpact::Blocked);
        let analysis = FileSizeAnalysis {
            critical_files: vec![blocked],
            agent_compatibility: AgentCompatibility {
                overall_compatibility: 30.0,
            },
            ..Default::default()
        };
        let repo = RepositoryAnalysis {
            file_size_analysis: Some(analysis),
            ..Default::default()
        };
        let notes = notes(&repo, Category::FileSizeOptimization);
        assert!(notes.findings.iter().any(|f| f.contains("exceed 10MB")));
        assert!(notes
            .findings
            .iter()
            .any(|f| f.starts_with("1 files are blocked") && f.contains("dump.sql")));
        assert!(notes.findings.iter().any(|f| f.contains("(30%)")));
    }
}
