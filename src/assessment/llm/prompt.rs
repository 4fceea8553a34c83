//! Prompt construction for the AI side of an assessment.

use crate::assessment::criteria::{Category, MAX_RAW_POINTS};
use crate::models::{Subject, SubjectKind};
use crate::utils::truncate_chars;

/// Serialized subjects longer than this are cut before prompting.
const MAX_SUBJECT_CHARS: usize = 12_000;

fn rubric(category: Category, kind: SubjectKind) -> &'static str {
    match (category, kind) {
        (Category::Documentation, SubjectKind::Repository) => {
            "README, AGENTS.md, contributing guide and license that let an agent orient itself"
        }
        (Category::Documentation, SubjectKind::Website) => {
            "machine-readable metadata: structured data, Open Graph, Twitter cards, sitemap, robots.txt"
        }
        (Category::InstructionClarity, SubjectKind::Repository) => {
            "how explicit the setup, build and task instructions are for an autonomous agent"
        }
        (Category::InstructionClarity, SubjectKind::Website) => {
            "whether purpose, navigation and contact paths are unambiguous to an agent"
        }
        (Category::WorkflowAutomation, SubjectKind::Repository) => {
            "CI workflows and tests an agent can run to verify its own changes"
        }
        (Category::WorkflowAutomation, SubjectKind::Website) => {
            "mobile support, load performance and offline capability"
        }
        (Category::RiskCompliance, SubjectKind::Repository) => {
            "licensing, error handling and test coverage that limit the blast radius of agent edits"
        }
        (Category::RiskCompliance, SubjectKind::Website) => {
            "security headers, accessibility and a web app manifest"
        }
        (Category::IntegrationStructure, SubjectKind::Repository) => {
            "project layout, language mix and automation hooks an agent can integrate with"
        }
        (Category::IntegrationStructure, SubjectKind::Website) => {
            "technologies, social links and service worker surfaces an agent can integrate with"
        }
        (Category::FileSizeOptimization, SubjectKind::Repository) => {
            "whether files fit in agent context windows and upload limits"
        }
        (Category::FileSizeOptimization, SubjectKind::Website) => {
            "content volume, media and heading structure an agent must digest"
        }
    }
}

/// Build the assessment prompt for one subject.
pub fn build_assessment_prompt(subject: &Subject) -> String {
    let kind = subject.kind();
    let mut prompt = format!(
        "You are assessing how ready a {} is to be worked on by autonomous AI agents.\n\n\
         Score each category from 0 (absent) to {} (exemplary) and give your confidence \
         (0-100) in each score.\n\n## Categories\n\n",
        kind, MAX_RAW_POINTS
    );

    for category in Category::all() {
        prompt.push_str(&format!(
            "- `{}` ({}): {}\n",
            category,
            category.name(),
            rubric(*category, kind)
        ));
    }

    let subject_json = serde_json::to_string_pretty(subject)
        .unwrap_or_else(|e| format!("<unserializable subject: {}>", e));
    prompt.push_str(&format!(
        "\n## Static Analysis of {}\n\n```json\n{}\n```\n\n",
        subject.identifier(),
        truncate_chars(&subject_json, MAX_SUBJECT_CHARS)
    ));

    let example_categories: Vec<String> = Category::all()
        .iter()
        .map(|c| {
            format!(
                "    \"{}\": {{\"score\": <0-{}>, \"confidence\": <0-100>}}",
                c, MAX_RAW_POINTS
            )
        })
        .collect();
    prompt.push_str(&format!(
        "## Response Format\n\n\
         Respond with a single JSON object and nothing else:\n\n\
         ```json\n{{\n  \"categories\": {{\n{}\n  }},\n  \
         \"findings\": [\"...\"],\n  \"recommendations\": [\"...\"]\n}}\n```\n",
        example_categories.join(",\n")
    ));

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepositoryAnalysis;
    use crate::test_utils::full_website;

    #[test]
    fn prompt_lists_every_category() {
        let subject = Subject::Repository(RepositoryAnalysis {
            url: "https://github.com/acme/widgets".to_string(),
            ..Default::default()
        });
        let prompt = build_assessment_prompt(&subject);

        for category in Category::all() {
            assert!(prompt.contains(&format!("`{}`", category)));
        }
        assert!(prompt.contains("ready a repository"));
        assert!(prompt.contains("https://github.com/acme/widgets"));
        assert!(prompt.contains("\"kind\": \"repository\""));
    }

    #[test]
    fn prompt_asks_for_raw_points() {
        let prompt = build_assessment_prompt(&Subject::Website(full_website()));
        assert!(prompt.contains("from 0 (absent) to 20 (exemplary)"));
        assert!(prompt.contains("\"score\": <0-20>"));
    }

    #[test]
    fn website_prompt_uses_website_rubric() {
        let prompt = build_assessment_prompt(&Subject::Website(full_website()));
        assert!(prompt.contains("ready a website"));
        assert!(prompt.contains("Open Graph"));
    }

    #[test]
    fn oversized_subjects_are_truncated() {
        let subject = Subject::Repository(RepositoryAnalysis {
            languages: vec!["x".repeat(100); 500],
            ..Default::default()
        });
        let prompt = build_assessment_prompt(&subject);
        assert!(prompt.contains("(truncated)"));
    }
}
