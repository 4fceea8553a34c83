//! Model-based readiness assessment.

pub mod parser;
pub mod prompt;

use std::sync::Arc;

use log::{debug, warn};

use crate::llm::LlmClient;
use crate::models::{AiAnalysis, Subject};

pub use parser::{parse_ai_response, ParseError};
pub use prompt::build_assessment_prompt;

/// Asks a model to score a subject.
///
/// Every failure mode (client error, unparseable output, retries exhausted)
/// ends in `None`, so callers fall back to static-only scoring.
#[derive(Clone)]
pub struct AiAssessor {
    client: Arc<dyn LlmClient>,
    max_retries: usize,
}

impl AiAssessor {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            max_retries: 3,
        }
    }

    /// Set the maximum number of attempts. At least one is always made.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    pub fn assess(&self, subject: &Subject) -> Option<AiAnalysis> {
        let prompt_text = build_assessment_prompt(subject);
        debug!(
            "AI assessment prompt for {} ({} chars)",
            subject.identifier(),
            prompt_text.len()
        );

        for attempt in 1..=self.max_retries {
            match self.client.complete(&prompt_text) {
                Ok(response) => match parse_ai_response(&response) {
                    Ok(analysis) => {
                        debug!(
                            "AI scored {} categories on attempt {}",
                            analysis.categories.len(),
                            attempt
                        );
                        return Some(analysis);
                    }
                    Err(e) => warn!(
                        "Parse error (attempt {}/{}): {}",
                        attempt, self.max_retries, e
                    ),
                },
                Err(e) => warn!("LLM error (attempt {}/{}): {}", attempt, self.max_retries, e),
            }
        }

        warn!(
            "AI assessment unavailable after {} attempts; using static analysis only",
            self.max_retries
        );
        None
    }
}

impl std::fmt::Debug for AiAssessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiAssessor")
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}
