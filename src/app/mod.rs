use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::Value;

use crate::assessment::{self, AssessmentEngine, ScoringConfig};
use crate::cli::{AssessArgs, Command, ScoringArgs, ValidateArgs};
use crate::llm::{LlmClient, LlmConfig};
use crate::models::{AiAnalysis, Subject};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Assessment(#[from] assessment::AssessmentError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    User(String),
}

/// Application layer behind the CLI: reads inputs, runs the engine and
/// renders its output.
pub struct App {
    llm_config: LlmConfig,
    client: Option<Arc<dyn LlmClient>>,
}

impl App {
    pub fn new(llm_config: LlmConfig) -> Self {
        Self {
            llm_config,
            client: None,
        }
    }

    /// Use this client instead of one built from the LLM configuration.
    pub fn with_client(mut self, client: Arc<dyn LlmClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn run(&self, command: Command) -> Result<(), AppError> {
        let output = self.render(command)?;
        println!("{}", output);
        Ok(())
    }

    /// Execute a command and return what it would print.
    pub fn render(&self, command: Command) -> Result<String, AppError> {
        match command {
            Command::Assess(opts) => self.handle_assess(opts),
            Command::Validate(opts) => self.handle_validate(opts),
        }
    }

    fn handle_assess(&self, opts: AssessArgs) -> Result<String, AppError> {
        let subject = load_subject(&opts.subject)?;
        let engine = build_engine(&opts.scoring)?;

        info!("Assessing {} {}", subject.kind(), subject.identifier());

        let result = if opts.use_llm {
            let client = self
                .client
                .clone()
                .unwrap_or_else(|| self.llm_config.create_client());
            info!("Requesting AI analysis from {}", self.llm_config.provider);
            engine.with_client(client).assess_with_model(&subject)?
        } else {
            let ai = opts.ai.as_deref().map(load_ai_analysis).transpose()?;
            if ai.is_none() {
                debug!("No AI analysis supplied; scoring statically");
            }
            engine.assess(&subject, ai.as_ref())?
        };

        if !result.validation.is_valid {
            warn!(
                "Static and AI analyses disagree ({} issue(s)); see validation.issues",
                result.validation.issues.len()
            );
        }

        Ok(assessment::report::format_assessment(
            &result,
            opts.format.into(),
        ))
    }

    fn handle_validate(&self, opts: ValidateArgs) -> Result<String, AppError> {
        let subject = load_subject(&opts.subject)?;
        let ai = load_ai_analysis(&opts.ai)?;
        let engine = build_engine(&opts.scoring)?;

        let (validation, alignment) = engine.validate_sources(&subject, &ai);
        info!(
            "Validation {}: alignment {:.0}/100, {} issue(s)",
            if validation.is_valid { "passed" } else { "failed" },
            validation.alignment_score,
            validation.issues.len()
        );

        Ok(assessment::report::format_validation(
            &validation,
            &alignment,
        ))
    }
}

fn read_json(path: &Path) -> Result<Value, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::User(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&text)
        .map_err(|e| AppError::User(format!("Invalid JSON in {}: {}", path.display(), e)))
}

fn load_subject(path: &Path) -> Result<Subject, AppError> {
    Ok(Subject::from_value(read_json(path)?)?)
}

fn load_ai_analysis(path: &Path) -> Result<AiAnalysis, AppError> {
    let value = read_json(path)?;
    if !value.is_object() {
        return Err(AppError::User(format!(
            "AI analysis in {} must be a JSON object",
            path.display()
        )));
    }
    Ok(AiAnalysis::from_value(&value))
}

fn build_engine(args: &ScoringArgs) -> Result<AssessmentEngine, AppError> {
    let config = match &args.config {
        Some(path) => ScoringConfig::load(path)?,
        None => ScoringConfig::default(),
    };
    let config = config.with_overrides(args.static_weight, args.ai_weight);
    Ok(AssessmentEngine::new(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FormatArg;
    use crate::llm::test_support::MockLlmClient;
    use std::io::Write;
    use std::path::PathBuf;

    fn json_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn assess_args(subject: PathBuf) -> AssessArgs {
        AssessArgs {
            subject,
            ai: None,
            use_llm: false,
            scoring: ScoringArgs::default(),
            format: FormatArg::Json,
        }
    }

    #[test]
    fn assess_static_only() {
        let dir = tempfile::tempdir().unwrap();
        let subject = json_file(&dir, "repo.json", r#"{"url": "r", "hasReadme": true}"#);

        let output = App::new(LlmConfig::default())
            .render(Command::Assess(assess_args(subject)))
            .unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["assessmentStatus"]["aiAnalysisEnabled"], false);
        assert_eq!(value["metadata"]["subjectKind"], "repository");
    }

    #[test]
    fn assess_with_ai_file_and_weights() {
        let dir = tempfile::tempdir().unwrap();
        let subject = json_file(&dir, "repo.json", r#"{"url": "r", "hasReadme": "yes"}"#);
        let ai = json_file(&dir, "ai.json", r#"{"categories": {"documentation": 10}}"#);

        let mut args = assess_args(subject);
        args.ai = Some(ai);
        args.scoring.static_weight = Some(0.5);
        args.format = FormatArg::Compact;

        let output = App::new(LlmConfig::default())
            .render(Command::Assess(args))
            .unwrap();
        assert!(output.contains("documentation: 8 (static 6 / ai 10)"));
    }

    #[test]
    fn assess_with_llm_uses_injected_client() {
        let dir = tempfile::tempdir().unwrap();
        let subject = json_file(&dir, "site.json", r#"{"websiteUrl": "https://example.com"}"#);
        let client = Arc::new(MockLlmClient::new(
            r#"{"categories": {"documentation": 12}}"#,
        ));

        let mut args = assess_args(subject);
        args.use_llm = true;
        let output = App::new(LlmConfig::default())
            .with_client(client.clone())
            .render(Command::Assess(args))
            .unwrap();

        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["metadata"]["subjectKind"], "website");
        assert_eq!(value["categories"]["documentation"]["score"]["source"], "hybrid");
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn validate_outputs_report() {
        let dir = tempfile::tempdir().unwrap();
        let subject = json_file(&dir, "repo.json", r#"{"url": "r"}"#);
        let ai = json_file(&dir, "ai.json", r#"{"categories": {"documentation": 20}}"#);

        let output = App::new(LlmConfig::default())
            .render(Command::Validate(ValidateArgs {
                subject,
                ai,
                scoring: ScoringArgs::default(),
            }))
            .unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["validation"]["isValid"], false);
        assert_eq!(value["alignment"]["criticalVariances"][0]["category"], "documentation");
    }

    #[test]
    fn missing_file_is_user_error() {
        let result = App::new(LlmConfig::default())
            .render(Command::Assess(assess_args(PathBuf::from("/nonexistent/repo.json"))));
        assert!(matches!(result, Err(AppError::User(_))));
    }

    #[test]
    fn invalid_weights_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let subject = json_file(&dir, "repo.json", "{}");
        let mut args = assess_args(subject);
        args.scoring.static_weight = Some(0.6);
        args.scoring.ai_weight = Some(0.6);

        let result = App::new(LlmConfig::default()).render(Command::Assess(args));
        assert!(matches!(result, Err(AppError::Assessment(_))));
    }
}
