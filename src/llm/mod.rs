//! Model client plumbing for the AI side of an assessment.
//!
//! Prompt construction and response parsing live in `assessment::llm`; this
//! module only knows how to hand a prompt to a model CLI and read back text.
//!
//! # Configuration
//!
//! - CLI arguments: `--llm-provider`, `--llm-model`, `--opencode-backend`
//! - Environment: `AGENT_READINESS_LLM_PROVIDER`, `AGENT_READINESS_LLM_MODEL`,
//!   `AGENT_READINESS_OPENCODE_BACKEND`
//!
//! CLI arguments win over the environment.

use std::env;
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Arc;

use log::debug;

pub const PROVIDER_ENV: &str = "AGENT_READINESS_LLM_PROVIDER";
pub const MODEL_ENV: &str = "AGENT_READINESS_LLM_MODEL";
pub const OPENCODE_BACKEND_ENV: &str = "AGENT_READINESS_OPENCODE_BACKEND";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    #[default]
    Claude,
    OpenCode,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Claude => write!(f, "claude"),
            Self::OpenCode => write!(f, "opencode"),
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claude" => Ok(Self::Claude),
            "opencode" => Ok(Self::OpenCode),
            _ => Err(format!(
                "Unknown LLM provider: '{}'. Valid options: claude, opencode",
                s
            )),
        }
    }
}

/// Which model CLI to call, and how.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: Option<String>,
    /// Backend for opencode (e.g. "lmstudio", "ollama").
    pub opencode_backend: Option<String>,
}

impl LlmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the `AGENT_READINESS_*` variables. An unparseable provider falls
    /// back to the default.
    pub fn from_env() -> Self {
        let provider = env::var(PROVIDER_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Self {
            provider,
            model: env::var(MODEL_ENV).ok().filter(|m| !m.is_empty()),
            opencode_backend: env::var(OPENCODE_BACKEND_ENV).ok().filter(|b| !b.is_empty()),
        }
    }

    pub fn with_provider(mut self, provider: LlmProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_opencode_backend(mut self, backend: impl Into<String>) -> Self {
        self.opencode_backend = Some(backend.into());
        self
    }

    /// Merge with CLI overrides. CLI values take precedence.
    pub fn with_overrides(
        mut self,
        provider: Option<LlmProvider>,
        model: Option<String>,
        opencode_backend: Option<String>,
    ) -> Self {
        if let Some(p) = provider {
            self.provider = p;
        }
        if let Some(m) = model {
            self.model = Some(m);
        }
        if let Some(b) = opencode_backend {
            self.opencode_backend = Some(b);
        }
        self
    }

    pub fn create_client(&self) -> Arc<dyn LlmClient> {
        match self.provider {
            LlmProvider::Claude => Arc::new(ClaudeCliClient {
                model: self.model.clone(),
            }),
            LlmProvider::OpenCode => Arc::new(OpenCodeClient {
                model: self.model.clone(),
                backend: self.opencode_backend.clone(),
            }),
        }
    }
}

/// A blocking text-completion backend.
pub trait LlmClient: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Runs `claude --print`, feeding the prompt on stdin.
#[derive(Debug, Clone, Default)]
pub struct ClaudeCliClient {
    pub model: Option<String>,
}

impl ClaudeCliClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
        }
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec!["--print".to_string()];
        if let Some(model) = &self.model {
            args.push("--model".to_string());
            args.push(model.clone());
        }
        args
    }
}

impl LlmClient for ClaudeCliClient {
    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        // Subject JSON can be large; stdin avoids argv limits.
        let mut child = Command::new("claude")
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| LlmError::ClientError(format!("Failed to run claude CLI: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(prompt.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(LlmError::ClientError(format!(
                "claude CLI failed (exit {}): {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        if !stderr.trim().is_empty() {
            debug!("claude CLI stderr: {}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Runs `opencode run <prompt> --format json` and joins its text events.
#[derive(Debug, Clone, Default)]
pub struct OpenCodeClient {
    pub model: Option<String>,
    pub backend: Option<String>,
}

impl OpenCodeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// `-m` argument in opencode's `backend/model` form.
    fn model_arg(&self) -> Option<String> {
        match (&self.backend, &self.model) {
            (Some(backend), Some(model)) if !model.contains('/') => {
                Some(format!("{}/{}", backend, model))
            }
            (_, Some(model)) => Some(model.clone()),
            // a bare backend is not a usable model path
            (_, None) => None,
        }
    }
}

/// Concatenate the `text` parts of opencode's line-delimited JSON events.
fn collect_text_events(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .filter(|event| event.get("type").and_then(|v| v.as_str()) == Some("text"))
        .filter_map(|event| {
            event
                .get("part")
                .and_then(|p| p.get("text"))
                .and_then(|t| t.as_str())
                .map(str::to_string)
        })
        .collect()
}

impl LlmClient for OpenCodeClient {
    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let mut args = vec!["run".to_string(), prompt.to_string()];
        args.extend(["--format".to_string(), "json".to_string()]);
        if let Some(model) = self.model_arg() {
            args.push("-m".to_string());
            args.push(model);
        }

        let output = Command::new("opencode")
            .args(&args)
            .output()
            .map_err(|e| LlmError::ClientError(format!("Failed to run opencode CLI: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LlmError::ClientError(format!(
                "opencode CLI failed (exit {}): {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        let parts = collect_text_events(&stdout);
        if parts.is_empty() {
            return Err(LlmError::InvalidResponse(format!(
                "No text output from opencode: {}",
                stdout.chars().take(500).collect::<String>()
            )));
        }

        Ok(parts.join(""))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM client error: {0}")]
    ClientError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
