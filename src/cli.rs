use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::assessment::report::OutputFormat;

/// Command line interface definition for agent-readiness.
#[derive(Parser, Debug)]
#[command(name = "agent-readiness")]
#[command(about = "Score how ready a repository or website is for autonomous AI agents")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbosity")]
    pub quiet: bool,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Model client selection; falls back to `AGENT_READINESS_*` variables.
#[derive(Args, Debug, Clone, Default)]
pub struct LlmArgs {
    /// LLM provider (claude, opencode)
    #[arg(long = "llm-provider", global = true)]
    pub provider: Option<String>,

    /// Model name passed to the provider
    #[arg(long = "llm-model", global = true)]
    pub model: Option<String>,

    /// Backend for opencode (e.g. lmstudio, ollama)
    #[arg(long = "opencode-backend", global = true)]
    pub opencode_backend: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Score a subject from its static analysis and an optional AI analysis
    Assess(AssessArgs),
    /// Check static and AI analyses for consistency without scoring
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    /// Static analysis JSON (repository or website)
    #[arg(value_name = "SUBJECT")]
    pub subject: PathBuf,

    /// AI analysis JSON to reconcile with the static analysis
    #[arg(long, value_name = "FILE", conflicts_with = "use_llm")]
    pub ai: Option<PathBuf>,

    /// Ask the configured LLM for the AI analysis
    #[arg(long)]
    pub use_llm: bool,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: FormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Static analysis JSON (repository or website)
    #[arg(value_name = "SUBJECT")]
    pub subject: PathBuf,

    /// AI analysis JSON
    #[arg(long, value_name = "FILE")]
    pub ai: PathBuf,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// Scoring configuration JSON (missing fields take defaults)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Weight of the static source (0-1)
    #[arg(long)]
    pub static_weight: Option<f64>,

    /// Weight of the AI source (0-1)
    #[arg(long)]
    pub ai_weight: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Pretty-printed JSON
    Json,
    /// Human-readable report
    Pretty,
    /// One line per category
    Compact,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Pretty => OutputFormat::Pretty,
            FormatArg::Compact => OutputFormat::Compact,
        }
    }
}
