use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::assessment::criteria::Category;
use crate::assessment::AssessmentError;
use crate::coerce::{self, coerce_number};

/// Files above this size are "large" for agent tooling.
pub const LARGE_FILE_BYTES: u64 = 2 * 1024 * 1024;
/// Files above this size are unreadable for most agents.
pub const CRITICAL_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Whole mebibytes in `bytes`, for messages.
pub fn megabytes(bytes: u64) -> u64 {
    bytes / (1024 * 1024)
}

/// Kind of subject that was statically analyzed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Repository,
    Website,
}

impl Display for SubjectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repository => write!(f, "repository"),
            Self::Website => write!(f, "website"),
        }
    }
}

/// Static analysis of the subject being assessed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Subject {
    Repository(RepositoryAnalysis),
    Website(WebsiteAnalysis),
}

impl Subject {
    /// Classify a provider document.
    ///
    /// Documents carrying a `kind` tag are taken at their word. Untagged
    /// documents are websites when they expose a page URL or title, and
    /// repositories otherwise.
    pub fn from_value(value: Value) -> Result<Self, AssessmentError> {
        let Some(object) = value.as_object() else {
            return Err(AssessmentError::InvalidInput(
                "static analysis must be a JSON object".to_string(),
            ));
        };

        if object.contains_key("kind") {
            return serde_json::from_value(value)
                .map_err(|e| AssessmentError::InvalidInput(e.to_string()));
        }

        let is_website = ["websiteUrl", "website_url", "pageTitle", "page_title"]
            .iter()
            .any(|key| object.contains_key(*key));

        if is_website {
            serde_json::from_value(value)
                .map(Subject::Website)
                .map_err(|e| AssessmentError::InvalidInput(e.to_string()))
        } else {
            serde_json::from_value(value)
                .map(Subject::Repository)
                .map_err(|e| AssessmentError::InvalidInput(e.to_string()))
        }
    }

    pub fn kind(&self) -> SubjectKind {
        match self {
            Self::Repository(_) => SubjectKind::Repository,
            Self::Website(_) => SubjectKind::Website,
        }
    }

    /// URL or other identifier of the subject.
    pub fn identifier(&self) -> &str {
        match self {
            Self::Repository(repo) => &repo.url,
            Self::Website(site) => &site.website_url,
        }
    }
}

/// Static analysis of a source repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryAnalysis {
    #[serde(deserialize_with = "coerce::string")]
    pub url: String,
    #[serde(deserialize_with = "coerce::flag")]
    pub has_readme: bool,
    /// AGENTS.md or an equivalent AI-instructions file.
    #[serde(deserialize_with = "coerce::flag")]
    pub has_agents: bool,
    #[serde(deserialize_with = "coerce::flag")]
    pub has_contributing: bool,
    #[serde(deserialize_with = "coerce::flag")]
    pub has_license: bool,
    /// CI configuration (workflows, pipelines).
    #[serde(deserialize_with = "coerce::flag")]
    pub has_workflows: bool,
    #[serde(deserialize_with = "coerce::flag")]
    pub has_tests: bool,
    #[serde(deserialize_with = "coerce::flag")]
    pub error_handling: bool,
    #[serde(deserialize_with = "coerce::strings")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "count")]
    pub file_count: u64,
    #[serde(deserialize_with = "coerce::or_default")]
    pub file_size_analysis: Option<FileSizeAnalysis>,
}

/// File-size and agent-compatibility sub-report of a repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileSizeAnalysis {
    /// Files above [`LARGE_FILE_BYTES`].
    #[serde(deserialize_with = "coerce::list")]
    pub large_files: Vec<FileSizeEntry>,
    /// Files above [`CRITICAL_FILE_BYTES`].
    #[serde(deserialize_with = "coerce::list")]
    pub critical_files: Vec<FileSizeEntry>,
    #[serde(deserialize_with = "coerce::or_default")]
    pub agent_compatibility: AgentCompatibility,
}

impl FileSizeAnalysis {
    /// Files that at least one agent cannot process at all.
    pub fn blocked_files(&self) -> Vec<&FileSizeEntry> {
        let mut seen = Vec::new();
        for entry in self.large_files.iter().chain(&self.critical_files) {
            if entry.is_blocked() && !seen.iter().any(|e: &&FileSizeEntry| e.path == entry.path) {
                seen.push(entry);
            }
        }
        seen
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileSizeEntry {
    #[serde(deserialize_with = "coerce::string")]
    pub path: String,
    #[serde(alias = "size", deserialize_with = "count")]
    pub size_bytes: u64,
    /// Impact per agent name (e.g. "cursor", "copilot").
    #[serde(deserialize_with = "coerce::or_default")]
    pub agent_impact: BTreeMap<String, AgentImpact>,
}

impl FileSizeEntry {
    pub fn is_blocked(&self) -> bool {
        self.agent_impact
            .values()
            .any(|impact| *impact == AgentImpact::Blocked)
    }
}

/// How a file's size affects a particular agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Value")]
pub enum AgentImpact {
    Compatible,
    Limited,
    Blocked,
    Unknown,
}

impl From<Value> for AgentImpact {
    /// Anything but a known impact name is `Unknown`.
    fn from(value: Value) -> Self {
        match value.as_str().map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("compatible") => Self::Compatible,
            Some("limited") => Self::Limited,
            Some("blocked") => Self::Blocked,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentCompatibility {
    /// Composite 0-100 compatibility across agents.
    #[serde(deserialize_with = "coerce::number")]
    pub overall_compatibility: f64,
}

/// Static analysis of a crawled web page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebsiteAnalysis {
    #[serde(deserialize_with = "coerce::string")]
    pub website_url: String,
    #[serde(deserialize_with = "coerce::string")]
    pub page_title: String,
    #[serde(deserialize_with = "coerce::string")]
    pub meta_description: String,
    #[serde(deserialize_with = "coerce::flag")]
    pub has_structured_data: bool,
    #[serde(deserialize_with = "coerce::flag")]
    pub has_open_graph: bool,
    #[serde(deserialize_with = "coerce::flag")]
    pub has_twitter_card: bool,
    #[serde(deserialize_with = "coerce::flag")]
    pub has_sitemap: bool,
    #[serde(deserialize_with = "coerce::flag")]
    pub has_robots_txt: bool,
    #[serde(deserialize_with = "coerce::strings")]
    pub technologies: Vec<String>,
    #[serde(deserialize_with = "coerce::flag")]
    pub has_contact_info: bool,
    #[serde(deserialize_with = "coerce::strings")]
    pub social_links: Vec<String>,
    #[serde(deserialize_with = "coerce::flag")]
    pub has_navigation: bool,
    #[serde(deserialize_with = "coerce::flag")]
    pub is_mobile_friendly: bool,
    #[serde(deserialize_with = "coerce::number")]
    pub load_time_ms: f64,
    #[serde(deserialize_with = "coerce::flag")]
    pub has_service_worker: bool,
    #[serde(deserialize_with = "coerce::strings")]
    pub security_headers: Vec<String>,
    #[serde(deserialize_with = "coerce::number")]
    pub accessibility_score: f64,
    #[serde(deserialize_with = "coerce::flag")]
    pub has_manifest: bool,
    #[serde(deserialize_with = "count")]
    pub content_length: u64,
    #[serde(deserialize_with = "count")]
    pub image_count: u64,
    #[serde(deserialize_with = "count")]
    pub link_count: u64,
    #[serde(deserialize_with = "coerce::or_default")]
    pub headings: HeadingStructure,
}

impl WebsiteAnalysis {
    /// Load times under this are considered fast.
    pub const FAST_LOAD_MS: f64 = 3000.0;

    /// A load time of 0 means "not measured", which is not fast.
    pub fn loads_fast(&self) -> bool {
        self.load_time_ms > 0.0 && self.load_time_ms < Self::FAST_LOAD_MS
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingStructure {
    #[serde(deserialize_with = "count")]
    pub h1: u64,
    #[serde(deserialize_with = "count")]
    pub h2: u64,
    #[serde(deserialize_with = "count")]
    pub h3: u64,
}

/// Assessment returned by the generative-model provider.
///
/// Scores are raw values out of
/// [`MAX_RAW_POINTS`](crate::assessment::criteria::MAX_RAW_POINTS) whatever
/// the configured category scale. A category the model did not score is
/// absent from `categories`, which is different from a score of 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct AiAnalysis {
    pub categories: BTreeMap<Category, f64>,
    /// Per-category confidence, 0-100.
    pub confidence: BTreeMap<Category, f64>,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AiAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(mut self, category: Category, score: f64) -> Self {
        self.categories.insert(category, score);
        self
    }

    pub fn with_confidence(mut self, category: Category, confidence: f64) -> Self {
        self.confidence.insert(category, confidence);
        self
    }

    pub fn score(&self, category: Category) -> Option<f64> {
        self.categories.get(&category).copied()
    }

    pub fn confidence_for(&self, category: Category) -> Option<f64> {
        self.confidence.get(&category).copied()
    }

    /// Build from loosely structured provider output.
    ///
    /// Accepts `categories` (or `scores`) whose entries are either numbers or
    /// `{ "score": .., "confidence": .. }` objects, plus an optional
    /// `confidence` map. Null entries are treated as "not scored"; other
    /// malformed values are coerced to 0. Unknown category names are ignored.
    pub fn from_value(value: &Value) -> Self {
        let mut analysis = Self::default();

        let scores = value.get("categories").or_else(|| value.get("scores"));
        if let Some(Value::Object(map)) = scores {
            for (name, entry) in map {
                let Ok(category) = name.parse::<Category>() else {
                    log::debug!("Ignoring unknown AI category '{}'", name);
                    continue;
                };
                match entry {
                    Value::Null => {}
                    Value::Object(inner) => {
                        if let Some(score) = inner.get("score").filter(|v| !v.is_null()) {
                            analysis.categories.insert(category, coerce_number(score));
                        }
                        if let Some(conf) = inner.get("confidence").filter(|v| !v.is_null()) {
                            analysis.confidence.insert(category, coerce_number(conf));
                        }
                    }
                    other => {
                        analysis.categories.insert(category, coerce_number(other));
                    }
                }
            }
        }

        let confidence = value.get("confidence").or_else(|| value.get("confidences"));
        if let Some(Value::Object(map)) = confidence {
            for (name, entry) in map {
                if entry.is_null() {
                    continue;
                }
                if let Ok(category) = name.parse::<Category>() {
                    analysis.confidence.insert(category, coerce_number(entry));
                }
            }
        }

        analysis.findings = string_list(value.get("findings"));
        analysis.recommendations = string_list(value.get("recommendations"));
        analysis
    }
}

impl From<Value> for AiAnalysis {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Serde adapter for counts: coerced, negative values clamp to 0.
fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let n = coerce::number(deserializer)?;
    Ok(if n > 0.0 { n.round() as u64 } else { 0 })
}
