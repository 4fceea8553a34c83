//! Shared test fixtures.

use std::collections::BTreeMap;

use crate::assessment::types::{CategoryScore, MetricSource, UnifiedMetric};
use crate::models::{
    AgentCompatibility, FileSizeAnalysis, FileSizeEntry, HeadingStructure, RepositoryAnalysis,
    WebsiteAnalysis,
};

/// A repository that earns every static point.
pub fn full_repository() -> RepositoryAnalysis {
    RepositoryAnalysis {
        url: "https://github.com/example/ready".to_string(),
        has_readme: true,
        has_agents: true,
        has_contributing: true,
        has_license: true,
        has_workflows: true,
        has_tests: true,
        error_handling: true,
        languages: vec!["Rust".to_string(), "Shell".to_string()],
        file_count: 42,
        file_size_analysis: Some(FileSizeAnalysis {
            agent_compatibility: AgentCompatibility {
                overall_compatibility: 100.0,
            },
            ..Default::default()
        }),
    }
}

/// A website that earns every static point.
pub fn full_website() -> WebsiteAnalysis {
    WebsiteAnalysis {
        website_url: "https://example.com".to_string(),
        page_title: "Example".to_string(),
        meta_description: "An example site".to_string(),
        has_structured_data: true,
        has_open_graph: true,
        has_twitter_card: true,
        has_sitemap: true,
        has_robots_txt: true,
        technologies: vec!["React".to_string()],
        has_contact_info: true,
        social_links: vec!["https://twitter.com/example".to_string()],
        has_navigation: true,
        is_mobile_friendly: true,
        load_time_ms: 1200.0,
        has_service_worker: true,
        security_headers: vec!["content-security-policy".to_string()],
        accessibility_score: 90.0,
        has_manifest: true,
        content_length: 5400,
        image_count: 8,
        link_count: 30,
        headings: HeadingStructure { h1: 1, h2: 4, h3: 2 },
    }
}

pub fn large_file(path: &str, size_bytes: u64) -> FileSizeEntry {
    FileSizeEntry {
        path: path.to_string(),
        size_bytes,
        agent_impact: BTreeMap::new(),
    }
}

/// A static-only category score with the given value and confidence.
pub fn metric_with_value(value: f64, confidence: f64) -> CategoryScore {
    CategoryScore {
        score: UnifiedMetric {
            value,
            confidence,
            source: MetricSource::Static,
            static_value: Some(value),
            ai_value: None,
            variance: Some(0.0),
            is_validated: true,
        },
        sub_metrics: BTreeMap::new(),
        findings: Vec::new(),
        recommendations: Vec::new(),
    }
}
