//! Static scoring and notes for websites.

use crate::assessment::criteria::{Category, CategoryNotes, RawScore};
use crate::models::WebsiteAnalysis;

/// Accessibility score (0-100) considered acceptable.
pub const MIN_ACCESSIBILITY: f64 = 60.0;

pub fn raw_score(site: &WebsiteAnalysis, category: Category) -> RawScore {
    let has_technologies = !site.technologies.is_empty();
    let has_social = !site.social_links.is_empty();

    match category {
        Category::Documentation => RawScore::new()
            .award("structuredData", 6.0, site.has_structured_data)
            .award("openGraph", 5.0, site.has_open_graph)
            .award("twitterCard", 3.0, site.has_twitter_card)
            .award("sitemap", 3.0, site.has_sitemap)
            .award("robotsTxt", 3.0, site.has_robots_txt),
        Category::InstructionClarity => RawScore::new()
            .award("technologies", 5.0, has_technologies)
            .award("contactInfo", 5.0, site.has_contact_info)
            .award("socialLinks", 4.0, has_social)
            .award("navigation", 6.0, site.has_navigation),
        Category::WorkflowAutomation => RawScore::new()
            .award("mobileFriendly", 6.0, site.is_mobile_friendly)
            .award("fastLoad", 6.0, site.loads_fast())
            .award("navigation", 4.0, site.has_navigation)
            .award("serviceWorker", 4.0, site.has_service_worker),
        Category::RiskCompliance => RawScore::new()
            .award("securityHeaders", 6.0, !site.security_headers.is_empty())
            .award("contactInfo", 4.0, site.has_contact_info)
            .award(
                "accessibility",
                6.0,
                site.accessibility_score >= MIN_ACCESSIBILITY,
            )
            .award("manifest", 4.0, site.has_manifest),
        Category::IntegrationStructure => RawScore::new()
            .award("technologies", 6.0, has_technologies)
            .award("socialLinks", 5.0, has_social)
            .award("contactInfo", 4.0, site.has_contact_info)
            .award("serviceWorker", 5.0, site.has_service_worker),
        Category::FileSizeOptimization => RawScore::new()
            .award("contentLength", 5.0, site.content_length > 0)
            .award("images", 5.0, site.image_count > 0)
            .award("links", 5.0, site.link_count > 0)
            .award("headingStructure", 5.0, site.headings.h1 > 0),
    }
}

pub fn notes(site: &WebsiteAnalysis, category: Category) -> CategoryNotes {
    let mut notes = CategoryNotes::default();

    match category {
        Category::Documentation => {
            if !site.has_structured_data {
                notes.gap(
                    "Missing structured data (JSON-LD / Schema.org)",
                    "Add Schema.org structured data so agents can extract page semantics",
                );
            }
            if !site.has_open_graph {
                notes.gap(
                    "Missing Open Graph metadata",
                    "Add Open Graph tags (og:title, og:description, og:image)",
                );
            }
            if !site.has_twitter_card {
                notes.gap(
                    "Missing Twitter card metadata",
                    "Add twitter:card meta tags for rich link previews",
                );
            }
            if !site.has_sitemap {
                notes.gap(
                    "No sitemap.xml found",
                    "Publish a sitemap.xml so the site structure is discoverable",
                );
            }
            if !site.has_robots_txt {
                notes.gap(
                    "No robots.txt found",
                    "Add a robots.txt stating crawling rules for agents",
                );
            }
        }
        Category::InstructionClarity => {
            if site.technologies.is_empty() {
                notes.finding("No technologies detected");
            } else {
                notes.finding(format!(
                    "Technologies detected: {}",
                    site.technologies.join(", ")
                ));
            }
            if !site.has_contact_info {
                notes.gap(
                    "No contact information found",
                    "Publish contact information so agents can route inquiries",
                );
            }
            if site.social_links.is_empty() {
                notes.finding("No social media links found");
            }
            if !site.has_navigation {
                notes.gap(
                    "No navigation structure detected",
                    "Add clear navigation menus so agents can traverse the site",
                );
            }
        }
        Category::WorkflowAutomation => {
            if !site.is_mobile_friendly {
                notes.gap(
                    "Page is not mobile friendly",
                    "Add a responsive viewport and layout",
                );
            }
            if site.load_time_ms <= 0.0 {
                notes.finding("Page load time was not measured");
            } else if !site.loads_fast() {
                notes.gap(
                    format!("Slow page load ({:.0} ms)", site.load_time_ms),
                    "Reduce page load time below 3 seconds",
                );
            }
            if !site.has_service_worker {
                notes.finding("No service worker registered");
            }
        }
        Category::RiskCompliance => {
            if site.security_headers.is_empty() {
                notes.gap(
                    "No security headers detected",
                    "Configure security headers such as Content-Security-Policy and Strict-Transport-Security",
                );
            } else {
                notes.finding(format!(
                    "Security headers present: {}",
                    site.security_headers.join(", ")
                ));
            }
            if site.accessibility_score < MIN_ACCESSIBILITY {
                notes.gap(
                    format!(
                        "Low accessibility score ({:.0}/100)",
                        site.accessibility_score
                    ),
                    "Improve accessibility with alt text, form labels, and sufficient contrast",
                );
            }
            if !site.has_manifest {
                notes.finding("No web app manifest found");
            }
        }
        Category::IntegrationStructure => {
            notes.finding(format!(
                "Integration points detected: {} technologies, {} social links",
                site.technologies.len(),
                site.social_links.len()
            ));
            if site.social_links.is_empty() {
                notes.recommend("Link social profiles to strengthen cross-platform integration");
            }
            if !site.has_service_worker {
                notes.recommend("Register a service worker to support offline and background integrations");
            }
        }
        Category::FileSizeOptimization => {
            if site.content_length == 0 {
                notes.gap(
                    "No page content measured",
                    "Serve primary content as text that agents can read without executing scripts",
                );
            }
            if site.image_count == 0 {
                notes.finding("No images found");
            }
            if site.link_count == 0 {
                notes.gap("No links found", "Add internal links to related content");
            }
            match site.headings.h1 {
                0 => notes.gap(
                    "Missing H1 heading",
                    "Add a single descriptive H1 heading and a logical heading hierarchy",
                ),
                1 => {}
                n => notes.gap(
                    format!("Multiple H1 headings ({})", n),
                    "Use exactly one H1 heading per page",
                ),
            }
        }
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::criteria::MAX_RAW_POINTS;
    use crate::test_utils::full_website;

    #[test]
    fn full_website_maxes_every_category() {
        let site = full_website();
        for category in Category::all() {
            assert_eq!(raw_score(&site, *category).total(), MAX_RAW_POINTS, "{}", category);
        }
    }

    #[test]
    fn accessibility_threshold_is_inclusive() {
        let mut site = WebsiteAnalysis {
            accessibility_score: 60.0,
            ..Default::default()
        };
        assert_eq!(raw_score(&site, Category::RiskCompliance).total(), 6.0);
        site.accessibility_score = 59.9;
        assert_eq!(raw_score(&site, Category::RiskCompliance).total(), 0.0);
    }

    #[test]
    fn slow_load_loses_points_and_is_reported() {
        let site = WebsiteAnalysis {
            load_time_ms: 4500.0,
            is_mobile_friendly: true,
            ..Default::default()
        };
        assert_eq!(raw_score(&site, Category::WorkflowAutomation).total(), 6.0);
        let notes = notes(&site, Category::WorkflowAutomation);
        assert!(notes.findings.contains(&"Slow page load (4500 ms)".to_string()));
    }

    #[test]
    fn missing_markers_are_reported() {
        let site = WebsiteAnalysis::default();
        let notes = notes(&site, Category::Documentation);
        assert_eq!(notes.findings.len(), 5);
        assert_eq!(notes.recommendations.len(), 5);
        assert!(notes
            .findings
            .contains(&"Missing Open Graph metadata".to_string()));
    }

    #[test]
    fn multiple_h1_headings_are_flagged() {
        let mut site = full_website();
        site.headings.h1 = 3;
        let notes = notes(&site, Category::FileSizeOptimization);
        assert_eq!(notes.findings, vec!["Multiple H1 headings (3)".to_string()]);
    }
}
