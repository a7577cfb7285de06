//! Raw page data collected from a navigated page.
//!
//! Collection happens in the browser; classification happens in the
//! detectors. These types are the boundary between the two.

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSnapshot {
    /// De-duplicated computed `font-family` declarations
    pub families: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSample {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub natural_width: f64,
    #[serde(default)]
    pub natural_height: f64,
    #[serde(default)]
    pub rendered_width: f64,
    #[serde(default)]
    pub rendered_height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSnapshot {
    pub images: Vec<ImageSample>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaCandidate {
    pub text: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub class_name: String,
    /// Top offset of the bounding box relative to the document
    pub top: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaSnapshot {
    pub candidates: Vec<CtaCandidate>,
    pub viewport_height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    pub element_count: u64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Share of sampled first-viewport points landing on background
    #[serde(default)]
    pub whitespace_ratio: f64,
    /// Content elements per 10k px of the first viewport
    #[serde(default)]
    pub content_density: f64,
    /// Mean line-height / font-size over visible text
    #[serde(default)]
    pub avg_line_height: f64,
}

/// Social-proof categories swept by typed selector groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SocialProofType {
    Testimonial,
    Review,
    TrustBadge,
    CustomerCount,
    SocialMedia,
    Partnership,
    CaseStudy,
    NewsMention,
}

impl SocialProofType {
    pub const ALL: [SocialProofType; 8] = [
        SocialProofType::Testimonial,
        SocialProofType::Review,
        SocialProofType::TrustBadge,
        SocialProofType::CustomerCount,
        SocialProofType::SocialMedia,
        SocialProofType::Partnership,
        SocialProofType::CaseStudy,
        SocialProofType::NewsMention,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProofType::Testimonial => "testimonial",
            SocialProofType::Review => "review",
            SocialProofType::TrustBadge => "trust-badge",
            SocialProofType::CustomerCount => "customer-count",
            SocialProofType::SocialMedia => "social-media",
            SocialProofType::Partnership => "partnership",
            SocialProofType::CaseStudy => "case-study",
            SocialProofType::NewsMention => "news-mention",
        }
    }
}

/// CSS selectors swept for one social-proof type
#[derive(Debug, Clone, Serialize)]
pub struct SelectorGroup {
    pub kind: SocialProofType,
    pub selectors: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialCandidate {
    pub kind: SocialProofType,
    pub text: String,
    #[serde(default)]
    pub class_name: String,
    /// Selector that matched the element
    #[serde(default)]
    pub selector: String,
    /// A rating indicator (stars, rating value) sits in or near the element
    #[serde(default)]
    pub has_rating_indicator: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialProofSnapshot {
    pub candidates: Vec<SocialCandidate>,
}

/// A classified element kept for reporting; never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub dom_origin: String,
}

/// Read-only access to one navigated page
///
/// Implementations must tolerate concurrent calls: the orchestrator runs
/// all five collections against the same page at once.
#[async_trait]
pub trait PageProbe: Send + Sync {
    async fn fonts(&self) -> Result<FontSnapshot>;

    async fn images(&self) -> Result<ImageSnapshot>;

    async fn ctas(&self, selectors: &[&'static str]) -> Result<CtaSnapshot>;

    async fn layout(&self) -> Result<LayoutSnapshot>;

    async fn social_proof(&self, groups: &[SelectorGroup]) -> Result<SocialProofSnapshot>;
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cta_candidate_defaults() {
        let candidate: CtaCandidate =
            serde_json::from_str(r#"{"text":"Sign up","top":120.5}"#).unwrap();
        assert!(candidate.visible);
        assert_eq!(candidate.tag, "");
        assert!(candidate.href.is_none());
    }

    #[test]
    fn test_social_kind_uses_kebab_case() {
        let candidate: SocialCandidate = serde_json::from_str(
            r#"{"kind":"trust-badge","text":"SOC 2 certified","hasRatingIndicator":false}"#,
        )
        .unwrap();
        assert_eq!(candidate.kind, SocialProofType::TrustBadge);
        assert_eq!(candidate.kind.as_str(), "trust-badge");
    }

    #[test]
    fn test_detected_element_type_field() {
        let element = DetectedElement {
            kind: "review".to_string(),
            text: "5 stars".to_string(),
            dom_origin: ".review".to_string(),
        };
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "review");
        assert_eq!(json["domOrigin"], ".review");
    }
}
