mod section;

pub use section::Section;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Named signals emitted by an analyzer; also the recommendation context source
pub type Metrics = BTreeMap<String, Value>;

/// Qualitative severity attached to issues and recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "Low",
            Impact::Medium => "Medium",
            Impact::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Completed,
    Failed,
}

/// Uniform output of every dimension analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResult {
    pub score: u8,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: Metrics,
}

impl SectionResult {
    pub fn new(score: u8) -> Self {
        Self {
            score: score.min(100),
            issues: Vec::new(),
            recommendations: Vec::new(),
            metrics: Metrics::new(),
        }
    }

    /// Zero-score result used when a dimension could not be measured
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let mut result = Self::new(0);
        result
            .issues
            .push(format!("Analysis unavailable: {}", reason.into()));
        result
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.issues.push(text.into());
    }

    pub fn recommend(&mut self, text: impl Into<String>) {
        self.recommendations.push(text.into());
    }

    pub fn metric(&mut self, key: &str, value: impl Into<Value>) {
        self.metrics.insert(key.to_string(), value.into());
    }
}

impl Default for SectionResult {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Clamp a signed running score into the 0..=100 range
pub fn clamp_score(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}

/// The six dimension results plus the aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub speed: SectionResult,
    pub fonts: SectionResult,
    pub images: SectionResult,
    pub cta: SectionResult,
    pub whitespace: SectionResult,
    pub social_proof: SectionResult,
    pub overall_score: u8,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// A result awaiting its sections
    pub fn pending() -> Self {
        Self {
            speed: SectionResult::default(),
            fonts: SectionResult::default(),
            images: SectionResult::default(),
            cta: SectionResult::default(),
            whitespace: SectionResult::default(),
            social_proof: SectionResult::default(),
            overall_score: 0,
            status: Status::Pending,
            error: None,
        }
    }

    /// Assemble a completed result and compute the overall score
    pub fn completed(
        speed: SectionResult,
        fonts: SectionResult,
        images: SectionResult,
        cta: SectionResult,
        whitespace: SectionResult,
        social_proof: SectionResult,
    ) -> Self {
        let overall_score = overall_score(&[
            speed.score,
            fonts.score,
            images.score,
            cta.score,
            whitespace.score,
            social_proof.score,
        ]);

        Self {
            speed,
            fonts,
            images,
            cta,
            whitespace,
            social_proof,
            overall_score,
            status: Status::Completed,
            error: None,
        }
    }

    /// A failed request; no partial sections are exposed
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Status::Failed,
            error: Some(message.into()),
            ..Self::pending()
        }
    }

    pub fn section(&self, section: Section) -> &SectionResult {
        match section {
            Section::Speed => &self.speed,
            Section::Fonts => &self.fonts,
            Section::Images => &self.images,
            Section::Cta => &self.cta,
            Section::Whitespace => &self.whitespace,
            Section::SocialProof => &self.social_proof,
        }
    }

    /// All sections in display order
    pub fn sections(&self) -> Vec<(Section, &SectionResult)> {
        Section::ALL
            .iter()
            .map(|section| (*section, self.section(*section)))
            .collect()
    }
}

/// round(mean(scores)); zero for an empty slice
pub fn overall_score(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let total: f64 = scores.iter().map(|s| f64::from(*s)).sum();
    (total / scores.len() as f64).round() as u8
}

/// A dimension analyzer over a collected page snapshot
///
/// Analyzers are total: a page with nothing to classify yields empty
/// arrays and the corresponding score, never an error.
pub trait Analyzer {
    type Input;

    fn section(&self) -> Section;

    fn analyze(&self, input: &Self::Input) -> SectionResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(score: u8) -> SectionResult {
        SectionResult::new(score)
    }

    #[test]
    fn test_overall_score_rounds_mean() {
        assert_eq!(overall_score(&[85, 90, 75, 80, 95, 70]), 83);
        assert_eq!(overall_score(&[100, 0]), 50);
        assert_eq!(overall_score(&[]), 0);
    }

    #[test]
    fn test_completed_result_computes_overall() {
        let result = AnalysisResult::completed(
            scored(85),
            scored(90),
            scored(75),
            scored(80),
            scored(95),
            scored(70),
        );
        assert_eq!(result.overall_score, 83);
        assert_eq!(result.status, Status::Completed);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_failed_result_has_message_and_no_scores() {
        let result = AnalysisResult::failed("Navigation timed out");
        assert_eq!(result.status, Status::Failed);
        assert_eq!(result.error.as_deref(), Some("Navigation timed out"));
        assert_eq!(result.overall_score, 0);
        assert!(result.sections().iter().all(|(_, s)| s.score == 0));
    }

    #[test]
    fn test_section_result_serializes_stable_field_names() {
        let mut section = SectionResult::new(120);
        section.metric("webFontCount", 2);
        let json = serde_json::to_value(&section).unwrap();

        assert_eq!(json["score"], 100);
        assert!(json["issues"].as_array().unwrap().is_empty());
        assert!(json["recommendations"].as_array().unwrap().is_empty());
        assert_eq!(json["metrics"]["webFontCount"], 2);
    }

    #[test]
    fn test_empty_metrics_are_omitted() {
        let json = serde_json::to_value(SectionResult::new(50)).unwrap();
        assert!(json.get("metrics").is_none());
    }

    #[test]
    fn test_result_uses_camel_case() {
        let json = serde_json::to_value(AnalysisResult::pending()).unwrap();
        assert!(json.get("socialProof").is_some());
        assert!(json.get("overallScore").is_some());
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-15), 0);
        assert_eq!(clamp_score(140), 100);
        assert_eq!(clamp_score(72), 72);
    }

    #[test]
    fn test_unavailable_section() {
        let section = SectionResult::unavailable("script error");
        assert_eq!(section.score, 0);
        assert_eq!(section.issues, vec!["Analysis unavailable: script error"]);
    }
}
