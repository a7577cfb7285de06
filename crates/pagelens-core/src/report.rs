use crate::analysis::{AnalysisResult, Section, Status};
use crate::pairing::{IssueFix, pair_issues};
use crate::priority::{PriorityFix, PriorityInsight, priority_insight, top_fixes};
use crate::recommend::{Recommendation, RecommendationContext, RecommendationGenerator};
use crate::request::AnalysisRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Synthesized view of one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionReport {
    pub section: Section,
    pub name: String,
    pub score: u8,
    pub issue_fixes: Vec<IssueFix>,
    pub recommendations: Vec<Recommendation>,
}

/// Everything the caller hands on to persistence and rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub url: String,
    pub analyzed_at: DateTime<Utc>,
    pub result: AnalysisResult,
    pub sections: Vec<SectionReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<PriorityInsight>,
    pub top_fixes: Vec<PriorityFix>,
}

impl AnalysisReport {
    /// Pair issues, generate template recommendations and rank sections
    ///
    /// A failed result produces a report with no sections and no priority.
    pub fn build(request: &AnalysisRequest, result: AnalysisResult, top_n: usize) -> Self {
        let analyzed_at = Utc::now();

        if result.status != Status::Completed {
            return Self {
                url: request.to_string(),
                analyzed_at,
                result,
                sections: Vec::new(),
                priority: None,
                top_fixes: Vec::new(),
            };
        }

        let generator = RecommendationGenerator::builtin();
        let sections: Vec<SectionReport> = result
            .sections()
            .into_iter()
            .map(|(section, section_result)| {
                let context =
                    RecommendationContext::from_metrics(request.as_str(), &section_result.metrics);
                SectionReport {
                    section,
                    name: section.name().to_string(),
                    score: section_result.score,
                    issue_fixes: pair_issues(
                        &section_result.issues,
                        &section_result.recommendations,
                    ),
                    // Unmeasured sections carry no signals to match against
                    recommendations: if section_result.metrics.is_empty() {
                        Vec::new()
                    } else {
                        generator.generate_for(section, &context)
                    },
                }
            })
            .collect();

        let ranked = result.sections();
        let priority = priority_insight(&ranked);
        let top_fixes = top_fixes(&ranked, top_n);

        tracing::info!(
            "Report built for {}: overall {}, {} priority fixes",
            request,
            result.overall_score,
            top_fixes.len()
        );

        Self {
            url: request.to_string(),
            analyzed_at,
            sections,
            priority,
            top_fixes,
            result,
        }
    }

    pub fn section(&self, section: Section) -> Option<&SectionReport> {
        self.sections.iter().find(|s| s.section == section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SectionResult;

    fn request() -> AnalysisRequest {
        AnalysisRequest::parse("https://example.com").unwrap()
    }

    fn completed() -> AnalysisResult {
        let mut cta = SectionResult::new(50);
        cta.issue("No call-to-action visible above the fold");
        cta.recommend("Add a call-to-action button above the fold");
        cta.metric("ctasAboveFold", 0);
        cta.metric("ctaCount", 2);

        AnalysisResult::completed(
            SectionResult::new(90),
            SectionResult::new(100),
            SectionResult::new(95),
            cta,
            SectionResult::new(88),
            SectionResult::new(86),
        )
    }

    #[test]
    fn test_build_completed_report() {
        let report = AnalysisReport::build(&request(), completed(), 3);

        assert_eq!(report.sections.len(), 6);
        let priority = report.priority.as_ref().unwrap();
        assert_eq!(priority.section, Section::Cta);
        assert_eq!(priority.text, "Add a call-to-action button above the fold");

        // Everything else is above the collapse threshold
        assert_eq!(report.top_fixes.len(), 1);

        let cta = report.section(Section::Cta).unwrap();
        assert_eq!(cta.issue_fixes.len(), 1);
        assert!(cta.recommendations.iter().any(|r| r.id == "cta-none-above-fold"));

        // No metrics, no template output
        let fonts = report.section(Section::Fonts).unwrap();
        assert!(fonts.recommendations.is_empty());
    }

    #[test]
    fn test_build_failed_report() {
        let report = AnalysisReport::build(&request(), AnalysisResult::failed("boom"), 3);
        assert!(report.sections.is_empty());
        assert!(report.priority.is_none());
        assert!(report.top_fixes.is_empty());
        assert_eq!(report.result.status, Status::Failed);
    }

    #[test]
    fn test_report_json_shape() {
        let report = AnalysisReport::build(&request(), completed(), 3);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["url"], "https://example.com/");
        assert!(json["analyzedAt"].is_string());
        assert_eq!(json["result"]["status"], "completed");
        assert!(json["topFixes"].is_array());
        assert_eq!(json["priority"]["anchorId"], "cta-section");
    }
}
