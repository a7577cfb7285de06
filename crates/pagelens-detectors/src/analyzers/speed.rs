use pagelens_core::analysis::{Analyzer, Section, SectionResult, clamp_score};
use pagelens_core::audit::{
    AuditReport, CUMULATIVE_LAYOUT_SHIFT, FIRST_CONTENTFUL_PAINT, LARGEST_CONTENTFUL_PAINT,
    SERVER_RESPONSE_TIME, SPEED_INDEX, TOTAL_BLOCKING_TIME,
};

/// Lab metrics pulled out of a performance audit
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpeedMetrics {
    pub lcp: Option<f64>,
    pub fcp: Option<f64>,
    pub cls: Option<f64>,
    pub tbt: Option<f64>,
    pub ttfb: Option<f64>,
    pub speed_index: Option<f64>,
}

impl SpeedMetrics {
    pub fn from_report(report: &AuditReport) -> Self {
        Self {
            lcp: report.numeric(LARGEST_CONTENTFUL_PAINT),
            fcp: report.numeric(FIRST_CONTENTFUL_PAINT),
            cls: report.numeric(CUMULATIVE_LAYOUT_SHIFT),
            tbt: report.numeric(TOTAL_BLOCKING_TIME),
            ttfb: report.numeric(SERVER_RESPONSE_TIME),
            speed_index: report.numeric(SPEED_INDEX),
        }
    }
}

/// (threshold, penalty) tiers, checked from the worst down
const LCP_TIERS: &[(f64, i64)] = &[(4000.0, 25), (2500.0, 15), (1500.0, 5)];
const FCP_TIERS: &[(f64, i64)] = &[(3000.0, 15), (1800.0, 10), (1000.0, 3)];
const CLS_TIERS: &[(f64, i64)] = &[(0.25, 25), (0.1, 15), (0.05, 5)];
const TBT_TIERS: &[(f64, i64)] = &[(600.0, 25), (300.0, 15), (150.0, 5)];
const SPEED_INDEX_TIERS: &[(f64, i64)] = &[(5800.0, 10), (4300.0, 5)];

fn tier_penalty(value: Option<f64>, tiers: &[(f64, i64)]) -> i64 {
    let Some(value) = value else {
        return 0;
    };
    tiers
        .iter()
        .find(|(threshold, _)| value > *threshold)
        .map(|(_, penalty)| *penalty)
        .unwrap_or(0)
}

/// Score derived from raw metrics when the report carries no category score
pub fn fallback_score(metrics: &SpeedMetrics) -> u8 {
    let penalty = tier_penalty(metrics.lcp, LCP_TIERS)
        + tier_penalty(metrics.fcp, FCP_TIERS)
        + tier_penalty(metrics.cls, CLS_TIERS)
        + tier_penalty(metrics.tbt, TBT_TIERS)
        + tier_penalty(metrics.speed_index, SPEED_INDEX_TIERS);
    clamp_score(100 - penalty)
}

pub struct SpeedAnalyzer;

impl SpeedAnalyzer {
    /// Zero-score result for an audit that could not run at all
    pub fn failed(reason: &str) -> SectionResult {
        tracing::warn!("Performance audit failed: {}", reason);
        let mut result = SectionResult::new(0);
        result.issue(format!("Performance audit unavailable: {}", reason));
        result
    }

    fn seconds(ms: f64) -> f64 {
        (ms / 10.0).round() / 100.0
    }
}

impl Analyzer for SpeedAnalyzer {
    type Input = AuditReport;

    fn section(&self) -> Section {
        Section::Speed
    }

    fn analyze(&self, report: &AuditReport) -> SectionResult {
        let metrics = SpeedMetrics::from_report(report);

        let score = match report.performance_score() {
            Some(probability) => clamp_score((probability * 100.0).round() as i64),
            None => {
                tracing::debug!("No performance category score, using metric fallback");
                fallback_score(&metrics)
            }
        };

        let mut result = SectionResult::new(score);
        result.metric("performanceScore", score);

        if let Some(lcp) = metrics.lcp {
            result.metric("lcp", lcp.round());
            result.metric("lcpSeconds", Self::seconds(lcp));
            if lcp > 2500.0 {
                result.issue(format!(
                    "Slow Largest Contentful Paint ({:.1}s): main content takes too long to render",
                    lcp / 1000.0
                ));
                result.recommend(
                    "Speed up the largest contentful paint by compressing the hero image and preloading it",
                );
            }
        }

        if let Some(fcp) = metrics.fcp {
            result.metric("fcp", fcp.round());
            result.metric("fcpSeconds", Self::seconds(fcp));
            if fcp > 1800.0 {
                result.issue(format!(
                    "Slow First Contentful Paint ({:.1}s)",
                    fcp / 1000.0
                ));
                result.recommend(
                    "Inline critical CSS and defer render-blocking scripts to improve first contentful paint",
                );
            }
        }

        if let Some(cls) = metrics.cls {
            result.metric("cls", (cls * 1000.0).round() / 1000.0);
            if cls > 0.1 {
                result.issue(format!(
                    "Layout shift of {:.2} moves content while the page loads",
                    cls
                ));
                result.recommend(
                    "Reserve space for images and embeds with explicit dimensions to reduce layout shift",
                );
            }
        }

        if let Some(tbt) = metrics.tbt {
            result.metric("tbt", tbt.round());
            if tbt > 300.0 {
                result.issue(format!(
                    "JavaScript blocks the main thread for {:.0}ms",
                    tbt
                ));
                result.recommend(
                    "Split long JavaScript tasks and load non-critical scripts later to cut blocking time",
                );
            }
        }

        if let Some(ttfb) = metrics.ttfb {
            result.metric("ttfb", ttfb.round());
            if ttfb > 600.0 {
                result.issue(format!("Slow server response time ({:.0}ms)", ttfb));
                result.recommend("Cache pages at the edge to improve server response time");
            }
        }

        if let Some(speed_index) = metrics.speed_index {
            result.metric("speedIndex", speed_index.round());
        }

        tracing::debug!(
            "Speed analysis: score {}, {} issues",
            result.score,
            result.issues.len()
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(value: serde_json::Value) -> AuditReport {
        AuditReport::from_value(value).unwrap()
    }

    fn lab(lcp: f64, fcp: f64, cls: f64, tbt: f64, si: f64) -> serde_json::Value {
        json!({
            "audits": {
                "largest-contentful-paint": { "numericValue": lcp },
                "first-contentful-paint": { "numericValue": fcp },
                "cumulative-layout-shift": { "numericValue": cls },
                "total-blocking-time": { "numericValue": tbt },
                "speed-index": { "numericValue": si },
            }
        })
    }

    #[test]
    fn test_fallback_all_bad_is_zero() {
        let result = SpeedAnalyzer.analyze(&report(lab(5000.0, 3500.0, 0.3, 700.0, 6000.0)));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_fallback_all_good_is_hundred() {
        let result = SpeedAnalyzer.analyze(&report(lab(1200.0, 800.0, 0.01, 50.0, 2000.0)));
        assert_eq!(result.score, 100);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_fallback_middle_tiers() {
        let metrics = SpeedMetrics {
            lcp: Some(3000.0),
            fcp: Some(1500.0),
            cls: Some(0.07),
            tbt: Some(200.0),
            ttfb: None,
            speed_index: Some(4500.0),
        };
        // 15 + 3 + 5 + 5 + 5
        assert_eq!(fallback_score(&metrics), 67);
    }

    #[test]
    fn test_category_score_wins_over_fallback() {
        let mut value = lab(5000.0, 3500.0, 0.3, 700.0, 6000.0);
        value["categories"] = json!({ "performance": { "score": 0.874 } });
        let result = SpeedAnalyzer.analyze(&report(value));
        assert_eq!(result.score, 87);
        assert_eq!(result.metrics["performanceScore"], json!(87));
    }

    #[test]
    fn test_metrics_and_issues() {
        let mut value = lab(3200.0, 900.0, 0.0, 100.0, 3000.0);
        value["audits"]["server-response-time"] = json!({ "numericValue": 750.0 });
        let result = SpeedAnalyzer.analyze(&report(value));

        assert_eq!(result.metrics["lcp"], json!(3200.0));
        assert_eq!(result.metrics["lcpSeconds"], json!(3.2));
        assert_eq!(result.metrics["ttfb"], json!(750.0));
        assert_eq!(result.issues.len(), 2);
        assert!(result.issues[0].contains("Largest Contentful Paint"));
        assert!(result.issues[1].contains("server response"));
    }

    #[test]
    fn test_failed_has_no_metrics() {
        let result = SpeedAnalyzer::failed("timed out after 60s");
        assert_eq!(result.score, 0);
        assert!(result.metrics.is_empty());
        assert_eq!(result.issues.len(), 1);
        assert!(result.issues[0].contains("timed out"));
    }
}
