//! Runs the six analyzers for one navigated page.
//!
//! The speed audit runs as its own task against the URL while the five
//! DOM collections run concurrently against the shared page. Results are
//! combined once everything has settled; a failed collection only zeroes
//! its own section.

use pagelens_core::analysis::{AnalysisResult, Analyzer, SectionResult};
use pagelens_core::audit::PerformanceAuditor;
use pagelens_core::snapshot::PageProbe;
use pagelens_core::{AnalysisRequest, Result};
use pagelens_detectors::dictionaries::cta::CTA_SELECTORS;
use pagelens_detectors::dictionaries::social::SELECTOR_GROUPS;
use pagelens_detectors::{
    CtaAnalyzer, FontAnalyzer, ImageAnalyzer, SocialProofAnalyzer, SpeedAnalyzer,
    WhitespaceAnalyzer,
};
use std::sync::Arc;

/// First host label, used as a self-reference term for testimonials
pub fn brand_term(host: &str) -> Option<String> {
    let host = host.strip_prefix("www.").unwrap_or(host);
    let label = host.split('.').next()?;
    (label.len() >= 3 && label.chars().any(|c| c.is_ascii_alphabetic()))
        .then(|| label.to_lowercase())
}

/// Analyze `probe` (already navigated to `request`) and audit its URL
pub async fn run_analysis(
    request: &AnalysisRequest,
    probe: &dyn PageProbe,
    auditor: Arc<dyn PerformanceAuditor>,
) -> AnalysisResult {
    // Audit the URL on its own task; it never touches the page
    let url = request.as_str().to_string();
    let speed_task = tokio::spawn(async move { auditor.audit(&url).await });

    tracing::debug!("Collecting page snapshots");
    let (fonts, images, ctas, layout, social) = futures::join!(
        probe.fonts(),
        probe.images(),
        probe.ctas(CTA_SELECTORS),
        probe.layout(),
        probe.social_proof(SELECTOR_GROUPS),
    );

    // Classify whatever was collected
    let social_analyzer = SocialProofAnalyzer::new().with_brand_terms(brand_term(request.host()));

    let fonts = settle(&FontAnalyzer, fonts);
    let images = settle(&ImageAnalyzer, images);
    let cta = settle(&CtaAnalyzer, ctas);
    let whitespace = settle(&WhitespaceAnalyzer, layout);
    let social_proof = settle(&social_analyzer, social);

    // Wait for the audit last
    let speed = match speed_task.await {
        Ok(Ok(report)) => SpeedAnalyzer.analyze(&report),
        Ok(Err(e)) => SpeedAnalyzer::failed(&e.to_string()),
        Err(e) => SpeedAnalyzer::failed(&format!("audit task ended unexpectedly: {}", e)),
    };

    let result = AnalysisResult::completed(speed, fonts, images, cta, whitespace, social_proof);
    tracing::info!("Analysis complete: overall score {}", result.overall_score);
    result
}

fn settle<A: Analyzer>(analyzer: &A, collected: Result<A::Input>) -> SectionResult {
    match collected {
        Ok(input) => analyzer.analyze(&input),
        Err(e) => {
            tracing::warn!("{} analysis unavailable: {}", analyzer.section(), e);
            SectionResult::unavailable(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_term() {
        assert_eq!(brand_term("www.acme.com").as_deref(), Some("acme"));
        assert_eq!(brand_term("app.example.io").as_deref(), Some("app"));
        assert_eq!(brand_term("127.0.0.1"), None);
        assert_eq!(brand_term("x.io"), None);
    }
}
