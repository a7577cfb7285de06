use pagelens_core::analysis::{Analyzer, Section, SectionResult, clamp_score};
use pagelens_core::snapshot::LayoutSnapshot;

/// Elements per 10,000 px² of viewport
pub fn element_density(layout: &LayoutSnapshot) -> f64 {
    let area = layout.viewport_width * layout.viewport_height;
    if area <= 0.0 {
        return 0.0;
    }
    layout.element_count as f64 / (area / 10_000.0)
}

fn density_adjustment(density: f64) -> i64 {
    if density > 5.0 {
        -40
    } else if density > 3.0 {
        -20
    } else if density > 2.0 {
        -10
    } else {
        0
    }
}

/// Truncate to two decimals so display text never crosses a threshold
fn floor2(value: f64) -> f64 {
    ((value * 100.0) + 1e-9).floor() / 100.0
}

pub struct WhitespaceAnalyzer;

impl Analyzer for WhitespaceAnalyzer {
    type Input = LayoutSnapshot;

    fn section(&self) -> Section {
        Section::Whitespace
    }

    fn analyze(&self, layout: &LayoutSnapshot) -> SectionResult {
        let density = element_density(layout);
        let mut result = SectionResult::new(clamp_score(100 + density_adjustment(density)));

        let ratio = layout.whitespace_ratio.clamp(0.0, 1.0);
        let percent = (floor2(ratio) * 100.0).round();
        let line_height = layout.avg_line_height;

        // Threshold keys stay unrounded; recommendation conditions grade them
        result.metric("elementCount", layout.element_count);
        result.metric("density", density);
        result.metric("whitespaceRatio", ratio);
        result.metric("whitespacePercent", percent);
        result.metric("contentDensity", layout.content_density);
        result.metric("avgLineHeight", line_height);

        // Density drives the score
        if density > 5.0 {
            result.issue(format!(
                "Page is cluttered: {:.1} elements per 10k px of viewport",
                density
            ));
            result.recommend("Reduce layout density by removing nested wrappers and secondary widgets");
        } else if density > 3.0 {
            result.issue(format!(
                "Layout density is moderate ({:.1} elements per 10k px)",
                density
            ));
            result.recommend("Group related content into fewer sections to lower layout density");
        } else if density > 2.0 {
            result.issue(format!(
                "Layout is slightly dense ({:.1} elements per 10k px)",
                density
            ));
        }

        // Ratio and line-height only grade issues
        // A zero ratio means the sample grid was not measured
        if ratio > 0.0 && ratio < 0.25 {
            result.issue(format!(
                "Critical clutter: only {}% whitespace in the first viewport",
                percent
            ));
            result.recommend("Increase padding and margins around sections to add whitespace");
        } else if (0.25..0.35).contains(&ratio) {
            result.issue(format!(
                "First viewport feels cluttered with {}% whitespace",
                percent
            ));
            result.recommend("Increase padding and margins around sections to add whitespace");
        } else if (0.35..0.4).contains(&ratio) {
            result.issue(format!("Whitespace is slightly tight at {}%", percent));
            result.recommend("Add spacing between headings and body text");
        }

        if line_height > 0.0 && line_height < 1.3 {
            result.issue(format!(
                "Poor readability: line-height {:.2} is below 1.3",
                floor2(line_height)
            ));
            result.recommend("Set body line-height to at least 1.5");
        } else if (1.3..1.4).contains(&line_height) {
            result.issue(format!(
                "Line-height {:.2} is slightly tight",
                floor2(line_height)
            ));
            result.recommend("Set body line-height to at least 1.5");
        }

        tracing::debug!(
            "Whitespace analysis: {} elements, density {:.2}, ratio {:.2}",
            layout.element_count,
            density,
            ratio
        );
        result
    }
}
