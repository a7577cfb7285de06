use crate::dictionaries::fonts::is_system_token;
use pagelens_core::analysis::{Analyzer, Section, SectionResult, clamp_score};
use pagelens_core::snapshot::FontSnapshot;
use std::collections::BTreeSet;

/// One computed `font-family` declaration, split into its stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontStack {
    pub declaration: String,
    pub families: Vec<String>,
}

impl FontStack {
    pub fn parse(declaration: &str) -> Option<Self> {
        let families: Vec<String> = declaration
            .split(',')
            .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\'').trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();

        if families.is_empty() {
            return None;
        }

        Some(Self {
            declaration: families.join(", "),
            families,
        })
    }

    /// Only OS-provided and generic tokens
    pub fn is_system(&self) -> bool {
        self.families
            .iter()
            .all(|f| is_system_token(&f.to_lowercase()))
    }

    /// First family that has to be downloaded
    pub fn primary_web_family(&self) -> Option<&str> {
        self.families
            .iter()
            .find(|f| !is_system_token(&f.to_lowercase()))
            .map(String::as_str)
    }
}

/// Penalty for `count` web fonts: 5*k for the k-th beyond the first
fn web_font_penalty(count: usize) -> i64 {
    (1..count as i64).map(|k| 5 * k).sum()
}

fn system_stack_penalty(count: usize) -> i64 {
    2 * count.saturating_sub(3) as i64
}

pub struct FontAnalyzer;

impl Analyzer for FontAnalyzer {
    type Input = FontSnapshot;

    fn section(&self) -> Section {
        Section::Fonts
    }

    fn analyze(&self, snapshot: &FontSnapshot) -> SectionResult {
        let mut seen = BTreeSet::new();
        let stacks: Vec<FontStack> = snapshot
            .families
            .iter()
            .filter_map(|d| FontStack::parse(d))
            .filter(|s| seen.insert(s.declaration.to_lowercase()))
            .collect();

        let system_count = stacks.iter().filter(|s| s.is_system()).count();

        // Distinct web families by primary name
        let mut web_fonts: Vec<String> = Vec::new();
        for stack in &stacks {
            if let Some(family) = stack.primary_web_family()
                && !web_fonts.iter().any(|w| w.eq_ignore_ascii_case(family))
            {
                web_fonts.push(family.to_string());
            }
        }

        let penalty = web_font_penalty(web_fonts.len()) + system_stack_penalty(system_count);
        let mut result = SectionResult::new(clamp_score(100 - penalty));

        result.metric("fontCount", stacks.len());
        result.metric("webFontCount", web_fonts.len());
        result.metric("systemFontCount", system_count);
        result.metric(
            "fontFamilies",
            stacks
                .iter()
                .map(|s| s.declaration.clone())
                .collect::<Vec<_>>(),
        );
        result.metric("webFonts", web_fonts.clone());

        match web_fonts.len() {
            0 | 1 => {}
            2 => {
                result.issue(format!(
                    "Two web fonts ({}) could be consolidated into one family",
                    web_fonts.join(", ")
                ));
                result.recommend("Consider a single web font family with weights for typography contrast");
            }
            n => {
                result.issue(format!(
                    "Too many web fonts ({}) slow page load and fragment typography",
                    n
                ));
                result.recommend(
                    "Limit typography to one or two web fonts and preload them to speed up load",
                );
            }
        }

        if stacks.len() > 4 {
            result.issue(format!(
                "{} distinct font stacks make typography inconsistent",
                stacks.len()
            ));
            result.recommend("Define fonts once in a shared typography scale and reuse it");
        }

        if !web_fonts.is_empty() {
            result.recommend("Use font-display: swap so text renders while web fonts load");
        }

        tracing::debug!(
            "Font analysis: {} stacks, {} web fonts, {} system stacks",
            stacks.len(),
            web_fonts.len(),
            system_count
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(families: &[&str]) -> FontSnapshot {
        FontSnapshot {
            families: families.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_strips_quotes() {
        let stack = FontStack::parse(r#""Inter", 'Helvetica Neue', sans-serif"#).unwrap();
        assert_eq!(stack.families, vec!["Inter", "Helvetica Neue", "sans-serif"]);
        assert_eq!(stack.primary_web_family(), Some("Inter"));
        assert!(!stack.is_system());
        assert!(FontStack::parse(" , ").is_none());
    }

    #[test]
    fn test_single_system_stack_scores_high() {
        let result = FontAnalyzer.analyze(&snapshot(&[
            "-apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, Arial, sans-serif",
        ]));
        assert!(result.score >= 95);
        assert_eq!(result.metrics["webFontCount"], json!(0));
        assert_eq!(result.metrics["systemFontCount"], json!(1));
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_web_font_penalty_grows() {
        assert_eq!(web_font_penalty(0), 0);
        assert_eq!(web_font_penalty(1), 0);
        assert_eq!(web_font_penalty(2), 5);
        assert_eq!(web_font_penalty(3), 15);
        assert_eq!(web_font_penalty(4), 30);
    }

    #[test]
    fn test_four_web_fonts_score_below_ninety() {
        let result = FontAnalyzer.analyze(&snapshot(&[
            "Inter, sans-serif",
            "\"Playfair Display\", serif",
            "Lato, Arial",
            "\"Fira Code\", monospace",
        ]));
        assert_eq!(result.score, 70);
        assert!(result.score < 90);
        assert_eq!(result.metrics["webFonts"], json!(["Inter", "Playfair Display", "Lato", "Fira Code"]));
        assert!(result.issues.iter().any(|i| i.starts_with("Too many web fonts")));
    }

    #[test]
    fn test_same_web_family_counts_once() {
        let result = FontAnalyzer.analyze(&snapshot(&["Inter, sans-serif", "Inter, Arial"]));
        assert_eq!(result.metrics["fontCount"], json!(2));
        assert_eq!(result.metrics["webFontCount"], json!(1));
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_many_system_stacks_penalized() {
        let result = FontAnalyzer.analyze(&snapshot(&[
            "Arial", "Georgia", "Verdana", "Tahoma", "monospace",
        ]));
        assert_eq!(result.score, 96);
        assert!(result.issues.iter().any(|i| i.contains("font stacks")));
    }

    #[test]
    fn test_empty_page() {
        let result = FontAnalyzer.analyze(&FontSnapshot::default());
        assert_eq!(result.score, 100);
        assert_eq!(result.metrics["fontCount"], json!(0));
    }
}
