//! Template-driven recommendation generation.
//!
//! Each template carries a data-only [`Condition`] evaluated against a
//! [`RecommendationContext`], and one or more wording variants. Variant
//! choice is a pure function of `(url, template id)` so the same page always
//! reads the same way.

mod condition;
mod context;
mod templates;

pub use condition::Condition;
pub use context::{ContextValue, RecommendationContext, format_number};
pub use templates::builtin_templates;

use crate::analysis::{Impact, Section};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern");
}

/// A recommendation rule with wording variants
#[derive(Debug, Clone)]
pub struct RecommendationTemplate {
    pub id: &'static str,
    pub category: Section,
    pub impact: Impact,
    pub condition: Condition,
    /// Wording variants; never empty
    pub templates: Vec<&'static str>,
    pub affected_area: Option<&'static str>,
}

/// A worded recommendation produced from a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub category: Section,
    pub impact: Impact,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_area: Option<String>,
}

/// 32-bit FNV-1a over the UTF-8 bytes of `input`
///
/// Offset basis 0x811c9dc5, prime 0x01000193.
pub fn fnv1a_32(input: &str) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    input.bytes().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(PRIME)
    })
}

/// Index of the variant to use for `template_id` on `url`
pub fn select_variant(url: &str, template_id: &str, variant_count: usize) -> usize {
    if variant_count <= 1 {
        return 0;
    }
    fnv1a_32(&format!("{}:{}", url, template_id)) as usize % variant_count
}

/// Replace `{{name}}` placeholders with rendered context values
pub fn interpolate(template: &str, context: &RecommendationContext) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures| context.render(&caps[1]))
        .into_owned()
}

pub struct RecommendationGenerator<'a> {
    templates: &'a [RecommendationTemplate],
}

impl RecommendationGenerator<'static> {
    /// Generator over the built-in template table
    pub fn builtin() -> Self {
        Self::new(builtin_templates())
    }
}

impl<'a> RecommendationGenerator<'a> {
    pub fn new(templates: &'a [RecommendationTemplate]) -> Self {
        Self { templates }
    }

    /// Evaluate every template against the context, High impact first
    pub fn generate(&self, context: &RecommendationContext) -> Vec<Recommendation> {
        self.generate_matching(context, |_| true)
    }

    /// Evaluate only the templates of one section
    pub fn generate_for(
        &self,
        section: Section,
        context: &RecommendationContext,
    ) -> Vec<Recommendation> {
        self.generate_matching(context, |template| template.category == section)
    }

    fn generate_matching<F>(&self, context: &RecommendationContext, include: F) -> Vec<Recommendation>
    where
        F: Fn(&RecommendationTemplate) -> bool,
    {
        let mut recommendations: Vec<Recommendation> = self
            .templates
            .iter()
            .filter(|template| include(template))
            .filter(|template| !template.templates.is_empty())
            .filter(|template| template.condition.evaluate(context))
            .map(|template| {
                let index =
                    select_variant(context.url(), template.id, template.templates.len());
                Recommendation {
                    id: template.id.to_string(),
                    category: template.category,
                    impact: template.impact,
                    text: interpolate(template.templates[index], context),
                    affected_area: template.affected_area.map(str::to_string),
                }
            })
            .collect();

        // Stable: template order is kept within an impact level
        recommendations.sort_by(|a, b| b.impact.cmp(&a.impact));

        tracing::debug!(
            "Generated {} recommendations for {}",
            recommendations.len(),
            context.url()
        );

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(
        id: &'static str,
        impact: Impact,
        condition: Condition,
        templates: Vec<&'static str>,
    ) -> RecommendationTemplate {
        RecommendationTemplate {
            id,
            category: Section::Fonts,
            impact,
            condition,
            templates,
            affected_area: None,
        }
    }

    #[test]
    fn test_fnv1a_reference_values() {
        assert_eq!(fnv1a_32(""), 0x811c_9dc5);
        assert_eq!(fnv1a_32("a"), 0xe40c_292c);
        assert_eq!(fnv1a_32("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_select_variant_in_range() {
        for url in ["https://a.test", "https://b.test", "https://c.test/x"] {
            assert!(select_variant(url, "cta-weak", 3) < 3);
        }
        assert_eq!(select_variant("https://a.test", "one", 1), 0);
        assert_eq!(select_variant("https://a.test", "none", 0), 0);
    }

    #[test]
    fn test_interpolate() {
        let context = RecommendationContext::new("u")
            .with("webFontCount", 4i64)
            .with("ratio", 0.3333);
        assert_eq!(
            interpolate("Load {{webFontCount}} fonts at {{ ratio }} and {{missing}}", &context),
            "Load 4 fonts at 0.33 and 0"
        );
    }

    #[test]
    fn test_generate_orders_by_impact_and_filters() {
        let templates = vec![
            template("low", Impact::Low, Condition::Always, vec!["low"]),
            template("skipped", Impact::High, Condition::Gt("x", 10.0), vec!["skipped"]),
            template("high", Impact::High, Condition::Always, vec!["high"]),
            template("medium", Impact::Medium, Condition::Always, vec!["medium"]),
            template("high-2", Impact::High, Condition::Always, vec!["high 2"]),
        ];
        let generator = RecommendationGenerator::new(&templates);
        let recs = generator.generate(&RecommendationContext::new("https://a.test"));

        let ids: Vec<_> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "high-2", "medium", "low"]);
    }

    #[test]
    fn test_template_without_variants_is_skipped() {
        let templates = vec![template("empty", Impact::High, Condition::Always, vec![])];
        let generator = RecommendationGenerator::new(&templates);
        assert!(generator.generate(&RecommendationContext::new("u")).is_empty());
    }

    #[test]
    fn test_variant_selection_is_deterministic() {
        let templates = vec![template(
            "fonts-variant",
            Impact::Medium,
            Condition::Always,
            vec!["first {{n}}", "second {{n}}", "third {{n}}"],
        )];
        let generator = RecommendationGenerator::new(&templates);
        let context = RecommendationContext::new("https://example.com").with("n", 2i64);

        let first = generator.generate(&context);
        let second = generator.generate(&context);
        assert_eq!(first, second);
        assert!(["first 2", "second 2", "third 2"].contains(&first[0].text.as_str()));
    }

    #[test]
    fn test_different_urls_pick_valid_variants() {
        let templates = vec![template(
            "fonts-variant",
            Impact::Medium,
            Condition::Always,
            vec!["a", "b", "c"],
        )];
        let generator = RecommendationGenerator::new(&templates);

        let mut seen = std::collections::HashSet::new();
        for i in 0..30 {
            let context = RecommendationContext::new(format!("https://site{}.test", i));
            let text = generator.generate(&context)[0].text.clone();
            assert!(["a", "b", "c"].contains(&text.as_str()));
            seen.insert(text);
        }
        assert!(seen.len() > 1, "30 URLs should not all hash to one variant");
    }
}
