use super::{Condition, RecommendationTemplate};
use crate::analysis::{Impact, Section};
use lazy_static::lazy_static;

lazy_static! {
    static ref BUILTIN_TEMPLATES: Vec<RecommendationTemplate> = {
        let mut templates = Vec::new();
        templates.extend(speed_templates());
        templates.extend(font_templates());
        templates.extend(image_templates());
        templates.extend(cta_templates());
        templates.extend(whitespace_templates());
        templates.extend(social_proof_templates());
        templates
    };
}

/// The built-in template table, in evaluation order
pub fn builtin_templates() -> &'static [RecommendationTemplate] {
    &BUILTIN_TEMPLATES
}

fn speed_templates() -> Vec<RecommendationTemplate> {
    vec![
        RecommendationTemplate {
            id: "speed-lcp-slow",
            category: Section::Speed,
            impact: Impact::High,
            condition: Condition::Gt("lcp", 2500.0),
            templates: vec![
                "Your largest content takes {{lcpSeconds}}s to appear. Compress and preload the hero image so it renders in under 2.5s.",
                "Largest Contentful Paint is {{lcpSeconds}}s. Serve the hero asset from a CDN and preload it to get below 2.5s.",
                "Visitors wait {{lcpSeconds}}s for the main content. Trim render-blocking CSS and prioritise the hero image.",
            ],
            affected_area: Some("Hero section"),
        },
        RecommendationTemplate {
            id: "speed-tbt-high",
            category: Section::Speed,
            impact: Impact::High,
            condition: Condition::Gt("tbt", 300.0),
            templates: vec![
                "Scripts block interaction for {{tbt}}ms. Defer non-critical JavaScript and split large bundles.",
                "Total Blocking Time is {{tbt}}ms. Move third-party tags after load and break up long tasks.",
            ],
            affected_area: Some("JavaScript"),
        },
        RecommendationTemplate {
            id: "speed-cls",
            category: Section::Speed,
            impact: Impact::Medium,
            condition: Condition::Gt("cls", 0.1),
            templates: vec![
                "Layout shift scores {{cls}}. Reserve space for images, embeds and banners with explicit width and height.",
                "Content jumps while loading (CLS {{cls}}). Set dimensions on media and avoid inserting content above existing content.",
            ],
            affected_area: Some("Page layout"),
        },
        RecommendationTemplate {
            id: "speed-fcp",
            category: Section::Speed,
            impact: Impact::Medium,
            condition: Condition::Gt("fcp", 1800.0),
            templates: vec![
                "First paint happens after {{fcpSeconds}}s. Inline critical CSS and preconnect to required origins.",
                "The page stays blank for {{fcpSeconds}}s. Reduce render-blocking resources in the document head.",
            ],
            affected_area: Some("Document head"),
        },
        RecommendationTemplate {
            id: "speed-ttfb",
            category: Section::Speed,
            impact: Impact::Medium,
            condition: Condition::Gt("ttfb", 600.0),
            templates: vec![
                "The server takes {{ttfb}}ms to respond. Add page caching or a CDN in front of the origin.",
                "Server response time is {{ttfb}}ms. Cache rendered pages at the edge to cut it below 600ms.",
            ],
            affected_area: Some("Server"),
        },
        RecommendationTemplate {
            id: "speed-healthy",
            category: Section::Speed,
            impact: Impact::Low,
            condition: Condition::Gte("performanceScore", 90.0),
            templates: vec![
                "Performance is strong at {{performanceScore}}/100. Re-check after adding new scripts or third-party tags.",
                "A {{performanceScore}}/100 performance score is excellent. Set a performance budget to keep it there.",
            ],
            affected_area: None,
        },
    ]
}

fn font_templates() -> Vec<RecommendationTemplate> {
    vec![
        RecommendationTemplate {
            id: "fonts-too-many-web",
            category: Section::Fonts,
            impact: Impact::High,
            condition: Condition::Gte("webFontCount", 3.0),
            templates: vec![
                "You load {{webFontCount}} web fonts ({{webFonts}}). Cut down to one or two families to speed up rendering.",
                "{{webFontCount}} web font families ({{webFonts}}) slow the first render. Keep one for headings and one for body text.",
            ],
            affected_area: Some("Typography"),
        },
        RecommendationTemplate {
            id: "fonts-two-web",
            category: Section::Fonts,
            impact: Impact::Medium,
            condition: Condition::Between("webFontCount", 2.0, 3.0),
            templates: vec![
                "Two web fonts is the practical limit. Preload the primary family and subset both to the characters you use.",
                "You are at two web fonts. Preload the one used above the fold and avoid adding more.",
            ],
            affected_area: Some("Typography"),
        },
        RecommendationTemplate {
            id: "fonts-many-stacks",
            category: Section::Fonts,
            impact: Impact::Medium,
            condition: Condition::Gt("fontCount", 4.0),
            templates: vec![
                "{{fontCount}} different font stacks are in use. Consolidate into a heading stack and a body stack for a consistent look.",
                "Typography is fragmented across {{fontCount}} font stacks. Define two type styles and apply them everywhere.",
            ],
            affected_area: Some("Typography"),
        },
        RecommendationTemplate {
            id: "fonts-display-swap",
            category: Section::Fonts,
            impact: Impact::Low,
            condition: Condition::Gte("webFontCount", 1.0),
            templates: vec![
                "Add font-display: swap to your @font-face rules so text shows immediately while {{webFonts}} loads.",
                "Make sure {{webFonts}} uses font-display: swap to avoid invisible text during loading.",
            ],
            affected_area: Some("Typography"),
        },
        RecommendationTemplate {
            id: "fonts-system-only",
            category: Section::Fonts,
            impact: Impact::Low,
            condition: Condition::All(vec![
                Condition::Lte("webFontCount", 0.0),
                Condition::Gte("fontCount", 1.0),
            ]),
            templates: vec![
                "System fonts keep the page fast. One brand web font for headings could add personality without much cost.",
            ],
            affected_area: None,
        },
    ]
}

fn image_templates() -> Vec<RecommendationTemplate> {
    vec![
        RecommendationTemplate {
            id: "images-missing-alt-many",
            category: Section::Images,
            impact: Impact::High,
            condition: Condition::Gte("missingAlt", 5.0),
            templates: vec![
                "{{missingAlt}} images have no alt text. Describe each one so screen readers and search engines understand them.",
                "Add alt text to the {{missingAlt}} images that lack it; this is both an accessibility and an SEO fix.",
            ],
            affected_area: Some("Images"),
        },
        RecommendationTemplate {
            id: "images-missing-alt",
            category: Section::Images,
            impact: Impact::Medium,
            condition: Condition::Between("missingAlt", 1.0, 5.0),
            templates: vec![
                "{{missingAlt}} of {{totalImages}} images are missing alt text. Add short, descriptive alt attributes.",
                "Give the {{missingAlt}} unlabeled images a descriptive alt attribute.",
            ],
            affected_area: Some("Images"),
        },
        RecommendationTemplate {
            id: "images-non-optimized",
            category: Section::Images,
            impact: Impact::High,
            condition: Condition::Gte("nonOptimizedImages", 1.0),
            templates: vec![
                "{{nonOptimizedImages}} images use outdated formats. Convert them to WebP or AVIF.",
                "Replace the {{nonOptimizedImages}} GIF/BMP-style images with WebP, AVIF or a video where they animate.",
            ],
            affected_area: Some("Images"),
        },
        RecommendationTemplate {
            id: "images-legacy-format",
            category: Section::Images,
            impact: Impact::Medium,
            condition: Condition::Gte("legacyFormatImages", 3.0),
            templates: vec![
                "{{legacyFormatImages}} of {{totalImages}} images are JPEG or PNG. Serving WebP or AVIF usually cuts their weight by a quarter or more.",
                "Convert the {{legacyFormatImages}} JPEG/PNG images to WebP or AVIF with a picture element fallback.",
            ],
            affected_area: Some("Images"),
        },
        RecommendationTemplate {
            id: "images-oversized",
            category: Section::Images,
            impact: Impact::Medium,
            condition: Condition::Gte("oversizedImages", 1.0),
            templates: vec![
                "{{oversizedImages}} images are larger than their displayed size. Resize them or serve responsive versions with srcset.",
                "Stop shipping pixels nobody sees: {{oversizedImages}} images exceed their rendered size.",
            ],
            affected_area: Some("Images"),
        },
        RecommendationTemplate {
            id: "images-none",
            category: Section::Images,
            impact: Impact::Low,
            condition: Condition::Lte("totalImages", 0.0),
            templates: vec![
                "No images found. A relevant hero image or product shot helps visitors understand the offer faster.",
            ],
            affected_area: Some("Hero section"),
        },
    ]
}

fn cta_templates() -> Vec<RecommendationTemplate> {
    vec![
        RecommendationTemplate {
            id: "cta-none-above-fold",
            category: Section::Cta,
            impact: Impact::High,
            condition: Condition::Lte("ctasAboveFold", 0.0),
            templates: vec![
                "Add a prominent call-to-action button above the fold so visitors know the next step without scrolling.",
                "Visitors see no call-to-action on first load. Place one clear primary button in the hero section.",
                "Put your main call-to-action in the first screen; right now it only appears after scrolling, if at all.",
            ],
            affected_area: Some("Hero section"),
        },
        RecommendationTemplate {
            id: "cta-no-strong-action",
            category: Section::Cta,
            impact: Impact::High,
            condition: Condition::All(vec![
                Condition::Gte("ctaCount", 1.0),
                Condition::Lte("strongCtaCount", 0.0),
            ]),
            templates: vec![
                "None of your {{ctaCount}} CTAs uses a strong action verb. Lead with outcomes like 'Start free trial' or 'Get started'.",
                "Rewrite your CTA buttons around a clear action such as 'Book a demo' or 'Join waitlist'.",
            ],
            affected_area: Some("Buttons"),
        },
        RecommendationTemplate {
            id: "cta-too-many",
            category: Section::Cta,
            impact: Impact::Medium,
            condition: Condition::Gt("ctasAboveFold", 2.0),
            templates: vec![
                "{{ctasAboveFold}} CTAs compete above the fold. Pick one primary action and style the rest as secondary.",
                "Too many choices above the fold ({{ctasAboveFold}} CTAs). Highlight a single primary button.",
            ],
            affected_area: Some("Hero section"),
        },
        RecommendationTemplate {
            id: "cta-weak-wording",
            category: Section::Cta,
            impact: Impact::Medium,
            condition: Condition::Gte("weakCtaCount", 1.0),
            templates: vec![
                "Replace vague CTA text like {{weakCtaTexts}} with outcome-driven wording such as 'Start free trial'.",
                "CTA labels such as {{weakCtaTexts}} do not say what happens next. Name the benefit instead.",
            ],
            affected_area: Some("Buttons"),
        },
        RecommendationTemplate {
            id: "cta-healthy",
            category: Section::Cta,
            impact: Impact::Low,
            condition: Condition::All(vec![
                Condition::Between("ctasAboveFold", 1.0, 3.0),
                Condition::Gte("strongCtaCount", 1.0),
            ]),
            templates: vec![
                "Your primary CTA is visible above the fold. A/B test its wording and color to lift conversions further.",
                "Good CTA placement. Try adding a short line of supporting copy under the button to reduce hesitation.",
            ],
            affected_area: Some("Buttons"),
        },
    ]
}

fn whitespace_templates() -> Vec<RecommendationTemplate> {
    vec![
        RecommendationTemplate {
            id: "whitespace-critical-clutter",
            category: Section::Whitespace,
            impact: Impact::High,
            condition: Condition::All(vec![
                Condition::Gt("whitespaceRatio", 0.0),
                Condition::Lt("whitespaceRatio", 0.25),
            ]),
            templates: vec![
                "The first screen is critically cluttered: only {{whitespacePercent}}% is breathing room. Remove secondary elements and increase section padding.",
                "Only {{whitespacePercent}}% of the first screen is whitespace. Cut competing elements and double the spacing between blocks.",
            ],
            affected_area: Some("Page layout"),
        },
        RecommendationTemplate {
            id: "whitespace-tight",
            category: Section::Whitespace,
            impact: Impact::High,
            condition: Condition::Between("whitespaceRatio", 0.25, 0.35),
            templates: vec![
                "Whitespace covers {{whitespacePercent}}% of the first screen. Increase margins around headings and between sections.",
                "The layout feels tight at {{whitespacePercent}}% whitespace. Give key content more room to stand out.",
            ],
            affected_area: Some("Page layout"),
        },
        RecommendationTemplate {
            id: "whitespace-moderate",
            category: Section::Whitespace,
            impact: Impact::Medium,
            condition: Condition::Between("whitespaceRatio", 0.35, 0.4),
            templates: vec![
                "Whitespace is close to healthy at {{whitespacePercent}}%. A little more padding around the CTA would help it stand out.",
            ],
            affected_area: Some("Page layout"),
        },
        RecommendationTemplate {
            id: "line-height-tight",
            category: Section::Whitespace,
            impact: Impact::High,
            condition: Condition::All(vec![
                Condition::Gt("avgLineHeight", 0.0),
                Condition::Lt("avgLineHeight", 1.3),
            ]),
            templates: vec![
                "Body text line-height averages {{avgLineHeight}}. Raise it to 1.5 to make paragraphs easier to read.",
                "Lines of text are cramped (line-height {{avgLineHeight}}). Use 1.4 to 1.6 for body copy.",
            ],
            affected_area: Some("Typography"),
        },
        RecommendationTemplate {
            id: "line-height-moderate",
            category: Section::Whitespace,
            impact: Impact::Medium,
            condition: Condition::Between("avgLineHeight", 1.3, 1.4),
            templates: vec![
                "Line-height of {{avgLineHeight}} is slightly tight. Nudge body text to 1.5 for comfortable reading.",
            ],
            affected_area: Some("Typography"),
        },
        RecommendationTemplate {
            id: "whitespace-dense-dom",
            category: Section::Whitespace,
            impact: Impact::Medium,
            condition: Condition::Gt("density", 5.0),
            templates: vec![
                "The page packs {{density}} elements per 10,000px of viewport. Break long sections apart and remove decorative wrappers.",
                "Element density is {{density}} per 10,000px. Simplify the markup and split dense sections.",
            ],
            affected_area: Some("Page layout"),
        },
    ]
}

fn social_proof_templates() -> Vec<RecommendationTemplate> {
    vec![
        RecommendationTemplate {
            id: "social-none",
            category: Section::SocialProof,
            impact: Impact::High,
            condition: Condition::Lte("totalElements", 0.0),
            templates: vec![
                "No social proof found. Add customer testimonials, review ratings or logos of companies you work with.",
                "Visitors have no evidence others trust you. Add two or three short customer quotes near your main CTA.",
            ],
            affected_area: Some("Social proof"),
        },
        RecommendationTemplate {
            id: "social-no-testimonials",
            category: Section::SocialProof,
            impact: Impact::Medium,
            condition: Condition::All(vec![
                Condition::Gte("totalElements", 1.0),
                Condition::Lte("testimonials", 0.0),
            ]),
            templates: vec![
                "Add real customer testimonials with names and photos; quotes persuade more than logos alone.",
                "Include a few customer quotes with a name and role to complement your existing trust signals.",
            ],
            affected_area: Some("Social proof"),
        },
        RecommendationTemplate {
            id: "social-no-trust-badges",
            category: Section::SocialProof,
            impact: Impact::Low,
            condition: Condition::Lte("trustBadges", 0.0),
            templates: vec![
                "Show trust badges such as security certifications or a money-back guarantee near checkout or signup.",
            ],
            affected_area: Some("Social proof"),
        },
        RecommendationTemplate {
            id: "social-no-numbers",
            category: Section::SocialProof,
            impact: Impact::Low,
            condition: Condition::Lte("customerCounts", 0.0),
            templates: vec![
                "Quantify your traction: a line such as '10,000+ teams use us' builds instant credibility.",
                "Add a customer count or usage number to make your popularity concrete.",
            ],
            affected_area: Some("Social proof"),
        },
        RecommendationTemplate {
            id: "social-strong",
            category: Section::SocialProof,
            impact: Impact::Low,
            condition: Condition::Gte("totalElements", 5.0),
            templates: vec![
                "Strong social proof with {{totalElements}} signals ({{detectedTypes}}). Place the best one right next to your primary CTA.",
            ],
            affected_area: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::{RecommendationContext, RecommendationGenerator};
    use std::collections::HashSet;

    #[test]
    fn test_every_template_has_variants() {
        for template in builtin_templates() {
            assert!(
                !template.templates.is_empty(),
                "template {} has no variants",
                template.id
            );
        }
    }

    #[test]
    fn test_template_ids_are_unique() {
        let ids: HashSet<_> = builtin_templates().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), builtin_templates().len());
    }

    #[test]
    fn test_every_section_has_templates() {
        for section in Section::ALL {
            assert!(
                builtin_templates().iter().any(|t| t.category == section),
                "no templates for {}",
                section
            );
        }
    }

    #[test]
    fn test_whitespace_severity_thresholds() {
        let generator = RecommendationGenerator::builtin();

        let cases = [
            (0.2, "whitespace-critical-clutter", Impact::High),
            (0.3, "whitespace-tight", Impact::High),
            (0.37, "whitespace-moderate", Impact::Medium),
        ];
        for (ratio, expected_id, expected_impact) in cases {
            let context = RecommendationContext::new("https://example.com")
                .with("whitespaceRatio", ratio)
                .with("whitespacePercent", (ratio * 100.0).round());
            let recs = generator.generate_for(Section::Whitespace, &context);
            let rec = recs
                .iter()
                .find(|r| r.id == expected_id)
                .unwrap_or_else(|| panic!("missing {} for ratio {}", expected_id, ratio));
            assert_eq!(rec.impact, expected_impact);
        }

        let healthy = RecommendationContext::new("https://example.com").with("whitespaceRatio", 0.5);
        let recs = generator.generate_for(Section::Whitespace, &healthy);
        assert!(recs.iter().all(|r| !r.id.starts_with("whitespace-")));
    }

    #[test]
    fn test_line_height_thresholds() {
        let generator = RecommendationGenerator::builtin();

        let tight = RecommendationContext::new("u").with("avgLineHeight", 1.2);
        let recs = generator.generate_for(Section::Whitespace, &tight);
        assert!(recs.iter().any(|r| r.id == "line-height-tight" && r.impact == Impact::High));

        let moderate = RecommendationContext::new("u").with("avgLineHeight", 1.35);
        let recs = generator.generate_for(Section::Whitespace, &moderate);
        assert!(recs.iter().any(|r| r.id == "line-height-moderate" && r.impact == Impact::Medium));
    }

    #[test]
    fn test_font_template_interpolates_list() {
        let generator = RecommendationGenerator::builtin();
        let context = RecommendationContext::new("https://example.com")
            .with("fontCount", 3i64)
            .with("webFontCount", 3i64)
            .with(
                "webFonts",
                vec!["Inter".to_string(), "Lora".to_string(), "Poppins".to_string()],
            );

        let recs = generator.generate_for(Section::Fonts, &context);
        assert_eq!(recs[0].id, "fonts-too-many-web");
        assert!(recs[0].text.contains("Inter, Lora, Poppins"));
        assert!(recs[0].text.contains('3'));
    }
}
