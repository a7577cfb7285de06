use crate::dictionaries::social::{
    GENERIC_GLYPHS, GENERIC_KEYWORDS, GENERIC_PREFIXES, NEGATIVE_PREFIX, NEGATIVE_PREFIX_WINDOW,
    POSITIVE_SENTIMENT, TESTIMONIAL_MAX_LENGTH, TESTIMONIAL_MIN_LENGTH, bypasses_boilerplate_filter,
    class_keywords, requires_rating_indicator, text_patterns,
};
use crate::dictionaries::{compile_all, contains_phrase, normalize_text, phrase_positions};
use lazy_static::lazy_static;
use pagelens_core::analysis::{Analyzer, Section, SectionResult};
use pagelens_core::snapshot::{
    DetectedElement, SocialCandidate, SocialProofSnapshot, SocialProofType,
};
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};

lazy_static! {
    static ref TEXT_PATTERNS: HashMap<SocialProofType, Vec<Regex>> = SocialProofType::ALL
        .iter()
        .map(|kind| (*kind, compile_all(text_patterns(*kind))))
        .collect();
}

/// How strictly a selector hit must be corroborated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchRule {
    ClassOrText,
    TextRequired,
    RatingRequired,
}

impl MatchRule {
    fn for_kind(kind: SocialProofType) -> Self {
        if requires_rating_indicator(kind) {
            return MatchRule::RatingRequired;
        }
        match kind {
            SocialProofType::TrustBadge
            | SocialProofType::CustomerCount
            | SocialProofType::SocialMedia => MatchRule::TextRequired,
            _ => MatchRule::ClassOrText,
        }
    }
}

/// A social-proof element that passed every stage
#[derive(Debug, Clone, PartialEq)]
pub struct SocialDetection {
    pub kind: SocialProofType,
    pub element: DetectedElement,
}

#[derive(Debug, Clone, Default)]
pub struct SocialProofAnalyzer {
    brand_terms: Vec<String>,
}

impl SocialProofAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra self-referential words, usually the site's own brand name
    pub fn with_brand_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.brand_terms.extend(
            terms
                .into_iter()
                .map(|t| normalize_text(t.as_ref()))
                .filter(|t| !t.is_empty()),
        );
        self
    }

    pub fn detect(&self, snapshot: &SocialProofSnapshot) -> Vec<SocialDetection> {
        let mut seen = HashSet::new();
        let mut detections = Vec::new();

        for candidate in &snapshot.candidates {
            let text = candidate.text.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                continue;
            }

            // Per-type class, text and rating rules
            if !Self::matches_type_rule(candidate, &text) {
                continue;
            }

            // Navigation and footer copy
            if !bypasses_boilerplate_filter(candidate.kind) && is_boilerplate(&text) {
                tracing::debug!("Dropped boilerplate {} text", candidate.kind.as_str());
                continue;
            }

            // Testimonials must read like a customer, not the site
            if candidate.kind == SocialProofType::Testimonial && !self.is_testimonial(&text) {
                continue;
            }

            if !seen.insert(normalize_text(&text)) {
                continue;
            }

            detections.push(SocialDetection {
                kind: candidate.kind,
                element: DetectedElement {
                    kind: candidate.kind.as_str().to_string(),
                    text,
                    dom_origin: candidate.selector.clone(),
                },
            });
        }

        detections
    }

    fn matches_type_rule(candidate: &SocialCandidate, text: &str) -> bool {
        let class_name = candidate.class_name.to_lowercase();
        let class_match = class_keywords(candidate.kind)
            .iter()
            .any(|k| class_name.contains(k));
        let text_match = TEXT_PATTERNS
            .get(&candidate.kind)
            .is_some_and(|patterns| patterns.iter().any(|re| re.is_match(text)));

        match MatchRule::for_kind(candidate.kind) {
            MatchRule::ClassOrText => class_match || text_match,
            MatchRule::TextRequired => text_match,
            MatchRule::RatingRequired => {
                candidate.has_rating_indicator && (class_match || text_match)
            }
        }
    }

    /// Customer praise rather than the site describing itself
    pub fn is_testimonial(&self, text: &str) -> bool {
        let length = text.chars().count();
        if !(TESTIMONIAL_MIN_LENGTH..=TESTIMONIAL_MAX_LENGTH).contains(&length) {
            return false;
        }

        let lower = text.to_lowercase();
        let mut found_sentiment = false;

        for keyword in POSITIVE_SENTIMENT {
            for position in phrase_positions(&lower, keyword) {
                found_sentiment = true;
                if self.has_negative_prefix(&lower[..position]) {
                    return false;
                }
            }
        }

        found_sentiment
    }

    fn has_negative_prefix(&self, preceding: &str) -> bool {
        let start = preceding
            .char_indices()
            .rev()
            .nth(NEGATIVE_PREFIX_WINDOW - 1)
            .map(|(i, _)| i)
            .unwrap_or(0);
        let window = &preceding[start..];

        NEGATIVE_PREFIX
            .iter()
            .any(|word| contains_phrase(window, word))
            || self
                .brand_terms
                .iter()
                .any(|term| contains_phrase(window, term))
    }
}

fn is_boilerplate(text: &str) -> bool {
    let normalized = normalize_text(text);

    let prefixed = GENERIC_PREFIXES.iter().any(|prefix| {
        normalized.strip_prefix(prefix).is_some_and(|rest| {
            rest.is_empty() || !rest.starts_with(|c: char| c.is_alphanumeric())
        })
    });

    prefixed
        || GENERIC_KEYWORDS.iter().any(|k| normalized.contains(k))
        || text.chars().any(|c| GENERIC_GLYPHS.contains(&c))
}

/// Metric key for each type's count
fn count_key(kind: SocialProofType) -> &'static str {
    match kind {
        SocialProofType::Testimonial => "testimonials",
        SocialProofType::Review => "reviews",
        SocialProofType::TrustBadge => "trustBadges",
        SocialProofType::CustomerCount => "customerCounts",
        SocialProofType::SocialMedia => "socialMedia",
        SocialProofType::Partnership => "partnerships",
        SocialProofType::CaseStudy => "caseStudies",
        SocialProofType::NewsMention => "newsMentions",
    }
}

impl Analyzer for SocialProofAnalyzer {
    type Input = SocialProofSnapshot;

    fn section(&self) -> Section {
        Section::SocialProof
    }

    fn analyze(&self, snapshot: &SocialProofSnapshot) -> SectionResult {
        let detections = self.detect(snapshot);

        // Count per type
        let mut counts: BTreeMap<SocialProofType, usize> = BTreeMap::new();
        for detection in &detections {
            *counts.entry(detection.kind).or_insert(0) += 1;
        }

        let score = (detections.len() * 20).min(100) as u8;
        let mut result = SectionResult::new(score);

        result.metric("totalElements", detections.len());
        for kind in SocialProofType::ALL {
            result.metric(count_key(kind), counts.get(&kind).copied().unwrap_or(0));
        }
        result.metric(
            "detectedTypes",
            counts
                .keys()
                .map(|k| k.as_str().to_string())
                .collect::<Vec<_>>(),
        );

        if detections.is_empty() {
            result.issue("No social proof found on the page");
            result.recommend("Add customer testimonials, reviews or client logos to build trust");
        } else {
            if !counts.contains_key(&SocialProofType::Testimonial) {
                result.issue("No customer testimonials found");
                result.recommend("Add two or three customer testimonials with names and photos");
            }
            if !counts.contains_key(&SocialProofType::TrustBadge) {
                result.issue("Missing trust badges or security certifications");
                result.recommend("Show trust badges and security certifications near sign-up forms");
            }
        }

        tracing::debug!(
            "Social proof analysis: {} candidates, {} accepted",
            snapshot.candidates.len(),
            detections.len()
        );
        result
    }
}
