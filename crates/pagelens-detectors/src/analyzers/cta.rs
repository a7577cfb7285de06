use crate::dictionaries::cta::{
    ACTION_WORDS, BRAND_PATTERNS, DECORATIVE_PATTERNS, LOGO_PHRASE_PATTERNS, MAX_CTA_TEXT_LENGTH,
    OFFER_WORDS, PERSON_NAME_PATTERNS, STRONG_ACTION_PHRASES, STRONG_ACTION_VERBS, WEAK_ACTION_PHRASES,
};
use crate::dictionaries::{compile_all, contains_phrase, normalize_text};
use lazy_static::lazy_static;
use pagelens_core::analysis::{Analyzer, Section, SectionResult, clamp_score};
use pagelens_core::snapshot::{CtaCandidate, CtaSnapshot, DetectedElement};
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref DECORATIVE: Vec<Regex> = compile_all(DECORATIVE_PATTERNS);
    static ref LOGO_PHRASES: Vec<Regex> = compile_all(LOGO_PHRASE_PATTERNS);
    static ref BRANDS: Vec<Regex> = compile_all(BRAND_PATTERNS);
    static ref PERSON_NAMES: Vec<Regex> = compile_all(PERSON_NAME_PATTERNS);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtaStrength {
    Strong,
    Weak,
    Neutral,
}

impl CtaStrength {
    pub fn classify(text: &str) -> Self {
        let normalized = normalize_text(text);
        let normalized = normalized.trim_end_matches(|c: char| !c.is_alphanumeric());

        // Single-word weak phrases only count on an exact match
        let weak = WEAK_ACTION_PHRASES.iter().any(|phrase| {
            normalized == *phrase || (phrase.contains(' ') && contains_phrase(normalized, phrase))
        });
        if weak {
            return CtaStrength::Weak;
        }

        let strong_phrase = STRONG_ACTION_PHRASES
            .iter()
            .any(|phrase| contains_phrase(normalized, phrase));
        let strong_verb = normalized
            .split(' ')
            .next()
            .is_some_and(|first| STRONG_ACTION_VERBS.contains(&first));

        if strong_phrase || strong_verb {
            CtaStrength::Strong
        } else {
            CtaStrength::Neutral
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            CtaStrength::Strong => "strong-cta",
            CtaStrength::Weak => "weak-cta",
            CtaStrength::Neutral => "cta",
        }
    }
}

/// Why a candidate was dropped before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Decorative,
    Logo,
    PersonName,
}

/// An action verb or an offer noun such as "trial" or "demo"
pub fn has_cta_vocabulary(text: &str) -> bool {
    let normalized = normalize_text(text);
    ACTION_WORDS
        .iter()
        .chain(OFFER_WORDS)
        .any(|word| contains_phrase(&normalized, word))
}

pub fn is_decorative(text: &str) -> bool {
    let trimmed = text.trim();
    DECORATIVE.iter().any(|re| re.is_match(trimmed))
}

/// Brand or logo text rather than an action
pub fn is_logo_text(text: &str) -> bool {
    let trimmed = text.trim();
    if LOGO_PHRASES.iter().any(|re| re.is_match(trimmed)) {
        return true;
    }
    // Ordinary CTA wording is never a brand
    if has_cta_vocabulary(trimmed) {
        return false;
    }
    BRANDS.iter().any(|re| re.is_match(trimmed))
}

pub fn is_person_name(text: &str) -> bool {
    let trimmed = text.trim();
    !has_cta_vocabulary(trimmed) && PERSON_NAMES.iter().any(|re| re.is_match(trimmed))
}

/// Filters applied in order; the first hit wins
pub fn reject_reason(text: &str) -> Option<RejectReason> {
    if is_decorative(text) {
        Some(RejectReason::Decorative)
    } else if is_logo_text(text) {
        Some(RejectReason::Logo)
    } else if is_person_name(text) {
        Some(RejectReason::PersonName)
    } else {
        None
    }
}

/// A candidate that survived every filter
#[derive(Debug, Clone, PartialEq)]
pub struct CtaDetection {
    pub element: DetectedElement,
    pub above_fold: bool,
    pub strength: CtaStrength,
}

/// Outcome of the candidate pipeline before scoring
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CtaDetections {
    pub detections: Vec<CtaDetection>,
    pub filtered: usize,
}

pub struct CtaAnalyzer;

impl CtaAnalyzer {
    pub fn detect(snapshot: &CtaSnapshot) -> CtaDetections {
        let mut seen = HashSet::new();
        let mut result = CtaDetections::default();

        for candidate in &snapshot.candidates {
            let text = candidate.text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !candidate.visible
                || text.is_empty()
                || text.chars().count() > MAX_CTA_TEXT_LENGTH
            {
                continue;
            }

            // Same label on the same side of the fold is one CTA
            let above_fold = candidate.top < snapshot.viewport_height;
            if !seen.insert((text.to_lowercase(), above_fold)) {
                continue;
            }

            // Drop sliders, logos and names
            if let Some(reason) = reject_reason(&text) {
                tracing::debug!("Filtered CTA candidate {:?}: {:?}", text, reason);
                result.filtered += 1;
                continue;
            }

            let strength = CtaStrength::classify(&text);
            result.detections.push(CtaDetection {
                element: DetectedElement {
                    kind: strength.as_str().to_string(),
                    dom_origin: Self::dom_origin(candidate),
                    text,
                },
                above_fold,
                strength,
            });
        }

        result
    }

    fn dom_origin(candidate: &CtaCandidate) -> String {
        let tag = if candidate.tag.is_empty() {
            "element".to_string()
        } else {
            candidate.tag.to_lowercase()
        };
        match candidate.class_name.split_whitespace().next() {
            Some(class) => format!("{}.{}", tag, class),
            None => tag,
        }
    }
}

impl Analyzer for CtaAnalyzer {
    type Input = CtaSnapshot;

    fn section(&self) -> Section {
        Section::Cta
    }

    fn analyze(&self, snapshot: &CtaSnapshot) -> SectionResult {
        let CtaDetections {
            detections,
            filtered,
        } = Self::detect(snapshot);

        let above_fold = detections.iter().filter(|d| d.above_fold).count();
        let texts_of = |strength: CtaStrength| -> Vec<String> {
            detections
                .iter()
                .filter(|d| d.strength == strength)
                .map(|d| d.element.text.clone())
                .collect()
        };
        let strong = texts_of(CtaStrength::Strong);
        let weak = texts_of(CtaStrength::Weak);

        // Score only looks at the fold
        let mut score: i64 = 100;
        if above_fold == 0 {
            score -= 50;
        } else if above_fold > 2 {
            score -= 20;
        }
        let mut result = SectionResult::new(clamp_score(score));

        result.metric("ctaCount", detections.len());
        result.metric("ctasAboveFold", above_fold);
        result.metric("strongCtaCount", strong.len());
        result.metric("weakCtaCount", weak.len());
        result.metric("weakCtaTexts", weak.clone());
        result.metric(
            "ctaTexts",
            detections
                .iter()
                .map(|d| d.element.text.clone())
                .collect::<Vec<_>>(),
        );
        result.metric("filteredCount", filtered);

        if detections.is_empty() {
            result.issue("No call-to-action buttons found on the page");
            result.recommend("Place a primary call-to-action button above the fold");
        } else if above_fold == 0 {
            result.issue("No call-to-action visible above the fold");
            result.recommend("Place a primary call-to-action button above the fold");
        } else if above_fold > 2 {
            result.issue(format!(
                "Too many CTAs above the fold ({}) compete for attention",
                above_fold
            ));
            result.recommend(
                "Keep one primary CTA above the fold and demote the rest to secondary buttons",
            );
        }

        if !weak.is_empty() {
            let quoted: Vec<String> = weak.iter().map(|t| format!("\"{}\"", t)).collect();
            result.issue(format!("Weak CTA wording: {}", quoted.join(", ")));
            result.recommend(
                "Replace vague CTA text with specific action wording such as \"Start free trial\"",
            );
        }

        if !detections.is_empty() && strong.is_empty() {
            result.issue("No CTA uses strong action wording");
            result.recommend("Lead CTA text with a strong action verb such as Get or Start");
        }

        tracing::debug!(
            "CTA analysis: {} candidates, {} kept, {} filtered, {} above fold",
            snapshot.candidates.len(),
            detections.len(),
            filtered,
            above_fold
        );
        result
    }
}
