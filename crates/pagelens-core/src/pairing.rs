//! Issue-to-fix pairing over free-text analyzer output.

use crate::analysis::Impact;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Cross-domain keyword lexicon; each entry is a pattern source matched
/// case-insensitively at word boundaries
const KEYWORD_LEXICON: &[&str] = &[
    r"fonts?",
    r"typography",
    r"font-display",
    r"web fonts?",
    r"images?",
    r"alt(?: text| attributes?)?",
    r"formats?",
    r"webp",
    r"avif",
    r"gif",
    r"srcset",
    r"resize\w*",
    r"oversized|larger than",
    r"cta|ctas",
    r"call-to-action",
    r"buttons?",
    r"(?:above|below) the fold|fold",
    r"action",
    r"wording|text",
    r"whitespace",
    r"spacing|padding|margins?",
    r"clutter\w*|dense|density",
    r"line-height",
    r"layout",
    r"testimonials?",
    r"reviews?|ratings?",
    r"trust|badges?",
    r"social proof",
    r"customers?",
    r"logos?",
    r"speed|fast|slow",
    r"load\w*",
    r"lcp|largest contentful paint",
    r"fcp|first contentful paint|first paint",
    r"cls|layout shift",
    r"tbt|blocking",
    r"javascript|scripts?",
    r"server|response time|ttfb",
    r"performance",
    r"render\w*",
];

const HIGH_IMPACT: &[&str] = &[
    r"no",
    r"none",
    r"missing",
    r"without",
    r"critical\w*",
    r"slow",
    r"poor",
    r"zero",
    r"not found",
    r"blocks?|blocking",
    r"too many",
    r"cluttered",
    r"outdated",
    r"fails?|failed",
    r"unavailable",
];

const MEDIUM_IMPACT: &[&str] = &[
    r"weak",
    r"vague",
    r"could",
    r"consider",
    r"moderate\w*",
    r"improve\w*",
    r"tight",
    r"slightly",
    r"larger than",
    r"compete\w*",
    r"optimi[sz]\w*",
    r"fragmented",
    r"several",
];

lazy_static! {
    static ref KEYWORDS: Vec<Regex> = compile(KEYWORD_LEXICON);
    static ref HIGH_PATTERNS: Vec<Regex> = compile(HIGH_IMPACT);
    static ref MEDIUM_PATTERNS: Vec<Regex> = compile(MEDIUM_IMPACT);
}

fn compile(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|source| {
            Regex::new(&format!(r"(?i)\b(?:{})\b", source)).expect("lexicon pattern")
        })
        .collect()
}

/// An issue with its matched fix; at least one side is present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueFix {
    pub issue: Option<String>,
    pub fix: Option<String>,
    pub impact: Impact,
}

/// Classify free text into an impact level by lexicon lookup
pub fn classify_impact(text: &str) -> Impact {
    if HIGH_PATTERNS.iter().any(|p| p.is_match(text)) {
        Impact::High
    } else if MEDIUM_PATTERNS.iter().any(|p| p.is_match(text)) {
        Impact::Medium
    } else {
        Impact::Low
    }
}

pub fn has_high_impact_issue(issues: &[String]) -> bool {
    issues.iter().any(|issue| classify_impact(issue) == Impact::High)
}

fn keywords_in(text: &str) -> HashSet<usize> {
    KEYWORDS
        .iter()
        .enumerate()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(index, _)| index)
        .collect()
}

/// Pair each issue with the recommendation sharing the most keywords
///
/// Ties go to the earlier recommendation, a recommendation may serve
/// several issues, and unmatched recommendations are appended as fix-only
/// pairs. The result is ordered High, Medium, Low and is deterministic.
pub fn pair_issues(issues: &[String], recommendations: &[String]) -> Vec<IssueFix> {
    let recommendation_keywords: Vec<HashSet<usize>> =
        recommendations.iter().map(|r| keywords_in(r)).collect();
    let mut used = vec![false; recommendations.len()];
    let mut pairs = Vec::with_capacity(issues.len() + recommendations.len());

    for issue in issues {
        let issue_keywords = keywords_in(issue);

        let mut best: Option<(usize, usize)> = None;
        for (index, keywords) in recommendation_keywords.iter().enumerate() {
            let shared = issue_keywords.intersection(keywords).count();
            if shared > 0 && best.is_none_or(|(_, best_shared)| shared > best_shared) {
                best = Some((index, shared));
            }
        }

        let fix = best.map(|(index, _)| {
            used[index] = true;
            recommendations[index].clone()
        });

        pairs.push(IssueFix {
            issue: Some(issue.clone()),
            fix,
            impact: classify_impact(issue),
        });
    }

    for (index, recommendation) in recommendations.iter().enumerate() {
        if !used[index] {
            pairs.push(IssueFix {
                issue: None,
                fix: Some(recommendation.clone()),
                impact: classify_impact(recommendation),
            });
        }
    }

    pairs.sort_by(|a, b| b.impact.cmp(&a.impact));

    tracing::debug!(
        "Paired {} issues with {} recommendations into {} pairs",
        issues.len(),
        recommendations.len(),
        pairs.len()
    );

    pairs
}
