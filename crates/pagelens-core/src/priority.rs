//! Cross-section ranking that surfaces the next best fix.

use crate::analysis::{Section, SectionResult};
use crate::pairing::{has_high_impact_issue, pair_issues};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sections scoring at or above this are healthy enough to omit from top fixes
pub const COLLAPSE_THRESHOLD: u8 = 85;

pub const DEFAULT_TOP_FIXES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityLevel {
    Critical,
    High,
    Medium,
}

impl PriorityLevel {
    pub fn from_score(score: u8) -> Self {
        if score < 50 {
            PriorityLevel::Critical
        } else if score < 70 {
            PriorityLevel::High
        } else {
            PriorityLevel::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Critical => "Critical",
            PriorityLevel::High => "High",
            PriorityLevel::Medium => "Medium",
        }
    }
}

/// The single section to work on first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityInsight {
    pub section: Section,
    pub name: String,
    pub anchor_id: String,
    pub icon: String,
    pub score: u8,
    pub text: String,
    pub impact: PriorityLevel,
}

/// One entry of the top-N fix list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityFix {
    pub section: Section,
    pub name: String,
    pub anchor_id: String,
    pub icon: String,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    pub fix: String,
    pub impact: PriorityLevel,
}

/// Order sections by urgency
///
/// Lowest score first; on equal scores a section with a High-impact issue
/// goes first; then the heavier section weight wins.
pub fn rank<'a>(sections: &[(Section, &'a SectionResult)]) -> Vec<(Section, &'a SectionResult)> {
    let mut ranked: Vec<(Section, &SectionResult, bool)> = sections
        .iter()
        .map(|(section, result)| (*section, *result, has_high_impact_issue(&result.issues)))
        .collect();

    ranked.sort_by(|a, b| {
        a.1.score
            .cmp(&b.1.score)
            .then_with(|| match (a.2, b.2) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => Ordering::Equal,
            })
            .then_with(|| b.0.weight().cmp(&a.0.weight()))
    });

    ranked
        .into_iter()
        .map(|(section, result, _)| (section, result))
        .collect()
}

/// Pick the issue and fix text that best represents a section
fn chosen_fix(section: Section, result: &SectionResult) -> (Option<String>, String) {
    let pairs = pair_issues(&result.issues, &result.recommendations);
    match pairs.into_iter().next() {
        Some(pair) => {
            let text = pair
                .fix
                .clone()
                .or_else(|| pair.issue.clone())
                .unwrap_or_else(|| generic_fix(section));
            (pair.issue, text)
        }
        None => (None, generic_fix(section)),
    }
}

fn generic_fix(section: Section) -> String {
    format!("Review the {} section for further improvements.", section.name())
}

/// The highest-priority section, if any sections were given
pub fn priority_insight(sections: &[(Section, &SectionResult)]) -> Option<PriorityInsight> {
    let (section, result) = rank(sections).into_iter().next()?;
    let (_, text) = chosen_fix(section, result);

    tracing::debug!("Priority insight: {} ({})", section.name(), result.score);

    Some(PriorityInsight {
        section,
        name: section.name().to_string(),
        anchor_id: section.anchor_id().to_string(),
        icon: section.icon().to_string(),
        score: result.score,
        text,
        impact: PriorityLevel::from_score(result.score),
    })
}

/// Up to `limit` fixes, skipping sections at or above the collapse threshold
pub fn top_fixes(sections: &[(Section, &SectionResult)], limit: usize) -> Vec<PriorityFix> {
    rank(sections)
        .into_iter()
        .filter(|(_, result)| result.score < COLLAPSE_THRESHOLD)
        .take(limit)
        .map(|(section, result)| {
            let (issue, fix) = chosen_fix(section, result);
            PriorityFix {
                section,
                name: section.name().to_string(),
                anchor_id: section.anchor_id().to_string(),
                icon: section.icon().to_string(),
                score: result.score,
                issue,
                fix,
                impact: PriorityLevel::from_score(result.score),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(score: u8, issues: &[&str], recommendations: &[&str]) -> SectionResult {
        let mut result = SectionResult::new(score);
        for issue in issues {
            result.issue(*issue);
        }
        for rec in recommendations {
            result.recommend(*rec);
        }
        result
    }

    #[test]
    fn test_level_from_score() {
        assert_eq!(PriorityLevel::from_score(0), PriorityLevel::Critical);
        assert_eq!(PriorityLevel::from_score(49), PriorityLevel::Critical);
        assert_eq!(PriorityLevel::from_score(50), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_score(69), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_score(70), PriorityLevel::Medium);
    }

    #[test]
    fn test_high_impact_issue_breaks_score_tie() {
        let cta = section(40, &["No call-to-action visible above the fold"], &[]);
        let speed = section(60, &[], &[]);
        let social = section(40, &["Consider adding more reviews"], &[]);

        let sections = [
            (Section::SocialProof, &social),
            (Section::Speed, &speed),
            (Section::Cta, &cta),
        ];
        let insight = priority_insight(&sections).unwrap();
        assert_eq!(insight.section, Section::Cta);
        assert_eq!(insight.impact, PriorityLevel::Critical);
        assert_eq!(insight.anchor_id, "cta-section");
    }

    #[test]
    fn test_high_impact_beats_weight() {
        // Fonts weighs less than Speed but carries the high-impact issue
        let fonts = section(55, &["Too many web fonts"], &[]);
        let speed = section(55, &["Consider a CDN"], &[]);

        let ranked = rank(&[(Section::Speed, &speed), (Section::Fonts, &fonts)]);
        assert_eq!(ranked[0].0, Section::Fonts);
    }

    #[test]
    fn test_weight_breaks_remaining_ties() {
        let images = section(70, &[], &[]);
        let cta = section(70, &[], &[]);
        let fonts = section(70, &[], &[]);

        let ranked = rank(&[
            (Section::Fonts, &fonts),
            (Section::Images, &images),
            (Section::Cta, &cta),
        ]);
        let order: Vec<_> = ranked.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, vec![Section::Cta, Section::Images, Section::Fonts]);
    }

    #[test]
    fn test_insight_text_prefers_fix() {
        let images = section(
            30,
            &["5 images are missing alt text"],
            &["Add descriptive alt text to each image"],
        );
        let insight = priority_insight(&[(Section::Images, &images)]).unwrap();
        assert_eq!(insight.text, "Add descriptive alt text to each image");
    }

    #[test]
    fn test_insight_text_falls_back() {
        let empty = section(20, &[], &[]);
        let insight = priority_insight(&[(Section::Whitespace, &empty)]).unwrap();
        assert!(insight.text.contains("Whitespace"));

        assert!(priority_insight(&[]).is_none());
    }

    #[test]
    fn test_top_fixes_skips_healthy_sections() {
        let speed = section(90, &["Slow server"], &[]);
        let cta = section(85, &["No CTA"], &[]);
        let fonts = section(84, &[], &["Preload fonts"]);
        let images = section(10, &["Missing alt text on images"], &["Add alt text to images"]);
        let social = section(40, &["No testimonials"], &[]);
        let whitespace = section(60, &[], &[]);

        let sections = [
            (Section::Speed, &speed),
            (Section::Cta, &cta),
            (Section::Fonts, &fonts),
            (Section::Images, &images),
            (Section::SocialProof, &social),
            (Section::Whitespace, &whitespace),
        ];

        let fixes = top_fixes(&sections, DEFAULT_TOP_FIXES);
        let order: Vec<_> = fixes.iter().map(|f| f.section).collect();
        assert_eq!(
            order,
            vec![Section::Images, Section::SocialProof, Section::Whitespace]
        );
        assert_eq!(fixes[0].fix, "Add alt text to images");
        assert_eq!(fixes[0].issue.as_deref(), Some("Missing alt text on images"));

        let all = top_fixes(&sections, 10);
        assert_eq!(all.len(), 4);
        assert!(all.iter().all(|f| f.score < COLLAPSE_THRESHOLD));
    }
}
