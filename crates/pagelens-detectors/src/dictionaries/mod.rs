//! Static keyword and pattern tables used by the analyzers.
//!
//! Regex tables are kept as `PatternSpec` data and compiled once by the
//! analyzer that owns them.

pub mod cta;
pub mod fonts;
pub mod patterns;
pub mod social;

pub use patterns::{PatternSpec, compile_all};

/// Lowercase, trim and collapse interior whitespace
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whole-word (or whole-phrase) containment over normalized text
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    phrase_positions(haystack, phrase).next().is_some()
}

/// Byte offsets of whole-word occurrences of `phrase`
pub fn phrase_positions<'a>(haystack: &'a str, phrase: &'a str) -> impl Iterator<Item = usize> + 'a {
    let bytes = haystack.as_bytes();
    haystack
        .match_indices(phrase)
        .map(|(start, _)| start)
        .filter(move |&start| {
            let end = start + phrase.len();
            let before_ok = start == 0 || !is_word_byte(bytes[start - 1]);
            let after_ok = end == bytes.len() || !is_word_byte(bytes[end]);
            before_ok && after_ok
        })
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'\''
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Get   Started\n Now "), "get started now");
    }

    #[test]
    fn test_contains_phrase_respects_word_boundaries() {
        assert!(contains_phrase("join waitlist", "join"));
        assert!(contains_phrase("sign up today", "sign up"));
        assert!(!contains_phrase("joiner", "join"));
        assert!(!contains_phrase("gopher", "go"));
    }

    #[test]
    fn test_phrase_positions() {
        let found: Vec<usize> = phrase_positions("love it, we love it", "love").collect();
        assert_eq!(found, vec![0, 12]);
        assert_eq!(phrase_positions("we're here", "we").count(), 0);
    }

    #[test]
    fn test_every_social_type_has_selectors() {
        use pagelens_core::snapshot::SocialProofType;
        for kind in SocialProofType::ALL {
            assert!(
                social::SELECTOR_GROUPS
                    .iter()
                    .any(|g| g.kind == kind && !g.selectors.is_empty()),
                "no selectors for {}",
                kind.as_str()
            );
        }
    }

    #[test]
    fn test_dictionary_patterns_compile() {
        use pagelens_core::snapshot::SocialProofType;
        let mut specs: Vec<PatternSpec> = Vec::new();
        specs.extend_from_slice(cta::DECORATIVE_PATTERNS);
        specs.extend_from_slice(cta::LOGO_PHRASE_PATTERNS);
        specs.extend_from_slice(cta::BRAND_PATTERNS);
        specs.extend_from_slice(cta::PERSON_NAME_PATTERNS);
        for kind in SocialProofType::ALL {
            specs.extend_from_slice(social::text_patterns(kind));
        }
        for spec in specs {
            assert!(spec.compile().is_ok(), "pattern failed: {}", spec.source);
        }
    }
}
