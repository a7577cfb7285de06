use crate::{Error, Result};
use regex::{Regex, RegexBuilder};

/// Regex source and flags kept as data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSpec {
    pub source: &'static str,
    pub case_insensitive: bool,
}

impl PatternSpec {
    pub const fn new(source: &'static str) -> Self {
        Self {
            source,
            case_insensitive: false,
        }
    }

    pub const fn ignore_case(source: &'static str) -> Self {
        Self {
            source,
            case_insensitive: true,
        }
    }

    pub fn compile(&self) -> Result<Regex> {
        RegexBuilder::new(self.source)
            .case_insensitive(self.case_insensitive)
            .build()
            .map_err(|e| Error::Pattern(format!("{}: {}", self.source, e)))
    }
}

/// Compile a table of specs; used by the `lazy_static` dictionaries
pub fn compile_all(specs: &[PatternSpec]) -> Vec<Regex> {
    specs
        .iter()
        .filter_map(|spec| match spec.compile() {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!("Skipping dictionary pattern: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_flag() {
        let strict = PatternSpec::new(r"^logo$").compile().unwrap();
        let loose = PatternSpec::ignore_case(r"^logo$").compile().unwrap();
        assert!(!strict.is_match("LOGO"));
        assert!(loose.is_match("LOGO"));
    }

    #[test]
    fn test_invalid_pattern_reports_source() {
        let err = PatternSpec::new(r"(unclosed").compile().unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_compile_all_skips_invalid() {
        let compiled = compile_all(&[PatternSpec::new("a+"), PatternSpec::new("(")]);
        assert_eq!(compiled.len(), 1);
    }
}
