use super::RecommendationContext;

/// Tagged predicate over a context field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Always,
    Gt(&'static str, f64),
    Gte(&'static str, f64),
    Lt(&'static str, f64),
    Lte(&'static str, f64),
    /// `low <= value < high`
    Between(&'static str, f64, f64),
    IsTrue(&'static str),
    IsFalse(&'static str),
    NonEmpty(&'static str),
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl Condition {
    pub fn evaluate(&self, context: &RecommendationContext) -> bool {
        match self {
            Condition::Always => true,
            Condition::Gt(field, threshold) => context.number(field) > *threshold,
            Condition::Gte(field, threshold) => context.number(field) >= *threshold,
            Condition::Lt(field, threshold) => context.number(field) < *threshold,
            Condition::Lte(field, threshold) => context.number(field) <= *threshold,
            Condition::Between(field, low, high) => {
                let value = context.number(field);
                value >= *low && value < *high
            }
            Condition::IsTrue(field) => context.flag(field),
            Condition::IsFalse(field) => !context.flag(field),
            Condition::NonEmpty(field) => !context.list(field).is_empty(),
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(context)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(context)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RecommendationContext {
        RecommendationContext::new("https://example.com")
            .with("whitespaceRatio", 0.3)
            .with("ctasAboveFold", 0i64)
            .with("hasReviews", true)
            .with("weakCtaTexts", vec!["Learn More".to_string()])
    }

    #[test]
    fn test_comparisons() {
        let ctx = context();
        assert!(Condition::Gt("whitespaceRatio", 0.25).evaluate(&ctx));
        assert!(Condition::Lt("whitespaceRatio", 0.35).evaluate(&ctx));
        assert!(Condition::Lte("ctasAboveFold", 0.0).evaluate(&ctx));
        assert!(!Condition::Gte("ctasAboveFold", 1.0).evaluate(&ctx));
    }

    #[test]
    fn test_between_is_half_open() {
        let ctx = RecommendationContext::new("u").with("ratio", 0.35);
        assert!(!Condition::Between("ratio", 0.25, 0.35).evaluate(&ctx));
        assert!(Condition::Between("ratio", 0.35, 0.4).evaluate(&ctx));
    }

    #[test]
    fn test_flags_and_lists() {
        let ctx = context();
        assert!(Condition::IsTrue("hasReviews").evaluate(&ctx));
        assert!(Condition::IsFalse("hasTestimonials").evaluate(&ctx));
        assert!(Condition::NonEmpty("weakCtaTexts").evaluate(&ctx));
        assert!(!Condition::NonEmpty("ctaTexts").evaluate(&ctx));
    }

    #[test]
    fn test_combinators() {
        let ctx = context();
        assert!(
            Condition::All(vec![
                Condition::IsTrue("hasReviews"),
                Condition::Lt("ctasAboveFold", 1.0),
            ])
            .evaluate(&ctx)
        );
        assert!(
            Condition::Any(vec![
                Condition::IsTrue("missing"),
                Condition::Gt("whitespaceRatio", 0.1),
            ])
            .evaluate(&ctx)
        );
        assert!(Condition::All(vec![]).evaluate(&ctx));
        assert!(!Condition::Any(vec![]).evaluate(&ctx));
    }
}
