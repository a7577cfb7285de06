use crate::analysis::Metrics;
use serde_json::Value;
use std::collections::BTreeMap;

/// A single named signal
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    Number(f64),
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        ContextValue::Number(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Number(value as f64)
    }
}

impl From<usize> for ContextValue {
    fn from(value: usize) -> Self {
        ContextValue::Number(value as f64)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::Text(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::Text(value)
    }
}

impl From<Vec<String>> for ContextValue {
    fn from(value: Vec<String>) -> Self {
        ContextValue::List(value)
    }
}

/// Named signal bag read by template conditions and interpolation
///
/// Every accessor is total: a missing or mistyped field reads as `0`,
/// `false` or an empty list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationContext {
    url: String,
    values: BTreeMap<String, ContextValue>,
}

impl RecommendationContext {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            values: BTreeMap::new(),
        }
    }

    /// Build a context from analyzer metrics; nulls and objects are skipped
    pub fn from_metrics(url: impl Into<String>, metrics: &Metrics) -> Self {
        let mut context = Self::new(url);
        for (key, value) in metrics {
            let converted = match value {
                Value::Number(n) => n.as_f64().map(ContextValue::Number),
                Value::Bool(b) => Some(ContextValue::Bool(*b)),
                Value::String(s) => Some(ContextValue::Text(s.clone())),
                Value::Array(items) => Some(ContextValue::List(
                    items
                        .iter()
                        .map(|item| match item {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect(),
                )),
                Value::Null | Value::Object(_) => None,
            };
            if let Some(converted) = converted {
                context.values.insert(key.clone(), converted);
            }
        }
        context
    }

    pub fn with(mut self, key: &str, value: impl Into<ContextValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<ContextValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn number(&self, key: &str) -> f64 {
        match self.values.get(key) {
            Some(ContextValue::Number(n)) if n.is_finite() => *n,
            Some(ContextValue::Bool(true)) => 1.0,
            _ => 0.0,
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        match self.values.get(key) {
            Some(ContextValue::Bool(b)) => *b,
            Some(ContextValue::Number(n)) => *n != 0.0,
            _ => false,
        }
    }

    pub fn list(&self, key: &str) -> &[String] {
        match self.values.get(key) {
            Some(ContextValue::List(items)) => items,
            _ => &[],
        }
    }

    /// Text form used for `{{name}}` interpolation
    pub fn render(&self, key: &str) -> String {
        match self.values.get(key) {
            Some(ContextValue::Number(n)) => format_number(*n),
            Some(ContextValue::Bool(b)) => b.to_string(),
            Some(ContextValue::Text(s)) => s.clone(),
            Some(ContextValue::List(items)) => items.join(", "),
            None => "0".to_string(),
        }
    }
}

/// Integers render as-is, decimals to two places
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default() {
        let context = RecommendationContext::new("https://example.com");
        assert_eq!(context.number("webFontCount"), 0.0);
        assert!(!context.flag("hasTestimonials"));
        assert!(context.list("weakCtaTexts").is_empty());
        assert_eq!(context.render("anything"), "0");
    }

    #[test]
    fn test_mistyped_fields_default() {
        let context = RecommendationContext::new("u").with("ctaCount", "three");
        assert_eq!(context.number("ctaCount"), 0.0);
        assert!(context.list("ctaCount").is_empty());
    }

    #[test]
    fn test_render_formats() {
        let context = RecommendationContext::new("u")
            .with("count", 3i64)
            .with("ratio", 0.256)
            .with("texts", vec!["Learn More".to_string(), "Click Here".to_string()])
            .with("flag", true);

        assert_eq!(context.render("count"), "3");
        assert_eq!(context.render("ratio"), "0.26");
        assert_eq!(context.render("texts"), "Learn More, Click Here");
        assert_eq!(context.render("flag"), "true");
    }

    #[test]
    fn test_from_metrics() {
        let mut metrics = Metrics::new();
        metrics.insert("webFontCount".to_string(), json!(2));
        metrics.insert("webFonts".to_string(), json!(["Inter", "Lora"]));
        metrics.insert("hasReviews".to_string(), json!(true));
        metrics.insert("nothing".to_string(), json!(null));

        let context = RecommendationContext::from_metrics("https://a.test", &metrics);
        assert_eq!(context.url(), "https://a.test");
        assert_eq!(context.number("webFontCount"), 2.0);
        assert_eq!(context.list("webFonts"), ["Inter", "Lora"]);
        assert!(context.flag("hasReviews"));
        assert_eq!(context.render("nothing"), "0");
    }
}
