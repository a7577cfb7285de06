use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const LARGEST_CONTENTFUL_PAINT: &str = "largest-contentful-paint";
pub const FIRST_CONTENTFUL_PAINT: &str = "first-contentful-paint";
pub const CUMULATIVE_LAYOUT_SHIFT: &str = "cumulative-layout-shift";
pub const TOTAL_BLOCKING_TIME: &str = "total-blocking-time";
pub const SERVER_RESPONSE_TIME: &str = "server-response-time";
pub const SPEED_INDEX: &str = "speed-index";

/// One audit entry of a performance report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub numeric_value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Categories {
    #[serde(default)]
    pub performance: Option<CategoryScore>,
}

/// The subset of a performance-audit report the speed analyzer reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    #[serde(default)]
    pub audits: HashMap<String, AuditEntry>,
    #[serde(default)]
    pub categories: Categories,
}

impl AuditReport {
    /// Parse a report, unwrapping a `data` or `lhr` envelope when present
    pub fn from_value(value: Value) -> Result<Self> {
        let mut value = value;
        for envelope in ["data", "lhr"] {
            if value.get("audits").is_none()
                && let Some(inner) = value.get_mut(envelope).map(Value::take)
            {
                value = inner;
            }
        }

        if value.get("audits").is_none() && value.get("categories").is_none() {
            return Err(Error::Audit(
                "response contains neither audits nor categories".to_string(),
            ));
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn numeric(&self, audit_id: &str) -> Option<f64> {
        self.audits.get(audit_id).and_then(|a| a.numeric_value)
    }

    /// Category score as a 0-1 probability
    pub fn performance_score(&self) -> Option<f64> {
        self.categories.performance.as_ref().and_then(|c| c.score)
    }
}

/// Runs a performance-only audit against a URL
#[async_trait]
pub trait PerformanceAuditor: Send + Sync {
    async fn audit(&self, url: &str) -> Result<AuditReport>;
}
