//! Report request domain model.
//!
//! Mirrors the JSON produced by the analytics pipeline. Numbers arrive either
//! as JSON numbers or as numeric strings (`"ctr": "3.45"`), so every metric
//! goes through [`Numeric`].

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Metric name to raw value.
///
/// Besides the numeric metrics the producer also stores labels and nested
/// breakdowns here (`conversionGoal`, `channelGroupings`, `products`), so
/// values stay untyped and are read through [`metric_value`].
pub type MetricMap = BTreeMap<String, Value>;

/// Incoming request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub report: Option<Report>,
    #[serde(default)]
    pub insights: Option<String>,
}

/// Analysis blocks keyed by period. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub weekly_analysis: Option<AnalysisBlock>,
    #[serde(default)]
    pub monthly_analysis: Option<AnalysisBlock>,
    #[serde(default)]
    pub quarterly_analysis: Option<AnalysisBlock>,
    #[serde(default)]
    pub ytd_analysis: Option<AnalysisBlock>,
    #[serde(default)]
    pub last28_yoy_analysis: Option<AnalysisBlock>,
}

/// One period's current/previous/change snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisBlock {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub current: MetricMap,
    #[serde(default)]
    pub previous: MetricMap,
    #[serde(default)]
    pub changes: MetricMap,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, rename = "searchTerms")]
    pub search_terms: Option<Vec<SearchTerm>>,
}

/// A search-console query row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchTerm {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub current: SearchTermStats,
    #[serde(default)]
    pub previous: Option<SearchTermStats>,
    #[serde(default)]
    pub changes: Option<SearchTermStats>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SearchTermStats {
    #[serde(default)]
    pub clicks: Option<Numeric>,
    #[serde(default)]
    pub impressions: Option<Numeric>,
    #[serde(default)]
    pub ctr: Option<Numeric>,
    #[serde(default)]
    pub position: Option<Numeric>,
}

/// A number that may have been sent as a string.
///
/// Accepts JSON numbers and strings such as `"1,234"`, `" 3.45 "` or `"12.5%"`.
/// Stored as `f64`, so integers above 2^53 lose precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Numeric(pub f64);

impl Numeric {
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<Numeric> for f64 {
    fn from(value: Numeric) -> Self {
        value.0
    }
}

/// Look up a metric as a number.
///
/// Missing keys, `null` and values that are neither numbers nor numeric
/// strings all read as absent.
pub fn metric_value(metrics: &MetricMap, name: &str) -> Option<f64> {
    match metrics.get(name)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumericVisitor;

        impl<'de> Visitor<'de> for NumericVisitor {
            type Value = Numeric;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number or a numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Numeric, E> {
                Ok(Numeric(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Numeric, E> {
                Ok(Numeric(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Numeric, E> {
                Ok(Numeric(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Numeric, E> {
                parse_numeric_str(v)
                    .map(Numeric)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(NumericVisitor)
    }
}

fn parse_numeric_str(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_accepts_numbers_and_strings() {
        let stats: SearchTermStats = serde_json::from_str(
            r#"{"clicks": 120, "impressions": "4,500", "ctr": "2.67", "position": " 7.3 "}"#,
        )
        .unwrap();
        assert_eq!(stats.clicks, Some(Numeric(120.0)));
        assert_eq!(stats.impressions, Some(Numeric(4500.0)));
        assert_eq!(stats.ctr, Some(Numeric(2.67)));
        assert_eq!(stats.position, Some(Numeric(7.3)));
    }

    #[test]
    fn test_numeric_accepts_percent_suffix() {
        let n: Numeric = serde_json::from_str(r#""12.5%""#).unwrap();
        assert_eq!(n, Numeric(12.5));
    }

    #[test]
    fn test_numeric_large_integer_rounds_to_nearest_f64() {
        let n: Numeric = serde_json::from_str("9007199254740993").unwrap();
        assert_eq!(n.get(), 9007199254740992.0);
    }

    #[test]
    fn test_numeric_rejects_text() {
        let result = serde_json::from_str::<Numeric>(r#""lots""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_null_metric_is_present_but_empty() {
        let block: AnalysisBlock =
            serde_json::from_str(r#"{"current": {"sessions": null}}"#).unwrap();
        assert!(block.current.contains_key("sessions"));
        assert_eq!(metric_value(&block.current, "sessions"), None);
        assert_eq!(metric_value(&block.current, "revenue"), None);
    }

    #[test]
    fn test_block_with_labels_and_breakdowns() {
        let block: AnalysisBlock = serde_json::from_str(
            r#"{
                "period": "Oct 5 to Oct 11 vs Sep 28 to Oct 4",
                "current": {
                    "sessions": 1200,
                    "conversions": 34,
                    "revenue": 5120.75,
                    "products": {"current": [], "previous": []},
                    "conversionGoal": "Total Conversions",
                    "channelGroupings": {"Organic Search": 800, "Direct": 400}
                },
                "previous": {
                    "sessions": 1000,
                    "conversionGoal": "Total Conversions",
                    "channelGroupings": {}
                },
                "changes": {"sessions": 20, "conversions": "n/a"},
                "dataSources": {"ga4": true, "gsc": false}
            }"#,
        )
        .unwrap();
        assert_eq!(metric_value(&block.current, "sessions"), Some(1200.0));
        assert_eq!(metric_value(&block.current, "revenue"), Some(5120.75));
        assert_eq!(metric_value(&block.current, "conversionGoal"), None);
        assert_eq!(metric_value(&block.current, "channelGroupings"), None);
        assert_eq!(metric_value(&block.changes, "conversions"), None);
    }

    #[test]
    fn test_block_field_names() {
        let block: AnalysisBlock = serde_json::from_str(
            r#"{
                "period": "Jan 1 to Jan 7",
                "current": {"sessions": 10},
                "previous": {"sessions": 8},
                "changes": {"sessions": "25.0"},
                "summary": "Sessions grew.",
                "searchTerms": [{"term": "widgets", "current": {"clicks": 3}}]
            }"#,
        )
        .unwrap();
        assert_eq!(block.period.as_deref(), Some("Jan 1 to Jan 7"));
        assert_eq!(metric_value(&block.changes, "sessions"), Some(25.0));
        assert_eq!(block.search_terms.as_ref().map(Vec::len), Some(1));
    }
}
