//! Table rows for the document template.

use serde::Serialize;

use super::model::{metric_value, AnalysisBlock, Numeric, SearchTerm};
use crate::format::{format_change, format_decimal, format_number, format_percent};

/// Maximum number of search terms rendered per period.
pub const MAX_SEARCH_TERMS: usize = 10;

/// Metrics shown in the metrics table, as (payload key, label).
const METRICS: [(&str, &str); 3] = [
    ("sessions", "Sessions"),
    ("conversions", "Conversions"),
    ("revenue", "Revenue ($)"),
];

/// One formatted row of a metrics table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: String,
    pub current: String,
    pub previous: String,
    pub change: String,
}

/// One formatted row of a search-terms table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchTermRow {
    pub term: String,
    pub current_clicks: String,
    pub current_impressions: String,
    pub current_ctr: String,
    pub current_position: String,
}

/// Build the metrics table for a block.
///
/// Only metrics whose key appears in `current` get a row.
pub fn build_metrics_table(block: Option<&AnalysisBlock>) -> Vec<MetricRow> {
    let Some(block) = block else {
        return Vec::new();
    };

    METRICS
        .iter()
        .filter(|(key, _)| block.current.contains_key(*key))
        .map(|(key, label)| MetricRow {
            metric: (*label).to_string(),
            current: format_number(metric_value(&block.current, key)),
            previous: format_number(metric_value(&block.previous, key)),
            change: format_change(metric_value(&block.changes, key)),
        })
        .collect()
}

/// Build the search-terms table from the first [`MAX_SEARCH_TERMS`] entries.
pub fn build_search_terms_table(terms: Option<&[SearchTerm]>) -> Vec<SearchTermRow> {
    let Some(terms) = terms else {
        return Vec::new();
    };

    terms
        .iter()
        .take(MAX_SEARCH_TERMS)
        .map(|term| {
            let stats = &term.current;
            let value = |n: Option<Numeric>| n.map(f64::from).unwrap_or(0.0);
            SearchTermRow {
                term: term.term.clone(),
                current_clicks: format_number(Some(value(stats.clicks))),
                current_impressions: format_number(Some(value(stats.impressions))),
                current_ctr: format_percent(value(stats.ctr)),
                current_position: format_decimal(value(stats.position)),
            }
        })
        .collect()
}
