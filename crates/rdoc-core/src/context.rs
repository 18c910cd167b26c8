//! Rendering context for the document template.

use chrono::NaiveDate;
use serde::Serialize;

use crate::report::model::Report;
use crate::report::tables::{build_metrics_table, build_search_terms_table, MetricRow, SearchTermRow};
use crate::report::AnalysisPeriod;

/// Date format used for the "generated on" line, e.g. `October 19, 2026`.
pub const GENERATED_DATE_FORMAT: &str = "%B %d, %Y";

/// Tables and labels for one analysis period.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisTables {
    pub title: String,
    pub period: Option<String>,
    pub summary: Option<String>,
    pub metrics: Vec<MetricRow>,
    pub search_terms: Vec<SearchTermRow>,
}

/// A present period, for templates that loop over sections.
#[derive(Debug, Clone, Serialize)]
pub struct SectionContext {
    pub key: &'static str,
    #[serde(flatten)]
    pub tables: AnalysisTables,
}

/// Everything the document template can reference.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub generated_date: String,
    pub insights: Option<String>,
    pub insight_paragraphs: Vec<String>,
    pub weekly_analysis: AnalysisTables,
    pub monthly_analysis: AnalysisTables,
    pub quarterly_analysis: AnalysisTables,
    pub ytd_analysis: AnalysisTables,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last28_yoy_analysis: Option<AnalysisTables>,
    pub sections: Vec<SectionContext>,
}

/// Build the rendering context for a validated report.
pub fn assemble_context(report: &Report, insights: Option<&str>, generated_on: NaiveDate) -> RenderContext {
    let tables = |period: AnalysisPeriod| build_tables(report, period);

    let sections = report
        .periods()
        .map(|(period, _)| SectionContext {
            key: period.key(),
            tables: tables(period),
        })
        .collect();

    RenderContext {
        generated_date: generated_on.format(GENERATED_DATE_FORMAT).to_string(),
        insights: insights.map(str::to_string),
        insight_paragraphs: insights.map(split_paragraphs).unwrap_or_default(),
        weekly_analysis: tables(AnalysisPeriod::Weekly),
        monthly_analysis: tables(AnalysisPeriod::Monthly),
        quarterly_analysis: tables(AnalysisPeriod::Quarterly),
        ytd_analysis: tables(AnalysisPeriod::YearToDate),
        last28_yoy_analysis: report
            .block(AnalysisPeriod::Last28YearOverYear)
            .map(|_| tables(AnalysisPeriod::Last28YearOverYear)),
        sections,
    }
}

fn build_tables(report: &Report, period: AnalysisPeriod) -> AnalysisTables {
    let block = report.block(period);
    AnalysisTables {
        title: period.title().to_string(),
        period: block.and_then(|b| b.period.clone()),
        summary: block.and_then(|b| b.summary.clone()),
        metrics: build_metrics_table(block),
        search_terms: build_search_terms_table(block.and_then(|b| b.search_terms.as_deref())),
    }
}

/// Split narrative text into trimmed, non-empty lines.
fn split_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
