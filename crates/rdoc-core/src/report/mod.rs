//! Report requests: parsing, validation and per-period access.

pub mod model;
pub mod tables;

use serde::Serialize;
use tracing::debug;

use crate::error::{RdocError, RdocResult};
use model::{AnalysisBlock, Report, ReportRequest};

/// Message returned when a request carries no usable report.
pub const MISSING_REPORT: &str = "No report data provided";

/// Analysis periods in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisPeriod {
    Weekly,
    Monthly,
    Quarterly,
    YearToDate,
    Last28YearOverYear,
}

impl AnalysisPeriod {
    pub const ALL: [AnalysisPeriod; 5] = [
        AnalysisPeriod::Weekly,
        AnalysisPeriod::Monthly,
        AnalysisPeriod::Quarterly,
        AnalysisPeriod::YearToDate,
        AnalysisPeriod::Last28YearOverYear,
    ];

    /// Key used both in the request payload and in the rendering context.
    pub fn key(self) -> &'static str {
        match self {
            AnalysisPeriod::Weekly => "weekly_analysis",
            AnalysisPeriod::Monthly => "monthly_analysis",
            AnalysisPeriod::Quarterly => "quarterly_analysis",
            AnalysisPeriod::YearToDate => "ytd_analysis",
            AnalysisPeriod::Last28YearOverYear => "last28_yoy_analysis",
        }
    }

    /// Section heading shown in the document.
    pub fn title(self) -> &'static str {
        match self {
            AnalysisPeriod::Weekly => "Weekly Analysis",
            AnalysisPeriod::Monthly => "Monthly Analysis",
            AnalysisPeriod::Quarterly => "Quarterly Analysis",
            AnalysisPeriod::YearToDate => "Year to Date Analysis",
            AnalysisPeriod::Last28YearOverYear => "Last 28 Days Year over Year Analysis",
        }
    }
}

impl Report {
    pub fn block(&self, period: AnalysisPeriod) -> Option<&AnalysisBlock> {
        match period {
            AnalysisPeriod::Weekly => self.weekly_analysis.as_ref(),
            AnalysisPeriod::Monthly => self.monthly_analysis.as_ref(),
            AnalysisPeriod::Quarterly => self.quarterly_analysis.as_ref(),
            AnalysisPeriod::YearToDate => self.ytd_analysis.as_ref(),
            AnalysisPeriod::Last28YearOverYear => self.last28_yoy_analysis.as_ref(),
        }
    }

    /// Present periods, in document order.
    pub fn periods(&self) -> impl Iterator<Item = (AnalysisPeriod, &AnalysisBlock)> + '_ {
        AnalysisPeriod::ALL
            .into_iter()
            .filter_map(move |period| self.block(period).map(|block| (period, block)))
    }

    pub fn is_empty(&self) -> bool {
        self.periods().next().is_none()
    }
}

impl ReportRequest {
    /// Parse a raw request body.
    ///
    /// An empty body is treated as a request without a report.
    pub fn from_slice(body: &[u8]) -> RdocResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(RdocError::invalid_input(MISSING_REPORT));
        }
        let request: ReportRequest = serde_json::from_slice(body)?;
        debug!(
            has_report = request.report.is_some(),
            has_insights = request.insights.is_some(),
            "Parsed report request"
        );
        Ok(request)
    }

    /// The report, if it is present and names at least one known period.
    pub fn validated_report(&self) -> RdocResult<&Report> {
        match &self.report {
            Some(report) if !report.is_empty() => Ok(report),
            _ => Err(RdocError::invalid_input(MISSING_REPORT)),
        }
    }
}
