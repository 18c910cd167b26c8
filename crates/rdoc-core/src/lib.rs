//! RDOC Core Library
//!
//! Report model, number formatting and rendering context for the report
//! document service.

pub mod context;
pub mod error;
pub mod format;
pub mod report;

pub use context::{assemble_context, AnalysisTables, RenderContext, SectionContext};
pub use error::{RdocError, RdocResult};
pub use report::model::{AnalysisBlock, Report, ReportRequest, SearchTerm};
pub use report::AnalysisPeriod;
