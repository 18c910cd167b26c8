//! # RDOC Render
//!
//! Renders report contexts into Word documents.
//!
//! A `.docx` template is a ZIP of XML parts. The document body, headers and
//! footers are compiled as tera templates; everything else is copied through.
//! [`ReportFormatter`] runs the whole request pipeline: validate, build the
//! context, render, store transiently and encode as a data URI.

pub mod builtin;
pub mod formatter;
pub mod normalize;
pub mod output;
pub mod template;

pub use formatter::ReportFormatter;
pub use output::{to_data_uri, TransientOutput, DOCX_MIME};
pub use template::DocxTemplate;
