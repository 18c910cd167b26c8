//! The report request pipeline.

use std::path::Path;

use chrono::NaiveDate;
use rdoc_core::{assemble_context, RdocResult, ReportRequest};
use tracing::{debug, info};

use crate::output::{to_data_uri, TransientOutput};
use crate::template::DocxTemplate;

/// Turns report requests into Word documents.
pub struct ReportFormatter {
    template: DocxTemplate,
    output: TransientOutput,
}

impl ReportFormatter {
    pub fn new(template: DocxTemplate, output: TransientOutput) -> Self {
        Self { template, output }
    }

    /// Load the template at `template_path`, or the built-in one when `None`.
    pub fn from_paths(template_path: Option<&Path>, output_dir: &Path) -> RdocResult<Self> {
        let template = match template_path {
            Some(path) => DocxTemplate::from_path(path)?,
            None => {
                info!("Using built-in document template");
                DocxTemplate::builtin()?
            }
        };
        Ok(Self::new(template, TransientOutput::new(output_dir)))
    }

    pub fn output(&self) -> &TransientOutput {
        &self.output
    }

    /// Validate the request and render the `.docx` bytes.
    pub fn render(&self, request: &ReportRequest, generated_on: NaiveDate) -> RdocResult<Vec<u8>> {
        let report = request.validated_report()?;
        let context = assemble_context(report, request.insights.as_deref(), generated_on);
        debug!(sections = context.sections.len(), "Assembled rendering context");
        self.template.render(&context)
    }

    /// Render, store transiently and return the document as a data URI.
    pub fn generate(&self, request: &ReportRequest, generated_on: NaiveDate) -> RdocResult<String> {
        let rendered = self.render(request, generated_on)?;
        let stored = self.output.persist_and_read(&rendered)?;
        Ok(to_data_uri(&stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::DOCX_MIME;
    use crate::template::tests::read_part;
    use crate::template::DOCUMENT_PART;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    fn formatter(dir: &Path) -> ReportFormatter {
        ReportFormatter::from_paths(None, dir).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_generate_returns_decodable_docx_uri() {
        let dir = tempfile::tempdir().unwrap();
        let request = ReportRequest::from_slice(
            br#"{"report": {"monthly_analysis": {"current": {"sessions": 4200}, "changes": {"sessions": -2.04}}}}"#,
        )
        .unwrap();

        let uri = formatter(dir.path()).generate(&request, date()).unwrap();
        let prefix = format!("data:{};base64,", DOCX_MIME);
        assert!(uri.starts_with(&prefix));

        let docx = STANDARD.decode(&uri[prefix.len()..]).unwrap();
        assert!(docx.starts_with(b"PK"));
        let xml = read_part(&docx, DOCUMENT_PART);
        assert!(xml.contains("Monthly Analysis"));
        assert!(xml.contains(">4,200<"));
        assert!(xml.contains(">-2.0%<"));
    }

    #[test]
    fn test_missing_report_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let request = ReportRequest::default();
        let err = formatter(dir.path()).generate(&request, date()).unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_custom_template_path() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("custom.docx");
        let docx = crate::template::tests::archive(&[(
            DOCUMENT_PART,
            "<w:t>{{ ytd_analysis.title }}: {{ insights }}</w:t>",
        )]);
        std::fs::write(&template_path, docx).unwrap();

        let formatter = ReportFormatter::from_paths(Some(&template_path), dir.path()).unwrap();
        let request =
            ReportRequest::from_slice(br#"{"report": {"ytd_analysis": {}}, "insights": "steady"}"#).unwrap();
        let rendered = formatter.render(&request, date()).unwrap();
        assert_eq!(
            read_part(&rendered, DOCUMENT_PART),
            "<w:t>Year to Date Analysis: steady</w:t>"
        );
    }
}
