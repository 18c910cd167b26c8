//! The template shipped with the crate.
//!
//! Kept as loose XML parts under `templates/docx/` so it can be reviewed and
//! diffed; packed into a `.docx` archive on demand.

use std::io::{Cursor, Write};

use rdoc_core::{RdocError, RdocResult};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive entries in package order.
const PARTS: [(&str, &str); 7] = [
    ("[Content_Types].xml", include_str!("../templates/docx/[Content_Types].xml")),
    ("_rels/.rels", include_str!("../templates/docx/_rels/.rels")),
    ("docProps/core.xml", include_str!("../templates/docx/docProps/core.xml")),
    ("word/document.xml", include_str!("../templates/docx/word/document.xml")),
    ("word/styles.xml", include_str!("../templates/docx/word/styles.xml")),
    ("word/footer1.xml", include_str!("../templates/docx/word/footer1.xml")),
    (
        "word/_rels/document.xml.rels",
        include_str!("../templates/docx/word/_rels/document.xml.rels"),
    ),
];

/// Pack the built-in template into `.docx` bytes.
pub fn builtin_archive() -> RdocResult<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in PARTS {
        writer
            .start_file(name, options)
            .map_err(|e| RdocError::archive(e.to_string()))?;
        writer.write_all(contents.as_bytes())?;
    }
    let cursor = writer.finish().map_err(|e| RdocError::archive(e.to_string()))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::tests::read_part;
    use crate::template::{DocxTemplate, DOCUMENT_PART};
    use chrono::NaiveDate;
    use rdoc_core::{assemble_context, ReportRequest};

    const SAMPLE: &str = r#"{
        "report": {
            "weekly_analysis": {
                "period": "Oct 5 to Oct 11 vs Sep 28 to Oct 4",
                "current": {"sessions": 1234567, "conversions": 321, "revenue": 98765.5},
                "previous": {"sessions": 1000000, "conversions": 300, "revenue": 90000},
                "changes": {"sessions": 23.4567, "conversions": 7, "revenue": 9.74},
                "summary": "Traffic & revenue both grew.",
                "searchTerms": [
                    {"term": "acme <widgets>", "current": {"clicks": 1520, "impressions": 48210, "ctr": "3.16", "position": "4.26"}}
                ]
            },
            "ytd_analysis": {"current": {"sessions": 5}}
        },
        "insights": "Key Findings:\nTraffic is up.\nRecommended Next Steps:\nKeep going."
    }"#;

    fn render_sample() -> String {
        let request = ReportRequest::from_slice(SAMPLE.as_bytes()).unwrap();
        let report = request.validated_report().unwrap();
        let context = assemble_context(
            report,
            request.insights.as_deref(),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        );
        let template = DocxTemplate::builtin().unwrap();
        let docx = template.render(&context).unwrap();
        read_part(&docx, DOCUMENT_PART)
    }

    #[test]
    fn test_builtin_archive_has_all_parts() {
        let template = DocxTemplate::builtin().unwrap();
        let templated: Vec<_> = template.templated_parts().collect();
        assert_eq!(templated, vec!["word/document.xml", "word/footer1.xml"]);
    }

    #[test]
    fn test_builtin_renders_sections_and_tables() {
        let xml = render_sample();
        assert!(xml.contains("Generated October 19, 2026"));
        assert!(xml.contains("Weekly Analysis"));
        assert!(xml.contains("Year to Date Analysis"));
        assert!(!xml.contains("Monthly Analysis"));
        assert!(xml.contains("Period: Oct 5 to Oct 11 vs Sep 28 to Oct 4"));
        assert!(xml.contains(">1,234,567<"));
        assert!(xml.contains(">+23.5%<"));
        assert!(xml.contains(">Revenue ($)<"));
        assert!(xml.contains(">98,765.5<"));
        assert!(xml.contains(">3.2%<"));
        assert!(xml.contains(">4.3<"));
    }

    #[test]
    fn test_builtin_escapes_and_drops_template_syntax() {
        let xml = render_sample();
        assert!(xml.contains("acme &lt;widgets&gt;"));
        assert!(xml.contains("Traffic &amp; revenue both grew."));
        assert!(!xml.contains("{%"));
        assert!(!xml.contains("{{"));
    }

    #[test]
    fn test_builtin_renders_insight_paragraphs() {
        let xml = render_sample();
        assert!(xml.contains(">Insights<"));
        assert!(xml.contains(">Traffic is up.<"));
        assert!(xml.contains(">Keep going.<"));
    }
}
