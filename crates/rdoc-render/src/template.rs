//! DOCX templates compiled with tera.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use rdoc_core::{RdocError, RdocResult, RenderContext};
use tera::Tera;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::normalize::normalize_part;

/// Main document part; every template must have one.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// One archive entry of the template.
#[derive(Debug, Clone)]
struct TemplatePart {
    name: String,
    /// Raw bytes for copied parts; empty for templated parts, which live in tera.
    data: Vec<u8>,
    templated: bool,
}

/// A compiled Word template.
#[derive(Debug)]
pub struct DocxTemplate {
    parts: Vec<TemplatePart>,
    tera: Tera,
}

impl DocxTemplate {
    /// Load and compile a template from a `.docx` file.
    pub fn from_path(path: &Path) -> RdocResult<Self> {
        let bytes = std::fs::read(path)?;
        let template = Self::from_bytes(&bytes)?;
        info!(path = %path.display(), parts = template.parts.len(), "Loaded document template");
        Ok(template)
    }

    /// The template shipped with the crate.
    pub fn builtin() -> RdocResult<Self> {
        Self::from_bytes(&crate::builtin::builtin_archive()?)
    }

    /// Load and compile a template from `.docx` bytes.
    pub fn from_bytes(bytes: &[u8]) -> RdocResult<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(archive_error)?;
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".xml"]);
        tera.set_escape_fn(escape_xml);

        let mut parts = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index).map_err(archive_error)?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;

            if is_templated_part(&name) {
                let xml = String::from_utf8(data)
                    .map_err(|e| RdocError::template(format!("{} is not valid UTF-8: {}", name, e)))?;
                tera.add_raw_template(&name, &normalize_part(&xml))
                    .map_err(|e| template_error(&name, &e))?;
                debug!(part = %name, "Compiled template part");
                parts.push(TemplatePart {
                    name,
                    data: Vec::new(),
                    templated: true,
                });
            } else {
                parts.push(TemplatePart {
                    name,
                    data,
                    templated: false,
                });
            }
        }

        if !parts.iter().any(|p| p.name == DOCUMENT_PART) {
            return Err(RdocError::archive(format!("template has no {}", DOCUMENT_PART)));
        }

        Ok(Self { parts, tera })
    }

    /// Names of the parts rendered through tera.
    pub fn templated_parts(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter(|p| p.templated).map(|p| p.name.as_str())
    }

    /// Render the context into a complete `.docx` archive.
    pub fn render(&self, context: &RenderContext) -> RdocResult<Vec<u8>> {
        let context = tera::Context::from_serialize(context).map_err(|e| template_error("context", &e))?;
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for part in &self.parts {
            writer.start_file(part.name.as_str(), options).map_err(archive_error)?;
            if part.templated {
                let rendered = self
                    .tera
                    .render(&part.name, &context)
                    .map_err(|e| template_error(&part.name, &e))?;
                writer.write_all(rendered.as_bytes())?;
            } else {
                writer.write_all(&part.data)?;
            }
        }

        let bytes = writer.finish().map_err(archive_error)?.into_inner();
        debug!(size = bytes.len(), "Rendered document");
        Ok(bytes)
    }
}

/// Body, header and footer parts carry template tags.
fn is_templated_part(name: &str) -> bool {
    name == DOCUMENT_PART
        || (name.ends_with(".xml")
            && (name.starts_with("word/header") || name.starts_with("word/footer")))
}

/// Escape text for an XML text node or attribute value.
fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn archive_error(err: zip::result::ZipError) -> RdocError {
    RdocError::archive(err.to_string())
}

/// Tera hides the useful detail in the source chain.
fn template_error(name: &str, err: &tera::Error) -> RdocError {
    let mut message = format!("{}: {}", name, err);
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    RdocError::template(message)
}
