//! File renderings of a version's content.
//!
//! All transforms are pure: they return bytes and a fixed file name and leave
//! writing to the caller.

pub mod html;
pub mod pdf;
pub mod word;

use std::fmt;
use std::str::FromStr;

use crate::models::DescriptionVersion;

pub const PDF_FILENAME: &str = "property_description.pdf";
pub const WORD_FILENAME: &str = "property_description.doc";
pub const HTML_FILENAME: &str = "property_description.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Word,
    Html,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Word, ExportFormat::Html];

    pub fn filename(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => PDF_FILENAME,
            ExportFormat::Word => WORD_FILENAME,
            ExportFormat::Html => HTML_FILENAME,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Word => "application/msword",
            ExportFormat::Html => "text/html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Pdf => f.write_str("pdf"),
            ExportFormat::Word => f.write_str("word"),
            ExportFormat::Html => f.write_str("html"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "word" | "doc" => Ok(ExportFormat::Word),
            "html" => Ok(ExportFormat::Html),
            other => Err(format!(
                "unknown export format '{}': expected pdf, word or html",
                other
            )),
        }
    }
}

/// Rendered file ready to be written or downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub filename: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

pub fn export(content: &str, format: ExportFormat) -> ExportedFile {
    let bytes = match format {
        ExportFormat::Pdf => pdf::render(content),
        ExportFormat::Word => word::render(content),
        ExportFormat::Html => html::render(content),
    };

    ExportedFile {
        filename: format.filename(),
        mime_type: format.mime_type(),
        bytes,
    }
}

pub fn export_version(version: &DescriptionVersion, format: ExportFormat) -> ExportedFile {
    export(version.content(), format)
}

/// Standalone page handed to a print dialog
pub fn print_document(content: &str) -> String {
    format!(
        "<html><head><title>Print Property Description</title></head><body>{}</body></html>",
        content
    )
}
