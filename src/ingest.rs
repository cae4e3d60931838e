use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use thiserror::Error;

lazy_static! {
    static ref LINE_BREAK: Regex = Regex::new(r"\r\n|\r|\n").expect("static line break pattern is valid");
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to extract text from PDF: {0}")]
    Pdf(#[from] pdf_extract::OutputError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// An uploaded email, as bytes plus the client-supplied file name
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: Option<String>, bytes: Vec<u8>) -> Self {
        Self { filename, bytes }
    }

    /// Read a local file; the handle is closed before this returns
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(Self { filename, bytes })
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_pdf(&self) -> bool {
        self.filename
            .as_deref()
            .map(|name| name.to_ascii_lowercase().ends_with(".pdf"))
            .unwrap_or(false)
    }
}

/// Turns a non-plain-text document into plain text
pub trait DocumentExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, IngestError>;
    fn name(&self) -> &str;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl DocumentExtractor for PdfExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, IngestError> {
        Ok(pdf_extract::extract_text_from_mem(bytes)?)
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}

/// Decode as UTF-8 (invalid sequences replaced) and rejoin the lines with `\n`.
///
/// `\r\n`, a lone `\r` and `\n` all end a line; a final terminator adds no empty line.
pub fn read_plain_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let mut lines: Vec<&str> = LINE_BREAK.split(&text).collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines.join("\n")
}

/// Text of an upload: PDFs go through the document extractor, anything else is read as text
pub fn upload_to_text(
    upload: &UploadedFile,
    documents: &dyn DocumentExtractor,
) -> Result<String, IngestError> {
    if upload.is_pdf() {
        log::debug!(
            "Extracting {} bytes of PDF text with {}",
            upload.bytes.len(),
            documents.name()
        );
        documents.extract_text(&upload.bytes)
    } else {
        Ok(read_plain_text(&upload.bytes))
    }
}
