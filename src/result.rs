use serde::{Deserialize, Serialize};

pub const NOT_FOUND: &str = "Not Found";
pub const NO_THREATS_SUMMARY: &str = "Analysis complete. No obvious threats found.";
pub const NO_FILE_SUMMARY: &str = "Error: No file was provided.";
pub const NO_CONTENT_SUMMARY: &str = "Error: No content provided.";
pub const CONTENT_ERROR_SUMMARY: &str = "Error processing content.";
pub const FILE_ERROR_PREFIX: &str = "Critical Error processing file: ";

/// Verdict for a single analyzed email, serialized flat for API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub from_header: String,
    pub return_path_header: String,
    pub suspicious: bool,
    pub analysis_summary: String,
    #[serde(default)]
    pub found_urls: Vec<String>,
}

impl AnalysisResult {
    /// Result returned on every failure path: flagged, with an explanatory summary
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            from_header: NOT_FOUND.to_string(),
            return_path_header: NOT_FOUND.to_string(),
            suspicious: true,
            analysis_summary: message.into(),
            found_urls: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        !self.suspicious && self.analysis_summary == NO_THREATS_SUMMARY
    }
}
