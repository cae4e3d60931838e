use crate::extraction::{extract_signals, AnchorExtractor, HtmlAnchorExtractor};
use crate::ingest::{upload_to_text, DocumentExtractor, PdfExtractor, UploadedFile};
use crate::result::{
    AnalysisResult, CONTENT_ERROR_SUMMARY, FILE_ERROR_PREFIX, NO_CONTENT_SUMMARY, NO_FILE_SUMMARY,
};
use crate::rules::RuleEngine;
use std::panic::{self, AssertUnwindSafe};

/// Runs the full pipeline: ingestion, extraction, rules.
///
/// Holds no per-request state, so one instance can serve concurrent callers.
pub struct EmailAnalyzer {
    anchors: Box<dyn AnchorExtractor>,
    documents: Box<dyn DocumentExtractor>,
    rules: RuleEngine,
}

impl Default for EmailAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailAnalyzer {
    pub fn new() -> Self {
        Self {
            anchors: Box::new(HtmlAnchorExtractor),
            documents: Box::new(PdfExtractor),
            rules: RuleEngine::new(),
        }
    }

    pub fn with_components(
        anchors: Box<dyn AnchorExtractor>,
        documents: Box<dyn DocumentExtractor>,
        rules: RuleEngine,
    ) -> Self {
        Self {
            anchors,
            documents,
            rules,
        }
    }

    /// Names of the active rules, in evaluation order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.rule_names()
    }

    /// Analyze an uploaded file. Never fails: problems are reported in the result.
    pub fn analyze_email(&self, upload: Option<&UploadedFile>) -> AnalysisResult {
        let upload = match upload {
            Some(upload) if !upload.is_empty() => upload,
            _ => return AnalysisResult::error(NO_FILE_SUMMARY),
        };

        log::info!(
            "Analyzing uploaded file {} ({} bytes)",
            upload.filename.as_deref().unwrap_or("<unnamed>"),
            upload.bytes.len()
        );

        try_analyze(
            || {
                let content = upload_to_text(upload, self.documents.as_ref())?;
                Ok(self.analyze_email_content(content.as_str()))
            },
            |detail| format!("{}{}", FILE_ERROR_PREFIX, detail),
        )
    }

    /// Analyze raw email text. Never fails: problems are reported in the result.
    pub fn analyze_email_content<'a>(&self, content: impl Into<Option<&'a str>>) -> AnalysisResult {
        let content = match content.into() {
            Some(content) if !content.trim().is_empty() => content,
            _ => return AnalysisResult::error(NO_CONTENT_SUMMARY),
        };

        // The detail is logged but kept out of the summary on this path
        try_analyze(
            || Ok(self.run_pipeline(content)),
            |_detail| CONTENT_ERROR_SUMMARY.to_string(),
        )
    }

    fn run_pipeline(&self, content: &str) -> AnalysisResult {
        let signals = extract_signals(content, self.anchors.as_ref());
        let verdict = self.rules.evaluate(&signals, content);

        log::info!(
            "Analysis finished: suspicious={} urls={} issues={}",
            verdict.suspicious,
            signals.found_urls.len(),
            verdict.issues.len()
        );

        AnalysisResult {
            from_header: signals.headers.from,
            return_path_header: signals.headers.return_path,
            suspicious: verdict.suspicious,
            analysis_summary: verdict.summary,
            found_urls: signals.found_urls,
        }
    }
}

/// Run an analysis step, turning an error or a panic into an error result.
///
/// Third-party document parsers may panic on hostile input, so panics are
/// caught here rather than left to unwind into the caller.
pub fn try_analyze<F, M>(analyze: F, on_error: M) -> AnalysisResult
where
    F: FnOnce() -> anyhow::Result<AnalysisResult>,
    M: FnOnce(String) -> String,
{
    let detail = match panic::catch_unwind(AssertUnwindSafe(analyze)) {
        Ok(Ok(result)) => return result,
        Ok(Err(e)) => e.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };

    log::error!("Email analysis failed: {}", detail);
    AnalysisResult::error(on_error(detail))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
