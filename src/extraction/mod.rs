pub mod headers;
pub mod markup;
pub mod urls;

pub use headers::{extract_headers, ExtractedHeaders};
pub use markup::{AnchorExtractor, HtmlAnchorExtractor};
pub use urls::extract_urls;

/// Everything pulled out of the text before rules run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSignals {
    pub headers: ExtractedHeaders,
    pub found_urls: Vec<String>,
}

pub fn extract_signals(content: &str, anchors: &dyn AnchorExtractor) -> ExtractedSignals {
    ExtractedSignals {
        headers: extract_headers(content),
        found_urls: extract_urls(content, anchors),
    }
}
