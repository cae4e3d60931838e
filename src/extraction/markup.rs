use lazy_static::lazy_static;
use scraper::{Html, Selector};

lazy_static! {
    static ref ANCHOR_SELECTOR: Selector =
        Selector::parse("a[href]").expect("static anchor selector is valid");
}

/// Pulls link targets out of markup.
///
/// Implementations must tolerate malformed or partial markup: plain text
/// yields an empty list, never an error.
pub trait AnchorExtractor: Send + Sync {
    fn anchor_targets(&self, markup: &str) -> Vec<String>;
    fn name(&self) -> &str;
}

/// html5ever-backed extractor; recovers from any input the way browsers do
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlAnchorExtractor;

impl AnchorExtractor for HtmlAnchorExtractor {
    fn anchor_targets(&self, markup: &str) -> Vec<String> {
        let document = Html::parse_document(markup);
        document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|anchor| anchor.value().attr("href"))
            .map(str::to_string)
            .collect()
    }

    fn name(&self) -> &str {
        "html5ever"
    }
}
