use super::markup::AnchorExtractor;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // The last character may not be trailing punctuation such as '.', ',' or '!'
    static ref URL_REGEX: Regex = Regex::new(
        r"(?i)(?:(?:https?|ftp)://|www\.|ftp\.)(?:\([-A-Z0-9+&@#/%=~_|$?!:,.]*\)|[-A-Z0-9+&@#/%=~_|$?!:,.])*(?:\([-A-Z0-9+&@#/%=~_|$?!:,.]*\)|[A-Z0-9+&@#/%=~_|$])"
    )
    .expect("static URL pattern is valid");
}

/// URLs matched by the free-text pattern, left to right
pub fn pattern_urls(content: &str) -> impl Iterator<Item = &str> {
    URL_REGEX.find_iter(content).map(|m| m.as_str())
}

/// Anchor targets first, then free-text matches, keeping the first occurrence of each string
pub fn extract_urls(content: &str, anchors: &dyn AnchorExtractor) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();

    let markup_links = anchors.anchor_targets(content);
    log::debug!(
        "{} extractor found {} anchor links",
        anchors.name(),
        markup_links.len()
    );

    for link in markup_links {
        push_unique(&mut urls, link);
    }
    for found in pattern_urls(content) {
        push_unique(&mut urls, found.to_string());
    }

    urls
}

fn push_unique(urls: &mut Vec<String>, url: String) {
    if !urls.contains(&url) {
        urls.push(url);
    }
}
