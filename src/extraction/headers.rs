use crate::result::NOT_FOUND;

const FROM_PREFIX: &str = "from:";
const RETURN_PATH_PREFIX: &str = "return-path:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedHeaders {
    pub from: String,
    pub return_path: String,
}

impl Default for ExtractedHeaders {
    fn default() -> Self {
        Self {
            from: NOT_FOUND.to_string(),
            return_path: NOT_FOUND.to_string(),
        }
    }
}

/// Scan every line for `From:` and `Return-Path:`; a later occurrence overrides an earlier one.
pub fn extract_headers(content: &str) -> ExtractedHeaders {
    let mut headers = ExtractedHeaders::default();

    for line in content.split('\n') {
        if let Some(value) = strip_prefix_ignore_case(line, FROM_PREFIX) {
            headers.from = value.trim().to_string();
        }
        if let Some(value) = strip_prefix_ignore_case(line, RETURN_PATH_PREFIX) {
            headers.return_path = value.trim().to_string();
        }
    }

    headers
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.as_bytes().get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix.as_bytes()) {
        // prefix is ASCII, so its length is a char boundary in line
        Some(&line[prefix.len()..])
    } else {
        None
    }
}
