use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // [scheme:]//[userinfo@]host[:port][path][?query][#fragment]
    static ref HIERARCHICAL_URL: Regex = Regex::new(
        r"^(?:[A-Za-z][A-Za-z0-9+.\-]*:)?//(?:[^/?#\[\]@]*@)?(\[[0-9A-Fa-f:.]+\]|[^/?#:@\[\]]*)(?::[0-9]*)?(?:[/?#][^\[\]]*)?$"
    )
    .expect("static URL layout pattern is valid");
    static ref SERVER_HOST: Regex = Regex::new(
        r"^(?:(?:[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?\.)*[A-Za-z](?:[A-Za-z0-9\-]*[A-Za-z0-9])?\.?|[0-9]{1,3}(?:\.[0-9]{1,3}){3}|\[[0-9A-Fa-f:.]+\])$"
    )
    .expect("static host pattern is valid");
}

const URI_PUNCTUATION: &str = "-._~:/?[]@!$&'()*+,;=";

/// Public cloud hosts that phishing kits use to borrow a reputable domain
pub const CLOUD_STORAGE_DOMAINS: &[&str] = &[
    "googleapis.com",
    "firebasestorage.com",
    "amazonaws.com",
    "blob.core.windows.net",
    "dropbox.com",
    "drive.google.com",
    "docs.google.com",
    "herokuapp.com",
];

/// Minimal domain helpers shared by the rules
pub struct DomainUtils;

impl DomainUtils {
    /// Extract the domain from a raw header value such as `Name <user@example.com>`.
    ///
    /// Uses the text after the last `@`, cut at the first `>`.
    pub fn domain_from_email_header(value: Option<&str>) -> Option<String> {
        let value = value?;
        let at_pos = value.rfind('@')?;
        let mut part = &value[at_pos + 1..];
        if let Some(end) = part.find('>') {
            part = &part[..end];
        }
        Some(part.trim().to_string())
    }

    /// Extract the host of a URL as written, without a leading `www.`.
    ///
    /// Strict: a link with characters a URI may not contain (spaces, `<`, `|`,
    /// bad `%` escapes), no `//` authority, or a host that is not a hostname
    /// or IP literal yields `None`.
    pub fn domain_from_url(url: &str) -> Option<String> {
        if !Self::has_only_uri_chars(url) {
            log::debug!("Skipping URL with invalid characters: {}", url);
            return None;
        }

        let host = HIERARCHICAL_URL.captures(url)?.get(1)?.as_str();
        if !SERVER_HOST.is_match(host) {
            log::debug!("Skipping URL without a server host: {}", url);
            return None;
        }

        Some(Self::canonicalize_domain(host))
    }

    fn has_only_uri_chars(url: &str) -> bool {
        let mut chars = url.chars();
        let mut seen_fragment = false;

        while let Some(c) = chars.next() {
            match c {
                '%' => {
                    let escape: Vec<char> = chars.by_ref().take(2).collect();
                    if escape.len() != 2 || !escape.iter().all(char::is_ascii_hexdigit) {
                        return false;
                    }
                }
                '#' if seen_fragment => return false,
                '#' => seen_fragment = true,
                c if c.is_ascii_alphanumeric() || URI_PUNCTUATION.contains(c) => {}
                c if !c.is_ascii() && !c.is_whitespace() && !c.is_control() => {}
                _ => return false,
            }
        }

        true
    }

    /// Check if domain contains any public cloud storage host
    pub fn is_cloud_domain(domain: &str) -> bool {
        Self::matching_cloud_domains(domain).next().is_some()
    }

    /// Cloud storage hosts contained in the domain, in vocabulary order
    pub fn matching_cloud_domains(domain: &str) -> impl Iterator<Item = &'static str> + '_ {
        CLOUD_STORAGE_DOMAINS
            .iter()
            .copied()
            .filter(move |cloud| domain.contains(cloud))
    }

    /// Canonicalize domain (remove www prefix)
    pub fn canonicalize_domain(domain: &str) -> String {
        domain.strip_prefix("www.").unwrap_or(domain).to_string()
    }
}
