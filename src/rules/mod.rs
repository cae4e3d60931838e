pub mod header_spoofing;
pub mod link_hosting;
pub mod scam_phrases;

use crate::domain_utils::DomainUtils;
use crate::extraction::ExtractedSignals;
use crate::result::NO_THREATS_SUMMARY;

pub use header_spoofing::HeaderSpoofingRule;
pub use link_hosting::LinkHostingRule;
pub use scam_phrases::ScamPhraseRule;

pub const ISSUE_SEPARATOR: &str = " | ";

/// Inputs shared by every rule, with the header domains derived once
pub struct RuleContext<'a> {
    pub signals: &'a ExtractedSignals,
    pub content: &'a str,
    pub from_domain: Option<String>,
    pub return_path_domain: Option<String>,
}

impl<'a> RuleContext<'a> {
    pub fn new(signals: &'a ExtractedSignals, content: &'a str) -> Self {
        Self {
            signals,
            content,
            from_domain: DomainUtils::domain_from_email_header(Some(
                signals.headers.from.as_str(),
            )),
            return_path_domain: DomainUtils::domain_from_email_header(Some(
                signals.headers.return_path.as_str(),
            )),
        }
    }
}

/// A single heuristic. Rules are independent and return every issue they find.
pub trait SuspicionRule: Send + Sync {
    fn evaluate(&self, context: &RuleContext) -> Vec<String>;
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub suspicious: bool,
    pub summary: String,
    pub issues: Vec<String>,
}

impl Verdict {
    pub fn from_issues(issues: Vec<String>) -> Self {
        if issues.is_empty() {
            Self {
                suspicious: false,
                summary: NO_THREATS_SUMMARY.to_string(),
                issues,
            }
        } else {
            Self {
                suspicious: true,
                summary: issues.join(ISSUE_SEPARATOR),
                issues,
            }
        }
    }
}

pub struct RuleEngine {
    rules: Vec<Box<dyn SuspicionRule>>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::with_rules(vec![
            Box::new(HeaderSpoofingRule),
            Box::new(ScamPhraseRule),
            Box::new(LinkHostingRule),
        ])
    }

    pub fn with_rules(rules: Vec<Box<dyn SuspicionRule>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Run every rule in order and fold the issues into a verdict
    pub fn evaluate(&self, signals: &ExtractedSignals, content: &str) -> Verdict {
        let context = RuleContext::new(signals, content);
        let mut issues = Vec::new();

        for rule in &self.rules {
            let found = rule.evaluate(&context);
            if !found.is_empty() {
                log::debug!("Rule '{}' raised {} issue(s)", rule.name(), found.len());
            }
            issues.extend(found);
        }

        Verdict::from_issues(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{extract_signals, HtmlAnchorExtractor};

    struct AlwaysFires(&'static str);

    impl SuspicionRule for AlwaysFires {
        fn evaluate(&self, _context: &RuleContext) -> Vec<String> {
            vec![self.0.to_string()]
        }

        fn name(&self) -> &str {
            "always"
        }
    }

    fn evaluate(content: &str) -> Verdict {
        let signals = extract_signals(content, &HtmlAnchorExtractor);
        RuleEngine::new().evaluate(&signals, content)
    }

    #[test]
    fn test_clean_email() {
        let verdict = evaluate("From: a@x.com\nReturn-Path: <b@x.com>\n\nSee you at lunch.");
        assert!(!verdict.suspicious);
        assert_eq!(verdict.summary, NO_THREATS_SUMMARY);
        assert!(verdict.issues.is_empty());
    }

    #[test]
    fn test_issues_joined_in_rule_order() {
        let engine = RuleEngine::with_rules(vec![
            Box::new(AlwaysFires("first")),
            Box::new(AlwaysFires("second")),
        ]);
        let signals = extract_signals("", &HtmlAnchorExtractor);
        let verdict = engine.evaluate(&signals, "");
        assert!(verdict.suspicious);
        assert_eq!(verdict.summary, "first | second");
    }

    #[test]
    fn test_default_rule_order() {
        assert_eq!(
            RuleEngine::new().rule_names(),
            vec!["header_spoofing", "scam_phrases", "link_hosting"]
        );
    }

    #[test]
    fn test_reference_phishing_scenario() {
        let content = "From: alerts@paypal-security.com\nReturn-Path: <bounce@evil.ru>\n<a href=\"http://evil.ru/login\">Verify your account</a> now or your account locked!";
        let signals = extract_signals(content, &HtmlAnchorExtractor);
        assert_eq!(signals.found_urls, vec!["http://evil.ru/login".to_string()]);

        let verdict = RuleEngine::new().evaluate(&signals, content);
        assert!(verdict.suspicious);
        assert_eq!(
            verdict.issues,
            vec![
                "Header spoofing detected. Sender domain does not match origin.".to_string(),
                "Suspicious Content: Found common scam phrases: verify your account, account locked"
                    .to_string(),
                "Link Mismatch: Link to 'evil.ru' does not match sender.".to_string(),
            ]
        );
    }

    #[test]
    fn test_suspicious_iff_summary_differs_from_clean() {
        for content in [
            "plain note",
            "From: a@x.com\nReturn-Path: <b@y.com>",
            "click here",
            "From: a@x.com\nhttps://x.com/ok",
        ] {
            let verdict = evaluate(content);
            assert_eq!(verdict.suspicious, verdict.summary != NO_THREATS_SUMMARY);
        }
    }
}
