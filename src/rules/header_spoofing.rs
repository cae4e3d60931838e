use super::{RuleContext, SuspicionRule};

pub const HEADER_SPOOFING_ISSUE: &str =
    "Header spoofing detected. Sender domain does not match origin.";

/// Flags a `From` domain that differs from the `Return-Path` domain
pub struct HeaderSpoofingRule;

impl SuspicionRule for HeaderSpoofingRule {
    fn evaluate(&self, context: &RuleContext) -> Vec<String> {
        match (&context.from_domain, &context.return_path_domain) {
            (Some(from), Some(origin)) if !from.eq_ignore_ascii_case(origin) => {
                log::debug!("Sender domain {} differs from origin {}", from, origin);
                vec![HEADER_SPOOFING_ISSUE.to_string()]
            }
            _ => Vec::new(),
        }
    }

    fn name(&self) -> &str {
        "header_spoofing"
    }
}
