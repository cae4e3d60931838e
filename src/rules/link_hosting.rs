use super::{RuleContext, SuspicionRule};
use crate::domain_utils::DomainUtils;

/// Checks each extracted link for public cloud hosting and for a host unrelated to the sender.
///
/// The sender comparison is a plain suffix test, so `evilx.com` is accepted for
/// a sender at `x.com`.
pub struct LinkHostingRule;

impl LinkHostingRule {
    fn cloud_hosting_issue(cloud_domain: &str) -> String {
        format!(
            "Suspicious Link Hosting: Link points to a public cloud storage ({}). \
             Legitimate services usually do not use public cloud buckets for emails.",
            cloud_domain
        )
    }

    fn mismatch_issue(link_domain: &str) -> String {
        format!("Link Mismatch: Link to '{}' does not match sender.", link_domain)
    }
}

impl SuspicionRule for LinkHostingRule {
    fn evaluate(&self, context: &RuleContext) -> Vec<String> {
        let mut issues = Vec::new();

        for url in &context.signals.found_urls {
            let Some(link_domain) = DomainUtils::domain_from_url(url) else {
                continue;
            };

            for cloud_domain in DomainUtils::matching_cloud_domains(&link_domain) {
                log::debug!("Link {} is hosted on {}", url, cloud_domain);
                issues.push(Self::cloud_hosting_issue(cloud_domain));
            }

            if let Some(from_domain) = &context.from_domain {
                if !link_domain.ends_with(from_domain.as_str())
                    && !DomainUtils::is_cloud_domain(&link_domain)
                {
                    issues.push(Self::mismatch_issue(&link_domain));
                }
            }
        }

        issues
    }

    fn name(&self) -> &str {
        "link_hosting"
    }
}
