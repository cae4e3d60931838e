use super::{RuleContext, SuspicionRule};

pub const SCAM_PHRASES: &[&str] = &[
    "free spins",
    "claim your bonus",
    "no deposit needed",
    "jackpot",
    "winner",
    "lottery",
    "click here",
    "verify your account",
    "suspended",
    "urgent action",
    "account locked",
    "update payment",
    "social security",
    "credit card",
    "bank account",
    "limited time",
    "act now",
    "promo code",
    "unsubscribe",
    "cloud storage",
    "payment method has expired",
    "subscription id",
];

/// Reports every scam phrase present anywhere in the text, as one issue
pub struct ScamPhraseRule;

impl ScamPhraseRule {
    pub fn matching_phrases(content: &str) -> Vec<&'static str> {
        let lower = content.to_lowercase();
        SCAM_PHRASES
            .iter()
            .copied()
            .filter(|phrase| lower.contains(*phrase))
            .collect()
    }
}

impl SuspicionRule for ScamPhraseRule {
    fn evaluate(&self, context: &RuleContext) -> Vec<String> {
        let found = Self::matching_phrases(context.content);
        if found.is_empty() {
            return Vec::new();
        }

        vec![format!(
            "Suspicious Content: Found common scam phrases: {}",
            found.join(", ")
        )]
    }

    fn name(&self) -> &str {
        "scam_phrases"
    }
}
