//! Keyword/pattern intent resolution.
//!
//! The local strategy: lowercase the prompt, walk an ordered rule set,
//! append at most one [`ToolCall`] per matching rule. Rules are
//! independent and not mutually exclusive; append order equals
//! rule-definition order, and downstream execution preserves it.
//!
//! Resolution is pure: no I/O, no failure path. A prompt that matches
//! nothing yields an empty list, not an error.

use crate::ports::resolver::{IntentResolver, ResolverError};
use async_trait::async_trait;
use regex::Regex;
use relay_domain::{AllocationStrategy, ToolCall};
use std::sync::LazyLock;

/// One resolution rule.
///
/// `build` receives the lowercased prompt and may extract arguments from
/// it; returning `None` withholds the rule (e.g. a deposit phrase with no
/// recognizable amount).
struct Rule {
    triggers: &'static [&'static str],
    build: fn(&str) -> Option<ToolCall>,
}

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\s*([0-9][0-9,]*(?:\.[0-9]+)?)|([0-9][0-9,]*(?:\.[0-9]+)?)\s*(?:dollars|usd|bucks)")
        .expect("valid amount pattern")
});

static PERIOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(1w|1m|3m|1y|ytd|week|month|quarter|year to date|year)\b")
        .expect("valid period pattern")
});

/// Dollar amount mentioned in the prompt, if any.
fn extract_amount(prompt: &str) -> Option<f64> {
    let captures = AMOUNT_RE.captures(prompt)?;
    let digits = captures.get(1).or_else(|| captures.get(2))?.as_str();
    digits.replace(',', "").parse().ok()
}

/// Reporting period mentioned in the prompt, defaulting to one month.
fn extract_period(prompt: &str) -> &'static str {
    let Some(captures) = PERIOD_RE.captures(prompt) else {
        return "1m";
    };
    match &captures[1] {
        "1w" | "week" => "1w",
        "3m" | "quarter" => "3m",
        "1y" | "year" => "1y",
        "ytd" | "year to date" => "ytd",
        _ => "1m",
    }
}

fn portfolio_rules() -> Vec<Rule> {
    vec![
        Rule {
            triggers: &["portfolio", "holdings", "positions", "what do i own"],
            build: |_| Some(ToolCall::new("getPortfolio")),
        },
        Rule {
            triggers: &[
                "performance",
                "performing",
                "returns",
                "gains",
                "how am i doing",
            ],
            build: |prompt| {
                Some(ToolCall::new("getPerformance").with_arg("period", extract_period(prompt)))
            },
        },
        Rule {
            triggers: &["rebalance", "reallocate", "switch to"],
            build: |prompt| {
                let strategy =
                    AllocationStrategy::parse(prompt).unwrap_or(AllocationStrategy::Balanced);
                Some(ToolCall::new("rebalancePortfolio").with_arg("strategy", strategy.as_str()))
            },
        },
        Rule {
            triggers: &["deposit", "add funds", "invest", "put in"],
            build: |prompt| {
                let amount = extract_amount(prompt)?;
                Some(ToolCall::new("depositFunds").with_arg("amount", amount))
            },
        },
        Rule {
            triggers: &["market", "news", "s&p", "nasdaq", "dow"],
            build: |_| Some(ToolCall::new("getMarketSummary")),
        },
    ]
}

/// The local resolution strategy.
pub struct RuleResolver {
    rules: Vec<Rule>,
}

impl RuleResolver {
    /// Resolver with the demo portfolio rule set.
    pub fn new() -> Self {
        Self {
            rules: portfolio_rules(),
        }
    }

    /// Names of every tool the rule set can request, in rule order.
    ///
    /// Lets integration tests assert that each target has a registry entry.
    pub fn tool_names(&self) -> Vec<String> {
        // Probe string satisfies every extractor (period, amount, strategy).
        self.rules
            .iter()
            .filter_map(|rule| (rule.build)("1m $1 aggressive"))
            .map(|call| call.tool_name)
            .collect()
    }

    fn resolve_sync(&self, prompt: &str) -> Vec<ToolCall> {
        let lower = prompt.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.triggers.iter().any(|t| lower.contains(t)))
            .filter_map(|rule| (rule.build)(&lower))
            .collect()
    }
}

impl Default for RuleResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntentResolver for RuleResolver {
    async fn resolve(&self, prompt: &str) -> Result<Vec<ToolCall>, ResolverError> {
        Ok(self.resolve_sync(prompt))
    }
}
