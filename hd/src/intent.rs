//! Intent extraction
//!
//! Two independent signals are read from every message: a deterministic,
//! regex-based budget amount, and the category the Reasoner assigns to the
//! message. The router merges both into state in a fixed order.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Vocabulary that makes a message eligible for budget extraction
const BUDGET_KEYWORDS: [&str; 7] = ["budget", "afford", "spend", "$", "dollar", "cost limit", "max cost"];

/// How a matched pattern is turned into an amount
#[derive(Debug, Clone, Copy)]
enum AmountShape {
    /// `$500,000` - strip the symbol and separators
    CurrencyPrefixed,
    /// `500k` - first capture times 1000
    Thousands,
    /// `800000 CAD` - first capture as-is
    BareDigits,
    /// `500,000` - both captures concatenated
    GroupedPair,
}

/// Extraction patterns in priority order; the first one that matches wins
static BUDGET_PATTERNS: LazyLock<Vec<(Regex, AmountShape)>> = LazyLock::new(|| {
    [
        (r"\$[\d,]+", AmountShape::CurrencyPrefixed),
        (r"(\d+)k", AmountShape::Thousands),
        (r"(\d{6,7})\s*(?:CAD|USD|\$|dollars?)?", AmountShape::BareDigits),
        (r"(\d+),(\d{3})", AmountShape::GroupedPair),
    ]
    .into_iter()
    .map(|(pattern, shape)| (Regex::new(pattern).expect("budget pattern is valid"), shape))
    .collect()
});

/// True when the message uses budget vocabulary
pub fn mentions_budget(message: &str) -> bool {
    let lower = message.to_lowercase();
    BUDGET_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Extract a budget amount from a message
///
/// Only messages that mention budget vocabulary are considered. Patterns are
/// tried in priority order; a pattern whose first match cannot be parsed is
/// skipped, and the first one that parses wins even if the value looks odd.
pub fn extract_budget(message: &str) -> Option<f64> {
    debug!(message_len = message.len(), "extract_budget: called");
    if !mentions_budget(message) {
        debug!("extract_budget: no budget vocabulary");
        return None;
    }

    for (regex, shape) in BUDGET_PATTERNS.iter() {
        let Some(caps) = regex.captures(message) else {
            continue;
        };

        let parsed = match shape {
            AmountShape::CurrencyPrefixed => caps[0].replace(['$', ','], "").parse::<f64>().ok(),
            AmountShape::Thousands => caps[1].parse::<f64>().ok().map(|n| n * 1000.0),
            AmountShape::BareDigits => caps[1].parse::<f64>().ok(),
            AmountShape::GroupedPair => format!("{}{}", &caps[1], &caps[2]).parse::<f64>().ok(),
        };

        match parsed {
            Some(amount) => {
                debug!(?shape, %amount, "extract_budget: matched");
                return Some(amount);
            }
            None => debug!(?shape, "extract_budget: match did not parse, trying next pattern"),
        }
    }

    debug!("extract_budget: no amount found");
    None
}

/// Category of a user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ModifyFloorplan,
    AskQuestion,
    SetBudget,
    Other,
}

impl Intent {
    pub const ALL: [Intent; 4] = [Self::ModifyFloorplan, Self::AskQuestion, Self::SetBudget, Self::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModifyFloorplan => "modify_floorplan",
            Self::AskQuestion => "ask_question",
            Self::SetBudget => "set_budget",
            Self::Other => "other",
        }
    }

    /// Coerce a classification reply into an intent
    ///
    /// The reply must be exactly one category token (surrounding whitespace
    /// and case are ignored); anything else is `Other`.
    pub fn from_reply(reply: &str) -> Self {
        let token = reply.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str() == token)
            .unwrap_or(Self::Other)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
