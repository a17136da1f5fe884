//! Allocation strategies and target weights

use serde::{Deserialize, Serialize};

/// Target allocation across asset classes, in percent of total value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub stocks: f64,
    pub bonds: f64,
    pub cash: f64,
}

impl Allocation {
    pub fn new(stocks: f64, bonds: f64, cash: f64) -> Self {
        Self {
            stocks,
            bonds,
            cash,
        }
    }
}

/// How aggressively the portfolio is weighted toward equities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationStrategy {
    Conservative,
    Balanced,
    Aggressive,
}

impl AllocationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStrategy::Conservative => "conservative",
            AllocationStrategy::Balanced => "balanced",
            AllocationStrategy::Aggressive => "aggressive",
        }
    }

    /// All strategies, in increasing risk order.
    pub fn all() -> &'static [AllocationStrategy] {
        &[
            AllocationStrategy::Conservative,
            AllocationStrategy::Balanced,
            AllocationStrategy::Aggressive,
        ]
    }

    /// Recognize a strategy named anywhere inside free text.
    pub fn parse(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|s| lower.contains(s.as_str()))
    }

    /// Target weights for this strategy.
    pub fn targets(&self) -> Allocation {
        match self {
            AllocationStrategy::Conservative => Allocation::new(30.0, 50.0, 20.0),
            AllocationStrategy::Balanced => Allocation::new(60.0, 30.0, 10.0),
            AllocationStrategy::Aggressive => Allocation::new(85.0, 10.0, 5.0),
        }
    }
}

impl std::fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_finds_strategy_in_free_text() {
        assert_eq!(
            AllocationStrategy::parse("rebalance to AGGRESSIVE please"),
            Some(AllocationStrategy::Aggressive)
        );
        assert_eq!(
            AllocationStrategy::parse("something conservative"),
            Some(AllocationStrategy::Conservative)
        );
        assert_eq!(AllocationStrategy::parse("no strategy here"), None);
    }

    #[test]
    fn targets_sum_to_one_hundred() {
        for strategy in AllocationStrategy::all() {
            let t = strategy.targets();
            assert!((t.stocks + t.bonds + t.cash - 100.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&AllocationStrategy::Balanced).unwrap();
        assert_eq!(json, "\"balanced\"");
    }
}
