//! Portfolio entities and operations

use super::strategy::{Allocation, AllocationStrategy};
use serde::{Deserialize, Serialize};

/// Broad asset class of a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Stocks,
    Bonds,
}

/// A single position in the portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub shares: f64,
    pub price: f64,
    pub class: AssetClass,
}

impl Holding {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        shares: f64,
        price: f64,
        class: AssetClass,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            shares,
            price,
            class,
        }
    }

    /// Market value of this position.
    pub fn value(&self) -> f64 {
        self.shares * self.price
    }
}

/// Mock performance figures for a reporting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Performance {
    pub period: String,
    pub growth_pct: f64,
    pub gain: f64,
}

/// The demo investment portfolio.
///
/// Lives for the process lifetime; every mutation happens inside a tool
/// executable while a run holds the single-run guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub cash: f64,
    pub holdings: Vec<Holding>,
    pub strategy: AllocationStrategy,
}

/// Reporting periods `performance` recognizes, with fixed mock growth.
const PERFORMANCE_TABLE: &[(&str, f64)] = &[
    ("1w", 0.4),
    ("1m", 1.8),
    ("3m", 4.2),
    ("ytd", 6.3),
    ("1y", 9.1),
];

impl Portfolio {
    pub fn new(cash: f64, holdings: Vec<Holding>, strategy: AllocationStrategy) -> Self {
        Self {
            cash,
            holdings,
            strategy,
        }
    }

    /// The starting portfolio every demo session begins with.
    pub fn seeded() -> Self {
        Self::new(
            12_500.0,
            vec![
                Holding::new(
                    "VTI",
                    "Vanguard Total Stock Market ETF",
                    40.0,
                    242.18,
                    AssetClass::Stocks,
                ),
                Holding::new("AAPL", "Apple Inc.", 25.0, 227.52, AssetClass::Stocks),
                Holding::new("MSFT", "Microsoft Corp.", 12.0, 415.30, AssetClass::Stocks),
                Holding::new(
                    "BND",
                    "Vanguard Total Bond Market ETF",
                    80.0,
                    73.44,
                    AssetClass::Bonds,
                ),
            ],
            AllocationStrategy::Balanced,
        )
    }

    /// Total market value: cash plus all positions.
    pub fn total_value(&self) -> f64 {
        self.cash + self.holdings.iter().map(Holding::value).sum::<f64>()
    }

    fn class_value(&self, class: AssetClass) -> f64 {
        self.holdings
            .iter()
            .filter(|h| h.class == class)
            .map(Holding::value)
            .sum()
    }

    /// Current allocation across classes, in percent of total value.
    pub fn allocation(&self) -> Allocation {
        let total = self.total_value();
        if total <= 0.0 {
            return Allocation::new(0.0, 0.0, 0.0);
        }
        let stocks = self.class_value(AssetClass::Stocks) / total * 100.0;
        let bonds = self.class_value(AssetClass::Bonds) / total * 100.0;
        Allocation::new(stocks, bonds, 100.0 - stocks - bonds)
    }

    /// Move the portfolio to the target weights of `strategy`.
    ///
    /// Positions within each class are scaled proportionally; a class with
    /// no positions leaves its target weight in cash. Total value is
    /// preserved. Returns the resulting allocation.
    pub fn rebalance(&mut self, strategy: AllocationStrategy) -> Allocation {
        let total = self.total_value();
        let targets = strategy.targets();

        for class in [AssetClass::Stocks, AssetClass::Bonds] {
            let current = self.class_value(class);
            if current <= 0.0 {
                continue;
            }
            let target = match class {
                AssetClass::Stocks => targets.stocks,
                AssetClass::Bonds => targets.bonds,
            } * total
                / 100.0;
            let factor = target / current;
            for holding in self.holdings.iter_mut().filter(|h| h.class == class) {
                holding.shares *= factor;
            }
        }

        self.cash = total
            - self.class_value(AssetClass::Stocks)
            - self.class_value(AssetClass::Bonds);
        self.strategy = strategy;
        self.allocation()
    }

    /// Add cash to the portfolio. Returns the new total value.
    pub fn deposit(&mut self, amount: f64) -> f64 {
        self.cash += amount;
        self.total_value()
    }

    /// Mock performance figures for a known period, `None` otherwise.
    pub fn performance(&self, period: &str) -> Option<Performance> {
        let growth_pct = PERFORMANCE_TABLE
            .iter()
            .find(|(p, _)| *p == period)
            .map(|(_, g)| *g)?;
        Some(Performance {
            period: period.to_string(),
            growth_pct,
            gain: round_cents(self.total_value() * growth_pct / 100.0),
        })
    }

    /// Periods `performance` accepts, for building argument schemas.
    pub fn performance_periods() -> Vec<&'static str> {
        PERFORMANCE_TABLE.iter().map(|(p, _)| *p).collect()
    }

    /// JSON summary used as the `getPortfolio` tool output.
    pub fn summary(&self) -> serde_json::Value {
        let allocation = self.allocation();
        serde_json::json!({
            "totalValue": round_cents(self.total_value()),
            "cash": round_cents(self.cash),
            "strategy": self.strategy,
            "allocation": {
                "stocks": round_pct(allocation.stocks),
                "bonds": round_pct(allocation.bonds),
                "cash": round_pct(allocation.cash),
            },
            "holdings": self.holdings.iter().map(|h| serde_json::json!({
                "symbol": h.symbol,
                "name": h.name,
                "shares": round_pct(h.shares),
                "price": h.price,
                "value": round_cents(h.value()),
            })).collect::<Vec<_>>(),
        })
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round_pct(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
