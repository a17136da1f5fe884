//! Portfolio tools: the demo application logic behind the registry.
//!
//! All five tools share one [`Portfolio`] behind a mutex. They are the only
//! code that mutates it, and because at most one run (and thus one tool
//! execution) is in flight, contention never occurs in practice.

use async_trait::async_trait;
use relay_application::{ToolExecutable, ToolRegistry};
use relay_domain::{
    AllocationStrategy, Portfolio, ToolCall, ToolDefinition, ToolError, ToolParameter,
};
use std::sync::{Arc, Mutex, MutexGuard};

pub const GET_PORTFOLIO: &str = "getPortfolio";
pub const GET_PERFORMANCE: &str = "getPerformance";
pub const REBALANCE_PORTFOLIO: &str = "rebalancePortfolio";
pub const DEPOSIT_FUNDS: &str = "depositFunds";
pub const GET_MARKET_SUMMARY: &str = "getMarketSummary";

/// The application state shared by every portfolio tool.
pub type SharedPortfolio = Arc<Mutex<Portfolio>>;

fn lock(state: &SharedPortfolio) -> Result<MutexGuard<'_, Portfolio>, ToolError> {
    state
        .lock()
        .map_err(|_| ToolError::execution_failed("portfolio state lock poisoned"))
}

struct GetPortfolioTool {
    state: SharedPortfolio,
}

#[async_trait]
impl ToolExecutable for GetPortfolioTool {
    async fn run(&self, _call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        Ok(lock(&self.state)?.summary())
    }
}

struct GetPerformanceTool {
    state: SharedPortfolio,
}

#[async_trait]
impl ToolExecutable for GetPerformanceTool {
    async fn run(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        let period = call.get_string("period").unwrap_or("1m");
        let portfolio = lock(&self.state)?;
        let performance = portfolio.performance(period).ok_or_else(|| {
            ToolError::invalid_argument(format!(
                "Unknown period '{period}', expected one of: {}",
                Portfolio::performance_periods().join(", ")
            ))
        })?;
        serde_json::to_value(&performance)
            .map_err(|e| ToolError::execution_failed(e.to_string()))
    }
}

struct RebalancePortfolioTool {
    state: SharedPortfolio,
}

#[async_trait]
impl ToolExecutable for RebalancePortfolioTool {
    async fn run(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        let requested = call
            .require_string("strategy")
            .map_err(ToolError::invalid_argument)?;
        let strategy = AllocationStrategy::parse(requested).ok_or_else(|| {
            ToolError::invalid_argument(format!(
                "Unknown strategy '{requested}', expected conservative, balanced, or aggressive"
            ))
        })?;

        let mut portfolio = lock(&self.state)?;
        let allocation = portfolio.rebalance(strategy);
        Ok(serde_json::json!({
            "strategy": strategy,
            "allocation": allocation,
            "totalValue": portfolio.total_value(),
        }))
    }
}

struct DepositFundsTool {
    state: SharedPortfolio,
}

#[async_trait]
impl ToolExecutable for DepositFundsTool {
    async fn run(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        let amount = call
            .require_f64("amount")
            .map_err(ToolError::invalid_argument)?;
        if amount <= 0.0 {
            return Err(ToolError::invalid_argument(
                "deposit amount must be positive",
            ));
        }

        let mut portfolio = lock(&self.state)?;
        let total = portfolio.deposit(amount);
        Ok(serde_json::json!({
            "deposited": amount,
            "cash": portfolio.cash,
            "totalValue": total,
        }))
    }
}

struct GetMarketSummaryTool;

#[async_trait]
impl ToolExecutable for GetMarketSummaryTool {
    async fn run(&self, _call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        // Static mock data, same shape a market-data feed would return.
        Ok(serde_json::json!({
            "indices": [
                { "name": "S&P 500", "level": 6112.4, "changePct": 0.6 },
                { "name": "Nasdaq", "level": 19873.1, "changePct": 1.1 },
                { "name": "Dow Jones", "level": 44210.7, "changePct": -0.2 },
            ],
            "headline": "Markets mixed as tech extends its rally.",
        }))
    }
}

fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            GET_PORTFOLIO,
            "Current portfolio: holdings, cash, total value, and allocation",
        ),
        ToolDefinition::new(GET_PERFORMANCE, "Portfolio performance over a period")
            .with_parameter(
                ToolParameter::new("period", "Reporting period", false)
                    .with_allowed_values(Portfolio::performance_periods()),
            ),
        ToolDefinition::new(
            REBALANCE_PORTFOLIO,
            "Rebalance the portfolio to a target allocation strategy",
        )
        .with_parameter(
            ToolParameter::new("strategy", "Target allocation strategy", true)
                .with_allowed_values(
                    AllocationStrategy::all().iter().map(|s| s.as_str()),
                ),
        ),
        ToolDefinition::new(DEPOSIT_FUNDS, "Add cash to the portfolio").with_parameter(
            ToolParameter::new("amount", "Dollar amount to deposit", true).with_type("number"),
        ),
        ToolDefinition::new(GET_MARKET_SUMMARY, "Today's market indices and headline"),
    ]
}

/// Register the full portfolio toolset against `state`.
pub fn register_portfolio_tools(
    registry: &dyn ToolRegistry,
    state: SharedPortfolio,
) -> Result<(), ToolError> {
    for definition in definitions() {
        let executable: Arc<dyn ToolExecutable> = match definition.name.as_str() {
            GET_PORTFOLIO => Arc::new(GetPortfolioTool {
                state: state.clone(),
            }),
            GET_PERFORMANCE => Arc::new(GetPerformanceTool {
                state: state.clone(),
            }),
            REBALANCE_PORTFOLIO => Arc::new(RebalancePortfolioTool {
                state: state.clone(),
            }),
            DEPOSIT_FUNDS => Arc::new(DepositFundsTool {
                state: state.clone(),
            }),
            _ => Arc::new(GetMarketSummaryTool),
        };
        registry.register(definition, executable)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InMemoryToolRegistry;
    use relay_application::{
        AgentRuntime, CollectingSink, NoPacing, RuleResolver,
    };
    use relay_domain::{RunEventKind, RunStatus};

    fn demo_setup() -> (Arc<InMemoryToolRegistry>, SharedPortfolio) {
        let registry = Arc::new(InMemoryToolRegistry::new());
        let state: SharedPortfolio = Arc::new(Mutex::new(Portfolio::seeded()));
        register_portfolio_tools(registry.as_ref(), state.clone()).unwrap();
        (registry, state)
    }

    fn demo_runtime(
        registry: Arc<InMemoryToolRegistry>,
        sink: Arc<CollectingSink>,
    ) -> AgentRuntime {
        AgentRuntime::new(registry, Arc::new(RuleResolver::new()), sink)
            .with_pacing(Arc::new(NoPacing))
    }

    #[test]
    fn every_rule_target_is_registered() {
        let (registry, _state) = demo_setup();
        for name in RuleResolver::new().tool_names() {
            assert!(registry.has_tool(&name), "rule targets missing tool {name}");
        }
    }

    #[test]
    fn listing_preserves_registration_order() {
        let (registry, _state) = demo_setup();
        let names: Vec<_> = registry.list().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                GET_PORTFOLIO,
                GET_PERFORMANCE,
                REBALANCE_PORTFOLIO,
                DEPOSIT_FUNDS,
                GET_MARKET_SUMMARY,
            ]
        );
    }

    #[tokio::test]
    async fn show_my_portfolio_end_to_end() {
        let (registry, _state) = demo_setup();
        let sink = Arc::new(CollectingSink::new());
        let runtime = demo_runtime(registry, sink.clone());

        let outcome = runtime.process_prompt("show my portfolio").await.unwrap();

        assert_eq!(outcome.status, RunStatus::Completed);
        assert_eq!(outcome.outcomes.len(), 1);
        assert_eq!(outcome.outcomes[0].call.tool_name, GET_PORTFOLIO);
        assert!(outcome.outcomes[0].call.arguments.is_empty());
        assert!(outcome.response.contains(GET_PORTFOLIO));

        let events = sink.snapshot();
        let result_json = events
            .iter()
            .find_map(|event| match &event.kind {
                RunEventKind::ToolCallResult { result_json, .. } => Some(result_json.clone()),
                _ => None,
            })
            .expect("a tool-call-result event");
        let payload: serde_json::Value = serde_json::from_str(&result_json).unwrap();
        assert!(payload["totalValue"].as_f64().unwrap() > 0.0);

        match &events.last().unwrap().kind {
            RunEventKind::RunFinished { status, .. } => {
                assert_eq!(*status, RunStatus::Completed);
            }
            other => panic!("expected run-finished, got {}", other.name()),
        }
    }

    #[tokio::test]
    async fn rebalance_to_aggressive_mutates_tracked_state() {
        let (registry, state) = demo_setup();
        let sink = Arc::new(CollectingSink::new());
        let runtime = demo_runtime(registry, sink.clone());

        let outcome = runtime
            .process_prompt("rebalance to aggressive")
            .await
            .unwrap();

        assert_eq!(outcome.outcomes.len(), 1);
        let result = &outcome.outcomes[0].result;
        assert!(result.is_success());

        // The returned result reflects the new allocation...
        let output = result.output().unwrap();
        assert_eq!(output["strategy"], "aggressive");
        assert!((output["allocation"]["stocks"].as_f64().unwrap() - 85.0).abs() < 0.1);

        // ...and the tracked state actually changed.
        let portfolio = state.lock().unwrap();
        assert_eq!(portfolio.strategy, AllocationStrategy::Aggressive);
        assert!((portfolio.allocation().stocks - 85.0).abs() < 0.1);
    }

    #[tokio::test]
    async fn deposit_rejects_non_positive_amounts() {
        let (registry, _state) = demo_setup();
        let call = ToolCall::new(DEPOSIT_FUNDS).with_arg("amount", -50.0);
        let result = registry.execute(&call).await;

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn deposit_adds_cash() {
        let (registry, state) = demo_setup();
        let before = state.lock().unwrap().total_value();

        let call = ToolCall::new(DEPOSIT_FUNDS).with_arg("amount", 1000.0);
        let result = registry.execute(&call).await;

        assert!(result.is_success());
        assert_eq!(result.output().unwrap()["deposited"], 1000.0);
        let after = state.lock().unwrap().total_value();
        assert!((after - before - 1000.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn performance_rejects_unknown_period() {
        let (registry, _state) = demo_setup();
        let call = ToolCall::new(GET_PERFORMANCE).with_arg("period", "5y");
        let result = registry.execute(&call).await;

        assert!(!result.is_success());
        let error = result.error().unwrap();
        assert_eq!(error.code, "INVALID_ARGUMENT");
        assert!(error.message.contains("5y"));
    }

    #[tokio::test]
    async fn performance_defaults_to_one_month() {
        let (registry, _state) = demo_setup();
        let result = registry.execute(&ToolCall::new(GET_PERFORMANCE)).await;

        assert!(result.is_success());
        assert_eq!(result.output().unwrap()["period"], "1m");
    }

    #[tokio::test]
    async fn rebalance_requires_a_known_strategy() {
        let (registry, _state) = demo_setup();

        let missing = registry.execute(&ToolCall::new(REBALANCE_PORTFOLIO)).await;
        assert_eq!(missing.error().unwrap().code, "INVALID_ARGUMENT");

        let unknown = registry
            .execute(&ToolCall::new(REBALANCE_PORTFOLIO).with_arg("strategy", "yolo"))
            .await;
        assert_eq!(unknown.error().unwrap().code, "INVALID_ARGUMENT");
        assert!(unknown.error().unwrap().message.contains("yolo"));
    }

    #[tokio::test]
    async fn market_summary_returns_indices() {
        let (registry, _state) = demo_setup();
        let result = registry.execute(&ToolCall::new(GET_MARKET_SUMMARY)).await;

        assert!(result.is_success());
        assert_eq!(result.output().unwrap()["indices"].as_array().unwrap().len(), 3);
    }
}
