//! Dashboard analytics over generated datasets.
//!
//! - **reporter**: usage metrics, per-company growth, account overview,
//!   health indicators
//! - **board**: strategy pipeline and status/priority distributions
//!
//! Everything here is a pure function of its input tables.

pub mod board;
pub mod reporter;

pub use board::{StrategyOverview, strategy_overview};
pub use reporter::{
    AccountHealth, AccountSummary, CompanyGrowth, HealthIndicator, UsageMetrics, account_health,
    account_overview, company_growth, usage_metrics,
};
