//! Usage aggregation: headline metrics, per-company growth, account
//! overview and health indicators.
//!
//! Companies are reported in the order they first appear in the input,
//! which for generator output is catalog order.

use serde::Serialize;

use crate::generator::UsageRecord;

/// Growth above this fraction is healthy.
const HEALTHY_GROWTH: f64 = 0.10;

/// Growth below this fraction is declining.
const DECLINING_GROWTH: f64 = -0.05;

// ---------------------------------------------------------------------------
// Aggregated types
// ---------------------------------------------------------------------------

/// Headline numbers for the usage page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageMetrics {
    pub total_api_calls: u64,
    /// Mean of every defined per-company growth rate.
    pub average_growth: Option<f64>,
    pub active_accounts: usize,
    pub total_revenue: f64,
}

/// First-to-latest period change for one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyGrowth {
    pub company: String,
    pub first_calls: u64,
    pub latest_calls: u64,
    /// `(latest - first) / first`. `None` when the first period had no calls.
    pub growth_rate: Option<f64>,
}

/// One row of the account overview table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub company: String,
    pub total_api_calls: u64,
    pub avg_monthly_calls: f64,
    pub total_revenue: f64,
    /// Highest use-case count seen in any period.
    pub use_cases: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthIndicator {
    #[serde(rename = "Healthy Growth")]
    HealthyGrowth,
    #[serde(rename = "Stable Usage")]
    StableUsage,
    #[serde(rename = "Declining Usage")]
    DecliningUsage,
}

impl HealthIndicator {
    /// Classify a growth rate. Undefined growth counts as stable.
    pub fn from_growth(growth: Option<f64>) -> Self {
        match growth {
            Some(g) if g > HEALTHY_GROWTH => Self::HealthyGrowth,
            Some(g) if g < DECLINING_GROWTH => Self::DecliningUsage,
            _ => Self::StableUsage,
        }
    }
}

impl std::fmt::Display for HealthIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HealthyGrowth => write!(f, "Healthy Growth"),
            Self::StableUsage => write!(f, "Stable Usage"),
            Self::DecliningUsage => write!(f, "Declining Usage"),
        }
    }
}

/// Health row for one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountHealth {
    pub company: String,
    pub current_usage: u64,
    pub growth_rate: Option<f64>,
    pub indicator: HealthIndicator,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Group rows by company, preserving first-appearance order, with each
/// group sorted by period.
fn group_by_company(records: &[UsageRecord]) -> Vec<(&str, Vec<&UsageRecord>)> {
    let mut groups: Vec<(&str, Vec<&UsageRecord>)> = Vec::new();

    for record in records {
        match groups.iter_mut().find(|(name, _)| *name == record.company) {
            Some((_, rows)) => rows.push(record),
            None => groups.push((record.company.as_str(), vec![record])),
        }
    }

    for (_, rows) in &mut groups {
        rows.sort_by_key(|r| r.period);
    }

    groups
}

fn growth_rate(first: u64, latest: u64) -> Option<f64> {
    if first == 0 {
        None
    } else {
        Some((latest as f64 - first as f64) / first as f64)
    }
}

/// Per-company growth from the earliest to the latest period.
pub fn company_growth(records: &[UsageRecord]) -> Vec<CompanyGrowth> {
    group_by_company(records)
        .into_iter()
        .filter_map(|(company, rows)| {
            let first = rows.first()?.api_calls;
            let latest = rows.last()?.api_calls;
            Some(CompanyGrowth {
                company: company.to_string(),
                first_calls: first,
                latest_calls: latest,
                growth_rate: growth_rate(first, latest),
            })
        })
        .collect()
}

/// Headline metrics across every row.
pub fn usage_metrics(records: &[UsageRecord]) -> UsageMetrics {
    let growth = company_growth(records);
    let rates: Vec<f64> = growth.iter().filter_map(|g| g.growth_rate).collect();
    let average_growth = if rates.is_empty() {
        None
    } else {
        Some(rates.iter().sum::<f64>() / rates.len() as f64)
    };

    UsageMetrics {
        total_api_calls: records.iter().map(|r| r.api_calls).sum(),
        average_growth,
        active_accounts: growth.len(),
        total_revenue: records.iter().map(|r| r.revenue).sum(),
    }
}

/// Totals and averages per company.
pub fn account_overview(records: &[UsageRecord]) -> Vec<AccountSummary> {
    group_by_company(records)
        .into_iter()
        .map(|(company, rows)| {
            let total_api_calls: u64 = rows.iter().map(|r| r.api_calls).sum();
            AccountSummary {
                company: company.to_string(),
                total_api_calls,
                avg_monthly_calls: total_api_calls as f64 / rows.len() as f64,
                total_revenue: rows.iter().map(|r| r.revenue).sum(),
                use_cases: rows.iter().map(|r| r.use_cases).max().unwrap_or(0),
            }
        })
        .collect()
}

/// Current usage, growth and health classification per company.
pub fn account_health(records: &[UsageRecord]) -> Vec<AccountHealth> {
    company_growth(records)
        .into_iter()
        .map(|g| AccountHealth {
            indicator: HealthIndicator::from_growth(g.growth_rate),
            company: g.company,
            current_usage: g.latest_calls,
            growth_rate: g.growth_rate,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Period;

    fn row(company: &str, month: u32, calls: u64) -> UsageRecord {
        UsageRecord {
            company: company.to_string(),
            period: Period::new(2024, month).unwrap(),
            api_calls: calls,
            revenue: calls as f64 * 0.001,
            use_cases: (month % 5 + 1) as u8,
        }
    }

    fn sample() -> Vec<UsageRecord> {
        vec![
            row("Up", 1, 100),
            row("Up", 2, 150),
            row("Up", 3, 200),
            row("Down", 1, 1000),
            row("Down", 2, 900),
            row("Down", 3, 800),
            row("Flat", 1, 500),
            row("Flat", 2, 510),
            row("Flat", 3, 490),
        ]
    }

    #[test]
    fn growth_uses_first_and_latest_period() {
        let growth = company_growth(&sample());
        assert_eq!(growth.len(), 3);
        assert_eq!(growth[0].company, "Up");
        assert!((growth[0].growth_rate.unwrap() - 1.0).abs() < 1e-12);
        assert!((growth[1].growth_rate.unwrap() + 0.2).abs() < 1e-12);
        assert!((growth[2].growth_rate.unwrap() + 0.02).abs() < 1e-12);
    }

    #[test]
    fn growth_ignores_input_order_within_company() {
        let mut rows = sample();
        rows.reverse();
        let growth = company_growth(&rows);
        // First appearance order follows the reversed input.
        assert_eq!(growth[0].company, "Flat");
        let up = growth.iter().find(|g| g.company == "Up").unwrap();
        assert_eq!(up.first_calls, 100);
        assert_eq!(up.latest_calls, 200);
    }

    #[test]
    fn zero_first_period_has_undefined_growth() {
        let rows = vec![row("New", 1, 0), row("New", 2, 40)];
        let growth = company_growth(&rows);
        assert!(growth[0].growth_rate.is_none());
        assert_eq!(
            HealthIndicator::from_growth(growth[0].growth_rate),
            HealthIndicator::StableUsage
        );
        assert!(usage_metrics(&rows).average_growth.is_none());
    }

    #[test]
    fn metrics_sum_every_row() {
        let metrics = usage_metrics(&sample());
        assert_eq!(metrics.total_api_calls, 4650);
        assert_eq!(metrics.active_accounts, 3);
        assert!((metrics.total_revenue - 4.65).abs() < 1e-9);
        let expected = (1.0 - 0.2 - 0.02) / 3.0;
        assert!((metrics.average_growth.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn overview_totals_per_company() {
        let overview = account_overview(&sample());
        assert_eq!(overview[0].total_api_calls, 450);
        assert!((overview[0].avg_monthly_calls - 150.0).abs() < 1e-12);
        assert_eq!(overview[1].use_cases, 4);
    }

    #[test]
    fn health_thresholds() {
        assert_eq!(
            HealthIndicator::from_growth(Some(0.11)),
            HealthIndicator::HealthyGrowth
        );
        assert_eq!(
            HealthIndicator::from_growth(Some(0.10)),
            HealthIndicator::StableUsage
        );
        assert_eq!(
            HealthIndicator::from_growth(Some(-0.05)),
            HealthIndicator::StableUsage
        );
        assert_eq!(
            HealthIndicator::from_growth(Some(-0.06)),
            HealthIndicator::DecliningUsage
        );
    }

    #[test]
    fn health_rows_follow_growth() {
        let health = account_health(&sample());
        assert_eq!(health[0].indicator, HealthIndicator::HealthyGrowth);
        assert_eq!(health[0].current_usage, 200);
        assert_eq!(health[1].indicator, HealthIndicator::DecliningUsage);
        assert_eq!(health[2].indicator, HealthIndicator::StableUsage);
    }

    #[test]
    fn empty_input_yields_empty_reports() {
        let metrics = usage_metrics(&[]);
        assert_eq!(metrics.total_api_calls, 0);
        assert_eq!(metrics.active_accounts, 0);
        assert!(account_overview(&[]).is_empty());
    }
}
