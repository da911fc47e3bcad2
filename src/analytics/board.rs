//! Strategy board rollups.

use serde::Serialize;

use crate::generator::{Priority, StrategyRecord, StrategyStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: StrategyStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

/// Pipeline totals and distributions for the strategy page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyOverview {
    /// Sum of expected revenue across every strategy.
    pub total_pipeline: u64,
    pub in_progress: usize,
    pub completed: usize,
    /// Non-zero counts only, in status declaration order.
    pub by_status: Vec<StatusCount>,
    /// Non-zero counts only, in priority declaration order.
    pub by_priority: Vec<PriorityCount>,
}

pub fn strategy_overview(strategies: &[StrategyRecord]) -> StrategyOverview {
    let count_status =
        |status: StrategyStatus| strategies.iter().filter(|s| s.status == status).count();

    let by_status = StrategyStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: count_status(status),
        })
        .filter(|c| c.count > 0)
        .collect();

    let by_priority = Priority::ALL
        .into_iter()
        .map(|priority| PriorityCount {
            priority,
            count: strategies.iter().filter(|s| s.priority == priority).count(),
        })
        .filter(|c| c.count > 0)
        .collect();

    StrategyOverview {
        total_pipeline: strategies.iter().map(|s| s.expected_revenue).sum(),
        in_progress: count_status(StrategyStatus::InProgress),
        completed: count_status(StrategyStatus::Completed),
        by_status,
        by_priority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::catalog;

    #[test]
    fn overview_of_default_board() {
        let overview = strategy_overview(&catalog::strategies());
        assert_eq!(overview.total_pipeline, 645_000);
        assert_eq!(overview.in_progress, 2);
        assert_eq!(overview.completed, 1);

        // No strategy is on hold, so that bucket is omitted.
        assert_eq!(overview.by_status.len(), 3);
        assert!(
            overview
                .by_status
                .iter()
                .all(|c| c.status != StrategyStatus::OnHold)
        );

        let critical = overview
            .by_priority
            .iter()
            .find(|c| c.priority == Priority::Critical)
            .unwrap();
        assert_eq!(critical.count, 1);
        assert!(overview.by_priority.iter().all(|c| c.priority != Priority::Low));
    }

    #[test]
    fn empty_board() {
        let overview = strategy_overview(&[]);
        assert_eq!(overview.total_pipeline, 0);
        assert!(overview.by_status.is_empty());
        assert!(overview.by_priority.is_empty());
    }
}
