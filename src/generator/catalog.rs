//! Fixed seed catalogs.
//!
//! The strategy board is returned as-is. Executive and account-planning
//! seeds carry baselines that the generators perturb per run.

use super::records::{InfluenceLevel, Priority, StrategyRecord, StrategyStatus};

// ---------------------------------------------------------------------------
// Strategy board
// ---------------------------------------------------------------------------

struct StrategySeed {
    account: &'static str,
    strategy: &'static str,
    status: StrategyStatus,
    priority: Priority,
    expected_revenue: u64,
    timeline: &'static str,
    stakeholder: &'static str,
    description: &'static str,
}

const STRATEGIES: &[StrategySeed] = &[
    StrategySeed {
        account: "Acme Corp",
        strategy: "Expand AI-Powered Analytics",
        status: StrategyStatus::InProgress,
        priority: Priority::High,
        expected_revenue: 150_000,
        timeline: "Q2 2024",
        stakeholder: "Sarah Chen (CTO)",
        description: "Implement advanced analytics using Claude API for customer insights",
    },
    StrategySeed {
        account: "Zenith PLC",
        strategy: "Optimize Document Processing",
        status: StrategyStatus::Planning,
        priority: Priority::Critical,
        expected_revenue: 80_000,
        timeline: "Q1 2024",
        stakeholder: "Jennifer Kim (CEO)",
        description: "Address declining usage with new document processing use case",
    },
    StrategySeed {
        account: "Global Dynamics",
        strategy: "Launch Customer Service Bot",
        status: StrategyStatus::Completed,
        priority: Priority::Medium,
        expected_revenue: 120_000,
        timeline: "Q1 2024",
        stakeholder: "David Thompson (CTO)",
        description: "Successfully implemented AI-powered customer service solution",
    },
    StrategySeed {
        account: "TechStart Inc",
        strategy: "Content Generation Platform",
        status: StrategyStatus::InProgress,
        priority: Priority::High,
        expected_revenue: 200_000,
        timeline: "Q3 2024",
        stakeholder: "Alex Rodriguez (VP Product)",
        description: "Building automated content generation for marketing materials",
    },
    StrategySeed {
        account: "DataFlow Ltd",
        strategy: "Data Analysis Automation",
        status: StrategyStatus::Planning,
        priority: Priority::Medium,
        expected_revenue: 95_000,
        timeline: "Q2 2024",
        stakeholder: "Lisa Wang (VP Engineering)",
        description: "Automate data analysis workflows using Claude API",
    },
];

/// The hand-authored strategy board, freshly allocated.
pub fn strategies() -> Vec<StrategyRecord> {
    STRATEGIES
        .iter()
        .map(|s| StrategyRecord {
            account: s.account.to_string(),
            strategy: s.strategy.to_string(),
            status: s.status,
            priority: s.priority,
            expected_revenue: s.expected_revenue,
            timeline: s.timeline.to_string(),
            stakeholder: s.stakeholder.to_string(),
            description: s.description.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Executives
// ---------------------------------------------------------------------------

pub(crate) struct ExecutiveSeed {
    pub name: &'static str,
    pub title: &'static str,
    pub company: &'static str,
    pub baseline_score: i64,
    pub baseline_initiatives: i64,
    pub influence_level: InfluenceLevel,
    pub decision_maker: bool,
}

pub(crate) const EXECUTIVES: &[ExecutiveSeed] = &[
    ExecutiveSeed {
        name: "Sarah Chen",
        title: "CTO",
        company: "Acme Corp",
        baseline_score: 88,
        baseline_initiatives: 4,
        influence_level: InfluenceLevel::High,
        decision_maker: true,
    },
    ExecutiveSeed {
        name: "Marcus Webb",
        title: "VP Data Science",
        company: "Acme Corp",
        baseline_score: 72,
        baseline_initiatives: 2,
        influence_level: InfluenceLevel::Medium,
        decision_maker: false,
    },
    ExecutiveSeed {
        name: "Jennifer Kim",
        title: "CEO",
        company: "Zenith PLC",
        baseline_score: 46,
        baseline_initiatives: 1,
        influence_level: InfluenceLevel::High,
        decision_maker: true,
    },
    ExecutiveSeed {
        name: "Tom Hargreaves",
        title: "Head of Operations",
        company: "Zenith PLC",
        baseline_score: 55,
        baseline_initiatives: 0,
        influence_level: InfluenceLevel::Medium,
        decision_maker: false,
    },
    ExecutiveSeed {
        name: "David Thompson",
        title: "CTO",
        company: "Global Dynamics",
        baseline_score: 92,
        baseline_initiatives: 3,
        influence_level: InfluenceLevel::High,
        decision_maker: true,
    },
    ExecutiveSeed {
        name: "Priya Nair",
        title: "Director of Customer Experience",
        company: "Global Dynamics",
        baseline_score: 80,
        baseline_initiatives: 2,
        influence_level: InfluenceLevel::Medium,
        decision_maker: false,
    },
    ExecutiveSeed {
        name: "Alex Rodriguez",
        title: "VP Product",
        company: "TechStart Inc",
        baseline_score: 78,
        baseline_initiatives: 5,
        influence_level: InfluenceLevel::High,
        decision_maker: true,
    },
    ExecutiveSeed {
        name: "Emily Foster",
        title: "Head of Marketing",
        company: "TechStart Inc",
        baseline_score: 64,
        baseline_initiatives: 1,
        influence_level: InfluenceLevel::Low,
        decision_maker: false,
    },
    ExecutiveSeed {
        name: "Lisa Wang",
        title: "VP Engineering",
        company: "DataFlow Ltd",
        baseline_score: 70,
        baseline_initiatives: 3,
        influence_level: InfluenceLevel::High,
        decision_maker: true,
    },
    ExecutiveSeed {
        name: "Omar Haddad",
        title: "Data Platform Lead",
        company: "DataFlow Ltd",
        baseline_score: 61,
        baseline_initiatives: 1,
        influence_level: InfluenceLevel::Medium,
        decision_maker: false,
    },
];

// ---------------------------------------------------------------------------
// Account planning
// ---------------------------------------------------------------------------

pub(crate) struct AccountSeed {
    pub account: &'static str,
    pub baseline_health: i64,
    pub baseline_growth: f64,
    pub baseline_initiatives: i64,
    pub expansion_opportunities: &'static str,
    pub next_quarter_goal: &'static str,
    pub key_stakeholders: &'static str,
}

pub(crate) const ACCOUNTS: &[AccountSeed] = &[
    AccountSeed {
        account: "Acme Corp",
        baseline_health: 86,
        baseline_growth: 0.35,
        baseline_initiatives: 4,
        expansion_opportunities: "Customer insights, Sales forecasting",
        next_quarter_goal: "Roll analytics out to EMEA business units",
        key_stakeholders: "Sarah Chen, Marcus Webb",
    },
    AccountSeed {
        account: "Zenith PLC",
        baseline_health: 42,
        baseline_growth: -0.18,
        baseline_initiatives: 1,
        expansion_opportunities: "Document processing, Contract review",
        next_quarter_goal: "Stabilize usage with document processing pilot",
        key_stakeholders: "Jennifer Kim, Tom Hargreaves",
    },
    AccountSeed {
        account: "Global Dynamics",
        baseline_health: 81,
        baseline_growth: 0.12,
        baseline_initiatives: 3,
        expansion_opportunities: "Agent assist, Knowledge base search",
        next_quarter_goal: "Expand customer service bot to voice channel",
        key_stakeholders: "David Thompson, Priya Nair",
    },
    AccountSeed {
        account: "TechStart Inc",
        baseline_health: 74,
        baseline_growth: 0.28,
        baseline_initiatives: 5,
        expansion_opportunities: "Content generation, Localization",
        next_quarter_goal: "Launch content platform to all marketing teams",
        key_stakeholders: "Alex Rodriguez, Emily Foster",
    },
    AccountSeed {
        account: "DataFlow Ltd",
        baseline_health: 63,
        baseline_growth: 0.05,
        baseline_initiatives: 2,
        expansion_opportunities: "Data analysis automation, Report drafting",
        next_quarter_goal: "Automate weekly reporting workflow",
        key_stakeholders: "Lisa Wang, Omar Haddad",
    },
];
